use crate::iop::{Band, Spectrum};
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Satellites {
    #[value(name = "seawifs")]
    SeaWiFS,
    Modis,
}

#[derive(Debug, Error, PartialEq)]
pub enum SatBandError {
    #[error("{sensor} reflectance at {wavelength}nm is required for the {band} band")]
    MissingBand {
        sensor: Satellites,
        wavelength: u32,
        band: Band,
    },
}

#[derive(Debug)]
pub struct SatBands {
    sensor: Satellites,
    wavelengths: &'static [u32],
}

impl SatBands {
    pub fn new(sensor: Satellites) -> Self {
        let wavelengths: &'static [u32] = match sensor {
            // Bands 1, 2, 3, 4, 5 and 6
            Satellites::SeaWiFS => &[412, 443, 490, 510, 555, 670],
            // Bands 8, 9, 10, 11, 12 and 13
            Satellites::Modis => &[412, 443, 488, 531, 547, 667],
        };
        Self {
            sensor,
            wavelengths,
        }
    }

    pub fn sensor(&self) -> Satellites {
        self.sensor
    }

    pub fn wavelengths(&self) -> &[u32] {
        self.wavelengths
    }

    /// Sensor wavelength nearest to `target`; ties keep the shorter wavelength
    pub fn closest_band(&self, target: u32) -> u32 {
        self.wavelengths
            .iter()
            .copied()
            .min_by_key(|w| w.abs_diff(target))
            .unwrap_or(target)
    }

    /// Sensor wavelength read for each QAA band
    pub fn band_mapping(&self) -> Spectrum<u32> {
        Spectrum::from_fn(|band| self.closest_band(band.wavelength()))
    }

    /// Builds the QAA input from reflectance keyed by sensor wavelength (nm).
    ///
    /// Extra wavelengths in `rrs` are ignored.
    pub fn spectrum(&self, rrs: &BTreeMap<u32, f64>) -> Result<Spectrum<f64>, SatBandError> {
        let mapping = self.band_mapping();
        let mut spectrum = Spectrum::default();

        for (band, &wavelength) in mapping.bands() {
            spectrum[band] = *rrs.get(&wavelength).ok_or(SatBandError::MissingBand {
                sensor: self.sensor,
                wavelength,
                band,
            })?;
        }

        Ok(spectrum)
    }
}

impl Display for Satellites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Satellites::SeaWiFS => write!(f, "SeaWiFS"),
            Satellites::Modis => write!(f, "MODIS"),
        }
    }
}

impl Display for SatBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Satellite: {}, Wavelengths: {:?}",
            self.sensor, self.wavelengths
        )
    }
}
