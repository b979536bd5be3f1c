use chrono::NaiveDate;

use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::bbox::{self, Bbox};
use crate::sat_bands::Satellites;

pub mod error;
pub use error::ConfigError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One reflectance measurement, keyed by sensor wavelength (nm)
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: String,
    pub date: NaiveDate,
    pub lon: f64,
    pub lat: f64,
    pub rrs: BTreeMap<u32, f64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    sensor: Satellites,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    bbox: Option<Bbox>,
    output: Option<String>,
    samples: Vec<Sample>,
}

fn parse_date<E: Error>(value: &str, field: &str) -> Result<NaiveDate, E> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        let reason = ConfigError::from(e);
        E::custom(format!("Invalid {} format: {}", field, reason))
    })
}

// This function deserializes a Config object from a deserializer, ensuring the dates are valid and
// in order, the bbox is well formed and every sample has a unique id and a valid position.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            sensor: Satellites,
            start_date: Option<String>,
            end_date: Option<String>,
            bbox: Option<BboxHelper>,
            output: Option<String>,
            samples: Vec<SampleHelper>,
        }

        #[derive(Deserialize)]
        struct BboxHelper {
            xmin: f64,
            xmax: f64,
            ymin: f64,
            ymax: f64,
        }

        #[derive(Deserialize)]
        struct SampleHelper {
            id: String,
            date: String,
            lon: f64,
            lat: f64,
            rrs: BTreeMap<u32, f64>,
        }

        // Deserialize into the helper struct
        let helper = ConfigHelper::deserialize(deserializer)?;

        let start_date = helper
            .start_date
            .as_deref()
            .map(|d| parse_date::<D::Error>(d, "start_date"))
            .transpose()?;
        let end_date = helper
            .end_date
            .as_deref()
            .map(|d| parse_date::<D::Error>(d, "end_date"))
            .transpose()?;

        // Ensure start_date is before end_date
        if let (Some(start), Some(end)) = (start_date, end_date)
            && start > end
        {
            return Err(D::Error::custom(ConfigError::DateOrder));
        }

        // Validate bbox if present
        let bbox = if let Some(bbox_helper) = helper.bbox {
            Some(
                Bbox::new(
                    bbox_helper.xmin,
                    bbox_helper.xmax,
                    bbox_helper.ymin,
                    bbox_helper.ymax,
                )
                .map_err(|e| D::Error::custom(format!("Invalid bbox: {}", e)))?,
            )
        } else {
            None
        };

        if helper.samples.is_empty() {
            return Err(D::Error::custom(ConfigError::NoSamples));
        }

        let mut seen = HashSet::new();
        let mut samples = Vec::with_capacity(helper.samples.len());
        for sample in helper.samples {
            if !seen.insert(sample.id.clone()) {
                return Err(D::Error::custom(ConfigError::DuplicateSample(sample.id)));
            }

            bbox::validate_position(sample.lon, sample.lat).map_err(|source| {
                D::Error::custom(ConfigError::SamplePosition {
                    id: sample.id.clone(),
                    source,
                })
            })?;

            let field = format!("date of sample '{}'", sample.id);
            let date = parse_date::<D::Error>(&sample.date, &field)?;

            samples.push(Sample {
                id: sample.id,
                date,
                lon: sample.lon,
                lat: sample.lat,
                rrs: sample.rrs,
            });
        }

        Ok(Config {
            sensor: helper.sensor,
            start_date,
            end_date,
            bbox,
            output: helper.output,
            samples,
        })
    }
}

impl Config {
    pub fn new(sensor: Satellites, samples: Vec<Sample>) -> Self {
        Self {
            sensor,
            start_date: None,
            end_date: None,
            bbox: None,
            output: None,
            samples,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_date_window(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub fn with_bbox(mut self, bbox: Bbox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn sensor(&self) -> Satellites {
        self.sensor
    }

    pub fn bbox(&self) -> Option<&Bbox> {
        self.bbox.as_ref()
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// True when `date` lies in the configured window (bounds included)
    pub fn in_date_window(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }

    /// True when the sample passes both the date window and the bbox
    pub fn selects(&self, sample: &Sample) -> bool {
        self.in_date_window(sample.date)
            && self
                .bbox
                .as_ref()
                .is_none_or(|bbox| bbox.contains(sample.lon, sample.lat))
    }
}
