//! Quasi-Analytical Algorithm (QAA v6) for Ocean Color Remote Sensing
//!
//! This module provides a Rust implementation of the Quasi-Analytical Algorithm (QAA) version 6,
//! closely following the NASA Ocean Color Science Software (OCSSW) reference implementation.
//!
//! ## NASA OCSSW Reference Implementation
//!
//! - **Reference URL**: <https://oceancolor.gsfc.nasa.gov/docs/ocssw/qaa_8c_source.html>
//! - **Algorithm Version**: QAA v6
//! - **Wavelengths**: Standard NASA wavelengths [410, 443, 490, 555, 670] nm
//!
//! ## Algorithm Overview
//!
//! The QAA algorithm derives inherent optical properties (IOPs) from remote sensing
//! reflectance measurements:
//!
//! 1. **Step 0**: Convert remote sensing reflectance (Rrs) to below-water reflectance
//! 2. **Step 1**: Calculate u parameter (bb / (a + bb))
//! 3. **Step 2**: Determine reference absorption coefficient at 555nm
//! 4. **Step 3**: Calculate reference particulate backscattering coefficient
//! 5. **Step 4**: Derive spectral slope Y for particulate backscattering
//! 6. **Step 5**: Propagate backscattering to all bands
//! 7. **Step 6**: Calculate total absorption
//! 8. **Steps 7-9**: Decompose absorption into phytoplankton and CDOM+detrital components,
//!    with a second pass when aph/a at 443nm is implausible
//! 9. **Step 10**: Derive chlorophyll-a from aph at 443nm
//!
//! Each stage feeds the next, so the order, the constants and the clamping policy below are
//! those of the reference program. Quality problems never abort the computation: they are
//! repaired locally and recorded in [`QaaFlags`].
//!
//! ## Non-finite inputs
//!
//! Two operations are left unguarded, as in the reference: the square root of stage 1
//! (negative radicand for strongly negative reflectance) and the division by `u` in stage 6
//! (`u == 0` for zero reflectance). The resulting NaN or infinity propagates to every quantity
//! that depends on it. [`compute`] still returns a result; chlorophyll then falls back to 0 with
//! [`QaaFlag::ChlaUndefined`].
//!
//! ## References
//!
//! - Lee, Z., Carder, K. L., & Arnone, R. A. (2002). Deriving inherent optical properties
//!   from water color: a multiband quasi-analytical algorithm for optically deep waters.
//!   *Applied Optics*, 41(27), 5755-5772.
//! - NASA Ocean Color Science Software (OCSSW) QAA implementation
//!
//! ## Usage Example
//!
//! ```rust
//! use qaa::iop::{Spectrum, compute};
//!
//! let rrs = Spectrum::new([0.001974, 0.002570, 0.002974, 0.001670, 0.000324]);
//!
//! let result = compute(rrs);
//! println!("Chlorophyll-a: {:.3} mg/m3", result.chla());
//! ```

use crate::iop::constants::{
    ACOEFS, APH_FLOOR, APH_RATIO_MAX, APH_RATIO_MIN, APHSTAR, AW, BBP_REF_FLOOR, BBW,
    DECOMPOSITION_EPSILON, G0, G1, LAMBDA, REFERENCE_BAND, RRS_GAMMA_Q, RRS_T, Y_MAX, Y_MIN,
};
use crate::iop::flags::{QaaFlag, QaaFlags};
use crate::iop::spectrum::{Band, Spectrum};
use log::debug;
use serde::Serialize;
use std::fmt;

pub const QAA_VERSION: &str = "QAA v6";

/// QAA algorithm results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaaResult {
    version: &'static str,
    wavelengths: Spectrum<f64>, // Wavelengths [nm]
    rrs: Spectrum<f64>,         // Below-water reflectance [sr^-1]
    u: Spectrum<f64>,           // U-ratio [dimensionless]
    a: Spectrum<f64>,           // Total absorption [m^-1]
    aph: Spectrum<f64>,         // Phytoplankton absorption [m^-1]
    adg: Spectrum<f64>,         // CDOM (detrital+dissolved) absorption [m^-1]
    bb: Spectrum<f64>,          // Total backscattering [m^-1]
    bbp: Spectrum<f64>,         // Particulate backscattering [m^-1]
    chla: f64,                  // Chla [mg/m^3]
    flags: QaaFlags,
    reference_wl_idx: usize,
    spectral_slope_y: f64, // Spectral slope Y for bbp
    spectral_slope_s: f64, // Spectral slope S for adg
    aph_ratio_443: f64,    // aph/a ratio at 443nm in effect after the proportion check
}

impl QaaResult {
    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn wavelengths(&self) -> &Spectrum<f64> {
        &self.wavelengths
    }

    pub fn rrs(&self) -> &Spectrum<f64> {
        &self.rrs
    }

    pub fn u(&self) -> &Spectrum<f64> {
        &self.u
    }

    pub fn a(&self) -> &Spectrum<f64> {
        &self.a
    }

    pub fn aph(&self) -> &Spectrum<f64> {
        &self.aph
    }

    pub fn adg(&self) -> &Spectrum<f64> {
        &self.adg
    }

    pub fn bb(&self) -> &Spectrum<f64> {
        &self.bb
    }

    pub fn bbp(&self) -> &Spectrum<f64> {
        &self.bbp
    }

    pub fn chla(&self) -> f64 {
        self.chla
    }

    pub fn flags(&self) -> QaaFlags {
        self.flags
    }

    pub fn reference_wl_idx(&self) -> usize {
        self.reference_wl_idx
    }

    pub fn reference_wavelength(&self) -> f64 {
        self.wavelengths.as_array()[self.reference_wl_idx]
    }

    pub fn spectral_slope_y(&self) -> f64 {
        self.spectral_slope_y
    }

    pub fn spectral_slope_s(&self) -> f64 {
        self.spectral_slope_s
    }

    pub fn aph_ratio_443(&self) -> f64 {
        self.aph_ratio_443
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.flags.iter().map(|flag| flag.as_str().to_string()).collect()
    }
}

fn write_spectrum(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    values: &Spectrum<f64>,
) -> fmt::Result {
    write!(f, "{}:", label)?;
    for v in values {
        write!(f, " {:.10}", v)?;
    }
    writeln!(f)
}

impl fmt::Display for QaaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "NASA {} Results:", self.version)?;
        write!(f, "Wavelengths:")?;
        for wl in &self.wavelengths {
            write!(f, " {:.0}", wl)?;
        }
        writeln!(f)?;
        write_spectrum(f, "rrs", &self.rrs)?;
        write_spectrum(f, "u", &self.u)?;
        write_spectrum(f, "a", &self.a)?;
        write_spectrum(f, "aph", &self.aph)?;
        write_spectrum(f, "adg", &self.adg)?;
        write_spectrum(f, "bb", &self.bb)?;
        write_spectrum(f, "bbp", &self.bbp)?;
        writeln!(f, "flags: {}", self.flags.bits())?;
        writeln!(f, "chla: {:.10}", self.chla)?;
        writeln!(f, "reference_wl: {:.0}", self.reference_wavelength())?;
        writeln!(f, "spectral_slope_y: {:.10}", self.spectral_slope_y)?;
        write!(f, "spectral_slope_s: {:.10}", self.spectral_slope_s)
    }
}

/// Converts above-water remote sensing reflectance to below-water reflectance
pub fn below_water_reflectance(rrs: f64) -> f64 {
    rrs / (RRS_T + RRS_GAMMA_Q * rrs)
}

/// Inverts rrs = g0 * u + g1 * u^2 for u = bb / (a + bb)
pub fn u_ratio(rrs: f64) -> f64 {
    ((G0 * G0 + 4.0 * G1 * rrs).sqrt() - G0) / (2.0 * G1)
}

/// Replaces a near-zero decomposition denominator with `+DECOMPOSITION_EPSILON`.
///
/// The substitute is always positive, whatever the sign of `zeta - symbol`.
fn decomposition_denominator(zeta: f64, symbol: f64, flags: &mut QaaFlags) -> f64 {
    let denom = zeta - symbol;
    if denom.abs() < DECOMPOSITION_EPSILON {
        debug!(
            "adg decomposition denominator {:e} replaced by {:e}",
            denom, DECOMPOSITION_EPSILON
        );
        flags.insert(QaaFlag::NearSingular);
        DECOMPOSITION_EPSILON
    } else {
        denom
    }
}

/// Splits total absorption into adg and aph from adg at 443nm.
///
/// Bands where aph comes out negative get aph = 0.001 and adg = max(a - 0.001 - aw, 0).
/// The last element is true when at least one band was repaired.
fn partition_absorption(
    a: &Spectrum<f64>,
    adg443: f64,
    sr: f64,
) -> (Spectrum<f64>, Spectrum<f64>, bool) {
    let mut adg =
        Spectrum::from_fn(|band| adg443 * (sr * (LAMBDA[Band::Cyan] - LAMBDA[band])).exp());
    let mut aph: Spectrum<f64> = Spectrum::default();
    let mut repaired = false;

    for band in Band::ALL {
        aph[band] = a[band] - adg[band] - AW[band];
        if aph[band] < 0.0 {
            repaired = true;
            aph[band] = APH_FLOOR;
            adg[band] = (a[band] - APH_FLOOR - AW[band]).max(0.0);
        }
    }

    (adg, aph, repaired)
}

/// Working record filled stage by stage; only [`QaaWork::finish`] exposes it as a result.
#[derive(Debug, Default)]
struct QaaWork {
    rrs: Spectrum<f64>,
    u: Spectrum<f64>,
    a: Spectrum<f64>,
    aph: Spectrum<f64>,
    adg: Spectrum<f64>,
    bb: Spectrum<f64>,
    bbp: Spectrum<f64>,
    chla: f64,
    flags: QaaFlags,
    rat: f64,
    y: f64,
    sr: f64,
    x1: f64,
}

impl QaaWork {
    // Steps 0 and 1
    fn new(reflectance: Spectrum<f64>) -> Self {
        let rrs = reflectance.map(below_water_reflectance);
        let u = rrs.map(u_ratio);

        Self {
            rrs,
            u,
            ..Default::default()
        }
    }

    // Step 2
    fn reference_absorption(&self) -> f64 {
        let rrs = &self.rrs;
        let numer = rrs[Band::Cyan] + rrs[Band::Blue];
        let denom = rrs[Band::Green] + 5.0 * rrs[Band::Red] * rrs[Band::Red] / rrs[Band::Blue];

        let aux = (numer / denom).log10();
        let rho = ACOEFS[0] + ACOEFS[1] * aux + ACOEFS[2] * aux * aux;

        AW[REFERENCE_BAND] + 10.0_f64.powf(rho)
    }

    // Step 3
    fn reference_backscattering(&mut self, aref: f64) -> f64 {
        let u_ref = self.u[REFERENCE_BAND];
        let bbpref = u_ref * aref / (1.0 - u_ref) - BBW[REFERENCE_BAND];

        if bbpref < 0.0 {
            debug!(
                "negative reference bbp {:e}, set to {}",
                bbpref, BBP_REF_FLOOR
            );
            self.flags.insert(QaaFlag::UnderflowBbp);
            return BBP_REF_FLOOR;
        }
        bbpref
    }

    // Step 4
    fn spectral_slope_y(&mut self) {
        self.rat = self.rrs[Band::Cyan] / self.rrs[Band::Green];
        let y = 2.0 * (1.0 - 1.2 * (-0.9 * self.rat).exp());
        self.y = y.clamp(Y_MIN, Y_MAX);
    }

    // Step 5
    fn backscattering(&mut self, bbpref: f64) {
        let y = self.y;
        self.bbp =
            Spectrum::from_fn(|band| bbpref * (LAMBDA[REFERENCE_BAND] / LAMBDA[band]).powf(y));
        self.bb = Spectrum::from_fn(|band| self.bbp[band] + BBW[band]);
    }

    // Step 6
    fn absorption(&mut self) {
        self.a = Spectrum::from_fn(|band| (1.0 - self.u[band]) * self.bb[band] / self.u[band]);
    }

    // Steps 7 to 9, first pass
    fn decompose(&mut self) {
        let symbol = 0.74 + 0.2 / (0.8 + self.rat);
        self.sr = 0.015 + 0.002 / (0.6 + self.rat);
        let zeta = (self.sr * (LAMBDA[Band::Cyan] - LAMBDA[Band::Violet])).exp();

        let denom = decomposition_denominator(zeta, symbol, &mut self.flags);

        let dif1 = self.a[Band::Violet] - symbol * self.a[Band::Cyan];
        let dif2 = AW[Band::Violet] - symbol * AW[Band::Cyan];
        let adg443 = (dif1 - dif2) / denom;

        let (adg, aph, repaired) = partition_absorption(&self.a, adg443, self.sr);
        if repaired {
            debug!(
                "negative aph replaced by {} in at least one band",
                APH_FLOOR
            );
            self.flags.insert(QaaFlag::NegativeAph);
        }
        self.adg = adg;
        self.aph = aph;
    }

    // Step 9b: second pass when aph/a at 443nm is out of bounds
    fn check_proportion(&mut self) {
        let a_410 = self.a[Band::Violet];
        let a_443 = self.a[Band::Cyan];
        let aw_410 = AW[Band::Violet];
        let aw_443 = AW[Band::Cyan];

        self.x1 = self.aph[Band::Cyan] / a_443;
        if (APH_RATIO_MIN..=APH_RATIO_MAX).contains(&self.x1) && self.x1.is_finite() {
            return;
        }

        debug!("aph/a at 443nm is {}, recomputing adg and aph", self.x1);
        self.flags.insert(QaaFlag::BadProportion);

        let x1 = -0.8 + 1.4 * (a_443 - aw_443) / (a_410 - aw_410);
        self.x1 = x1.clamp(APH_RATIO_MIN, APH_RATIO_MAX);

        let corrected_adg443 = a_443 - (a_443 * self.x1) - aw_443;
        let (adg, aph, _) = partition_absorption(&self.a, corrected_adg443, self.sr);
        self.adg = adg;
        self.aph = aph;
    }

    // Step 10
    fn chlorophyll(&mut self) {
        let aph_443 = self.aph[Band::Cyan];
        let aphstar_443 = APHSTAR[Band::Cyan];

        self.chla = if aphstar_443 > 0.0 && aph_443.is_finite() {
            aph_443 / aphstar_443
        } else {
            self.flags.insert(QaaFlag::ChlaUndefined);
            0.0
        };
    }

    fn finish(self) -> QaaResult {
        QaaResult {
            version: QAA_VERSION,
            wavelengths: LAMBDA,
            rrs: self.rrs,
            u: self.u,
            a: self.a,
            aph: self.aph,
            adg: self.adg,
            bb: self.bb,
            bbp: self.bbp,
            chla: self.chla,
            flags: self.flags,
            reference_wl_idx: REFERENCE_BAND.index(),
            spectral_slope_y: self.y,
            spectral_slope_s: self.sr,
            aph_ratio_443: self.x1,
        }
    }
}

/// Runs QAA v6 on one above-water Rrs spectrum (sr^-1), ordered 410, 443, 490, 555, 670 nm.
pub fn compute(reflectance: Spectrum<f64>) -> QaaResult {
    let mut work = QaaWork::new(reflectance);

    let aref = work.reference_absorption();
    let bbpref = work.reference_backscattering(aref);
    work.spectral_slope_y();
    work.backscattering(bbpref);
    work.absorption();
    work.decompose();
    work.check_proportion();
    work.chlorophyll();

    work.finish()
}
