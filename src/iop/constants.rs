//! Optical constants and coefficient data
//!
//! This module contains the pre-defined optical coefficients for pure water and phytoplankton
//! at the five QAA v6 bands, plus the regression coefficients of the algorithm.
//! Values are those of the NASA OCSSW QAA implementation and must not be edited: results are
//! compared against the reference program band for band.

use crate::iop::spectrum::{Band, Spectrum};

/// Nominal band centres (nm) of the SeaWiFS/MODIS QAA band set
pub const LAMBDA: Spectrum<f64> = Spectrum::new([410.0, 443.0, 490.0, 555.0, 670.0]);

/// Water absorption coefficients (m^-1)
/// Data from Pope and Fry (1997) as tabulated by NASA OCSSW
pub const AW: Spectrum<f64> = Spectrum::new([0.00455, 0.00635, 0.0150, 0.0596, 0.439]);

/// Water backscattering coefficients (m^-1)
pub const BBW: Spectrum<f64> = Spectrum::new([0.00144, 0.00105, 0.000619, 0.000275, 8.28e-05]);

/// Phytoplankton specific absorption coefficients (m^2/mg)
pub const APHSTAR: Spectrum<f64> = Spectrum::new([0.063, 0.0632, 0.0495, 0.0267, 0.00532]);

/// QAA reference band (555 nm)
pub const REFERENCE_BAND: Band = Band::Green;

/// Coefficients of rrs = u * (G0 + G1 * u), Gordon et al. (1988) as revised by Lee et al. (2002)
pub const G0: f64 = 0.089;
pub const G1: f64 = 0.125;

/// Default coefficients for SeaWiFS/MODIS
/// https://oceancolor.gsfc.nasa.gov/docs/ocssw/qaa_8c_source.html
pub const ACOEFS: [f64; 3] = [-1.146, -1.366, -0.469];

/// Above-water to below-water conversion, rrs = Rrs / (T + GAMMA_Q * Rrs)
pub const RRS_T: f64 = 0.52;
pub const RRS_GAMMA_Q: f64 = 1.7;

/// Value substituted for a negative reference particulate backscattering (m^-1)
pub const BBP_REF_FLOOR: f64 = 0.001;

/// Value substituted for a negative phytoplankton absorption (m^-1)
pub const APH_FLOOR: f64 = 0.001;

/// Smallest magnitude accepted for the adg decomposition denominator
pub const DECOMPOSITION_EPSILON: f64 = 1e-10;

/// Bounds of the plausible aph/a proportion at 443 nm
pub const APH_RATIO_MIN: f64 = 0.15;
pub const APH_RATIO_MAX: f64 = 0.6;

/// Bounds of the particulate backscattering spectral slope Y
pub const Y_MIN: f64 = 0.0;
pub const Y_MAX: f64 = 3.0;
