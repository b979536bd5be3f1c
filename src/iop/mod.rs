//! Inherent Optical Properties (IOP) module
//!
//! This module derives inherent optical properties of water (absorption and backscattering
//! coefficients, and chlorophyll-a) from remote sensing reflectance with QAA v6.

pub mod constants;
pub mod flags;
pub mod qaa;
pub mod spectrum;

pub use flags::{QaaFlag, QaaFlags};
pub use qaa::{QaaResult, compute};
pub use spectrum::{BAND_COUNT, Band, Spectrum};
