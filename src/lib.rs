//! Inherent optical properties of water from ocean colour with QAA v6.
//!
//! [`iop::compute`] is the algorithm itself: a pure function of one five-band remote sensing
//! reflectance spectrum. The other modules feed it (sensor band mapping, JSON configuration)
//! and report its results (batch runs, statistics, JSON output).

pub mod batch;
pub mod bbox;
pub mod config;
pub mod iop;
pub mod logging;
pub mod sat_bands;
