//! Helper functions for integration tests

use approx::assert_relative_eq;
use qaa::iop::Spectrum;

/// NASA OCSSW comparison vector (410, 443, 490, 555, 670 nm)
pub const NASA_RRS: [f64; 5] = [0.001974, 0.002570, 0.002974, 0.001670, 0.000324];

/// Clear-water vector that raises no flag
pub const CLEAN_RRS: [f64; 5] = [0.0025, 0.0035, 0.0045, 0.0040, 0.0006];

/// Vector with a negligible green signal, so bbp at 555nm underflows
pub const UNDERFLOW_RRS: [f64; 5] = [0.002, 0.003, 0.003, 0.0001, 0.00001];

/// Clean first pass, but aph/a at 443nm is out of bounds and the second pass floors aph(410)
pub const SECOND_PASS_RRS: [f64; 5] = [0.016537, 0.00247604, 0.00446478, 0.0125487, 0.0189542];

/// Assert that every band of `actual` matches `expected` to a relative tolerance
pub fn assert_spectrum_close(actual: &Spectrum<f64>, expected: [f64; 5], label: &str) {
    for (i, (&got, &want)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_relative_eq!(got, want, max_relative = 1e-9);
        assert!(got.is_finite(), "{}: band {} is not finite", label, i);
    }
}

/// Grid of plausible Rrs spectra used for property checks
pub fn spectra_grid() -> Vec<Spectrum<f64>> {
    let mut spectra = Vec::new();
    for &blue in &[0.0008, 0.002, 0.005, 0.01] {
        for &green in &[0.0005, 0.0015, 0.004, 0.008] {
            for &red in &[0.00005, 0.0003, 0.0015] {
                spectra.push(Spectrum::new([blue * 0.8, blue, blue * 1.1, green, red]));
            }
        }
    }
    spectra.push(Spectrum::new(NASA_RRS));
    spectra.push(Spectrum::new(CLEAN_RRS));
    spectra.push(Spectrum::new(UNDERFLOW_RRS));
    spectra
}
