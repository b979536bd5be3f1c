//! QAA v6 against the NASA OCSSW comparison program, plus algorithm-wide properties

mod common;

use approx::assert_relative_eq;
use common::*;
use qaa::iop::constants::{APH_FLOOR, APH_RATIO_MAX, AW, LAMBDA};
use qaa::iop::{Band, QaaFlag, QaaFlags, Spectrum, compute};

#[test]
fn test_nasa_reference_vector() {
    let result = compute(Spectrum::new(NASA_RRS));

    assert_spectrum_close(
        result.rrs(),
        [
            0.0037718125986183778,
            0.0049011287852638126,
            0.0056641598854826475,
            0.0031940999045595294,
            0.0006224176391622106,
        ],
        "rrs",
    );
    assert_spectrum_close(
        result.u(),
        [
            0.04011930120728402,
            0.05136351123058447,
            0.058788234022930264,
            0.0342419752364887,
            0.0069260821617780355,
        ],
        "u",
    );
    assert_spectrum_close(
        result.a(),
        [
            0.11784015798283584,
            0.07716489399401456,
            0.05341163948476197,
            0.0721510628556853,
            0.26352549499627975,
        ],
        "a",
    );
    assert_spectrum_close(
        result.aph(),
        [
            0.013054773452461364,
            0.01157473409910219,
            0.010401687727155266,
            0.002610200920131256,
            0.001,
        ],
        "aph",
    );
    assert_spectrum_close(
        result.adg(),
        [
            0.10023538453037448,
            0.059240159894912374,
            0.028009951757606705,
            0.009940861935554043,
            0.0,
        ],
        "adg",
    );
    assert_spectrum_close(
        result.bb(),
        [
            0.004925262898163821,
            0.0041780597164356205,
            0.003336099350945711,
            0.0025581924708269438,
            0.0018379288764734196,
        ],
        "bb",
    );
    assert_spectrum_close(
        result.bbp(),
        [
            0.003485262898163821,
            0.0031280597164356208,
            0.0027170993509457115,
            0.0022831924708269437,
            0.0017551288764734196,
        ],
        "bbp",
    );

    assert_relative_eq!(result.chla(), 0.1831445268845283, max_relative = 1e-9);
    assert_relative_eq!(
        result.spectral_slope_y(),
        1.3968081493792444,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        result.spectral_slope_s(),
        0.015937017479931433,
        max_relative = 1e-9
    );

    // The comparison program reports flags 24 for this vector
    assert_eq!(result.flags().bits(), 0x18);
    assert_eq!(result.reference_wl_idx(), 3);
}

#[test]
fn test_clean_vector_raises_no_flag() {
    let result = compute(Spectrum::new(CLEAN_RRS));

    assert!(result.flags().is_empty());
    assert_spectrum_close(
        result.a(),
        [
            0.20612576128229032,
            0.13426615938841135,
            0.09226849924474936,
            0.0890699241233836,
            0.474622947368584,
        ],
        "a",
    );
    assert_spectrum_close(
        result.aph(),
        [
            0.017928876313630243,
            0.020864458346750943,
            0.027636085118394584,
            0.012326872234424427,
            0.03300913429700714,
        ],
        "aph",
    );
    assert_spectrum_close(
        result.adg(),
        [
            0.18364688496866008,
            0.10705170104166041,
            0.04963241412635478,
            0.017143051888959177,
            0.002613813071576899,
        ],
        "adg",
    );
    assert_relative_eq!(result.chla(), 0.33013383460048956, max_relative = 1e-9);
    // No correction: the first-pass proportion is kept
    assert_relative_eq!(
        result.aph_ratio_443(),
        0.1553962550339529,
        max_relative = 1e-9
    );
}

#[test]
fn test_underflowed_reference_backscattering() {
    let result = compute(Spectrum::new(UNDERFLOW_RRS));

    assert!(result.flags().contains(QaaFlag::UnderflowBbp));
    assert_eq!(result.bbp()[Band::Green], 0.001);
    assert_eq!(result.bb()[Band::Green], 0.001 + 0.000275);
    assert_eq!(
        result.flags(),
        QaaFlag::UnderflowBbp | QaaFlag::BadProportion | QaaFlag::NegativeAph
    );
    assert_relative_eq!(result.chla(), 0.09869704898654778, max_relative = 1e-9);
}

#[test]
fn test_proportion_correction() {
    // First-pass aph/a at 443nm is 0.098 for this vector
    let result = compute(Spectrum::new(NASA_RRS));

    assert!(result.flags().contains(QaaFlag::BadProportion));
    assert!((0.15..=0.6).contains(&result.aph_ratio_443()));

    let ratio = result.aph()[Band::Cyan] / result.a()[Band::Cyan];
    assert_relative_eq!(ratio, result.aph_ratio_443(), max_relative = 1e-9);
}

#[test]
fn test_second_pass_repair_leaves_negative_aph_clear() {
    // The first pass splits cleanly, then the corrected adg(443) drives aph(410) negative
    let result = compute(Spectrum::new(SECOND_PASS_RRS));

    assert_eq!(result.flags(), QaaFlags::from(QaaFlag::BadProportion));
    assert_eq!(result.aph_ratio_443(), APH_RATIO_MAX);

    let a = result.a()[Band::Violet];
    assert_eq!(result.aph()[Band::Violet], APH_FLOOR);
    assert_eq!(
        result.adg()[Band::Violet],
        (a - APH_FLOOR - AW[Band::Violet]).max(0.0)
    );

    assert_spectrum_close(
        result.aph(),
        [
            0.001,
            2.078699151572,
            1.321761212848828,
            0.45370162246228884,
            0.002922469262493954,
        ],
        "aph",
    );
    assert_spectrum_close(
        result.adg(),
        [
            0.5362297999656233,
            1.379449434381333,
            0.6063694046901521,
            0.19456173591333575,
            0.026038973267251686,
        ],
        "adg",
    );
    assert_relative_eq!(result.chla(), 32.89080936031645, max_relative = 1e-9);
}

#[test]
fn test_negative_cyan_ratio_keeps_denominator_clear() {
    // rrs(443) from -0.01 to 0.01 sweeps the 443/555 ratio across both poles of the
    // decomposition terms; zeta - symbol never comes near zero
    for i in 0..=400 {
        let cyan = -0.01 + i as f64 * 0.00005;
        let result = compute(Spectrum::new([0.002, cyan, 0.003, 0.002, 0.0003]));

        assert!(
            !result.flags().contains(QaaFlag::NearSingular),
            "rrs(443) = {cyan}"
        );
    }
}

#[test]
fn test_zero_blue_reflectance() {
    // rrs(490) = 0 divides the red correction term of the reference absorption by zero
    let result = compute(Spectrum::new([0.002, 0.003, 0.0, 0.002, 0.0003]));

    assert!(result.a().iter().all(|a| !a.is_finite()));
    assert!(result.aph()[Band::Cyan].is_nan());
    assert_eq!(result.chla(), 0.0);
    assert_eq!(
        result.flags(),
        QaaFlag::BadProportion | QaaFlag::ChlaUndefined
    );
    assert!((0.0..=3.0).contains(&result.spectral_slope_y()));
    assert_eq!(result.wavelengths(), &LAMBDA);
}

#[test]
fn test_determinism() {
    for spectrum in spectra_grid() {
        let first = compute(spectrum);
        let second = compute(spectrum);

        for (x, y) in first.a().iter().zip(second.a().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
        assert_eq!(first.chla().to_bits(), second.chla().to_bits());
        assert_eq!(first.flags(), second.flags());
    }
}

#[test]
fn test_properties_over_grid() {
    let known_bits = QaaFlag::ALL.iter().fold(0u8, |acc, f| acc | f.bit());

    for spectrum in spectra_grid() {
        let result = compute(spectrum);

        assert_eq!(result.wavelengths(), &LAMBDA);
        assert_eq!(result.reference_wl_idx(), 3);
        assert_eq!(result.flags().bits() & !known_bits, 0);

        assert!((0.0..=3.0).contains(&result.spectral_slope_y()));
        assert!(result.chla() >= 0.0);

        if result.flags().contains(QaaFlag::UnderflowBbp) {
            assert_eq!(result.bbp()[Band::Green], 0.001);
        }
        if result.flags().contains(QaaFlag::BadProportion) {
            assert!((0.15..=0.6).contains(&result.aph_ratio_443()));
        }
        // Negative aph is always repaired, in either pass
        assert!(result.aph().iter().all(|&aph| aph >= 0.0));
    }
}
