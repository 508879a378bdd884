//! Conduction-mode properties at a 90 V to 13 V, 100 kHz, 47 uH design point.

use approx::assert_relative_eq;
use bk_design::{
    OperatingMode, OperatingPoint, boundary_current, classify, dcm_parameters, optimize_inductor,
};
use proptest::prelude::*;

fn design_point(iout: f64) -> OperatingPoint {
    OperatingPoint {
        input_voltage: 90.0,
        output_voltage: 13.0,
        output_current: iout,
        switching_frequency: 100e3,
        inductance: 47e-6,
        capacitance: 10e-6,
    }
}

#[test]
fn boundary_current_at_design_point() {
    // 13 * 77 / (2 * 47e-6 * 100e3 * 90)
    assert_relative_eq!(boundary_current(&design_point(5.0)), 1.18322, epsilon = 1e-5);
}

#[test]
fn classification_around_the_boundary() {
    let icrit = boundary_current(&design_point(5.0));
    assert_eq!(classify(&design_point(icrit)), OperatingMode::Bcm);
    assert_eq!(classify(&design_point(icrit + 0.0009)), OperatingMode::Bcm);
    assert_eq!(classify(&design_point(0.05)), OperatingMode::Dcm);
    assert_eq!(classify(&design_point(5.0)), OperatingMode::Ccm);
    assert_eq!(classify(&design_point(icrit + 0.01)), OperatingMode::Ccm);
}

#[test]
fn heavy_load_falls_back_to_ccm_formulas() {
    let params = dcm_parameters(&design_point(5.0)).unwrap();
    assert_eq!(params.d3, 0.0);
    assert_relative_eq!(params.d1, 13.0 / 90.0, max_relative = 1e-12);
    assert_relative_eq!(params.d1 + params.d2, 1.0, max_relative = 1e-12);
}

#[test]
fn sizing_does_not_touch_the_input_point() {
    let point = design_point(5.0);
    let rec = optimize_inductor(&point, OperatingMode::Dcm, 100.0).unwrap();
    assert!(rec.recommended_inductance < point.inductance);
    assert_eq!(point.inductance, 47e-6);
    assert_eq!(classify(&point), OperatingMode::Ccm);
}

proptest! {
    #[test]
    fn duty_splits_sum_to_one(
        vin in 5.0f64..400.0,
        ratio in 0.05f64..0.95,
        iout in 0.0f64..20.0,
        inductance in 1e-6f64..1e-3,
        fs in 10e3f64..2e6,
    ) {
        let point = OperatingPoint {
            input_voltage: vin,
            output_voltage: vin * ratio,
            output_current: iout,
            switching_frequency: fs,
            inductance,
            capacitance: 0.0,
        };
        let params = dcm_parameters(&point).unwrap();
        prop_assert!(params.d3 >= 0.0);
        prop_assert!((params.d1 + params.d2 + params.d3 - 1.0).abs() < 1e-9);
        prop_assert!(params.peak_current >= params.average_current);
        if classify(&point) == OperatingMode::Dcm {
            prop_assert!(params.d3 > 0.0 || (iout - boundary_current(&point)).abs() < 1e-3);
        }
    }
}
