//! Integration test: loop analysis of the reference 90 V -> 13 V stage.

use bk_control::{
    BodeAnalyzer, BodePlot, CompensationNetwork, PowerStage, StabilityVerdict, TransferFunction,
};

fn reference_stage() -> PowerStage {
    PowerStage::new(90.0, 47e-6, 10e-6, 5e-3, 2.6).expect("valid stage")
}

fn assert_margins_consistent(plot: &BodePlot) {
    assert_eq!(
        plot.phase_margin_deg.is_nan(),
        plot.crossover_hz.is_nan(),
        "phase margin must be NaN exactly when no 0 dB crossing exists"
    );
    assert_eq!(
        plot.gain_margin_db.is_nan(),
        plot.phase_crossover_hz.is_nan(),
        "gain margin must be NaN exactly when no -180 deg crossing exists"
    );

    let has_zero_db = plot
        .magnitude_db
        .windows(2)
        .any(|w| w[0] >= 0.0 && w[1] < 0.0);
    assert_eq!(has_zero_db, plot.phase_margin_deg.is_finite());

    let has_minus_180 = plot
        .phase_deg
        .windows(2)
        .any(|w| w[0] > -180.0 && w[1] <= -180.0);
    assert_eq!(has_minus_180, plot.gain_margin_db.is_finite());

    let report = plot.stability_report();
    if !(plot.phase_margin_deg > 0.0 && plot.gain_margin_db > 0.0) {
        assert_eq!(report.verdict, StabilityVerdict::Unstable);
        assert_eq!(report.verdict.to_string(), "UNSTABLE");
    }
}

#[test]
fn uncompensated_power_stage_sweep() {
    let plot = BodeAnalyzer::new(reference_stage())
        .sweep(1.0, 1.0e6, 300)
        .expect("sweep");

    assert_eq!(plot.len(), 300);
    for w in plot.frequencies_hz.windows(2) {
        assert!(w[1] > w[0]);
    }

    // 39 dB at DC, far below 0 dB at 1 MHz: a crossover exists.
    assert!(plot.magnitude_db[0] > 30.0);
    assert!(*plot.magnitude_db.last().unwrap() < -30.0);
    assert!(plot.crossover_hz.is_finite());
    assert!(plot.phase_margin_deg.is_finite());

    // Second-order phase approaches but never reaches -180 deg.
    assert!(plot.gain_margin_db.is_nan());
    assert!(!plot.is_stable());
    assert_margins_consistent(&plot);
}

#[test]
fn designed_type2_loop_sweep() {
    let analyzer = BodeAnalyzer::new(reference_stage());
    let network = analyzer
        .design_type2_compensation(10.0e3, 45.0)
        .expect("design");
    let plot = analyzer
        .with_compensator(network)
        .sweep(1.0, 1.0e6, 300)
        .expect("sweep");

    assert_margins_consistent(&plot);
    for p in &plot.phase_deg {
        assert!(*p > -180.0 && *p <= 180.0, "phase must stay a principal value");
    }
}

#[test]
fn synthetic_response_with_both_crossings_is_good() {
    let freqs = vec![10.0, 100.0, 1000.0, 10000.0];
    let mag = vec![40.0, 20.0, -20.0, -40.0];
    let phase = vec![-90.0, -110.0, -150.0, -200.0];
    let plot = BodePlot::from_response(freqs, mag, phase).unwrap();

    assert!((plot.phase_margin_deg - 50.0).abs() < 1e-9);
    assert!((plot.crossover_hz - 550.0).abs() < 1e-9);
    assert!(plot.gain_margin_db > 0.0);
    assert!(plot.is_stable());
    assert_eq!(plot.stability_report().verdict.as_str(), "GOOD");
}

#[test]
fn compensated_loop_matches_transfer_function_algebra() {
    let stage = reference_stage();
    let network = CompensationNetwork::TypeII {
        gain: 3.0e3,
        zero_hz: 2.3e3,
        pole_hz: 100.0e3,
    };
    let analyzer = BodeAnalyzer::new(stage).with_compensator(network);

    let loop_tf: TransferFunction = stage
        .to_transfer_function()
        .unwrap()
        .series(&network.to_transfer_function().unwrap());

    for f in [10.0, 1.0e3, 10.0e3, 500.0e3] {
        let (m, p) = analyzer.point(f);
        assert!((m - loop_tf.magnitude_db(f)).abs() < 1e-6);
        assert!((p - loop_tf.phase_deg(f)).abs() < 1e-6);
    }
}
