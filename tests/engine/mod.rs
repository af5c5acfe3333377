use crate::test_config_path;
use approx::assert_abs_diff_eq;
use ultracam_timing::prelude::*;

#[test]
fn fullframe_scenario_end_to_end() {
    let _ = pretty_env_logger::try_init();
    let scenario = Scenario::load(test_config_path("scenario_wht_fullframe.yaml")).unwrap();
    let rpt = InstrumentEngine
        .compute_scenario(
            &scenario,
            &TemplateCatalogue::builtin(),
            &TelescopeCatalogue::builtin(),
        )
        .unwrap();

    assert_abs_diff_eq!(rpt.timing.cycle_time, 7.25445402, epsilon = 1e-8);
    assert_abs_diff_eq!(rpt.timing.exposure_time, 1.0, epsilon = 1e-12);
    let snr = rpt.signal_to_noise().unwrap();
    assert_abs_diff_eq!(snr, 35.84532, epsilon = 1e-4);
    match rpt.sensitivity {
        Some(Ok(sens)) => {
            assert_eq!(sens.peak_severity, PeakSeverity::Ok);
            assert_abs_diff_eq!(sens.signal_to_noise_three_hour, 1383.06303, epsilon = 1e-3);
        }
        other => panic!("expected a sensitivity estimate, got {other:?}"),
    }
}

#[test]
fn drift_scenario_with_synchronisation() {
    let _ = pretty_env_logger::try_init();
    let scenario = Scenario::load(test_config_path("scenario_vlt_drift.yaml")).unwrap();
    let telescopes = TelescopeCatalogue::from_yaml(test_config_path("telescopes.yaml")).unwrap();
    let templates = TemplateCatalogue::from_yaml(test_config_path("templates.yaml")).unwrap();
    let resolved = scenario.resolve(&templates, &telescopes).unwrap();
    let engine = InstrumentEngine;

    assert!(!config_is_synchronized(&resolved.config));
    let as_is = engine
        .compute(&resolved.config, &resolved.telescope, None)
        .unwrap();
    assert!(as_is.sensitivity.is_none());

    let windows = engine.validate_and_synchronize(&resolved.config).unwrap();
    assert_eq!(windows[0], Window::new(1, 201, 701, 100, 50));
    let synced = resolved.config.with_windows(windows);
    assert!(config_is_synchronized(&synced));

    let rpt = engine.compute(&synced, &resolved.telescope, None).unwrap();
    assert_abs_diff_eq!(rpt.timing.cycle_time, 0.0256379, epsilon = 1e-8);
    // Starting one row lower costs one extra row of frame transfer
    assert_abs_diff_eq!(
        as_is.timing.frame_transfer_time - rpt.timing.frame_transfer_time,
        23.3e-6,
        epsilon = 1e-12
    );
}

#[test]
fn every_mode_through_the_engine() {
    let engine = InstrumentEngine;
    let wht = TelescopeProfile::wht();
    let target = TargetContext::builder().magnitude(17.0).band(Band::R).build();
    for mode in enum_iterator::all::<ApplicationMode>() {
        for speed in enum_iterator::all::<ReadoutSpeed>() {
            let cfg = InstrumentConfiguration::builder()
                .mode(mode)
                .speed(speed)
                .xbin(2)
                .ybin(2)
                .exposure(50)
                .windows(WindowSet::for_mode(mode))
                .build();
            let rpt = engine.compute(&cfg, &wht, Some(&target)).unwrap();
            assert!(rpt.timing.frame_rate > 0.0, "{mode} at {speed}");
            assert!(rpt.signal_to_noise().unwrap() > 0.0, "{mode} at {speed}");
        }
    }
}

#[test]
fn reports_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InstrumentConfiguration>();
    assert_send_sync::<TimingReport>();
    assert_send_sync::<SensitivityReport>();
    assert_send_sync::<EngineReport>();
    assert_send_sync::<EngineError>();

    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::MultiWindow(MultiWindowCount::Four))
        .windows(WindowSet::for_mode(ApplicationMode::MultiWindow(
            MultiWindowCount::Four,
        )))
        .build();
    let target = TargetContext::builder().magnitude(18.0).build();
    let wht = TelescopeProfile::wht();
    let expected = InstrumentEngine.compute(&cfg, &wht, Some(&target)).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| InstrumentEngine.compute(&cfg, &wht, Some(&target)).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn bad_binning_is_recoverable() {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::FullframeOverscan)
        .xbin(7)
        .build();
    let err = InstrumentEngine
        .compute(&cfg, &TelescopeProfile::vlt(), None)
        .unwrap_err();
    assert!(!err.is_fatal());
    assert!(format!("{err}").starts_with("cannot compute timing"));
}
