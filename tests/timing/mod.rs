use approx::assert_abs_diff_eq;
use rstest::*;
use ultracam_timing::prelude::*;
use ultracam_timing::timing::{FRAME_TRANSFER_ROWS, INVERSION_DELAY, VCLOCK_FRAME};

fn single_window() -> Window {
    Window::new(1, 101, 613, 100, 100)
}

/// A valid configuration of every application mode
#[fixture]
fn all_modes() -> Vec<InstrumentConfiguration> {
    enum_iterator::all::<ApplicationMode>()
        .map(|mode| {
            let windows = match mode.window_pairs() {
                0 => WindowSet::empty(),
                1 => WindowSet::new(vec![single_window()]),
                _ => WindowSet::for_mode(mode),
            };
            InstrumentConfiguration::builder()
                .mode(mode)
                .speed(ReadoutSpeed::Fast)
                .exposure(500)
                .windows(windows)
                .build()
        })
        .collect()
}

#[rstest]
#[case(ReadoutSpeed::Slow, 6.25445402)]
#[case(ReadoutSpeed::Fast, 3.30697242)]
fn fullframe_clear_cycle(#[case] speed: ReadoutSpeed, #[case] cycle: f64) {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::FullframeClear)
        .speed(speed)
        .build();
    assert!(validate(&cfg).is_ok());
    let rpt = compute_timing(&cfg);
    assert_abs_diff_eq!(rpt.cycle_time, cycle, epsilon = 1e-8);
    assert_eq!(rpt.exposure_time, 0.0);
    assert_abs_diff_eq!(rpt.frame_rate, 1.0 / cycle, epsilon = 1e-9);
    assert!(rpt.drift.is_none());
}

#[test]
fn fullframe_no_clear_binned() {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::FullframeNoClear)
        .speed(ReadoutSpeed::Fast)
        .xbin(2)
        .ybin(2)
        .exposure(1000)
        .build();
    let rpt = compute_timing(&cfg);
    assert_abs_diff_eq!(rpt.cycle_time, 1.01950306, epsilon = 1e-8);
    assert_abs_diff_eq!(rpt.exposure_time, 0.99543416, epsilon = 1e-8);
    assert_abs_diff_eq!(rpt.dead_time, 0.0240689, epsilon = 1e-8);
    assert_abs_diff_eq!(rpt.readout_time, 0.89532416, epsilon = 1e-8);
    assert_eq!(rpt.clear_time, 0.0);
}

#[test]
fn four_windows_slow_binned() {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::MultiWindow(MultiWindowCount::Four))
        .speed(ReadoutSpeed::Slow)
        .xbin(2)
        .ybin(2)
        .windows(vec![
            Window::new(11, 101, 613, 100, 100),
            Window::new(201, 1, 825, 200, 50),
        ])
        .build();
    assert!(validate(&cfg).is_ok());
    let rpt = compute_timing(&cfg);
    assert_abs_diff_eq!(rpt.cycle_time, 0.1002599, epsilon = 1e-8);
    assert_abs_diff_eq!(rpt.exposure_time, 0.076191, epsilon = 1e-8);
    assert_abs_diff_eq!(rpt.readout_time, 0.076081, epsilon = 1e-8);
}

#[test]
fn drift_fast_binned() {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::DriftMode)
        .speed(ReadoutSpeed::Fast)
        .xbin(2)
        .ybin(2)
        .exposure(100)
        .windows(vec![Window::new(1, 201, 701, 100, 50)])
        .build();
    assert!(validate(&cfg).is_ok());
    let rpt = compute_timing(&cfg);
    assert_abs_diff_eq!(rpt.cycle_time, 0.0256379, epsilon = 1e-8);
    assert_eq!(
        rpt.drift,
        Some(DriftFigures {
            pipe_shift: 83,
            storage_windows: 10
        })
    );
}

#[test]
fn drift_identity() {
    let fig = ultracam_timing::timing::pipe_shift(100);
    assert_eq!(fig.storage_windows, 5);
    assert_eq!(fig.pipe_shift, 133);
    for ny in ultracam_timing::timing::SPECIAL_NY {
        let fig = ultracam_timing::timing::pipe_shift(ny);
        assert!(fig.pipe_shift < ny, "ny = {ny} leaves {} rows", fig.pipe_shift);
    }
}

#[rstest]
fn conservation(all_modes: Vec<InstrumentConfiguration>) {
    for cfg in all_modes {
        assert!(validate(&cfg).is_ok(), "{cfg}");
        let rpt = compute_timing(&cfg);
        assert_abs_diff_eq!(
            rpt.cycle_time,
            rpt.exposure_time + rpt.dead_time,
            epsilon = 1e-12
        );

        let expected_dead = if cfg.mode.has_clear() {
            INVERSION_DELAY / 1e6 + rpt.clear_time + rpt.frame_transfer_time + rpt.readout_time
        } else {
            rpt.frame_transfer_time
        };
        assert_abs_diff_eq!(rpt.dead_time, expected_dead, epsilon = 1e-9);
        assert!(rpt.duty_cycle > 0.0 && rpt.duty_cycle < 100.0, "{rpt}");
        assert_eq!(rpt.drift.is_some(), cfg.mode.is_drift());
    }
}

#[rstest]
fn monotonic_in_exposure(all_modes: Vec<InstrumentConfiguration>) {
    for cfg in all_modes {
        let mut previous = compute_timing(&cfg.with_exposure(0));
        for exposure in [1, 10, 100, 10_000, 600_000] {
            let rpt = compute_timing(&cfg.with_exposure(exposure));
            assert!(rpt.cycle_time > previous.cycle_time, "{}", cfg.mode);
            assert!(rpt.exposure_time > previous.exposure_time, "{}", cfg.mode);
            // The dead time does not depend on the exposure
            assert_abs_diff_eq!(rpt.dead_time, previous.dead_time, epsilon = 1e-9);
            previous = rpt;
        }
    }
}

#[test]
fn frame_transfer_constant() {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::MultiWindowClear)
        .windows(vec![single_window()])
        .build();
    let rpt = compute_timing(&cfg);
    assert_abs_diff_eq!(
        rpt.frame_transfer_time,
        f64::from(FRAME_TRANSFER_ROWS) * VCLOCK_FRAME / 1e6,
        epsilon = 1e-15
    );
}
