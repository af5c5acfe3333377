use approx::assert_relative_eq;
use rstest::*;
use ultracam_timing::prelude::*;

#[fixture]
fn one_second() -> InstrumentConfiguration {
    InstrumentConfiguration::builder()
        .mode(ApplicationMode::FullframeClear)
        .speed(ReadoutSpeed::Slow)
        .exposure(10_000)
        .build()
}

#[rstest]
#[case(12.0, PeakSeverity::Saturated)]
#[case(12.5, PeakSeverity::Warning)]
#[case(13.0, PeakSeverity::Ok)]
#[case(15.0, PeakSeverity::Ok)]
fn saturation_classification(
    one_second: InstrumentConfiguration,
    #[case] magnitude: f64,
    #[case] severity: PeakSeverity,
) {
    let timing = compute_timing(&one_second);
    let target = TargetContext::builder()
        .magnitude(magnitude)
        .airmass(1.0)
        .band(Band::G)
        .build();
    let rpt = estimate_sensitivity(&timing, &one_second, &target, &TelescopeProfile::wht()).unwrap();
    assert_eq!(rpt.peak_severity, severity, "peak = {}", rpt.peak_counts);
}

#[rstest]
fn three_hour_scaling_depends_on_cycle(one_second: InstrumentConfiguration) {
    let target = TargetContext::builder().magnitude(19.0).build();
    let vlt = TelescopeProfile::vlt();

    let timing = compute_timing(&one_second);
    let rpt = estimate_sensitivity(&timing, &one_second, &target, &vlt).unwrap();
    assert_relative_eq!(
        rpt.signal_to_noise_three_hour / rpt.signal_to_noise_single,
        (10_800.0 / timing.cycle_time).sqrt(),
        max_relative = 1e-12
    );

    // Same exposure, twice the cycle: the single frame is unchanged, the run yields less
    let mut slower = timing;
    slower.cycle_time *= 2.0;
    let rpt_slow = estimate_sensitivity(&slower, &one_second, &target, &vlt).unwrap();
    assert_eq!(rpt_slow.signal_to_noise_single, rpt.signal_to_noise_single);
    assert_relative_eq!(
        rpt_slow.signal_to_noise_three_hour * 2_f64.sqrt(),
        rpt.signal_to_noise_three_hour,
        max_relative = 1e-12
    );
}

#[rstest]
fn brighter_sky_lowers_snr(one_second: InstrumentConfiguration) {
    let timing = compute_timing(&one_second);
    let ntt = TelescopeProfile::ntt();
    let snr: Vec<f64> = enum_iterator::all::<SkyBrightness>()
        .map(|sky| {
            let target = TargetContext::builder().magnitude(20.0).sky(sky).build();
            estimate_sensitivity(&timing, &one_second, &target, &ntt)
                .unwrap()
                .signal_to_noise_single
        })
        .collect();
    assert!(snr[0] > snr[1] && snr[1] > snr[2], "{snr:?}");
}

#[rstest]
fn binning_concentrates_counts(one_second: InstrumentConfiguration) {
    let target = TargetContext::builder().magnitude(16.0).build();
    let wht = TelescopeProfile::wht();
    let unbinned = estimate_sensitivity(&compute_timing(&one_second), &one_second, &target, &wht)
        .unwrap();

    let binned_cfg = InstrumentConfiguration {
        xbin: 2,
        ybin: 2,
        ..one_second
    };
    let binned = estimate_sensitivity(&compute_timing(&binned_cfg), &binned_cfg, &target, &wht)
        .unwrap();

    assert_relative_eq!(binned.peak_counts, 4.0 * unbinned.peak_counts, max_relative = 1e-12);
    assert_relative_eq!(binned.aperture_area, unbinned.aperture_area / 4.0, max_relative = 1e-12);
    assert_eq!(binned.total_counts, unbinned.total_counts);
}
