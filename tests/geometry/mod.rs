use rstest::*;
use ultracam_timing::prelude::*;

fn arbitrary_windows() -> WindowSet {
    WindowSet::new(vec![
        Window::new(1, 1, 513, 48, 48),
        Window::new(203, 97, 777, 120, 64),
        Window::new(1017, 505, 1017, 8, 8),
    ])
}

#[rstest]
fn synchronize_is_idempotent(#[values(1, 2, 3, 4, 5, 6, 7, 8)] bin: u32) {
    let windows = arbitrary_windows();
    let once = synchronize(&windows, bin, bin);
    assert!(is_synchronized(&once, bin, bin));
    assert_eq!(synchronize(&once, bin, bin), once);
}

#[rstest]
fn synchronize_every_start(
    #[values(1, 2, 3, 4, 5, 6, 7, 8)] xbin: u32,
    #[values(1, 3, 8)] ybin: u32,
) {
    for start in (1..=512).step_by(7) {
        let window = Window::new(start, start, start + 512, 8, 8);
        let set = WindowSet::new(vec![window]);
        let synced = synchronize(&set, xbin, ybin);
        assert!(is_synchronized(&synced, xbin, ybin), "start {start}");
        let moved = synced[0];
        // Starts stay within their half of the chip
        assert!((1..=1024).contains(&moved.ystart));
        assert!((1..=512).contains(&moved.xleft));
        assert!((513..=1024).contains(&moved.xright));
        // and move by at most one binned pixel
        assert!(moved.xleft.abs_diff(start) <= xbin);
        assert!(moved.ystart.abs_diff(start) <= ybin);
    }
}

#[test]
fn overlap_never_reaches_timing() {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::MultiWindow(MultiWindowCount::Six))
        .windows(vec![
            Window::new(1, 101, 613, 100, 100),
            Window::new(301, 101, 613, 100, 100),
            Window::new(350, 101, 613, 100, 100),
        ])
        .build();
    let err = InstrumentEngine
        .compute(&cfg, &TelescopeProfile::ntt(), None)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Geometry {
            source: GeometryError::Overlap {
                window: 3,
                ystart: 350,
                previous_end: 401
            }
        }
    );
    assert!(!err.is_fatal());
}

#[rstest]
#[case(ApplicationMode::FullframeClear, 0)]
#[case(ApplicationMode::MultiWindow(MultiWindowCount::Two), 1)]
#[case(ApplicationMode::MultiWindow(MultiWindowCount::Six), 3)]
#[case(ApplicationMode::TimingTest, 1)]
fn default_windows_are_valid(#[case] mode: ApplicationMode, #[case] pairs: usize) {
    let cfg = InstrumentConfiguration::builder()
        .mode(mode)
        .windows(WindowSet::for_mode(mode))
        .build();
    assert_eq!(cfg.windows.len(), pairs);
    assert_eq!(validate(&cfg), Ok(()));
}

#[test]
fn sync_then_validate() {
    let cfg = InstrumentConfiguration::builder()
        .mode(ApplicationMode::MultiWindow(MultiWindowCount::Four))
        .xbin(8)
        .ybin(8)
        .windows(vec![
            Window::new(3, 7, 700, 64, 64),
            Window::new(500, 300, 900, 96, 120),
        ])
        .build();
    assert!(!config_is_synchronized(&cfg));
    let windows = InstrumentEngine.validate_and_synchronize(&cfg).unwrap();
    let synced = cfg.with_windows(windows);
    assert!(config_is_synchronized(&synced));
    assert!(validate(&synced).is_ok());
}
