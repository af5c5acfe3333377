use crate::test_config_path;
use ultracam_timing::prelude::*;

#[test]
fn load_telescopes() {
    let cat = TelescopeCatalogue::from_yaml(test_config_path("telescopes.yaml")).unwrap();
    assert_eq!(cat.names(), vec!["WHT", "NTT", "VLT"]);
    // Same profiles as the built-in ones, only ordered differently
    let builtin = TelescopeCatalogue::builtin();
    for profile in cat.iter() {
        assert_eq!(profile, builtin.find(&profile.name).unwrap());
    }
}

#[test]
fn load_templates() {
    let cat = TemplateCatalogue::from_yaml(test_config_path("templates.yaml")).unwrap();
    assert_eq!(cat.len(), 5);
    let four = cat.resolve("4 windows").unwrap();
    assert_eq!(four.mode, ApplicationMode::MultiWindow(MultiWindowCount::Four));
    assert_eq!(four.pairs, 2);
    assert!(cat.resolve("Timing test").is_err());
}

#[test]
fn template_pair_mismatch_is_fatal() {
    let err = TemplateCatalogue::from_yaml(test_config_path("bad_templates.yaml")).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TemplatePairMismatch {
            declared: 2,
            required: 3,
            ..
        }
    ));
    let err = EngineError::from(err);
    assert!(err.is_fatal());
    // Configuration errors are identified by their variant, never by equality
    assert_ne!(err, err);
    assert!(matches!(err, EngineError::Config { .. }));
}

#[test]
fn missing_file() {
    assert!(matches!(
        TelescopeCatalogue::from_yaml(test_config_path("no_such_file.yaml")),
        Err(ConfigError::ReadError { .. })
    ));
}

#[test]
fn load_scenario() {
    let scenario = Scenario::load(test_config_path("scenario_vlt_drift.yaml")).unwrap();
    assert_eq!(scenario.template, "Drift mode");
    assert_eq!(scenario.speed, ReadoutSpeed::Fast);
    assert_eq!(scenario.windows[0], Window::new(2, 202, 702, 100, 50));
    assert!(scenario.target.is_none());
}

#[test]
fn unknown_telescope_is_fatal() {
    let scenario = Scenario::load(test_config_path("scenario_unknown_telescope.yaml")).unwrap();
    let err = InstrumentEngine
        .compute_scenario(
            &scenario,
            &TemplateCatalogue::builtin(),
            &TelescopeCatalogue::builtin(),
        )
        .unwrap_err();
    assert!(err.is_fatal());
    match err {
        EngineError::Config {
            source: ConfigError::UnknownTelescope { name, known },
        } => {
            assert_eq!(name, "GTC");
            assert_eq!(known, "NTT, VLT, WHT");
        }
        other => panic!("unexpected {other}"),
    }
}
