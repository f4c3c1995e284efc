use super::*;

#[test]
fn test_default_configuration() {
    let config = Configuration::default();

    assert_eq!(config.peak_config.default_count, 5);
    assert_eq!(config.peak_config.max_count, 20);
    assert_eq!(config.field_config.concentration_label, "Conc.");
    assert_eq!(config.field_config.usp_tailing_label, "USP Tailing");
    assert_eq!(config.detector_settings.default_units, DetectorUnits::MilliVolts);
    assert_eq!(config.report_template.title, "HPLC Analysis Report");
    assert_eq!(config.concentration_settings.default_unit, "mg/L");
    assert!(config.validate().is_ok());
}

#[test]
fn test_resolve_without_overrides_is_default() {
    assert_eq!(resolve_configuration(None, None), Configuration::default());
}

#[test]
fn test_user_overrides_department() {
    let mut department = ConfigurationOverrides::default();
    department.field_config.area_label = Some("Dept Area".to_string());
    department.field_config.height_label = Some("Dept Height".to_string());
    department.detector_settings.default_units = Some(DetectorUnits::Absorbance);

    let mut user = ConfigurationOverrides::default();
    user.field_config.area_label = Some("My Area".to_string());
    user.report_template.include_graph = Some(false);

    let config = resolve_configuration(Some(&user), Some(&department));

    assert_eq!(config.field_config.area_label, "My Area");
    assert_eq!(config.field_config.height_label, "Dept Height");
    assert_eq!(config.field_config.concentration_label, "Conc.");
    assert_eq!(config.detector_settings.default_units, DetectorUnits::Absorbance);
    assert!(!config.report_template.include_graph);
    assert!(config.report_template.include_peak_table);
}

#[test]
fn test_optional_detector_values_layer() {
    let mut department = ConfigurationOverrides::default();
    department.detector_settings.wavelength = Some(254.0);
    department.detector_settings.flow_rate = Some(1.2);

    let mut user = ConfigurationOverrides::default();
    user.detector_settings.wavelength = Some(280.0);

    let config = resolve_configuration(Some(&user), Some(&department));
    assert_eq!(config.detector_settings.wavelength, Some(280.0));
    assert_eq!(config.detector_settings.flow_rate, Some(1.2));
    assert_eq!(
        config.detector_settings.temperature,
        Configuration::default().detector_settings.temperature
    );
}

#[test]
fn test_department_disable_applies_without_user_value() {
    let mut department = ConfigurationOverrides::default();
    department.field_config.enable_concentration = Some(false);

    let config = resolve_configuration(None, Some(&department));
    assert!(!config.field_config.enable_concentration);

    let mut user = ConfigurationOverrides::default();
    user.field_config.enable_concentration = Some(true);
    let config = resolve_configuration(Some(&user), Some(&department));
    assert!(config.field_config.enable_concentration);
}

#[test]
fn test_overrides_from_toml() {
    let toml = r#"
        [fieldConfig]
        areaLabel = "Peak Area"
        enableUSPTailing = false

        [detectorSettings]
        wavelength = 254.0
        defaultUnits = "AU"
    "#;

    let overrides = ConfigurationOverrides::from_toml(toml).unwrap();
    assert_eq!(overrides.field_config.area_label.as_deref(), Some("Peak Area"));
    assert_eq!(overrides.field_config.enable_usp_tailing, Some(false));
    assert_eq!(overrides.detector_settings.wavelength, Some(254.0));
    assert_eq!(
        overrides.detector_settings.default_units,
        Some(DetectorUnits::Absorbance)
    );
}

#[test]
fn test_configuration_json_roundtrip() {
    let mut config = Configuration::default();
    config.report_template.title = "Assay".to_string();
    config.detector_settings.wavelength = Some(484.0);

    let json = config.to_json().unwrap();
    assert!(json.contains("\"reportTemplate\""));
    assert!(json.contains("\"enableUSPPlateCount\""));

    let restored = Configuration::from_json(&json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_partial_json_fills_defaults() {
    let config = Configuration::from_json(r#"{"reportTemplate":{"includePeakTable":false}}"#).unwrap();
    assert!(!config.report_template.include_peak_table);
    assert_eq!(config.report_template.title, "HPLC Analysis Report");
    assert_eq!(config.field_config.area_label, "Area");
}

#[test]
fn test_peak_range() {
    let mut config = Configuration::default();
    assert!(config.peak_config.accepts(1));
    assert!(config.peak_config.accepts(20));
    assert!(!config.peak_config.accepts(0));
    assert!(!config.peak_config.accepts(21));

    config.peak_config.enable_range = false;
    assert!(config.peak_config.accepts(0));

    config.peak_config.min_count = 10;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidPeakRange { min: 10, .. })
    ));
}
