use serde::{Deserialize, Serialize};

use super::{
    ConcentrationSettings, ConfigError, Configuration, DetectorSettings, DetectorUnits,
    FieldConfig, PeakConfig, ReportTemplate,
};

/// Partial settings stored for a department or a user.
///
/// Every field is optional; unset fields fall through to the next level
/// when merged by [`resolve_configuration`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigurationOverrides {
    /// Peak count overrides
    pub peak_config: PeakConfigOverrides,
    /// Column overrides
    pub field_config: FieldConfigOverrides,
    /// Detector overrides
    pub detector_settings: DetectorOverrides,
    /// Report template overrides
    pub report_template: ReportTemplateOverrides,
    /// Concentration overrides
    pub concentration_settings: ConcentrationOverrides,
}

/// Partial [`PeakConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct PeakConfigOverrides {
    pub default_count: Option<u32>,
    pub min_count: Option<u32>,
    pub max_count: Option<u32>,
    pub enable_range: Option<bool>,
}

/// Partial [`FieldConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct FieldConfigOverrides {
    pub enable_area: Option<bool>,
    pub enable_height: Option<bool>,
    pub enable_concentration: Option<bool>,
    pub enable_percent_area: Option<bool>,
    #[serde(rename = "enableUSPPlateCount")]
    pub enable_usp_plate_count: Option<bool>,
    #[serde(rename = "enableUSPTailing")]
    pub enable_usp_tailing: Option<bool>,
    pub area_label: Option<String>,
    pub height_label: Option<String>,
    pub concentration_label: Option<String>,
    pub percent_area_label: Option<String>,
    #[serde(rename = "uspPlateCountLabel")]
    pub usp_plate_count_label: Option<String>,
    #[serde(rename = "uspTailingLabel")]
    pub usp_tailing_label: Option<String>,
}

/// Partial [`DetectorSettings`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct DetectorOverrides {
    pub wavelength: Option<f64>,
    pub flow_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub default_units: Option<DetectorUnits>,
}

/// Partial [`ReportTemplate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ReportTemplateOverrides {
    pub title: Option<String>,
    pub include_system_suitability: Option<bool>,
    pub include_peak_table: Option<bool>,
    pub include_graph: Option<bool>,
    pub show_mark_column: Option<bool>,
}

/// Partial [`ConcentrationSettings`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ConcentrationOverrides {
    pub default_unit: Option<String>,
    pub available_units: Option<Vec<String>>,
    pub show_unit_column: Option<bool>,
}

impl ConfigurationOverrides {
    /// Parse overrides from a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Layered lookup: user value, then department value, then the default.
struct Layers<'a> {
    user: Option<&'a ConfigurationOverrides>,
    department: Option<&'a ConfigurationOverrides>,
}

impl<'a> Layers<'a> {
    fn pick<T: Clone + 'a>(
        &self,
        get: impl Fn(&'a ConfigurationOverrides) -> &'a Option<T>,
        default: T,
    ) -> T {
        self.user
            .and_then(|o| get(o).clone())
            .or_else(|| self.department.and_then(|o| get(o).clone()))
            .unwrap_or(default)
    }

    fn pick_opt<T: Clone + 'a>(
        &self,
        get: impl Fn(&'a ConfigurationOverrides) -> &'a Option<T>,
        default: Option<T>,
    ) -> Option<T> {
        self.user
            .and_then(|o| get(o).clone())
            .or_else(|| self.department.and_then(|o| get(o).clone()))
            .or(default)
    }
}

/// Merge user and department overrides over the system defaults.
///
/// User settings take precedence over department settings, which take
/// precedence over [`Configuration::default`]. The merge is total: any
/// combination of missing levels yields a complete configuration.
pub fn resolve_configuration(
    user: Option<&ConfigurationOverrides>,
    department: Option<&ConfigurationOverrides>,
) -> Configuration {
    let l = Layers { user, department };
    let d = Configuration::default();

    let peak_config = PeakConfig {
        default_count: l.pick(|o| &o.peak_config.default_count, d.peak_config.default_count),
        min_count: l.pick(|o| &o.peak_config.min_count, d.peak_config.min_count),
        max_count: l.pick(|o| &o.peak_config.max_count, d.peak_config.max_count),
        enable_range: l.pick(|o| &o.peak_config.enable_range, d.peak_config.enable_range),
    };

    let f = &d.field_config;
    let field_config = FieldConfig {
        enable_area: l.pick(|o| &o.field_config.enable_area, f.enable_area),
        enable_height: l.pick(|o| &o.field_config.enable_height, f.enable_height),
        enable_concentration: l.pick(
            |o| &o.field_config.enable_concentration,
            f.enable_concentration,
        ),
        enable_percent_area: l.pick(|o| &o.field_config.enable_percent_area, f.enable_percent_area),
        enable_usp_plate_count: l.pick(
            |o| &o.field_config.enable_usp_plate_count,
            f.enable_usp_plate_count,
        ),
        enable_usp_tailing: l.pick(|o| &o.field_config.enable_usp_tailing, f.enable_usp_tailing),
        area_label: l.pick(|o| &o.field_config.area_label, f.area_label.clone()),
        height_label: l.pick(|o| &o.field_config.height_label, f.height_label.clone()),
        concentration_label: l.pick(
            |o| &o.field_config.concentration_label,
            f.concentration_label.clone(),
        ),
        percent_area_label: l.pick(
            |o| &o.field_config.percent_area_label,
            f.percent_area_label.clone(),
        ),
        usp_plate_count_label: l.pick(
            |o| &o.field_config.usp_plate_count_label,
            f.usp_plate_count_label.clone(),
        ),
        usp_tailing_label: l.pick(
            |o| &o.field_config.usp_tailing_label,
            f.usp_tailing_label.clone(),
        ),
    };

    let detector_settings = DetectorSettings {
        wavelength: l.pick_opt(|o| &o.detector_settings.wavelength, d.detector_settings.wavelength),
        flow_rate: l.pick_opt(|o| &o.detector_settings.flow_rate, d.detector_settings.flow_rate),
        temperature: l.pick_opt(
            |o| &o.detector_settings.temperature,
            d.detector_settings.temperature,
        ),
        default_units: l.pick(
            |o| &o.detector_settings.default_units,
            d.detector_settings.default_units,
        ),
    };

    let t = &d.report_template;
    let report_template = ReportTemplate {
        title: l.pick(|o| &o.report_template.title, t.title.clone()),
        include_system_suitability: l.pick(
            |o| &o.report_template.include_system_suitability,
            t.include_system_suitability,
        ),
        include_peak_table: l.pick(
            |o| &o.report_template.include_peak_table,
            t.include_peak_table,
        ),
        include_graph: l.pick(|o| &o.report_template.include_graph, t.include_graph),
        show_mark_column: l.pick(|o| &o.report_template.show_mark_column, t.show_mark_column),
    };

    let c = &d.concentration_settings;
    let concentration_settings = ConcentrationSettings {
        default_unit: l.pick(
            |o| &o.concentration_settings.default_unit,
            c.default_unit.clone(),
        ),
        available_units: l.pick(
            |o| &o.concentration_settings.available_units,
            c.available_units.clone(),
        ),
        show_unit_column: l.pick(
            |o| &o.concentration_settings.show_unit_column,
            c.show_unit_column,
        ),
    };

    Configuration {
        peak_config,
        field_config,
        detector_settings,
        report_template,
        concentration_settings,
    }
}
