//! # Configuration Module
//!
//! Display and field settings that control how a sample is reported.
//!
//! Settings exist at three levels: system defaults, department overrides and
//! user overrides. The collaborator layer merges them once with
//! [`resolve_configuration`] and freezes the result into each new
//! [`Sample`](crate::model::Sample). Report and LCM generation only ever read
//! that frozen snapshot, so admin changes made later never alter an existing
//! sample's output.

mod configuration;
mod error;
mod overrides;

#[cfg(test)]
mod tests;

pub use configuration::{
    labels, ConcentrationSettings, Configuration, DetectorSettings, DetectorUnits, FieldConfig,
    PeakConfig, ReportTemplate,
};
pub use error::ConfigError;
pub use overrides::{
    resolve_configuration, ConcentrationOverrides, ConfigurationOverrides, DetectorOverrides,
    FieldConfigOverrides, PeakConfigOverrides, ReportTemplateOverrides,
};
