//! TOML lab configuration for the report command.
//!
//! ```toml
//! # lab.toml
//! [department.reportTemplate]
//! title = "QC Release Report"
//!
//! [department.detectorSettings]
//! wavelength = 254.0
//! defaultUnits = "AU"
//!
//! [user.fieldConfig]
//! enableUSPTailing = false
//!
//! [report]
//! branding = "Example Labs QC"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use lcpeak::config::{resolve_configuration, Configuration, ConfigurationOverrides};
use lcpeak::render::RenderOptions;

/// Root structure of a lab configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Department-level overrides.
    pub department: Option<ConfigurationOverrides>,

    /// User-level overrides; win over the department.
    pub user: Option<ConfigurationOverrides>,

    /// Page decoration.
    #[serde(default)]
    pub report: ReportSection,
}

/// Settings that only affect how the report page is decorated.
#[derive(Debug, Default, Deserialize)]
pub struct ReportSection {
    /// Branding line at the top of each page.
    pub branding: Option<String>,

    /// Software line under the branding.
    pub software: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Merge user, department and system defaults.
    pub fn configuration(&self) -> Result<Configuration> {
        let config = resolve_configuration(self.user.as_ref(), self.department.as_ref());
        config.validate().context("Invalid lab configuration")?;
        Ok(config)
    }

    /// Render options printing the current time.
    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default();
        if let Some(branding) = &self.report.branding {
            options.branding = branding.clone();
        }
        if let Some(software) = &self.report.software {
            options.software = software.clone();
        }
        options
    }
}
