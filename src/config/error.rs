/// Errors that can occur while loading or checking a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a configuration file
    #[error("Failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Peak count limits that cannot be satisfied together
    #[error("Invalid peak range: min {min}, default {default}, max {max}")]
    InvalidPeakRange {
        /// Minimum number of peaks
        min: u32,
        /// Default number of peaks
        default: u32,
        /// Maximum number of peaks
        max: u32,
    },
}
