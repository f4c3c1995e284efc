/// Errors raised for sample data that cannot be reported or exported
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Retention time is zero, negative or not a finite number
    #[error("Peak {number}: retention time must be a positive number, got {value}")]
    InvalidRetentionTime {
        /// Peak number (1-based)
        number: usize,
        /// Offending value
        value: f64,
    },

    /// A required measurement is negative or not a finite number
    #[error("Peak {number}: {field} must be a finite, non-negative number, got {value}")]
    InvalidMeasurement {
        /// Peak number (1-based)
        number: usize,
        /// Name of the measurement
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// More peaks than the export formats can number
    #[error("Too many peaks: {count} (maximum {max})")]
    TooManyPeaks {
        /// Number of peaks in the sample
        count: usize,
        /// Largest supported count
        max: usize,
    },

    /// Sample identifier is empty
    #[error("Sample ID must not be empty")]
    EmptySampleId,

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error reading a sample record
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
