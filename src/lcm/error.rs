use crate::model::ModelError;

/// Errors that can occur while writing or reading LCM files
#[derive(Debug, thiserror::Error)]
pub enum LcmError {
    /// The sample cannot be exported
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ModelError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The data does not start with the LCM signature
    #[error("Not an LCM file: bad signature {0:02x?}")]
    BadMagic(Vec<u8>),

    /// Version other than the supported one
    #[error("Unsupported LCM version {0}")]
    UnsupportedVersion(u16),

    /// The data ends inside a section
    #[error("Truncated LCM data in {section}: need {needed} bytes, {available} available")]
    Truncated {
        /// Section being read
        section: &'static str,
        /// Bytes required
        needed: usize,
        /// Bytes left
        available: usize,
    },

    /// The trailer is missing or damaged
    #[error("Missing LCM footer")]
    BadFooter,

    /// Extra data after the footer
    #[error("{0} unexpected bytes after the LCM footer")]
    TrailingBytes(usize),
}
