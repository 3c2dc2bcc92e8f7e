//! Error types for spark-folio.
//!
//! Missing page elements are never errors: the behaviour that needs them is
//! skipped. Errors only come from building layout, writing to a terminal, or
//! from a configuration the behaviours cannot run with.

use thiserror::Error;

/// Main error type for spark-folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Page layout computation failed
    #[error("Layout error: {0}")]
    Layout(#[from] taffy::TaffyError),

    /// Terminal output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Intersection threshold outside `[0, 1]`
    #[error("Invalid reveal threshold: {0} (expected 0.0..=1.0)")]
    InvalidThreshold(f32),

    /// A configuration value that must be non-zero was zero
    #[error("Invalid configuration value: {0} must be non-zero")]
    InvalidValue(&'static str),
}

/// Result type alias using FolioError.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FolioError::InvalidThreshold(2.0).to_string(),
            "Invalid reveal threshold: 2 (expected 0.0..=1.0)"
        );
        assert_eq!(
            FolioError::InvalidValue("typing_interval").to_string(),
            "Invalid configuration value: typing_interval must be non-zero"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: FolioError = io.into();
        assert!(matches!(err, FolioError::Io(_)));
    }
}
