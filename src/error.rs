//! Error types for the alignment pipeline.

use thiserror::Error;

/// Error type for all pipeline stages.
#[derive(Error, Debug)]
pub enum AlignError {
    /// Input records are missing required fields or could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Too few paired samples for a meaningful fit.
    #[error("insufficient data: need at least {needed} paired samples, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    /// The linear part of the transform is rank-deficient, so the
    /// decomposition (or the fit itself) is undefined.
    #[error("degenerate transform: {0}")]
    DegenerateTransform(String),

    /// A validation epoch failed; carries the epoch index for diagnosis.
    #[error("validation epoch {epoch} failed: {source}")]
    EpochFailed {
        epoch: usize,
        #[source]
        source: Box<AlignError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_context() {
        let err = AlignError::InsufficientData {
            needed: 3,
            actual: 2,
        };
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains('2'));

        let wrapped = AlignError::EpochFailed {
            epoch: 7,
            source: Box::new(err),
        };
        assert!(wrapped.to_string().contains("epoch 7"));
    }
}
