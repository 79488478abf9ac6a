//! Error types for demand-pager operations.

use thiserror::Error;

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PagerError>;

#[derive(Error, Debug)]
pub enum PagerError {
    /// Malformed, unparsable or non-positive address record. Recoverable:
    /// the stream driver either skips it or ends the stream, per policy.
    #[error("Invalid address record at line {line}: {text:?}")]
    ParseRecord { line: usize, text: String },

    /// Backing store could not be opened, sought or read to completion.
    /// Fatal to the run.
    #[error("Backing store I/O error: {0}")]
    BackingStore(std::io::Error),

    /// Address stream or result sink I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Physical memory is full and the configuration disables replacement.
    #[error("Physical memory exhausted and page replacement is disabled")]
    FramesExhausted,

    /// Internal logic error. Never produced by well-formed input.
    #[error("Invariant violation: {0}")]
    Invariant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_display() {
        let err = PagerError::ParseRecord {
            line: 7,
            text: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_backing_store_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err = PagerError::BackingStore(io_err);
        assert!(err.to_string().contains("Backing store"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PagerError = io_err.into();
        assert!(matches!(err, PagerError::Io(_)));
    }

    #[test]
    fn test_frames_exhausted_display() {
        let msg = PagerError::FramesExhausted.to_string();
        assert!(msg.contains("replacement is disabled"));
    }
}
