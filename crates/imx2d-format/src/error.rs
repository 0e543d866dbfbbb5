//! Error types for format operations
//!
//! Provides typed errors that library users can match and handle specifically.

use thiserror::Error;

/// Errors that can occur while translating formats or interpreting caps
///
/// Translation misses between the pipeline and hardware format tables are
/// not errors; they yield the `Unknown` variant of the target enum. This type
/// covers the cases where the caller asked for something concrete and the
/// input could not provide it.
///
/// # Examples
///
/// ```rust
/// use imx2d_format::{Caps, FormatError, VideoInfo};
///
/// match VideoInfo::from_caps(&Caps::Any) {
///     Err(FormatError::PreconditionViolation(msg)) => eprintln!("rejected: {msg}"),
///     Err(e) => eprintln!("other error: {e}"),
///     Ok(_) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A format name has no counterpart in the format tables
    #[error("Unrecognized pixel format: {0}")]
    FormatUnrecognized(String),

    /// Caps are empty, ANY, or not fixed where fixed caps are required
    ///
    /// The input is rejected as-is; nothing is fixated or transformed.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// An image-orientation tag value is not one of the eight known tokens
    #[error("Unknown image-orientation tag value \"{0}\"")]
    OrientationTagParse(String),

    /// Hardware capabilities failed validation
    #[error("Invalid hardware capabilities: {}", .0.join("; "))]
    InvalidCapabilities(Vec<String>),
}

/// Result type for format operations
pub type Result<T> = std::result::Result<T, FormatError>;

impl FormatError {
    /// Create an unrecognized format error
    pub(crate) fn unrecognized(name: impl Into<String>) -> Self {
        Self::FormatUnrecognized(name.into())
    }

    /// Create a precondition violation error
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormatError::unrecognized("P010");
        assert_eq!(err.to_string(), "Unrecognized pixel format: P010");

        let err = FormatError::OrientationTagParse("sideways".to_string());
        assert_eq!(err.to_string(), "Unknown image-orientation tag value \"sideways\"");

        let err = FormatError::InvalidCapabilities(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Invalid hardware capabilities: a; b");
    }

    #[test]
    fn test_error_helpers() {
        let err = FormatError::precondition("caps is ANY");
        assert!(matches!(err, FormatError::PreconditionViolation(_)));
    }
}
