//! Error types for surface operations

use imx2d_format::{FormatError, VideoInfo};
use thiserror::Error;

/// Errors that can occur while binding buffers to hardware surfaces
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Buffer memory blocks do not match the frame's planes
    ///
    /// Supported layouts are one block for all planes or one block per plane.
    #[error(
        "Unsupported buffer layout: {blocks} memory blocks for {planes} planes; \
         either one single block or one block per plane are supported"
    )]
    LayoutMismatch { blocks: usize, planes: usize },

    /// A memory block backing a plane is not DMA memory
    #[error("Memory block for plane {plane} is not DMA-backed")]
    NotDmaBacked { plane: usize },

    /// Buffer has no memory blocks at all
    #[error("Buffer has no memory blocks")]
    MissingMemory,

    /// Format-level failure
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Result type for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;

impl SurfaceError {
    pub(crate) fn layout_mismatch(blocks: usize, planes: usize) -> Self {
        Self::LayoutMismatch { blocks, planes }
    }

    pub(crate) fn layout_overflow(what: &str, info: &VideoInfo) -> Self {
        Self::Format(FormatError::PreconditionViolation(format!(
            "aligned {what} of {} {}x{} frame overflows",
            info.format, info.width, info.height
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SurfaceError::layout_mismatch(2, 3);
        assert!(err.to_string().contains("2 memory blocks for 3 planes"));

        let err = SurfaceError::NotDmaBacked { plane: 1 };
        assert_eq!(err.to_string(), "Memory block for plane 1 is not DMA-backed");
    }

    #[test]
    fn test_format_error_conversion() {
        let err: SurfaceError = FormatError::PreconditionViolation("caps are ANY".into()).into();
        assert_eq!(err.to_string(), "Precondition violated: caps are ANY");
    }
}
