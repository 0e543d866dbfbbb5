//! Output Layout Alignment
//!
//! Blitters write rows in fixed granules: strides must be a multiple of some
//! byte count, and the frame as a whole must span a multiple of some row
//! count. This module grows an output layout to satisfy both, adding padding
//! rows below the picture without changing its logical height.

use imx2d_format::{align_up, HardwareCapabilities, PlaneLayout, VideoInfo};
use tracing::debug;

use crate::error::{Result, SurfaceError};

/// A video info grown to hardware alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedVideoInfo {
    /// The info with aligned strides, offsets and plane rows
    pub info: VideoInfo,
    /// Rows added below the picture to reach the row count alignment
    pub num_padding_rows: u32,
}

/// Align an output layout to stride and total row count granules
///
/// Every stride is rounded up to a multiple of `stride_alignment`. The
/// total row count is rounded up to a multiple of `row_count_alignment`,
/// and each plane gets the rows it needs for that padded count (chroma
/// planes of vertically subsampled formats get proportionally fewer).
/// Planes are laid out back to back from plane 0's offset. The logical
/// height is kept.
///
/// Alignments of 0 are treated as 1.
///
/// # Errors
///
/// [`SurfaceError::Format`] with a precondition violation if the aligned
/// row count, a stride or a plane offset overflows.
pub fn align_output_video_info(
    info: VideoInfo,
    stride_alignment: u32,
    row_count_alignment: u32,
) -> Result<AlignedVideoInfo> {
    let total_rows = info.layout.total_frame_rows();
    let padded_rows = align_up(total_rows, row_count_alignment)
        .ok_or_else(|| SurfaceError::layout_overflow("total row count", &info))?;
    let num_padding_rows = padded_rows - total_rows;

    debug!(
        "aligning output video info;  stride alignment: {}  total row count alignment: {}  num extra padding rows: {}",
        stride_alignment, row_count_alignment, num_padding_rows
    );

    let original_info = info.clone();
    let original = &original_info.layout;
    let mut aligned = info;

    let mut offset = original.planes().first().map_or(0, |plane| plane.offset);
    for (index, plane) in aligned.layout.planes_mut().iter_mut().enumerate() {
        let stride = align_up(plane.stride, stride_alignment)
            .ok_or_else(|| SurfaceError::layout_overflow("stride", &original_info))?;
        *plane = PlaneLayout {
            stride,
            offset,
            rows: aligned.format.plane_rows(index, padded_rows),
        };
        offset = plane
            .checked_size()
            .and_then(|size| offset.checked_add(size))
            .ok_or_else(|| SurfaceError::layout_overflow("plane offset", &original_info))?;
    }

    for (index, (before, after)) in original
        .planes()
        .iter()
        .zip(aligned.layout.planes())
        .enumerate()
    {
        debug!(
            "plane {} of output video info:  original/aligned stride {}/{}  original/aligned plane offset {}/{}",
            index, before.stride, after.stride, before.offset, after.offset
        );
    }

    Ok(AlignedVideoInfo {
        info: aligned,
        num_padding_rows,
    })
}

/// Align an output layout to the granules of a blitter
///
/// # Errors
///
/// See [`align_output_video_info`].
pub fn align_for_capabilities(
    info: VideoInfo,
    capabilities: &HardwareCapabilities,
) -> Result<AlignedVideoInfo> {
    align_output_video_info(
        info,
        capabilities.stride_alignment,
        capabilities.total_row_count_alignment,
    )
}
