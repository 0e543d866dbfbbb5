//! Video Info and Frame Layouts
//!
//! [`VideoInfo`] is a fixed descriptor turned into concrete numbers: format,
//! size, rates and the byte layout of every plane in a frame.

use tracing::{debug, error};

use crate::caps::{Caps, Fraction};
use crate::error::{FormatError, Result};
use crate::format::{PixelFormat, TileLayout};

/// Default stride alignment in bytes for freshly computed layouts
pub const DEFAULT_STRIDE_ALIGNMENT: u32 = 4;

/// Round `value` up to the next multiple of `alignment`
///
/// An alignment of 0 is treated as 1. Returns `None` if the rounded value
/// does not fit in a `u32`.
#[must_use]
pub fn align_up(value: u32, alignment: u32) -> Option<u32> {
    value.checked_next_multiple_of(alignment.max(1))
}

/// Byte layout of one plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaneLayout {
    /// Bytes from the start of one row to the start of the next
    pub stride: u32,
    /// Byte offset of the plane's first row within the frame
    pub offset: usize,
    /// Rows allocated for the plane, possibly more than the picture needs
    pub rows: u32,
}

impl PlaneLayout {
    /// Bytes covered by the plane
    #[must_use]
    pub fn size(&self) -> usize {
        self.stride as usize * self.rows as usize
    }

    /// Bytes covered by the plane, `None` if that overflows `usize`
    #[must_use]
    pub fn checked_size(&self) -> Option<usize> {
        (self.stride as usize).checked_mul(self.rows as usize)
    }
}

/// Byte layout of every plane in a frame, in plane order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameLayout {
    planes: Vec<PlaneLayout>,
}

impl FrameLayout {
    /// Create a layout from per-plane entries
    #[must_use]
    pub fn new(planes: Vec<PlaneLayout>) -> Self {
        Self { planes }
    }

    pub fn planes(&self) -> &[PlaneLayout] {
        &self.planes
    }

    pub fn planes_mut(&mut self) -> &mut [PlaneLayout] {
        &mut self.planes
    }

    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// Total physical row count, in full-resolution rows
    ///
    /// This is the row count of plane 0; 0 for an empty layout.
    #[must_use]
    pub fn total_frame_rows(&self) -> u32 {
        self.planes.first().map_or(0, |plane| plane.rows)
    }

    /// Bytes from the start of the frame to the end of the furthest plane
    #[must_use]
    pub fn size(&self) -> usize {
        self.planes
            .iter()
            .map(|plane| plane.offset + plane.size())
            .max()
            .unwrap_or(0)
    }

    /// Compute a packed layout for `format`
    ///
    /// Strides are the plane's row bytes rounded up to `stride_alignment`,
    /// each plane holds the rows it needs for `frame_rows` full-resolution
    /// rows, and planes follow each other without gaps.
    ///
    /// Returns `None` if a stride or the frame size overflows.
    #[must_use]
    pub fn packed(
        format: PixelFormat,
        width: u32,
        frame_rows: u32,
        stride_alignment: u32,
    ) -> Option<Self> {
        let mut offset = 0usize;
        let mut planes = Vec::with_capacity(format.plane_count());

        for plane in 0..format.plane_count() {
            let layout = PlaneLayout {
                stride: align_up(format.plane_row_bytes(plane, width)?, stride_alignment)?,
                offset,
                rows: format.plane_rows(plane, frame_rows),
            };
            offset = offset.checked_add(layout.checked_size()?)?;
            planes.push(layout);
        }

        Some(Self { planes })
    }
}

/// Fully resolved description of a video stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    /// Pixel format; never [`PixelFormat::Unknown`]
    pub format: PixelFormat,
    /// Picture width in pixels
    pub width: u32,
    /// Logical picture height; padding rows are not included
    pub height: u32,
    /// Frames per second, 0/1 when unknown or variable
    pub framerate: Fraction,
    /// Pixel aspect ratio, 1/1 for square pixels
    pub pixel_aspect_ratio: Fraction,
    /// Byte layout of every plane
    pub layout: FrameLayout,
}

impl VideoInfo {
    /// Create a video info with the default layout for `format`
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::FormatUnrecognized`] for [`PixelFormat::Unknown`],
    /// [`FormatError::PreconditionViolation`] if a stride or the frame size
    /// does not fit the integer types of the layout.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Result<Self> {
        if format == PixelFormat::Unknown {
            return Err(FormatError::unrecognized(format.name()));
        }

        let Some(layout) = FrameLayout::packed(format, width, height, DEFAULT_STRIDE_ALIGNMENT)
        else {
            error!("{} frame of {}x{} is too large to lay out", format, width, height);
            return Err(FormatError::precondition(format!(
                "{format} frame of {width}x{height} is too large to lay out"
            )));
        };

        Ok(Self {
            format,
            width,
            height,
            framerate: Fraction::ZERO,
            pixel_aspect_ratio: Fraction::ONE,
            layout,
        })
    }

    /// Build a video info from fixed caps
    ///
    /// The tile layout is taken out of the format name and returned
    /// alongside; the info itself always carries the plain format.
    ///
    /// # Errors
    ///
    /// [`FormatError::PreconditionViolation`] if the caps are empty, ANY,
    /// not fixed or not raw video; [`FormatError::FormatUnrecognized`] if the
    /// format name is not known.
    pub fn from_caps(caps: &Caps) -> Result<(Self, TileLayout)> {
        if caps.is_empty() {
            error!("cannot build video info from empty caps");
            return Err(FormatError::precondition("caps are empty"));
        }
        if caps.is_any() {
            error!("cannot build video info from ANY caps");
            return Err(FormatError::precondition("caps are ANY"));
        }
        if !caps.is_fixed() {
            error!("cannot build video info from unfixed caps {:?}", caps);
            return Err(FormatError::precondition("caps are not fixed"));
        }

        let (caps, tile_layout) = caps.clone().remove_tile_layout();
        let structure = caps
            .structures()
            .first()
            .ok_or_else(|| FormatError::precondition("caps are empty"))?;

        if structure.media_type != crate::caps::MEDIA_TYPE_VIDEO_RAW {
            error!("caps media type {} is not raw video", structure.media_type);
            return Err(FormatError::precondition(format!(
                "media type {} is not raw video",
                structure.media_type
            )));
        }

        let (Some(name), Some(width), Some(height), Some(framerate)) = (
            structure.fixed_format(),
            structure.width.fixed(),
            structure.height.fixed(),
            structure.framerate.fixed(),
        ) else {
            return Err(FormatError::precondition("caps are not fixed"));
        };

        let format: PixelFormat = name.parse()?;
        let mut info = Self::new(format, width, height)?;
        info.framerate = framerate;
        if let Some(par) = structure.pixel_aspect_ratio {
            info.pixel_aspect_ratio = par;
        }

        debug!(
            "video info from caps: {} {}x{} @ {} (tile layout {:?})",
            info.format, info.width, info.height, info.framerate, tile_layout
        );

        Ok((info, tile_layout))
    }

    /// Number of planes in the layout
    #[must_use]
    pub fn num_planes(&self) -> usize {
        self.layout.num_planes()
    }
}
