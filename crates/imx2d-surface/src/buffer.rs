//! Buffer Collaborator Contract
//!
//! The binder does not own buffers; it reads them through [`VideoBuffer`],
//! which the pipeline implements for whatever buffer type it uses. A buffer
//! holds one or more memory blocks and may carry a [`VideoMeta`] describing
//! its actual plane layout.

use imx2d_format::{FrameLayout, VideoInfo};

/// Handle the blitter uses to address a DMA memory block
///
/// On i.MX this is the block's physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DmaHandle(pub u64);

/// A memory block that may be backed by DMA memory
pub trait DmaMemory {
    /// DMA handle of the block, `None` if it is plain system memory
    fn dma_handle(&self) -> Option<DmaHandle>;
}

/// Per-buffer video metadata
///
/// When present it overrides the stream's [`VideoInfo`] for this buffer:
/// upstream may hand over frames with larger strides or extra rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMeta {
    /// Picture width in pixels
    pub width: u32,
    /// Logical picture height, without padding rows
    pub height: u32,
    /// Actual strides, offsets and rows of the buffer's planes
    pub layout: FrameLayout,
}

impl VideoMeta {
    /// Metadata matching `info` exactly
    #[must_use]
    pub fn from_info(info: &VideoInfo) -> Self {
        Self {
            width: info.width,
            height: info.height,
            layout: info.layout.clone(),
        }
    }
}

/// A video frame buffer as seen by the binder
pub trait VideoBuffer {
    type Memory: DmaMemory;

    /// Memory blocks in order
    fn memory_blocks(&self) -> &[Self::Memory];

    fn video_meta(&self) -> Option<&VideoMeta>;

    fn video_meta_mut(&mut self) -> Option<&mut VideoMeta>;
}

/// How a buffer's memory blocks map onto planes
#[derive(Debug)]
pub enum BlockLayout<'a, M> {
    /// One block holds every plane at its offset
    Single(&'a M),
    /// Block `i` holds plane `i` from its start
    PerPlane(&'a [M]),
}

impl<'a, M> BlockLayout<'a, M> {
    /// Classify a buffer's blocks; `None` if there are none
    pub fn classify(blocks: &'a [M]) -> Option<Self> {
        match blocks {
            [] => None,
            [single] => Some(Self::Single(single)),
            blocks => Some(Self::PerPlane(blocks)),
        }
    }
}

/// Where plane strides, offsets and the logical height come from
#[derive(Debug, Clone, Copy)]
pub enum PlaneGeometry<'a> {
    Meta(&'a VideoMeta),
    Info(&'a VideoInfo),
}

impl<'a> PlaneGeometry<'a> {
    /// Prefer the buffer's metadata, fall back to the stream's info
    pub fn select(meta: Option<&'a VideoMeta>, info: &'a VideoInfo) -> Self {
        meta.map_or(Self::Info(info), Self::Meta)
    }

    pub fn layout(&self) -> &'a FrameLayout {
        match *self {
            Self::Meta(meta) => &meta.layout,
            Self::Info(info) => &info.layout,
        }
    }

    /// Logical picture height, without padding rows
    pub fn height(&self) -> u32 {
        match *self {
            Self::Meta(meta) => meta.height,
            Self::Info(info) => info.height,
        }
    }

    pub(crate) const fn source_name(&self) -> &'static str {
        match self {
            Self::Meta(_) => "videometa",
            Self::Info(_) => "video info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imx2d_format::PixelFormat;

    #[test]
    fn test_block_classification() {
        let none: [u8; 0] = [];
        assert!(BlockLayout::classify(&none).is_none());
        assert!(matches!(BlockLayout::classify(&[1u8]), Some(BlockLayout::Single(&1))));
        assert!(matches!(
            BlockLayout::classify(&[1u8, 2]),
            Some(BlockLayout::PerPlane(blocks)) if blocks.len() == 2
        ));
    }

    #[test]
    fn test_geometry_prefers_meta() {
        let info = VideoInfo::new(PixelFormat::NV12, 1920, 1080).expect("NV12 is known");
        let mut meta = VideoMeta::from_info(&info);
        meta.height = 1070;

        let geometry = PlaneGeometry::select(Some(&meta), &info);
        assert_eq!(geometry.height(), 1070);
        assert_eq!(geometry.source_name(), "videometa");

        let geometry = PlaneGeometry::select(None, &info);
        assert_eq!(geometry.height(), 1080);
        assert_eq!(geometry.layout(), &info.layout);
    }
}
