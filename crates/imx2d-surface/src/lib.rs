//! # imx2d-surface
//!
//! Surface geometry for the NXP i.MX 2D blitters: where a video goes inside
//! an output region, how a frame buffer's DMA memory maps onto planes, and
//! how output layouts are grown to hardware granules.
//!
//! This crate is part of the [imx2d-video](https://github.com/lamco-admin/imx2d-video)
//! workspace and builds on [`imx2d-format`](https://crates.io/crates/imx2d-format)
//! for formats, video info and hardware capabilities.
//!
//! # Features
//!
//! - **Letterboxing**: Aspect-correct placement with margins, including
//!   rotated video and non-square pixels
//! - **Plane Binding**: Single-block and block-per-plane DMA buffers,
//!   with per-buffer metadata taking priority over the stream layout
//! - **Output Alignment**: Stride and total row count padding
//!
//! # Binding Buffers
//!
//! Buffers are accessed through the [`VideoBuffer`] and [`DmaMemory`]
//! traits, so any buffer type the pipeline uses can be bound:
//!
//! ```rust
//! use imx2d_format::{PixelFormat, VideoInfo};
//! use imx2d_surface::{assign_input_buffer, DmaHandle, DmaMemory, VideoBuffer, VideoMeta};
//!
//! struct PhysBlock(u64);
//!
//! impl DmaMemory for PhysBlock {
//!     fn dma_handle(&self) -> Option<DmaHandle> {
//!         Some(DmaHandle(self.0))
//!     }
//! }
//!
//! struct Frame(Vec<PhysBlock>);
//!
//! impl VideoBuffer for Frame {
//!     type Memory = PhysBlock;
//!
//!     fn memory_blocks(&self) -> &[PhysBlock] {
//!         &self.0
//!     }
//!
//!     fn video_meta(&self) -> Option<&VideoMeta> {
//!         None
//!     }
//!
//!     fn video_meta_mut(&mut self) -> Option<&mut VideoMeta> {
//!         None
//!     }
//! }
//!
//! let info = VideoInfo::new(PixelFormat::NV12, 1280, 720)?;
//! let frame = Frame(vec![PhysBlock(0x1000_0000)]);
//!
//! let desc = assign_input_buffer(&frame, &info)?;
//! assert_eq!(desc.planes.len(), 2);
//! assert_eq!(desc.planes[1].offset, 1280 * 720);
//! # Ok::<(), imx2d_surface::SurfaceError>(())
//! ```
//!
//! # Error Handling
//!
//! Buffers that cannot be described at all yield a [`SurfaceError`]. A
//! frame with fewer rows than its picture height is a caller bug and
//! panics; see [`assign_input_buffer`].

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod align;
pub mod binder;
pub mod buffer;
pub mod error;
pub mod letterbox;

// =============================================================================
// RE-EXPORTS - PRIMARY API
// =============================================================================

// Letterbox
pub use letterbox::{calculate_letterbox_margin, Letterbox, Margin, Region};

// Binding
pub use binder::{
    assign_input_buffer, assign_output_buffer, check_input_buffer_structure, SurfaceDescriptor,
    SurfacePlane,
};
pub use buffer::{BlockLayout, DmaHandle, DmaMemory, PlaneGeometry, VideoBuffer, VideoMeta};

// Alignment
pub use align::{align_for_capabilities, align_output_video_info, AlignedVideoInfo};

// Errors
pub use error::{Result, SurfaceError};

// =============================================================================
// CRATE-LEVEL ITEMS
// =============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
