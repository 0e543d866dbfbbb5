//! # imx2d-video
//!
//! Format negotiation and surface layout handling for the NXP i.MX 2D
//! blitters (G2D, PxP, IPU) in video pipelines.
//!
//! This crate provides a unified interface to the imx2d libraries:
//!
//! - **[`format`]** - Pixel format translation, caps construction, video info, orientation
//! - **[`surface`]** - Letterbox geometry, DMA buffer plane binding, output alignment
//!
//! # Features
//!
//! All features are enabled by default. You can selectively enable only what you need:
//!
//! ```toml
//! # Use everything (default)
//! imx2d-video = "0.1"
//!
//! # Format handling only
//! imx2d-video = { version = "0.1", default-features = false, features = ["format"] }
//! ```
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `format` | Yes | Format translation and caps construction |
//! | `surface` | Yes | Surface geometry and buffer binding (implies `format`) |
//! | `full` | No | All features from all sub-crates |
//!
//! # Quick Start
//!
//! ## Negotiate, Align, Letterbox
//!
//! ```rust
//! use imx2d_video::prelude::*;
//!
//! let capabilities = HardwareCapabilities::builder()
//!     .source_formats(vec![HardwareFormat::SemiPlanarNv12])
//!     .dest_formats(vec![HardwareFormat::Bgrx8888])
//!     .width_range(64, 4096, 8)
//!     .height_range(64, 4096, 2)
//!     .stride_alignment(64)
//!     .total_row_count_alignment(16)
//!     .build();
//!
//! // Output side caps offered to downstream
//! let caps = caps_from_capabilities(&capabilities, PadDirection::Src, false);
//! assert_eq!(caps.structures().len(), 1);
//!
//! // Output layout grown to the blitter's granules
//! let info = VideoInfo::new(PixelFormat::NV12, 1920, 1080)?;
//! let aligned = align_for_capabilities(info, &capabilities)?;
//! assert_eq!(aligned.num_padding_rows, 8);
//!
//! // Where a 4:3 video lands on that output
//! let outer = Region::new(0, 0, 1920, 1080);
//! let letterbox = calculate_letterbox_margin(&outer, false, 640, 480, 1, 1);
//! assert_eq!(letterbox.margin.left, 240);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         imx2d-video                             │
//! ├────────────────────────────────┬────────────────────────────────┤
//! │          imx2d-format          │         imx2d-surface          │
//! │                                │                                │
//! │  PixelFormat / HardwareFormat  │  calculate_letterbox_margin    │
//! │  HardwareCapabilities          │  assign_input_buffer           │
//! │  Caps / VideoInfo              │  assign_output_buffer          │
//! │  VideoOrientation              │  align_output_video_info       │
//! └───────────────┬────────────────┴───────────────┬────────────────┘
//!                 │                                │
//!                 ▼                                ▼
//!        Format negotiation              i.MX 2D blitter surfaces
//! ```
//!
//! # Related Crates
//!
//! You can also use the individual crates directly:
//!
//! - [`imx2d-format`](https://crates.io/crates/imx2d-format) - Format handling only
//! - [`imx2d-surface`](https://crates.io/crates/imx2d-surface) - Surface geometry and binding

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// RE-EXPORTS
// =============================================================================

/// Pixel format translation and caps construction for i.MX 2D hardware.
///
/// This module provides:
/// - Pipeline and hardware pixel format tables, including tiled formats
/// - Caps built from hardware capabilities
/// - Video info with default plane layouts
/// - Orientation mapping and hardware log forwarding
///
/// See [`imx2d_format`] documentation for details.
#[cfg(feature = "format")]
#[cfg_attr(docsrs, doc(cfg(feature = "format")))]
pub use imx2d_format as format;

/// Surface geometry and DMA buffer binding for i.MX 2D hardware.
///
/// This module provides:
/// - Letterbox margins for aspect-correct placement
/// - Plane-to-memory-block binding for input and output buffers
/// - Output layout alignment to hardware granules
///
/// See [`imx2d_surface`] documentation for details.
#[cfg(feature = "surface")]
#[cfg_attr(docsrs, doc(cfg(feature = "surface")))]
pub use imx2d_surface as surface;

// =============================================================================
// PRELUDE - Common types for convenience
// =============================================================================

/// Prelude module with commonly used types.
///
/// ```rust
/// use imx2d_video::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "format")]
    pub use imx2d_format::{
        caps_from_capabilities, to_hardware, Caps, FormatError, HardwareCapabilities,
        HardwareFormat, PadDirection, PixelFormat, TileLayout, VideoInfo, VideoOrientation,
    };

    #[cfg(feature = "surface")]
    pub use imx2d_surface::{
        align_for_capabilities, assign_input_buffer, assign_output_buffer,
        calculate_letterbox_margin, Region, SurfaceDescriptor, SurfaceError, VideoBuffer,
    };
}
