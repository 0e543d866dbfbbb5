//! # imx2d-format
//!
//! Pixel format translation, caps construction, and orientation mapping for
//! the NXP i.MX 2D blitters (G2D, PxP, IPU).
//!
//! This crate is part of the [imx2d-video](https://github.com/lamco-admin/imx2d-video)
//! workspace. It covers everything that happens before a frame buffer is
//! touched: which formats the hardware understands, how they are named in
//! caps, and which layout a negotiated stream has. Binding actual buffers
//! to hardware surfaces lives in [`imx2d-surface`](https://crates.io/crates/imx2d-surface).
//!
//! # Features
//!
//! - **Format Translation**: Pipeline pixel formats to hardware formats and back
//! - **Tiled Formats**: Amphion 8x128 tiled NV12/NV21 via reserved format names
//! - **Caps Construction**: Descriptor sets built from hardware capabilities
//! - **Video Info**: Default plane layouts for every supported format
//! - **Orientation**: Video orientation methods and `image-orientation` tags
//! - **Diagnostics**: Hardware library log output routed through `tracing`
//!
//! # Quick Start
//!
//! ```rust
//! use imx2d_format::{
//!     caps_from_capabilities, HardwareCapabilities, HardwareFormat, PadDirection, VideoInfo,
//! };
//!
//! let capabilities = HardwareCapabilities::builder()
//!     .source_formats(vec![
//!         HardwareFormat::TiledNv12Amphion8x128,
//!         HardwareFormat::SemiPlanarNv12,
//!     ])
//!     .dest_formats(vec![HardwareFormat::Bgrx8888])
//!     .width_range(64, 4096, 8)
//!     .height_range(64, 4096, 2)
//!     .build();
//!
//! // Offer the source formats on the input side
//! let caps = caps_from_capabilities(&capabilities, PadDirection::Sink, false);
//! assert_eq!(caps.structures().len(), 1);
//!
//! // Once negotiation settles on fixed caps, resolve them
//! let fixed = imx2d_format::Caps::fixed_video(
//!     "NV12_AMPHION_8x128",
//!     1920,
//!     1080,
//!     imx2d_format::Fraction::new(30, 1),
//! );
//! let (info, tile_layout) = VideoInfo::from_caps(&fixed)?;
//!
//! let hw_format = imx2d_format::to_hardware(info.format, Some(tile_layout));
//! assert_eq!(hw_format, HardwareFormat::TiledNv12Amphion8x128);
//! # Ok::<(), imx2d_format::FormatError>(())
//! ```
//!
//! # Error Handling
//!
//! Lookups that simply miss are not errors: translating a format the other
//! side does not know yields `Unknown`. [`FormatError`] is reserved for
//! inputs that cannot be used at all, such as unfixed caps or an unknown
//! orientation tag.
//!
//! # Logging
//!
//! All logging goes through `tracing`. The crate never installs a subscriber.
//! Call [`setup_logging`] once the application's subscriber is in place so
//! the hardware library's threshold matches it.

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod capabilities;
pub mod caps;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod info;
pub mod orientation;
pub mod translate;

// =============================================================================
// RE-EXPORTS - PRIMARY API
// =============================================================================

// Formats
pub use format::{
    HardwareFormat, PixelFormat, TileLayout, TILED_NV12_AMPHION_8X128_NAME,
    TILED_NV21_AMPHION_8X128_NAME,
};
pub use translate::{extract_tile_layout, from_hardware, to_hardware};

// Capabilities and caps
pub use capabilities::{HardwareCapabilities, HardwareCapabilitiesBuilder};
pub use caps::{
    caps_from_capabilities, caps_from_capabilities_default, Caps, CapsFeatures, CapsStructure,
    Fraction, FractionValue, FormatValue, IntValue, PadDirection, MEDIA_TYPE_VIDEO_RAW,
};

// Video info
pub use info::{align_up, FrameLayout, PlaneLayout, VideoInfo, DEFAULT_STRIDE_ALIGNMENT};

// Orientation
pub use orientation::{orientation_from_image_tag, to_hardware_rotation, Rotation, VideoOrientation};

// Errors
pub use error::{FormatError, Result};

// =============================================================================
// RE-EXPORTS - DIAGNOSTICS
// =============================================================================

pub use diagnostics::{
    forward_hardware_log, logging_threshold, setup_logging, setup_logging_with, HardwareLogFn,
    HardwareLogLevel,
};

// =============================================================================
// CRATE-LEVEL ITEMS
// =============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hardware formats that have a pipeline-side name
///
/// Useful for backends that can handle everything in the tables and want to
/// fill in [`HardwareCapabilities`] without listing formats by hand.
#[must_use]
pub fn all_hardware_formats() -> Vec<HardwareFormat> {
    PixelFormat::ALL
        .into_iter()
        .map(|format| to_hardware(format, None))
        .chain([
            HardwareFormat::TiledNv12Amphion8x128,
            HardwareFormat::TiledNv21Amphion8x128,
        ])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_all_hardware_formats() {
        let formats = all_hardware_formats();

        assert_eq!(formats.len(), 28);
        assert!(!formats.contains(&HardwareFormat::Unknown));
        assert!(formats.iter().all(|format| format.external_name().is_some()));
    }
}
