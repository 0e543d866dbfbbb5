//! Format Translation
//!
//! Maps between [`PixelFormat`] and [`HardwareFormat`], and strips the
//! tile layout out of reserved format names.
//!
//! The pipeline side has no tiled formats of its own. A tiled NV12 frame is
//! negotiated under the reserved name [`TILED_NV12_AMPHION_8X128_NAME`] and,
//! once the name is resolved, travels as plain `NV12` plus a
//! [`TileLayout::Amphion8x128`] that the caller keeps alongside it.
//!
//! ```rust
//! use imx2d_format::{extract_tile_layout, to_hardware, HardwareFormat, TileLayout};
//!
//! let (name, layout) = extract_tile_layout("NV12_AMPHION_8x128");
//! assert_eq!(name, "NV12");
//!
//! let format = name.parse().expect("plain NV12");
//! assert_eq!(to_hardware(format, Some(layout)), HardwareFormat::TiledNv12Amphion8x128);
//! ```

use tracing::debug;

use crate::format::{
    HardwareFormat, PixelFormat, TileLayout, TILED_NV12_AMPHION_8X128_NAME,
    TILED_NV21_AMPHION_8X128_NAME,
};

/// Translate a pipeline-side format into the hardware's format
///
/// With a tile layout other than [`TileLayout::None`], NV12 and NV21 map to
/// their tiled hardware variants. Every other combination falls through to
/// the plain table. Formats the hardware cannot represent yield
/// [`HardwareFormat::Unknown`].
#[must_use]
pub fn to_hardware(format: PixelFormat, tile_layout: Option<TileLayout>) -> HardwareFormat {
    if let Some(TileLayout::Amphion8x128) = tile_layout {
        match format {
            PixelFormat::NV12 => return HardwareFormat::TiledNv12Amphion8x128,
            PixelFormat::NV21 => return HardwareFormat::TiledNv21Amphion8x128,
            _ => {}
        }
    }

    let hw_format = match format {
        PixelFormat::RGB16 => HardwareFormat::Rgb565,
        PixelFormat::BGR16 => HardwareFormat::Bgr565,
        PixelFormat::RGB => HardwareFormat::Rgb888,
        PixelFormat::BGR => HardwareFormat::Bgr888,
        PixelFormat::RGBx => HardwareFormat::Rgbx8888,
        PixelFormat::RGBA => HardwareFormat::Rgba8888,
        PixelFormat::BGRx => HardwareFormat::Bgrx8888,
        PixelFormat::BGRA => HardwareFormat::Bgra8888,
        PixelFormat::xRGB => HardwareFormat::Xrgb8888,
        PixelFormat::ARGB => HardwareFormat::Argb8888,
        PixelFormat::xBGR => HardwareFormat::Xbgr8888,
        PixelFormat::ABGR => HardwareFormat::Abgr8888,
        PixelFormat::GRAY8 => HardwareFormat::Gray8,

        PixelFormat::UYVY => HardwareFormat::PackedYuv422Uyvy,
        PixelFormat::YUY2 => HardwareFormat::PackedYuv422Yuyv,
        PixelFormat::YVYU => HardwareFormat::PackedYuv422Yvyu,
        PixelFormat::VYUY => HardwareFormat::PackedYuv422Vyuy,
        PixelFormat::v308 => HardwareFormat::PackedYuv444,

        PixelFormat::NV12 => HardwareFormat::SemiPlanarNv12,
        PixelFormat::NV21 => HardwareFormat::SemiPlanarNv21,
        PixelFormat::NV16 => HardwareFormat::SemiPlanarNv16,
        PixelFormat::NV61 => HardwareFormat::SemiPlanarNv61,

        PixelFormat::YV12 => HardwareFormat::FullyPlanarYv12,
        PixelFormat::I420 => HardwareFormat::FullyPlanarI420,
        PixelFormat::Y42B => HardwareFormat::FullyPlanarY42b,
        PixelFormat::Y444 => HardwareFormat::FullyPlanarY444,

        PixelFormat::Unknown => HardwareFormat::Unknown,
    };

    if hw_format == HardwareFormat::Unknown {
        debug!("no hardware format for pixel format {}", format);
    }

    hw_format
}

/// Translate a hardware format into the pipeline-side format
///
/// Both tiled formats map to their plain NV12/NV21 equivalents, so the tile
/// layout is lost here. Use [`HardwareFormat::tile_layout`] beforehand if
/// it is needed.
#[must_use]
pub fn from_hardware(hw_format: HardwareFormat) -> PixelFormat {
    match hw_format {
        HardwareFormat::Rgb565 => PixelFormat::RGB16,
        HardwareFormat::Bgr565 => PixelFormat::BGR16,
        HardwareFormat::Rgb888 => PixelFormat::RGB,
        HardwareFormat::Bgr888 => PixelFormat::BGR,
        HardwareFormat::Rgbx8888 => PixelFormat::RGBx,
        HardwareFormat::Rgba8888 => PixelFormat::RGBA,
        HardwareFormat::Bgrx8888 => PixelFormat::BGRx,
        HardwareFormat::Bgra8888 => PixelFormat::BGRA,
        HardwareFormat::Xrgb8888 => PixelFormat::xRGB,
        HardwareFormat::Argb8888 => PixelFormat::ARGB,
        HardwareFormat::Xbgr8888 => PixelFormat::xBGR,
        HardwareFormat::Abgr8888 => PixelFormat::ABGR,
        HardwareFormat::Gray8 => PixelFormat::GRAY8,

        HardwareFormat::PackedYuv422Uyvy => PixelFormat::UYVY,
        HardwareFormat::PackedYuv422Yuyv => PixelFormat::YUY2,
        HardwareFormat::PackedYuv422Yvyu => PixelFormat::YVYU,
        HardwareFormat::PackedYuv422Vyuy => PixelFormat::VYUY,
        HardwareFormat::PackedYuv444 => PixelFormat::v308,

        HardwareFormat::SemiPlanarNv12 => PixelFormat::NV12,
        HardwareFormat::SemiPlanarNv21 => PixelFormat::NV21,
        HardwareFormat::SemiPlanarNv16 => PixelFormat::NV16,
        HardwareFormat::SemiPlanarNv61 => PixelFormat::NV61,

        HardwareFormat::FullyPlanarYv12 => PixelFormat::YV12,
        HardwareFormat::FullyPlanarI420 => PixelFormat::I420,
        HardwareFormat::FullyPlanarY42b => PixelFormat::Y42B,
        HardwareFormat::FullyPlanarY444 => PixelFormat::Y444,

        HardwareFormat::TiledNv12Amphion8x128 => PixelFormat::NV12,
        HardwareFormat::TiledNv21Amphion8x128 => PixelFormat::NV21,

        HardwareFormat::Unknown => PixelFormat::Unknown,
    }
}

/// Split a single, fully resolved format name into its plain name and tile layout
///
/// The reserved names become `"NV12"`/`"NV21"` with
/// [`TileLayout::Amphion8x128`]; any other name is returned unchanged with
/// [`TileLayout::None`].
#[must_use]
pub fn extract_tile_layout(name: &str) -> (&str, TileLayout) {
    match name {
        TILED_NV12_AMPHION_8X128_NAME => (PixelFormat::NV12.name(), TileLayout::Amphion8x128),
        TILED_NV21_AMPHION_8X128_NAME => (PixelFormat::NV21.name(), TileLayout::Amphion8x128),
        other => (other, TileLayout::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_plain_formats() {
        for format in PixelFormat::ALL {
            let hw_format = to_hardware(format, None);
            assert_ne!(hw_format, HardwareFormat::Unknown, "{format} has no hardware format");
            assert_eq!(from_hardware(hw_format), format);
        }
    }

    #[test]
    fn test_tiled_translation() {
        let tiled = Some(TileLayout::Amphion8x128);

        assert_eq!(
            to_hardware(PixelFormat::NV12, tiled),
            HardwareFormat::TiledNv12Amphion8x128
        );
        assert_eq!(
            to_hardware(PixelFormat::NV21, tiled),
            HardwareFormat::TiledNv21Amphion8x128
        );

        // Tile layout only applies to NV12/NV21
        assert_eq!(to_hardware(PixelFormat::I420, tiled), HardwareFormat::FullyPlanarI420);

        // An explicit None layout takes the plain table
        assert_eq!(
            to_hardware(PixelFormat::NV12, Some(TileLayout::None)),
            HardwareFormat::SemiPlanarNv12
        );

        // Tiled formats lose their layout on the way back
        assert_eq!(from_hardware(HardwareFormat::TiledNv12Amphion8x128), PixelFormat::NV12);
        assert_eq!(from_hardware(HardwareFormat::TiledNv21Amphion8x128), PixelFormat::NV21);
    }

    #[test]
    fn test_unknown_formats() {
        assert_eq!(to_hardware(PixelFormat::Unknown, None), HardwareFormat::Unknown);
        assert_eq!(from_hardware(HardwareFormat::Unknown), PixelFormat::Unknown);
    }

    #[test]
    fn test_extract_tile_layout() {
        assert_eq!(
            extract_tile_layout(TILED_NV12_AMPHION_8X128_NAME),
            ("NV12", TileLayout::Amphion8x128)
        );
        assert_eq!(
            extract_tile_layout(TILED_NV21_AMPHION_8X128_NAME),
            ("NV21", TileLayout::Amphion8x128)
        );

        for name in ["NV12", "I420", "BGRA", "", "nv12_amphion_8x128"] {
            assert_eq!(extract_tile_layout(name), (name, TileLayout::None));
        }
    }
}
