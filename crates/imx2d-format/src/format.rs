//! Pixel Format Tables
//!
//! Two closed format enums live here: [`PixelFormat`] is the pipeline-side
//! view of a frame (what caps negotiate), [`HardwareFormat`] is what the
//! i.MX 2D blitters understand. They are kept apart because the hardware
//! side knows about tiled layouts that the pipeline side only sees through
//! reserved format names (see [`TileLayout`]).
//!
//! Plane geometry helpers ([`PixelFormat::plane_count`],
//! [`PixelFormat::plane_row_bytes`], [`PixelFormat::plane_rows`]) describe
//! how each format splits a frame into planes and are used to build default
//! frame layouts.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Reserved format name for NV12 in the Amphion 8x128 tile layout
pub const TILED_NV12_AMPHION_8X128_NAME: &str = "NV12_AMPHION_8x128";

/// Reserved format name for NV21 in the Amphion 8x128 tile layout
pub const TILED_NV21_AMPHION_8X128_NAME: &str = "NV21_AMPHION_8x128";

/// Pipeline-side pixel format
///
/// Variant names match the format names used in caps, so `PixelFormat::NV12`
/// is negotiated as `"NV12"`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Format not covered by the tables
    #[default]
    Unknown,

    /// 16-bit RGB 5:6:5
    RGB16,
    /// 16-bit BGR 5:6:5
    BGR16,
    /// 24-bit packed RGB
    RGB,
    /// 24-bit packed BGR
    BGR,
    /// 32-bit RGB with unused fourth byte
    RGBx,
    /// 32-bit RGB with alpha
    RGBA,
    /// 32-bit BGR with unused fourth byte
    BGRx,
    /// 32-bit BGR with alpha
    BGRA,
    /// 32-bit RGB with unused first byte
    xRGB,
    /// 32-bit RGB with leading alpha
    ARGB,
    /// 32-bit BGR with unused first byte
    xBGR,
    /// 32-bit BGR with leading alpha
    ABGR,
    /// 8-bit grayscale
    GRAY8,

    /// Packed YUV 4:2:2, U0 Y0 V0 Y1
    UYVY,
    /// Packed YUV 4:2:2, Y0 U0 Y1 V0
    YUY2,
    /// Packed YUV 4:2:2, Y0 V0 Y1 U0
    YVYU,
    /// Packed YUV 4:2:2, V0 Y0 U0 Y1
    VYUY,
    /// Packed YUV 4:4:4, 24 bits per pixel
    v308,

    /// Semi-planar YUV 4:2:0, interleaved UV plane
    NV12,
    /// Semi-planar YUV 4:2:0, interleaved VU plane
    NV21,
    /// Semi-planar YUV 4:2:2, interleaved UV plane
    NV16,
    /// Semi-planar YUV 4:2:2, interleaved VU plane
    NV61,

    /// Planar YUV 4:2:0, Y then V then U
    YV12,
    /// Planar YUV 4:2:0, Y then U then V
    I420,
    /// Planar YUV 4:2:2
    Y42B,
    /// Planar YUV 4:4:4
    Y444,
}

impl PixelFormat {
    /// Every known format, in table order (excludes `Unknown`)
    pub const ALL: [PixelFormat; 26] = [
        Self::RGB16,
        Self::BGR16,
        Self::RGB,
        Self::BGR,
        Self::RGBx,
        Self::RGBA,
        Self::BGRx,
        Self::BGRA,
        Self::xRGB,
        Self::ARGB,
        Self::xBGR,
        Self::ABGR,
        Self::GRAY8,
        Self::UYVY,
        Self::YUY2,
        Self::YVYU,
        Self::VYUY,
        Self::v308,
        Self::NV12,
        Self::NV21,
        Self::NV16,
        Self::NV61,
        Self::YV12,
        Self::I420,
        Self::Y42B,
        Self::Y444,
    ];

    /// Canonical caps name of this format
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::RGB16 => "RGB16",
            Self::BGR16 => "BGR16",
            Self::RGB => "RGB",
            Self::BGR => "BGR",
            Self::RGBx => "RGBx",
            Self::RGBA => "RGBA",
            Self::BGRx => "BGRx",
            Self::BGRA => "BGRA",
            Self::xRGB => "xRGB",
            Self::ARGB => "ARGB",
            Self::xBGR => "xBGR",
            Self::ABGR => "ABGR",
            Self::GRAY8 => "GRAY8",
            Self::UYVY => "UYVY",
            Self::YUY2 => "YUY2",
            Self::YVYU => "YVYU",
            Self::VYUY => "VYUY",
            Self::v308 => "v308",
            Self::NV12 => "NV12",
            Self::NV21 => "NV21",
            Self::NV16 => "NV16",
            Self::NV61 => "NV61",
            Self::YV12 => "YV12",
            Self::I420 => "I420",
            Self::Y42B => "Y42B",
            Self::Y444 => "Y444",
        }
    }

    /// Look up a format by its caps name
    ///
    /// Returns `None` for unknown names, including the reserved tiled names;
    /// those must go through [`crate::extract_tile_layout`] first.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }

    /// Number of planes a frame of this format is split into
    #[must_use]
    pub const fn plane_count(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::NV12 | Self::NV21 | Self::NV16 | Self::NV61 => 2,
            Self::YV12 | Self::I420 | Self::Y42B | Self::Y444 => 3,
            _ => 1,
        }
    }

    /// Vertical chroma subsampling as a right shift (1 = every other row)
    const fn chroma_row_shift(self) -> u32 {
        match self {
            Self::NV12 | Self::NV21 | Self::YV12 | Self::I420 => 1,
            _ => 0,
        }
    }

    /// Bytes of real pixel data in one row of `plane`, without padding
    ///
    /// Returns `Some(0)` for planes the format does not have, `None` if the
    /// row does not fit in a `u32`.
    #[must_use]
    pub fn plane_row_bytes(self, plane: usize, width: u32) -> Option<u32> {
        if plane >= self.plane_count() {
            return Some(0);
        }

        match self {
            Self::Unknown => Some(0),
            Self::GRAY8 | Self::Y444 => Some(width),
            Self::RGB16 | Self::BGR16 => width.checked_mul(2),
            Self::RGB | Self::BGR | Self::v308 => width.checked_mul(3),
            Self::RGBx
            | Self::RGBA
            | Self::BGRx
            | Self::BGRA
            | Self::xRGB
            | Self::ARGB
            | Self::xBGR
            | Self::ABGR => width.checked_mul(4),
            // One macropixel (4 bytes) covers two horizontal pixels
            Self::UYVY | Self::YUY2 | Self::YVYU | Self::VYUY => width.div_ceil(2).checked_mul(4),
            Self::NV12 | Self::NV21 | Self::NV16 | Self::NV61 => {
                if plane == 0 {
                    Some(width)
                } else {
                    width.div_ceil(2).checked_mul(2)
                }
            }
            Self::YV12 | Self::I420 | Self::Y42B => {
                if plane == 0 {
                    Some(width)
                } else {
                    Some(width.div_ceil(2))
                }
            }
        }
    }

    /// Rows occupied by `plane` in a frame that is `frame_rows` rows tall
    ///
    /// `frame_rows` is counted in full-resolution rows, so it may include
    /// padding rows below the logical picture.
    #[must_use]
    pub fn plane_rows(self, plane: usize, frame_rows: u32) -> u32 {
        if plane >= self.plane_count() {
            return 0;
        }

        if plane == 0 {
            frame_rows
        } else {
            let shift = self.chroma_row_shift();
            frame_rows.div_ceil(1 << shift)
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| FormatError::unrecognized(s))
    }
}

/// Hardware-side pixel format understood by the i.MX 2D blitters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HardwareFormat {
    /// Format not supported by the hardware tables
    #[default]
    Unknown,

    Rgb565,
    Bgr565,
    Rgb888,
    Bgr888,
    Rgbx8888,
    Rgba8888,
    Bgrx8888,
    Bgra8888,
    Xrgb8888,
    Argb8888,
    Xbgr8888,
    Abgr8888,
    Gray8,

    PackedYuv422Uyvy,
    PackedYuv422Yuyv,
    PackedYuv422Yvyu,
    PackedYuv422Vyuy,
    PackedYuv444,

    SemiPlanarNv12,
    SemiPlanarNv21,
    SemiPlanarNv16,
    SemiPlanarNv61,

    FullyPlanarYv12,
    FullyPlanarI420,
    FullyPlanarY42b,
    FullyPlanarY444,

    /// NV12 stored in 8x128 Amphion tiles (VPU decoder output)
    TiledNv12Amphion8x128,
    /// NV21 stored in 8x128 Amphion tiles (VPU decoder output)
    TiledNv21Amphion8x128,
}

impl HardwareFormat {
    /// Whether the format stores plane data in tiles instead of rows
    #[must_use]
    pub const fn is_tiled(self) -> bool {
        matches!(self, Self::TiledNv12Amphion8x128 | Self::TiledNv21Amphion8x128)
    }

    /// Tile layout carried by this format
    #[must_use]
    pub const fn tile_layout(self) -> TileLayout {
        if self.is_tiled() {
            TileLayout::Amphion8x128
        } else {
            TileLayout::None
        }
    }

    /// Name under which this format appears in caps
    ///
    /// Tiled formats use their reserved names, everything else the plain
    /// name of the pipeline-side equivalent. `None` if the format has no
    /// pipeline-side representation.
    #[must_use]
    pub fn external_name(self) -> Option<&'static str> {
        match self {
            Self::TiledNv12Amphion8x128 => Some(TILED_NV12_AMPHION_8X128_NAME),
            Self::TiledNv21Amphion8x128 => Some(TILED_NV21_AMPHION_8X128_NAME),
            _ => match crate::translate::from_hardware(self) {
                PixelFormat::Unknown => None,
                format => Some(format.name()),
            },
        }
    }
}

/// Tile layout of a frame's plane data
///
/// Orthogonal to [`PixelFormat`]; only NV12 and NV21 can be tiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileLayout {
    /// Plain row-major planes
    #[default]
    None,
    /// Amphion 8x128 tiles
    Amphion8x128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::from_name(format.name()), Some(format));
        }

        assert_eq!(PixelFormat::from_name("P010"), None);
        assert_eq!(PixelFormat::from_name(TILED_NV12_AMPHION_8X128_NAME), None);
        assert_eq!("I420".parse::<PixelFormat>(), Ok(PixelFormat::I420));
        assert!("bogus".parse::<PixelFormat>().is_err());
    }

    #[test]
    fn test_plane_counts() {
        assert_eq!(PixelFormat::BGRA.plane_count(), 1);
        assert_eq!(PixelFormat::YUY2.plane_count(), 1);
        assert_eq!(PixelFormat::NV12.plane_count(), 2);
        assert_eq!(PixelFormat::I420.plane_count(), 3);
        assert_eq!(PixelFormat::Unknown.plane_count(), 0);
    }

    #[test]
    fn test_plane_geometry() {
        // 4:2:0 halves chroma rows, rounding up for odd heights
        assert_eq!(PixelFormat::NV12.plane_rows(0, 1080), 1080);
        assert_eq!(PixelFormat::NV12.plane_rows(1, 1080), 540);
        assert_eq!(PixelFormat::I420.plane_rows(2, 481), 241);

        // 4:2:2 keeps full chroma rows
        assert_eq!(PixelFormat::NV16.plane_rows(1, 1080), 1080);
        assert_eq!(PixelFormat::Y42B.plane_rows(1, 1080), 1080);

        assert_eq!(PixelFormat::NV12.plane_row_bytes(1, 1919), Some(1920));
        assert_eq!(PixelFormat::I420.plane_row_bytes(1, 1920), Some(960));
        assert_eq!(PixelFormat::YUY2.plane_row_bytes(0, 1920), Some(3840));
        assert_eq!(PixelFormat::RGB.plane_row_bytes(0, 10), Some(30));
        assert_eq!(PixelFormat::RGB.plane_row_bytes(1, 10), Some(0));
    }

    #[test]
    fn test_plane_row_bytes_overflow() {
        assert_eq!(PixelFormat::BGRA.plane_row_bytes(0, 1 << 30), None);
        assert_eq!(PixelFormat::RGB16.plane_row_bytes(0, u32::MAX), None);
        assert_eq!(PixelFormat::YUY2.plane_row_bytes(0, u32::MAX), None);

        // Full-width luma and half-width chroma never grow past the width
        assert_eq!(PixelFormat::NV12.plane_row_bytes(0, u32::MAX), Some(u32::MAX));
        assert_eq!(PixelFormat::I420.plane_row_bytes(1, u32::MAX), Some(1 << 31));
        assert_eq!(PixelFormat::GRAY8.plane_row_bytes(0, u32::MAX), Some(u32::MAX));
    }

    #[test]
    fn test_external_names() {
        assert_eq!(HardwareFormat::Bgra8888.external_name(), Some("BGRA"));
        assert_eq!(
            HardwareFormat::TiledNv21Amphion8x128.external_name(),
            Some(TILED_NV21_AMPHION_8X128_NAME)
        );
        assert_eq!(HardwareFormat::Unknown.external_name(), None);
    }

    #[test]
    fn test_tile_layout() {
        assert!(HardwareFormat::TiledNv12Amphion8x128.is_tiled());
        assert!(!HardwareFormat::SemiPlanarNv12.is_tiled());
        assert_eq!(
            HardwareFormat::TiledNv12Amphion8x128.tile_layout(),
            TileLayout::Amphion8x128
        );
        assert_eq!(HardwareFormat::SemiPlanarNv12.tile_layout(), TileLayout::None);
    }
}
