//! Caps Descriptors
//!
//! A small typed model of the descriptor sets exchanged during format
//! negotiation, and the construction of those sets from
//! [`HardwareCapabilities`].
//!
//! # Negotiated descriptor set
//!
//! ```text
//! video/x-raw
//!     format    = { "NV12", "NV12_AMPHION_8x128", "BGRA", ... }
//!     width     = [ min_width,  max_width  ] step width_step
//!     height    = [ min_height, max_height ] step height_step
//!     framerate = [ 0/1, 2147483647/1 ]
//! ```
//!
//! When overlay composition is offered, a second structure identical to the
//! first follows it, tagged with system-memory + overlay-composition
//! features. Both are equally valid alternatives for the negotiator.

use std::fmt;

use tracing::trace;

use crate::capabilities::HardwareCapabilities;
use crate::format::{HardwareFormat, TileLayout};
use crate::translate::extract_tile_layout;

/// Media type of raw video caps
pub const MEDIA_TYPE_VIDEO_RAW: &str = "video/x-raw";

/// A rational number, used for frame rates and pixel aspect ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    /// Numerator
    pub numer: i32,
    /// Denominator
    pub denom: i32,
}

impl Fraction {
    /// 0/1
    pub const ZERO: Self = Self::new(0, 1);

    /// 1/1
    pub const ONE: Self = Self::new(1, 1);

    /// Largest representable frame rate
    pub const MAX: Self = Self::new(i32::MAX, 1);

    /// Create a new fraction
    #[must_use]
    pub const fn new(numer: i32, denom: i32) -> Self {
        Self { numer, denom }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

/// Value of the `format` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatValue {
    /// A single format name
    Fixed(String),
    /// Any of the listed format names
    List(Vec<String>),
}

/// Value of an integer field such as `width` or `height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntValue {
    /// A single value
    Fixed(u32),
    /// Any value in `min..=max` that lies on the `step` grid starting at `min`
    Range { min: u32, max: u32, step: u32 },
}

impl IntValue {
    /// The value, if fixed
    #[must_use]
    pub const fn fixed(self) -> Option<u32> {
        match self {
            Self::Fixed(value) => Some(value),
            Self::Range { .. } => None,
        }
    }
}

/// Value of a fraction field such as `framerate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionValue {
    /// A single fraction
    Fixed(Fraction),
    /// Any fraction in `min..=max`
    Range { min: Fraction, max: Fraction },
}

impl FractionValue {
    /// The value, if fixed
    #[must_use]
    pub const fn fixed(self) -> Option<Fraction> {
        match self {
            Self::Fixed(value) => Some(value),
            Self::Range { .. } => None,
        }
    }
}

/// Memory and meta features attached to a caps structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapsFeatures {
    /// Frames live in plain system memory
    pub system_memory: bool,
    /// Frames may carry overlay composition meta to be blended in
    pub overlay_composition: bool,
}

impl CapsFeatures {
    /// Plain system memory, no metas
    pub const SYSTEM_MEMORY: Self = Self {
        system_memory: true,
        overlay_composition: false,
    };

    /// System memory with overlay composition meta
    pub const SYSTEM_MEMORY_WITH_OVERLAY: Self = Self {
        system_memory: true,
        overlay_composition: true,
    };
}

impl Default for CapsFeatures {
    fn default() -> Self {
        Self::SYSTEM_MEMORY
    }
}

/// One alternative within a set of caps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapsStructure {
    /// Media type, normally [`MEDIA_TYPE_VIDEO_RAW`]
    pub media_type: String,
    pub format: FormatValue,
    pub width: IntValue,
    pub height: IntValue,
    pub framerate: FractionValue,
    /// Pixel aspect ratio, if specified
    pub pixel_aspect_ratio: Option<Fraction>,
    pub features: CapsFeatures,
}

impl CapsStructure {
    /// Whether every field holds a single value
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.format, FormatValue::Fixed(_))
            && self.width.fixed().is_some()
            && self.height.fixed().is_some()
            && self.framerate.fixed().is_some()
    }

    /// The format name, if fixed
    #[must_use]
    pub fn fixed_format(&self) -> Option<&str> {
        match &self.format {
            FormatValue::Fixed(name) => Some(name.as_str()),
            FormatValue::List(_) => None,
        }
    }
}

/// A set of caps
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caps {
    /// Nothing is acceptable
    #[default]
    Empty,
    /// Anything is acceptable
    Any,
    /// Any of the listed structures is acceptable
    Structures(Vec<CapsStructure>),
}

impl Caps {
    /// Create fixed raw video caps
    #[must_use]
    pub fn fixed_video(format: &str, width: u32, height: u32, framerate: Fraction) -> Self {
        Self::Structures(vec![CapsStructure {
            media_type: MEDIA_TYPE_VIDEO_RAW.to_string(),
            format: FormatValue::Fixed(format.to_string()),
            width: IntValue::Fixed(width),
            height: IntValue::Fixed(height),
            framerate: FractionValue::Fixed(framerate),
            pixel_aspect_ratio: None,
            features: CapsFeatures::SYSTEM_MEMORY,
        }])
    }

    /// Whether nothing is acceptable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Any => false,
            Self::Structures(structures) => structures.is_empty(),
        }
    }

    /// Whether anything is acceptable
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Whether the caps describe exactly one concrete format
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        match self {
            Self::Structures(structures) => {
                structures.len() == 1 && structures.iter().all(CapsStructure::is_fixed)
            }
            _ => false,
        }
    }

    /// The structures of these caps (empty for `Empty` and `Any`)
    #[must_use]
    pub fn structures(&self) -> &[CapsStructure] {
        match self {
            Self::Structures(structures) => structures,
            _ => &[],
        }
    }

    /// Replace a reserved tiled format name with its plain name
    ///
    /// Only fixed caps are touched. Empty, ANY, and unfixed caps come back
    /// unchanged with [`TileLayout::None`].
    #[must_use]
    pub fn remove_tile_layout(mut self) -> (Self, TileLayout) {
        if !self.is_fixed() {
            return (self, TileLayout::None);
        }

        let mut tile_layout = TileLayout::None;

        if let Self::Structures(structures) = &mut self {
            for structure in structures.iter_mut() {
                if let FormatValue::Fixed(name) = &mut structure.format {
                    let (plain_name, layout) = extract_tile_layout(name);
                    if layout != TileLayout::None {
                        *name = plain_name.to_string();
                        tile_layout = layout;
                    }
                }
            }
        }

        (self, tile_layout)
    }
}

/// Which side of the blitter caps are built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadDirection {
    /// Input side; uses the source formats
    Sink,
    /// Output side; uses the destination formats
    Src,
}

/// Build the negotiated descriptor set for one side of a blitter
///
/// Formats without an external name are left out. With
/// `include_overlay_variant`, a second structure identical to the first is
/// appended, tagged with [`CapsFeatures::SYSTEM_MEMORY_WITH_OVERLAY`].
#[must_use]
pub fn caps_from_capabilities(
    capabilities: &HardwareCapabilities,
    direction: PadDirection,
    include_overlay_variant: bool,
) -> Caps {
    let supported_formats: &[HardwareFormat] = match direction {
        PadDirection::Sink => &capabilities.supported_source_formats,
        PadDirection::Src => &capabilities.supported_dest_formats,
    };

    let format_names: Vec<String> = supported_formats
        .iter()
        .filter_map(|format| format.external_name())
        .map(str::to_string)
        .collect();

    trace!(
        "building {:?} caps from {} hardware formats ({} representable)",
        direction,
        supported_formats.len(),
        format_names.len()
    );

    let structure = CapsStructure {
        media_type: MEDIA_TYPE_VIDEO_RAW.to_string(),
        format: FormatValue::List(format_names),
        width: IntValue::Range {
            min: capabilities.min_width,
            max: capabilities.max_width,
            step: capabilities.width_step,
        },
        height: IntValue::Range {
            min: capabilities.min_height,
            max: capabilities.max_height,
            step: capabilities.height_step,
        },
        framerate: FractionValue::Range {
            min: Fraction::ZERO,
            max: Fraction::MAX,
        },
        pixel_aspect_ratio: None,
        features: CapsFeatures::SYSTEM_MEMORY,
    };

    if !include_overlay_variant {
        return Caps::Structures(vec![structure]);
    }

    let overlay = CapsStructure {
        features: CapsFeatures::SYSTEM_MEMORY_WITH_OVERLAY,
        ..structure.clone()
    };

    Caps::Structures(vec![structure, overlay])
}

/// Same as [`caps_from_capabilities`] without the overlay variant
#[must_use]
pub fn caps_from_capabilities_default(
    capabilities: &HardwareCapabilities,
    direction: PadDirection,
) -> Caps {
    caps_from_capabilities(capabilities, direction, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{TILED_NV12_AMPHION_8X128_NAME, TILED_NV21_AMPHION_8X128_NAME};

    fn capabilities() -> HardwareCapabilities {
        HardwareCapabilities::builder()
            .source_formats(vec![
                HardwareFormat::TiledNv12Amphion8x128,
                HardwareFormat::SemiPlanarNv12,
                HardwareFormat::Unknown,
                HardwareFormat::FullyPlanarI420,
            ])
            .dest_formats(vec![HardwareFormat::Bgrx8888, HardwareFormat::Rgb565])
            .width_range(64, 4096, 8)
            .height_range(64, 2048, 2)
            .build()
    }

    #[test]
    fn test_sink_caps() {
        let caps = caps_from_capabilities(&capabilities(), PadDirection::Sink, false);
        let structures = caps.structures();
        assert_eq!(structures.len(), 1);

        let s = &structures[0];
        assert_eq!(s.media_type, MEDIA_TYPE_VIDEO_RAW);
        assert_eq!(
            s.format,
            FormatValue::List(vec![
                TILED_NV12_AMPHION_8X128_NAME.to_string(),
                "NV12".to_string(),
                "I420".to_string(),
            ])
        );
        assert_eq!(s.width, IntValue::Range { min: 64, max: 4096, step: 8 });
        assert_eq!(s.height, IntValue::Range { min: 64, max: 2048, step: 2 });
        assert_eq!(
            s.framerate,
            FractionValue::Range { min: Fraction::new(0, 1), max: Fraction::new(i32::MAX, 1) }
        );
        assert_eq!(s.features, CapsFeatures::SYSTEM_MEMORY);
        assert!(!caps.is_fixed());
    }

    #[test]
    fn test_src_caps_with_overlay() {
        let caps = caps_from_capabilities(&capabilities(), PadDirection::Src, true);
        let structures = caps.structures();
        assert_eq!(structures.len(), 2);

        assert_eq!(
            structures[0].format,
            FormatValue::List(vec!["BGRx".to_string(), "RGB16".to_string()])
        );
        assert_eq!(structures[1].features, CapsFeatures::SYSTEM_MEMORY_WITH_OVERLAY);

        // Apart from the features, the alternatives are identical
        let plain_copy = CapsStructure {
            features: CapsFeatures::SYSTEM_MEMORY,
            ..structures[1].clone()
        };
        assert_eq!(plain_copy, structures[0]);
    }

    #[test]
    fn test_default_has_no_overlay() {
        let caps = caps_from_capabilities_default(&capabilities(), PadDirection::Src);
        assert_eq!(caps.structures().len(), 1);
    }

    #[test]
    fn test_caps_fixedness() {
        assert!(Caps::Empty.is_empty());
        assert!(Caps::Structures(Vec::new()).is_empty());
        assert!(Caps::Any.is_any());
        assert!(!Caps::Any.is_fixed());
        assert!(Caps::fixed_video("NV12", 1920, 1080, Fraction::new(30, 1)).is_fixed());
    }

    #[test]
    fn test_remove_tile_layout_fixed() {
        let caps = Caps::fixed_video(TILED_NV21_AMPHION_8X128_NAME, 1920, 1080, Fraction::ONE);
        let (caps, layout) = caps.remove_tile_layout();

        assert_eq!(layout, TileLayout::Amphion8x128);
        assert_eq!(caps.structures()[0].fixed_format(), Some("NV21"));

        let caps = Caps::fixed_video("I420", 640, 480, Fraction::ONE);
        let (stripped, layout) = caps.clone().remove_tile_layout();
        assert_eq!(layout, TileLayout::None);
        assert_eq!(stripped, caps);
    }

    #[test]
    fn test_remove_tile_layout_is_noop_when_unfixed() {
        for caps in [
            Caps::Empty,
            Caps::Any,
            caps_from_capabilities(&capabilities(), PadDirection::Sink, false),
        ] {
            let (result, layout) = caps.clone().remove_tile_layout();
            assert_eq!(result, caps);
            assert_eq!(layout, TileLayout::None);
        }
    }
}
