//! Orientation Mapping
//!
//! Maps pipeline video orientations onto blitter rotations and parses the
//! `image-orientation` tag that decoders attach to a stream.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{FormatError, Result};

/// Orientation method requested for a video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VideoOrientation {
    #[default]
    Identity,
    /// Rotate 90 degrees clockwise
    Rotate90R,
    Rotate180,
    /// Rotate 90 degrees counter-clockwise
    Rotate90L,
    FlipHorizontal,
    FlipVertical,
    /// Flip across the upper-left/lower-right diagonal
    TransposeUlLr,
    /// Flip across the upper-right/lower-left diagonal
    TransposeUrLl,
    /// Pick the method from the stream's tags
    Auto,
    /// Method described by an external matrix
    Custom,
}

impl VideoOrientation {
    /// Whether the method swaps width and height
    #[must_use]
    pub const fn is_transposed(self) -> bool {
        matches!(
            self,
            Self::Rotate90R | Self::Rotate90L | Self::TransposeUlLr | Self::TransposeUrLl
        )
    }

    /// The `image-orientation` tag token for this method
    ///
    /// `None` for `Auto` and `Custom`, which have no token.
    #[must_use]
    pub const fn tag_token(self) -> Option<&'static str> {
        match self {
            Self::Identity => Some("rotate-0"),
            Self::Rotate90R => Some("rotate-90"),
            Self::Rotate180 => Some("rotate-180"),
            Self::Rotate90L => Some("rotate-270"),
            Self::FlipHorizontal => Some("flip-rotate-0"),
            Self::TransposeUlLr => Some("flip-rotate-90"),
            Self::FlipVertical => Some("flip-rotate-180"),
            Self::TransposeUrLl => Some("flip-rotate-270"),
            Self::Auto | Self::Custom => None,
        }
    }
}

impl fmt::Display for VideoOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag_token() {
            Some(token) => f.write_str(token),
            None => write!(f, "{self:?}"),
        }
    }
}

impl FromStr for VideoOrientation {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rotate-0" => Ok(Self::Identity),
            "rotate-90" => Ok(Self::Rotate90R),
            "rotate-180" => Ok(Self::Rotate180),
            "rotate-270" => Ok(Self::Rotate90L),
            "flip-rotate-0" => Ok(Self::FlipHorizontal),
            "flip-rotate-90" => Ok(Self::TransposeUlLr),
            "flip-rotate-180" => Ok(Self::FlipVertical),
            "flip-rotate-270" => Ok(Self::TransposeUrLl),
            other => Err(FormatError::OrientationTagParse(other.to_string())),
        }
    }
}

/// Rotation understood by the blitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipHorizontal,
    FlipVertical,
    UlLr,
    UrLl,
}

/// Map an orientation method onto the blitter's rotation
///
/// `Auto` and `Custom` cannot be expressed; they log a warning and map to
/// [`Rotation::None`].
#[must_use]
pub fn to_hardware_rotation(orientation: VideoOrientation) -> Rotation {
    match orientation {
        VideoOrientation::Identity => Rotation::None,
        VideoOrientation::Rotate90R => Rotation::Rotate90,
        VideoOrientation::Rotate180 => Rotation::Rotate180,
        VideoOrientation::Rotate90L => Rotation::Rotate270,
        VideoOrientation::FlipHorizontal => Rotation::FlipHorizontal,
        VideoOrientation::FlipVertical => Rotation::FlipVertical,
        VideoOrientation::TransposeUlLr => Rotation::UlLr,
        VideoOrientation::TransposeUrLl => Rotation::UrLl,
        VideoOrientation::Auto | VideoOrientation::Custom => {
            warn!("unsupported video orientation method {:?}", orientation);
            Rotation::None
        }
    }
}

/// Read an orientation method from an `image-orientation` tag value
///
/// Returns `Ok(None)` when the tag is absent.
///
/// # Errors
///
/// Returns [`FormatError::OrientationTagParse`] if the value is not one of
/// the eight known tokens.
pub fn orientation_from_image_tag(tag: Option<&str>) -> Result<Option<VideoOrientation>> {
    let Some(value) = tag else {
        return Ok(None);
    };

    value.parse().map(Some).map_err(|err| {
        warn!("unknown image-orientation tag value \"{}\"", value);
        err
    })
}
