//! Hardware Capabilities
//!
//! Describes what a 2D blitter can accept and produce. A backend fills this
//! in once when it is opened; afterwards it is only read.
//!
//! # Examples
//!
//! ```rust
//! use imx2d_format::{HardwareCapabilities, HardwareFormat};
//!
//! // Using builder pattern
//! let capabilities = HardwareCapabilities::builder()
//!     .source_formats(vec![HardwareFormat::SemiPlanarNv12, HardwareFormat::Bgra8888])
//!     .dest_formats(vec![HardwareFormat::Bgra8888])
//!     .width_range(64, 4096, 8)
//!     .height_range(64, 4096, 1)
//!     .stride_alignment(16)
//!     .total_row_count_alignment(16)
//!     .build();
//!
//! assert!(capabilities.validate().is_ok());
//!
//! // Using struct literal with defaults
//! let capabilities = HardwareCapabilities {
//!     stride_alignment: 32,
//!     ..Default::default()
//! };
//! ```

use crate::error::{FormatError, Result};
use crate::format::HardwareFormat;

/// Capability limits of a 2D blitter
///
/// Use [`HardwareCapabilities::builder()`] for ergonomic construction or
/// struct literal syntax with [`Default::default()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareCapabilities {
    /// Formats the blitter can read from (default: empty)
    pub supported_source_formats: Vec<HardwareFormat>,

    /// Formats the blitter can write to (default: empty)
    pub supported_dest_formats: Vec<HardwareFormat>,

    /// Smallest frame width in pixels (default: 1)
    pub min_width: u32,

    /// Largest frame width in pixels (default: 8192)
    pub max_width: u32,

    /// Width granularity in pixels (default: 1)
    pub width_step: u32,

    /// Smallest frame height in pixels (default: 1)
    pub min_height: u32,

    /// Largest frame height in pixels (default: 8192)
    pub max_height: u32,

    /// Height granularity in pixels (default: 1)
    pub height_step: u32,

    /// Plane strides must be a multiple of this many bytes (default: 1)
    pub stride_alignment: u32,

    /// Total frame row count must be a multiple of this (default: 1)
    ///
    /// Rows added to reach the multiple are padding rows below the
    /// logical picture.
    pub total_row_count_alignment: u32,
}

impl Default for HardwareCapabilities {
    fn default() -> Self {
        Self {
            supported_source_formats: Vec::new(),
            supported_dest_formats: Vec::new(),
            min_width: 1,
            max_width: 8192,
            width_step: 1,
            min_height: 1,
            max_height: 8192,
            height_step: 1,
            stride_alignment: 1,
            total_row_count_alignment: 1,
        }
    }
}

impl HardwareCapabilities {
    /// Create a new capabilities builder
    #[must_use]
    pub fn builder() -> HardwareCapabilitiesBuilder {
        HardwareCapabilitiesBuilder::default()
    }

    /// Validate capabilities and return any issues
    ///
    /// Returns `Ok(())` if the capabilities are usable, or a list of issues.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if self.supported_source_formats.is_empty() {
            issues.push("at least one source format is required".to_string());
        }

        if self.supported_dest_formats.is_empty() {
            issues.push("at least one destination format is required".to_string());
        }

        if self.min_width > self.max_width {
            issues.push(format!(
                "min_width {} exceeds max_width {}",
                self.min_width, self.max_width
            ));
        }

        if self.min_height > self.max_height {
            issues.push(format!(
                "min_height {} exceeds max_height {}",
                self.min_height, self.max_height
            ));
        }

        if self.width_step == 0 {
            issues.push("width_step must be at least 1".to_string());
        }

        if self.height_step == 0 {
            issues.push("height_step must be at least 1".to_string());
        }

        if self.stride_alignment == 0 {
            issues.push("stride_alignment must be at least 1".to_string());
        }

        if self.total_row_count_alignment == 0 {
            issues.push("total_row_count_alignment must be at least 1".to_string());
        }

        if self.max_width > i32::MAX as u32 || self.max_height > i32::MAX as u32 {
            issues.push("maximum dimensions must fit in a signed 32-bit integer".to_string());
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Validate and wrap the issues in a [`FormatError`]
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate().map_err(FormatError::InvalidCapabilities)
    }

    /// Check whether a frame size is within the limits and on the step grid
    #[must_use]
    pub fn supports_size(&self, width: u32, height: u32) -> bool {
        let on_grid = |value: u32, min: u32, step: u32| step != 0 && (value - min) % step == 0;

        (self.min_width..=self.max_width).contains(&width)
            && (self.min_height..=self.max_height).contains(&height)
            && on_grid(width, self.min_width, self.width_step)
            && on_grid(height, self.min_height, self.height_step)
    }
}

/// Builder for [`HardwareCapabilities`]
///
/// Provides a fluent interface for constructing capabilities.
#[derive(Debug, Clone, Default)]
pub struct HardwareCapabilitiesBuilder {
    supported_source_formats: Option<Vec<HardwareFormat>>,
    supported_dest_formats: Option<Vec<HardwareFormat>>,
    width_range: Option<(u32, u32, u32)>,
    height_range: Option<(u32, u32, u32)>,
    stride_alignment: Option<u32>,
    total_row_count_alignment: Option<u32>,
}

impl HardwareCapabilitiesBuilder {
    /// Set the formats the blitter reads from
    #[must_use]
    pub fn source_formats(mut self, formats: Vec<HardwareFormat>) -> Self {
        self.supported_source_formats = Some(formats);
        self
    }

    /// Set the formats the blitter writes to
    #[must_use]
    pub fn dest_formats(mut self, formats: Vec<HardwareFormat>) -> Self {
        self.supported_dest_formats = Some(formats);
        self
    }

    /// Set minimum width, maximum width and width step
    #[must_use]
    pub fn width_range(mut self, min: u32, max: u32, step: u32) -> Self {
        self.width_range = Some((min, max, step));
        self
    }

    /// Set minimum height, maximum height and height step
    #[must_use]
    pub fn height_range(mut self, min: u32, max: u32, step: u32) -> Self {
        self.height_range = Some((min, max, step));
        self
    }

    /// Set stride alignment in bytes
    #[must_use]
    pub fn stride_alignment(mut self, alignment: u32) -> Self {
        self.stride_alignment = Some(alignment);
        self
    }

    /// Set total row count alignment
    #[must_use]
    pub fn total_row_count_alignment(mut self, alignment: u32) -> Self {
        self.total_row_count_alignment = Some(alignment);
        self
    }

    /// Build the capabilities
    ///
    /// Returns [`HardwareCapabilities`] with builder values overriding defaults.
    #[must_use]
    pub fn build(self) -> HardwareCapabilities {
        let defaults = HardwareCapabilities::default();

        let (min_width, max_width, width_step) = self.width_range.unwrap_or((
            defaults.min_width,
            defaults.max_width,
            defaults.width_step,
        ));
        let (min_height, max_height, height_step) = self.height_range.unwrap_or((
            defaults.min_height,
            defaults.max_height,
            defaults.height_step,
        ));

        HardwareCapabilities {
            supported_source_formats: self
                .supported_source_formats
                .unwrap_or(defaults.supported_source_formats),
            supported_dest_formats: self
                .supported_dest_formats
                .unwrap_or(defaults.supported_dest_formats),
            min_width,
            max_width,
            width_step,
            min_height,
            max_height,
            height_step,
            stride_alignment: self.stride_alignment.unwrap_or(defaults.stride_alignment),
            total_row_count_alignment: self
                .total_row_count_alignment
                .unwrap_or(defaults.total_row_count_alignment),
        }
    }
}
