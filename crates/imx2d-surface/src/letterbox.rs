//! Letterbox Geometry
//!
//! Fits a video into an output region while keeping its display aspect
//! ratio. Whatever is left over becomes the margin that gets filled with the
//! letterbox color (bars above and below, or to the left and right).
//!
//! # Usage
//!
//! ```rust
//! use imx2d_surface::letterbox::{calculate_letterbox_margin, Margin, Region};
//!
//! let outer = Region::new(0, 0, 1920, 1080);
//! let letterbox = calculate_letterbox_margin(&outer, false, 720, 480, 1, 1);
//!
//! assert_eq!(letterbox.margin, Margin { left: 150, right: 150, top: 0, bottom: 0 });
//! assert_eq!(letterbox.inner, Region::new(150, 0, 1770, 1080));
//! ```

use tracing::trace;

/// Axis-aligned rectangle given by its corners, `x2 >= x1` and `y2 >= y1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    /// Create a new region
    #[must_use]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Region width (0 if the corners are swapped)
    #[must_use]
    pub fn width(&self) -> u32 {
        (i64::from(self.x2) - i64::from(self.x1)).max(0) as u32
    }

    /// Region height (0 if the corners are swapped)
    #[must_use]
    pub fn height(&self) -> u32 {
        (i64::from(self.y2) - i64::from(self.y1)).max(0) as u32
    }
}

/// Empty space around the inner region, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Margin {
    /// Whether all four sides are 0
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

/// Result of a letterbox calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letterbox {
    pub margin: Margin,
    /// Outer region shrunk by the margin; the video goes here
    pub inner: Region,
}

impl Letterbox {
    fn zero_margin(outer: &Region) -> Self {
        Self {
            margin: Margin::default(),
            inner: *outer,
        }
    }
}

/// Compute `val * num / denom` without intermediate overflow, rounding down
fn scale_u64(val: u64, num: u64, denom: u64) -> u64 {
    if denom == 0 {
        return 0;
    }

    let scaled = u128::from(val) * u128::from(num) / u128::from(denom);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Display aspect ratio of a video shown on square pixels
///
/// Returns `None` if a PAR term is 0 or the reduced ratio does not fit in
/// a signed 32-bit integer.
fn display_ratio(video_width: u32, video_height: u32, par_n: u32, par_d: u32) -> Option<(u64, u64)> {
    if par_n == 0 || par_d == 0 {
        return None;
    }

    let num = u64::from(video_width) * u64::from(par_n);
    let den = u64::from(video_height) * u64::from(par_d);

    let divisor = gcd(num, den);
    if divisor == 0 {
        return None;
    }

    let (num, den) = (num / divisor, den / divisor);
    let limit = i32::MAX as u64;
    if num > limit || den > limit {
        return None;
    }

    Some((num, den))
}

/// Fit a video into `outer` and compute the margin around it
///
/// The video's display ratio comes from its size and pixel aspect ratio,
/// with square output pixels assumed. If `transposed` is set the video is
/// shown rotated by 90 degrees, so the ratio is inverted.
///
/// The inner region touches the outer one on two opposite sides. The spare
/// space on the other axis is split in half, the odd pixel going to the
/// right or bottom margin.
///
/// A zero margin (and an inner region equal to `outer`) is returned if the
/// video or outer size is 0, or the display ratio cannot be represented.
#[must_use]
pub fn calculate_letterbox_margin(
    outer: &Region,
    transposed: bool,
    video_width: u32,
    video_height: u32,
    par_n: u32,
    par_d: u32,
) -> Letterbox {
    if video_width == 0 || video_height == 0 {
        return Letterbox::zero_margin(outer);
    }

    let Some((mut ratio_n, mut ratio_d)) = display_ratio(video_width, video_height, par_n, par_d)
    else {
        trace!(
            "display ratio of {}x{} with PAR {}/{} not representable; no margin",
            video_width,
            video_height,
            par_n,
            par_d
        );
        return Letterbox::zero_margin(outer);
    };

    if transposed {
        std::mem::swap(&mut ratio_n, &mut ratio_d);
    }

    let outer_w = u64::from(outer.width());
    let outer_h = u64::from(outer.height());

    if outer_w == 0 || outer_h == 0 {
        return Letterbox::zero_margin(outer);
    }

    // outer_w / outer_h >= ratio_n / ratio_d means the height is the
    // limiting side, rearranged to stay in integers
    let ratio_factor = scale_u64(outer_w, ratio_d, outer_h);

    let (inner_w, inner_h) = if ratio_factor >= ratio_n {
        (scale_u64(outer_h, ratio_n, ratio_d), outer_h)
    } else {
        (outer_w, scale_u64(outer_w, ratio_d, ratio_n))
    };

    let inner_w = inner_w.min(outer_w);
    let inner_h = inner_h.min(outer_h);

    let combined_w_margin = (outer_w - inner_w) as u32;
    let combined_h_margin = (outer_h - inner_h) as u32;

    trace!(
        "video w/h: {}/{}  video PAR: {}/{}  display ratio: {}/{}  outer w/h: {}/{}  inner w/h: {}/{}  ratio factor: {}  combined margin w/h: {}/{}",
        video_width,
        video_height,
        par_n,
        par_d,
        ratio_n,
        ratio_d,
        outer_w,
        outer_h,
        inner_w,
        inner_h,
        ratio_factor,
        combined_w_margin,
        combined_h_margin
    );

    let left = combined_w_margin / 2;
    let top = combined_h_margin / 2;
    let margin = Margin {
        left,
        right: combined_w_margin - left,
        top,
        bottom: combined_h_margin - top,
    };

    // Margins never exceed the outer size, so the inner corners stay
    // between the outer ones and fit in i32
    let inner = Region {
        x1: (i64::from(outer.x1) + i64::from(margin.left)) as i32,
        y1: (i64::from(outer.y1) + i64::from(margin.top)) as i32,
        x2: (i64::from(outer.x2) - i64::from(margin.right)) as i32,
        y2: (i64::from(outer.y2) - i64::from(margin.bottom)) as i32,
    };

    Letterbox { margin, inner }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HD: Region = Region::new(0, 0, 1920, 1080);

    #[test]
    fn test_pillarbox() {
        let letterbox = calculate_letterbox_margin(&FULL_HD, false, 720, 480, 1, 1);

        assert_eq!(letterbox.margin, Margin { left: 150, right: 150, top: 0, bottom: 0 });
        assert_eq!(letterbox.inner.width(), 1620);
        assert_eq!(letterbox.inner.height(), 1080);
    }

    #[test]
    fn test_letterbox_bars() {
        let outer = Region::new(0, 0, 1280, 1024);
        let letterbox = calculate_letterbox_margin(&outer, false, 1920, 1080, 1, 1);

        assert_eq!(letterbox.margin, Margin { left: 0, right: 0, top: 152, bottom: 152 });
        assert_eq!(letterbox.inner, Region::new(0, 152, 1280, 872));
    }

    #[test]
    fn test_transposed() {
        let letterbox = calculate_letterbox_margin(&FULL_HD, true, 720, 480, 1, 1);

        // 2:3 inside 16:9
        assert_eq!(letterbox.inner.width(), 720);
        assert_eq!(letterbox.margin.left, 600);
        assert_eq!(letterbox.margin.right, 600);
    }

    #[test]
    fn test_pixel_aspect_ratio() {
        // PAL DV with 16:15 pixels displays at 4:3
        let letterbox = calculate_letterbox_margin(&FULL_HD, false, 720, 576, 16, 15);

        assert_eq!(letterbox.inner.width(), 1440);
        assert_eq!(letterbox.margin.left, 240);
        assert_eq!(letterbox.margin.right, 240);
    }

    #[test]
    fn test_odd_margin_goes_right() {
        let outer = Region::new(0, 0, 1921, 1080);
        let letterbox = calculate_letterbox_margin(&outer, false, 720, 480, 1, 1);

        assert_eq!(letterbox.margin.left, 150);
        assert_eq!(letterbox.margin.right, 151);
        assert_eq!(
            letterbox.margin.left + letterbox.margin.right + letterbox.inner.width(),
            outer.width()
        );
    }

    #[test]
    fn test_offset_outer_region() {
        let outer = Region::new(100, 50, 2020, 1130);
        let letterbox = calculate_letterbox_margin(&outer, false, 720, 480, 1, 1);

        assert_eq!(letterbox.inner, Region::new(250, 50, 1870, 1130));
    }

    #[test]
    fn test_exact_fit() {
        let letterbox = calculate_letterbox_margin(&FULL_HD, false, 1280, 720, 1, 1);

        assert!(letterbox.margin.is_zero());
        assert_eq!(letterbox.inner, FULL_HD);
    }

    #[test]
    fn test_zero_margin_cases() {
        let cases = [
            (0, 480, 1, 1),
            (720, 0, 1, 1),
            (720, 480, 0, 1),
            (720, 480, 1, 0),
            // Ratio u32::MAX:1 does not fit in i32
            (u32::MAX, 1, 1, 1),
        ];

        for (w, h, par_n, par_d) in cases {
            let letterbox = calculate_letterbox_margin(&FULL_HD, false, w, h, par_n, par_d);
            assert!(letterbox.margin.is_zero(), "{w}x{h} PAR {par_n}/{par_d}");
            assert_eq!(letterbox.inner, FULL_HD);
        }

        let empty = Region::new(10, 10, 10, 500);
        let letterbox = calculate_letterbox_margin(&empty, false, 720, 480, 1, 1);
        assert!(letterbox.margin.is_zero());
        assert_eq!(letterbox.inner, empty);
    }

    #[test]
    fn test_scale_u64_large_values() {
        assert_eq!(scale_u64(u64::MAX, 2, 4), u64::MAX / 2);
        assert_eq!(scale_u64(1080, 3, 2), 1620);
        assert_eq!(scale_u64(5, 1, 2), 2);
        assert_eq!(scale_u64(5, 1, 0), 0);
    }

    #[test]
    fn test_display_ratio_reduction() {
        assert_eq!(display_ratio(1920, 1080, 1, 1), Some((16, 9)));
        assert_eq!(display_ratio(720, 576, 16, 15), Some((4, 3)));
        assert_eq!(display_ratio(720, 480, 0, 1), None);
    }
}
