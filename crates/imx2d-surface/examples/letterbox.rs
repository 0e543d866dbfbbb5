//! Letterbox example
//!
//! This example demonstrates:
//! - Parsing an image-orientation tag into an orientation method
//! - Mapping the method onto a blitter rotation
//! - Fitting the rotated video into an output region
//!
//! Run with: cargo run --example letterbox -- [tag]

use imx2d_format::{orientation_from_image_tag, to_hardware_rotation, VideoOrientation};
use imx2d_surface::{calculate_letterbox_margin, Region};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== imx2d-surface Letterbox Example ===\n");

    let tag = std::env::args().nth(1);
    let orientation = orientation_from_image_tag(tag.as_deref())?.unwrap_or_default();
    let rotation = to_hardware_rotation(orientation);

    println!("Orientation: {orientation} -> blitter rotation {rotation:?}\n");

    let outer = Region::new(0, 0, 1920, 1080);
    let videos = [
        ("SD 4:3", 640, 480, 1, 1),
        ("PAL DV", 720, 576, 16, 15),
        ("Portrait phone", 1080, 1920, 1, 1),
        ("Cinema", 2048, 858, 1, 1),
    ];

    for (name, width, height, par_n, par_d) in videos {
        let letterbox = calculate_letterbox_margin(
            &outer,
            orientation.is_transposed(),
            width,
            height,
            par_n,
            par_d,
        );

        println!("{name} ({width}x{height}, PAR {par_n}/{par_d}):");
        println!(
            "   inner {}x{} at ({}, {})",
            letterbox.inner.width(),
            letterbox.inner.height(),
            letterbox.inner.x1,
            letterbox.inner.y1
        );
        println!(
            "   margin left/right/top/bottom: {}/{}/{}/{}\n",
            letterbox.margin.left,
            letterbox.margin.right,
            letterbox.margin.top,
            letterbox.margin.bottom
        );
    }

    if orientation == VideoOrientation::Identity {
        println!("Tip: pass an orientation tag such as rotate-90 to see transposed layouts");
    }

    Ok(())
}
