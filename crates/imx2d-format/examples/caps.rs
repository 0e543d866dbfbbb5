//! Caps example
//!
//! This example demonstrates:
//! - Describing a blitter with the capabilities builder
//! - Building the input and output caps offered during negotiation
//! - Resolving fixed caps into video info
//!
//! Run with: cargo run --example caps

use imx2d_format::{
    all_hardware_formats, caps_from_capabilities, setup_logging, Caps, Fraction,
    HardwareCapabilities, HardwareFormat, PadDirection, VideoInfo,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();
    let threshold = setup_logging();

    println!("=== imx2d-format Caps Example ===\n");
    println!("Hardware log threshold: {threshold:?}\n");

    // A PxP-like blitter: reads everything, writes a few RGB formats
    let capabilities = HardwareCapabilities::builder()
        .source_formats(all_hardware_formats())
        .dest_formats(vec![
            HardwareFormat::Bgrx8888,
            HardwareFormat::Rgb565,
            HardwareFormat::PackedYuv422Yuyv,
        ])
        .width_range(8, 8192, 8)
        .height_range(8, 8192, 8)
        .stride_alignment(16)
        .build();

    if let Err(issues) = capabilities.validate() {
        for issue in issues {
            eprintln!("   ✗ {issue}");
        }
        return Ok(());
    }

    for direction in [PadDirection::Sink, PadDirection::Src] {
        let caps = caps_from_capabilities(&capabilities, direction, true);
        println!("{direction:?} caps ({} structures):", caps.structures().len());
        for structure in caps.structures() {
            println!("   {:?}", structure.format);
            println!("   features: {:?}", structure.features);
        }
        println!();
    }

    let fixed = Caps::fixed_video("NV21_AMPHION_8x128", 1280, 720, Fraction::new(60, 1));
    let (info, tile_layout) = VideoInfo::from_caps(&fixed)?;

    println!(
        "Fixed caps: {} {}x{} @ {} fps, tile layout {:?}",
        info.format, info.width, info.height, info.framerate, tile_layout
    );
    for (index, plane) in info.layout.planes().iter().enumerate() {
        println!(
            "   plane {index}: stride {}  offset {}  rows {}",
            plane.stride, plane.offset, plane.rows
        );
    }

    Ok(())
}
