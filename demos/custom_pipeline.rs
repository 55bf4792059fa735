use image::ImageReader;
use spinecheck::analysis::steps::*;
use spinecheck::{Pipeline, Severity, SyntheticDetector, build_standard_pipeline};
use std::env;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image_path>", args[0]);
        std::process::exit(1);
    }

    let image_path = &args[1];
    let img = ImageReader::open(image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;

    println!("Loaded image: {}x{}", img.width(), img.height());

    // Example 1: Standard analysis pipeline
    println!("\n=== Standard Analysis Pipeline ===");
    let standard_pipeline = build_standard_pipeline(true);
    let result = standard_pipeline.run(img.clone())?;

    let angle = result.get_float("cobb_angle").unwrap_or(0.0);
    let landmarks = result.get_points("landmarks").unwrap_or(&[]);

    println!("\n=== Results ===");
    println!(
        "Cobb angle: {:.1} degrees ({})",
        angle,
        Severity::from_angle(angle).label()
    );
    for (i, point) in landmarks.iter().enumerate() {
        println!("  Landmark {}: ({}, {})", i + 1, point.x, point.y);
    }

    // Example 2: Custom pipeline with modified parameters
    println!("\n\n=== Custom Pipeline (Half Resolution, 9 Landmarks) ===");
    let custom_pipeline = Pipeline::new()
        .with_verbose(false)
        .add_step_boxed(Box::new(ResizeStep { width: 320, height: 240 }))  // Half resolution
        .add_step_boxed(Box::new(GrayscaleStep))
        .add_step_boxed(Box::new(EqualizeStep))
        .add_step_boxed(Box::new(BlurStep { sigma: 2.0 }))  // More blur
        .add_step_boxed(Box::new(RgbExpandStep))
        .add_step_boxed(Box::new(DetectLandmarksStep::new(Box::new(
            SyntheticDetector::new().with_num_points(9),  // Denser landmark column
        ))))
        .add_step_boxed(Box::new(CobbAngleStep))
        .add_step_boxed(Box::new(AnnotateStep));

    let custom_result = custom_pipeline.run(img.clone())?;
    let custom_angle = custom_result.get_float("cobb_angle").unwrap_or(0.0);
    println!("Custom pipeline measured {:.1} degrees", custom_angle);

    // Example 3: Preprocessing only (partial execution for debugging)
    println!("\n\n=== Partial Pipeline (Stop After Preprocessing) ===");
    let partial_result = build_standard_pipeline(false).run_partial(img, 5)?;
    println!(
        "Preprocessed frame: {}x{}",
        partial_result.image.width(),
        partial_result.image.height()
    );

    // Could save this for debugging:
    // partial_result.image.save("debug_preprocessed.png")?;

    Ok(())
}
