use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use spinecheck::analysis::steps::*;
use spinecheck::analysis::{loader, preprocess};
use spinecheck::{LandmarkPoint, Pipeline, Severity, SyntheticDetector};

#[derive(Parser)]
#[command(name = "spinecheck")]
#[command(about = "Estimate spinal curvature (Cobb angle) from a photograph")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Save the annotated image to this path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the report as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Working resolution width
    #[arg(long, default_value_t = preprocess::TARGET_WIDTH)]
    width: u32,

    /// Working resolution height
    #[arg(long, default_value_t = preprocess::TARGET_HEIGHT)]
    height: u32,

    /// Number of landmarks the synthetic detector generates
    #[arg(long, default_value_t = 7)]
    points: usize,
}

#[derive(Serialize)]
struct ReportSummary<'a> {
    angle_degrees: f64,
    severity: Severity,
    landmarks: &'a [LandmarkPoint],
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }

    // Load image
    let img = loader::load_image_file(&args.image_path)?;

    if args.verbose {
        println!("Image loaded: {}x{}\n", img.width(), img.height());
    }

    // Build pipeline
    let mut pipeline = Pipeline::new()
        .with_verbose(args.verbose)
        .add_step_boxed(Box::new(ResizeStep {
            width: args.width,
            height: args.height,
        }))
        .add_step_boxed(Box::new(GrayscaleStep))
        .add_step_boxed(Box::new(EqualizeStep))
        .add_step_boxed(Box::new(BlurStep {
            sigma: preprocess::BLUR_SIGMA,
        }))
        .add_step_boxed(Box::new(RgbExpandStep))
        .add_step_boxed(Box::new(DetectLandmarksStep::new(Box::new(
            SyntheticDetector::new().with_num_points(args.points),
        ))))
        .add_step_boxed(Box::new(CobbAngleStep))
        .add_step_boxed(Box::new(AnnotateStep));

    // Enable debug mode if requested
    if let Some(debug_dir) = args.debug_out {
        pipeline = pipeline.with_debug(debug_dir)?;
    }

    // Run pipeline
    if args.verbose {
        println!("Running pipeline...\n");
    }
    let result = pipeline.run(img)?;

    let angle = result.get_float("cobb_angle").unwrap_or(0.0);
    let landmarks = result.get_points("landmarks").unwrap_or(&[]).to_vec();
    let severity = Severity::from_angle(angle);

    // Save annotated image if requested
    if let Some(output_path) = &args.output {
        result
            .image
            .save(output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save annotated image: {}", e))?;
        if args.verbose {
            println!("Annotated image saved to {:?}", output_path);
        }
    }

    // Print results
    if args.json {
        let summary = ReportSummary {
            angle_degrees: angle,
            severity,
            landmarks: &landmarks,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n=== Spine Analysis Results ===");
        println!("Cobb angle: {:.1} degrees", angle);
        println!("Severity: {}", severity.label());
        println!("\nRecommendations:");
        for rec in severity.recommendations() {
            println!("  - {}", rec);
        }
    }

    Ok(())
}
