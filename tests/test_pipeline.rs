//! End-to-end tests for the composable pipeline and the analyzer.
//!
//! Tests cover:
//! - The step pipeline and the direct analyzer producing the same result
//! - Partial execution stopping before detection
//! - Debug mode writing one image per step
//! - The bytes-in entry point on encoded PNG data
//! - Decode failures surfacing as errors, not panics
//! - PipelineData construction and the metadata builder

mod common;

use common::*;
use spinecheck::{MetadataValue, PipelineData, SpineAnalyzer, build_standard_pipeline};

#[test]
fn test_standard_pipeline_matches_direct_analyzer() -> anyhow::Result<()> {
    let img = gradient_image(333, 555);

    // 1. Run the composable step pipeline
    let result = build_standard_pipeline(false).run(img.clone())?;
    let pipeline_angle = result.get_float("cobb_angle").unwrap();
    let pipeline_landmarks = result.get_points("landmarks").unwrap().to_vec();

    // 2. Run the direct orchestrator on the same input
    let report = SpineAnalyzer::new().analyze(&img)?;

    // 3. Both routes must agree exactly
    assert_eq!(pipeline_angle, report.angle);
    assert_eq!(pipeline_landmarks, report.landmarks);
    assert_eq!(result.image.to_rgb8(), report.annotated);

    Ok(())
}

#[test]
fn test_pipeline_data_from_image_carries_only_the_working_image() {
    // The data flowing between steps is the working image plus the
    // metadata the steps accumulate, nothing else
    let data = PipelineData::from_image(gradient_image(120, 80));

    assert_eq!(data.image.width(), 120);
    assert_eq!(data.image.height(), 80);
    assert!(data.metadata.is_empty());
}

#[test]
fn test_with_metadata_entries_read_back_through_typed_accessors() {
    let data = PipelineData::from_image(gradient_image(10, 10))
        .with_metadata("cobb_angle", MetadataValue::Float(12.5))
        .with_metadata("detector", MetadataValue::Text("stub".to_string()));

    assert_eq!(data.get_float("cobb_angle"), Some(12.5));
    assert_eq!(data.get_text("detector"), Some("stub"));
    // Typed accessors refuse a value of the wrong kind
    assert!(data.get_points("cobb_angle").is_none());
}

#[test]
fn test_pipeline_records_detector_name() -> anyhow::Result<()> {
    let result = build_standard_pipeline(false).run(gradient_image(100, 100))?;
    assert_eq!(result.get_text("detector"), Some("synthetic"));
    Ok(())
}

#[test]
fn test_run_partial_stops_before_detection() -> anyhow::Result<()> {
    let pipeline = build_standard_pipeline(false);

    // 1. Five steps take the frame through preprocessing only
    let data = pipeline.run_partial(gradient_image(800, 600), 5)?;
    assert_eq!(data.image.width(), 640);
    assert_eq!(data.image.height(), 480);

    // 2. No landmarks or angle recorded yet
    assert!(data.get_points("landmarks").is_none());
    assert!(data.get_float("cobb_angle").is_none());

    Ok(())
}

#[test]
fn test_debug_mode_writes_one_image_per_step() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let debug_dir = dir.path().join("stages");

    let pipeline = build_standard_pipeline(false).with_debug(debug_dir.clone())?;
    pipeline.run(gradient_image(320, 240))?;

    // Input snapshot plus one file per step
    let mut names: Vec<String> = std::fs::read_dir(&debug_dir)?
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(names.len(), 9, "found {:?}", names);
    assert_eq!(names[0], "00_input.png");
    assert_eq!(names[1], "01_resize.png");
    assert_eq!(names[8], "08_annotate.png");

    Ok(())
}

#[test]
fn test_debug_mode_rejects_non_empty_directory() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join("leftover.txt"), "x")?;

    let result = build_standard_pipeline(false).with_debug(dir.path().to_path_buf());
    assert!(result.is_err());

    Ok(())
}

#[test]
fn test_analyze_bytes_full_chain() -> anyhow::Result<()> {
    let bytes = png_bytes(&gradient_image(1024, 768));

    let report = SpineAnalyzer::new().analyze_bytes(&bytes)?;

    // Annotated frame is at the working resolution regardless of input size
    assert_eq!(report.annotated.dimensions(), (640, 480));
    assert_eq!(report.landmarks.len(), 7);

    // The synthetic curve measures just over 11 degrees on this frame
    assert!(report.angle > 11.0 && report.angle < 12.0, "got {}", report.angle);
    assert_eq!(report.severity(), spinecheck::Severity::Medium);

    Ok(())
}

#[test]
fn test_analyze_bytes_rejects_garbage() {
    let analyzer = SpineAnalyzer::new();
    assert!(analyzer.analyze_bytes(b"not an image").is_err());
    assert!(analyzer.analyze_bytes(&[]).is_err());
}

#[test]
fn test_analyzer_exposes_intermediate_stages() {
    let analyzer = SpineAnalyzer::new();
    let img = gradient_image(500, 500);

    let processed = analyzer.preprocessed(&img);
    assert_eq!(processed.dimensions(), (640, 480));

    let landmarks = analyzer.landmarks(&img);
    assert_eq!(landmarks.len(), 7);
}
