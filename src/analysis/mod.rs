pub mod loader;
pub mod preprocess;
pub mod landmarks;
pub mod angle;
pub mod visualize;
pub mod steps;

use image::DynamicImage;

use crate::models::{LandmarkPoint, SpineReport};
use landmarks::{LandmarkDetector, SyntheticDetector};

/// Main analysis orchestrator
///
/// Runs the full chain on one photograph: preprocess, landmark detection,
/// angle measurement, overlay. Every invocation owns its buffers, so
/// analyzers can serve parallel requests from separate threads with no
/// coordination.
pub struct SpineAnalyzer {
    // Working resolution, width x height
    pub target_width: u32,
    pub target_height: u32,
    pub verbose: bool,
    detector: Box<dyn LandmarkDetector>,
}

impl SpineAnalyzer {
    pub fn new() -> Self {
        Self {
            target_width: preprocess::TARGET_WIDTH,
            target_height: preprocess::TARGET_HEIGHT,
            verbose: false,
            detector: Box::new(SyntheticDetector::new()),
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Swap in a different landmark detection strategy
    pub fn with_detector(mut self, detector: Box<dyn LandmarkDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Analyze encoded image bytes (JPEG/PNG)
    pub fn analyze_bytes(&self, bytes: &[u8]) -> anyhow::Result<SpineReport> {
        let img = loader::load_image(bytes)?;
        self.analyze(&img)
    }

    /// Run the full analysis on a decoded image
    pub fn analyze(&self, img: &DynamicImage) -> anyhow::Result<SpineReport> {
        // Step 1: Normalize the frame
        if self.verbose {
            println!(
                "\nPreprocessing image ({}x{} -> {}x{})...",
                img.width(),
                img.height(),
                self.target_width,
                self.target_height
            );
        }
        let processed = preprocess::preprocess(img, self.target_width, self.target_height);

        // Step 2: Locate spine landmarks
        if self.verbose {
            println!("Detecting landmarks ({})...", self.detector.name());
        }
        let landmarks = self.detector.detect(&processed);

        if self.verbose {
            println!("Found {} landmarks", landmarks.len());
            for (i, point) in landmarks.iter().enumerate() {
                println!("  Landmark {}: ({}, {})", i + 1, point.x, point.y);
            }
        }

        // Step 3: Measure the angle
        let angle = angle::cobb_angle(&landmarks);

        if self.verbose {
            if landmarks.len() < 4 {
                println!("Fewer than 4 landmarks, falling back to 0.0 degrees");
            }
            println!("Cobb angle: {:.1} degrees", angle);
        }

        // Step 4: Draw the overlay
        let annotated = visualize::annotate(&processed, &landmarks, angle)?;

        Ok(SpineReport {
            angle,
            landmarks,
            annotated,
        })
    }

    /// Preprocessed frame for an image (for inspection)
    pub fn preprocessed(&self, img: &DynamicImage) -> image::RgbImage {
        preprocess::preprocess(img, self.target_width, self.target_height)
    }

    /// Landmarks the configured detector produces for an image (for inspection)
    pub fn landmarks(&self, img: &DynamicImage) -> Vec<LandmarkPoint> {
        let processed = self.preprocessed(img);
        self.detector.detect(&processed)
    }
}

impl Default for SpineAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the standard analysis pipeline using the composable step system
pub fn build_standard_pipeline(verbose: bool) -> crate::pipeline::Pipeline {
    use crate::analysis::steps::*;
    use crate::pipeline::Pipeline;
    use std::sync::Arc;

    Pipeline::new()
        .with_verbose(verbose)
        .add_step(Arc::new(ResizeStep {
            width: preprocess::TARGET_WIDTH,
            height: preprocess::TARGET_HEIGHT,
        }))
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(EqualizeStep))
        .add_step(Arc::new(BlurStep {
            sigma: preprocess::BLUR_SIGMA,
        }))
        .add_step(Arc::new(RgbExpandStep))
        .add_step(Arc::new(DetectLandmarksStep::default()))
        .add_step(Arc::new(CobbAngleStep))
        .add_step(Arc::new(AnnotateStep))
}
