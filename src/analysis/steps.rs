use crate::analysis::landmarks::{LandmarkDetector, SyntheticDetector};
use crate::analysis::{angle, preprocess, visualize};
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};
use anyhow::Result;
use image::DynamicImage;

/// Resize to the fixed working resolution, ignoring aspect ratio
pub struct ResizeStep {
    pub width: u32,
    pub height: u32,
}

impl PipelineStep for ResizeStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        // A zero-area input flows through untouched
        if data.image.width() == 0 || data.image.height() == 0 {
            return Ok(data);
        }
        data.image = preprocess::resize_exact(&data.image, self.width, self.height);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Resize"
    }
}

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = preprocess::to_grayscale(&data.image);
        data.image = DynamicImage::ImageLuma8(gray);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Normalize contrast with histogram equalization
pub struct EqualizeStep;

impl PipelineStep for EqualizeStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        data.image = DynamicImage::ImageLuma8(preprocess::equalize(&gray));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Histogram Equalization"
    }
}

/// Apply Gaussian blur
pub struct BlurStep {
    pub sigma: f32,
}

impl PipelineStep for BlurStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        data.image = DynamicImage::ImageLuma8(preprocess::apply_blur(&gray, self.sigma));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Replicate the gray plane back into three channels so later stages can
/// draw in color
pub struct RgbExpandStep;

impl PipelineStep for RgbExpandStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        data.image = DynamicImage::ImageRgb8(preprocess::expand_channels(&gray));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Channel Expansion"
    }
}

/// Detect spine landmarks and record them in metadata
pub struct DetectLandmarksStep {
    detector: Box<dyn LandmarkDetector>,
}

impl DetectLandmarksStep {
    pub fn new(detector: Box<dyn LandmarkDetector>) -> Self {
        Self { detector }
    }
}

impl Default for DetectLandmarksStep {
    fn default() -> Self {
        Self::new(Box::new(SyntheticDetector::new()))
    }
}

impl PipelineStep for DetectLandmarksStep {
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData> {
        let rgb = data.image.to_rgb8();
        let points = self.detector.detect(&rgb);

        if context.verbose {
            println!("  Detected {} landmarks ({})", points.len(), self.detector.name());
        }

        Ok(data
            .with_metadata(
                "detector",
                MetadataValue::Text(self.detector.name().to_string()),
            )
            .with_metadata("landmarks", MetadataValue::Points(points)))
    }

    fn name(&self) -> &str {
        "Landmark Detection"
    }
}

/// Measure the Cobb angle from the detected landmarks
pub struct CobbAngleStep;

impl PipelineStep for CobbAngleStep {
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData> {
        let angle = match data.get_points("landmarks") {
            Some(points) => angle::cobb_angle(points),
            None => 0.0,
        };

        if context.verbose {
            println!("  Cobb angle: {:.1} degrees", angle);
        }

        Ok(data.with_metadata("cobb_angle", MetadataValue::Float(angle)))
    }

    fn name(&self) -> &str {
        "Cobb Angle"
    }
}

/// Draw the measurement overlay onto the working image
pub struct AnnotateStep;

impl PipelineStep for AnnotateStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let rgb = data.image.to_rgb8();
        let points = data.get_points("landmarks").unwrap_or(&[]).to_vec();
        let angle = data.get_float("cobb_angle").unwrap_or(0.0);

        let annotated = visualize::annotate(&rgb, &points, angle)?;
        data.image = DynamicImage::ImageRgb8(annotated);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Annotate"
    }
}
