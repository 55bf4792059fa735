use image::DynamicImage;
use std::sync::Arc;
use std::collections::HashMap;
use anyhow::Result;

use crate::models::LandmarkPoint;

/// Data that flows through the pipeline
/// Carries the current working image plus metadata accumulated by earlier
/// steps (the landmark sequence, the measured angle)
#[derive(Clone)]
pub struct PipelineData {
    /// The working image (grayscale or color depending on the stage)
    pub image: DynamicImage,

    /// Step products keyed by name (e.g. "landmarks", "cobb_angle")
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone)]
pub enum MetadataValue {
    Float(f64),
    Text(String),
    Points(Vec<LandmarkPoint>),
}

impl PipelineData {
    /// Create PipelineData for a fresh input image, with no metadata yet
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Get metadata as float
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Get metadata as text
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.metadata.get(key) {
            Some(MetadataValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Get metadata as a landmark sequence
    pub fn get_points(&self, key: &str) -> Option<&[LandmarkPoint]> {
        match self.metadata.get(key) {
            Some(MetadataValue::Points(v)) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: std::path::PathBuf,
    /// Whether debug mode is enabled
    pub enabled: bool,
}

/// Context available to all pipeline steps
#[derive(Clone)]
pub struct PipelineContext {
    pub verbose: bool,
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Process data and return the transformed data
    /// Steps are strictly one-in one-out; later stages read earlier
    /// products from the metadata map
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData>;

    /// Human-readable name for this step (used in verbose output and debug filenames)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext {
                verbose: false,
                debug: None,
            },
        }
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.context.verbose = verbose;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: std::path::PathBuf) -> Result<Self> {
        // Check if directory exists and is empty
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            // Create directory if it doesn't exist
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig {
            output_dir,
            enabled: true,
        });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    /// Run every step in order on the input image
    pub fn run(&self, input: DynamicImage) -> Result<PipelineData> {
        // Save initial input in debug mode
        if let Some(debug_config) = &self.context.debug {
            if debug_config.enabled {
                let input_path = debug_config.output_dir.join("00_input.png");
                input.save(&input_path)
                    .map_err(|e| anyhow::anyhow!("Failed to save debug input: {}", e))?;
                if self.context.verbose {
                    println!("  Debug: saved 00_input.png");
                }
            }
        }

        let mut data = PipelineData::from_image(input);

        for (step_idx, step) in self.steps.iter().enumerate() {
            if self.context.verbose {
                println!("Running step: {}", step.name());
            }

            let step_name = step.name();
            data = step.process(data, &self.context)?;

            // Save this step's output image in debug mode
            if let Some(debug_config) = &self.context.debug {
                if debug_config.enabled {
                    let filename = format!("{:02}_{}.png", step_idx + 1,
                        step_name.to_lowercase().replace(' ', "_"));
                    let output_path = debug_config.output_dir.join(&filename);
                    data.image.save(&output_path)
                        .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;

                    if self.context.verbose {
                        println!("  Debug: saved {}", filename);
                    }
                }
            }
        }

        Ok(data)
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for
    /// inspecting an intermediate stage)
    pub fn run_partial(&self, input: DynamicImage, num_steps: usize) -> Result<PipelineData> {
        let mut data = PipelineData::from_image(input);

        for (i, step) in self.steps.iter().enumerate() {
            if i >= num_steps {
                break;
            }
            if self.context.verbose {
                println!("Running step {}: {}", i + 1, step.name());
            }
            data = step.process(data, &self.context)?;
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
