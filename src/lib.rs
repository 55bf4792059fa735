pub mod analysis;
pub mod models;
pub mod pipeline;

pub use models::{LandmarkPoint, Severity, Slope, SpineReport};
pub use analysis::{SpineAnalyzer, build_standard_pipeline};
pub use analysis::landmarks::{LandmarkDetector, SyntheticDetector};
pub use pipeline::{
    Pipeline, PipelineData, PipelineStep, PipelineContext,
    MetadataValue, DebugConfig
};
