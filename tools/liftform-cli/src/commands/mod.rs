//! Subcommand implementations.

pub mod analyze;
pub mod exercises;
pub mod risk;

use std::path::PathBuf;

use anyhow::Context;
use liftform_frame_model::thresholds::AnalysisConfig;

/// Load analysis thresholds from `path`, or fall back to the built-in defaults.
pub(crate) fn load_analysis_config(path: Option<PathBuf>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading analysis config");
            AnalysisConfig::load(&path)
                .with_context(|| format!("Failed to load analysis config {}", path.display()))
        }
        None => Ok(AnalysisConfig::default()),
    }
}
