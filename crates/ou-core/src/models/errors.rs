use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors detected before or at the start of an analysis run.
///
/// None of these are retried and there is no partial output: the runner maps
/// each to a message and exit code instead of propagating a panic.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("OpenAPI spec not found: {0}")]
    SpecNotFound(PathBuf),

    #[error("Failed to parse OpenAPI spec: {0}")]
    SpecParse(String),

    #[error("Source directory not found: {0}")]
    SourceRootNotFound(PathBuf),
}
