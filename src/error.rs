// src/error.rs
use tessera_traits::ModuleError;
use thiserror::Error;

/// Errors raised while assembling or running a composition pipeline.
///
/// Configuration-shape problems inside a composition (missing modules,
/// dangling rule references, malformed conditions) are never reported here;
/// they degrade to missing output and a log line.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("Template error in module '{module}': {message}")]
    Template { module: String, message: String },

    #[error("Module error: {0}")]
    Module(#[from] ModuleError),

    #[error("Pipeline is missing required parts: {0}")]
    Incomplete(String),
}

impl PipelineError {
    pub(crate) fn template(module: impl Into<String>, message: impl ToString) -> Self {
        PipelineError::Template {
            module: module.into(),
            message: message.to_string(),
        }
    }
}
