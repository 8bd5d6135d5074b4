//! Failures while driving the ports, as opposed to invalid input.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The renderer has no template for this framework/artifact pair.
    #[error("Rendering of {artifact} failed: {reason}")]
    RenderingFailed { artifact: String, reason: String },

    #[error("Composition of {strategy} failed: {reason}")]
    CompositionFailed { strategy: String, reason: String },

    /// A mutex inside an adapter was poisoned.
    #[error("Adapter state is unavailable")]
    StateLockError,
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Could not access {}", path.display()),
                "Check write permissions on the project directory".into(),
                "Files written before the failure are kept".into(),
            ],
            Self::RenderingFailed { artifact, .. } => vec![
                format!("No template produced {artifact}"),
                "Report this together with the framework you selected".into(),
            ],
            Self::CompositionFailed { strategy, .. } => vec![
                format!("The {strategy} generator could not be composed"),
                "Check auditFramework in .yo-rc.json or pass --framework".into(),
            ],
            Self::StateLockError => vec!["Run the command again".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CompositionFailed { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::RenderingFailed { .. } | Self::StateLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
