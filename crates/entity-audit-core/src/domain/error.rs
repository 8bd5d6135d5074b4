use thiserror::Error;

use crate::error::ErrorCategory;

/// Broken entity metadata or project settings.
///
/// Clone + PartialEq so tests and callers can compare them directly.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid entity '{entity}': {reason}")]
    InvalidEntity { entity: String, reason: String },

    #[error("Duplicate entity name: {name}")]
    DuplicateEntity { name: String },

    #[error("Entity '{entity}' declares field '{field}' more than once")]
    DuplicateField { entity: String, field: String },

    #[error("Invalid package name '{package}': {reason}")]
    InvalidPackageName { package: String, reason: String },

    #[error("Path escapes the project root: {path}")]
    AbsolutePathNotAllowed { path: String },

    /// Two artifacts were planned for the same file.
    #[error("Duplicate artifact path: {path}")]
    DuplicateArtifact { path: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    /// A patch anchor built from an entity name failed to compile.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidEntity { entity, reason } => vec![
                format!("Check .jhipster/{entity}.json"),
                format!("Details: {reason}"),
            ],
            Self::DuplicateEntity { name } => vec![
                format!("Entity '{name}' is defined more than once"),
                "Remove the duplicate file from .jhipster/".into(),
            ],
            Self::DuplicateField { entity, field } => vec![
                format!("Rename or remove one of the '{field}' fields"),
                format!("Edit .jhipster/{entity}.json"),
            ],
            Self::InvalidPackageName { .. } | Self::MissingRequiredField { .. } => vec![
                "Use a dotted Java package such as com.mycompany.myapp".into(),
                "Set it with --package or in .yo-rc.json (packageName)".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } => {
                vec!["Source roots must be relative to the project directory".into()]
            }
            Self::DuplicateArtifact { .. } | Self::InvalidPattern { .. } => {
                vec!["Re-run with -vvv and report the log".into()]
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateArtifact { .. } | Self::InvalidPattern { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}
