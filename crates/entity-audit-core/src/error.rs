//! The one error type the core hands to its callers.
//!
//! Domain rule violations and orchestration failures keep their own enums;
//! [`AuditError`] just carries either, and both report hints and a
//! [`ErrorCategory`] the host can turn into an exit status.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum AuditError {
    /// Bad entity metadata, package names, paths or patch patterns.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O, rendering or composition went wrong while applying.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl AuditError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// Coarse classification shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

pub type AuditResult<T> = Result<T, AuditError>;
