//! Application layer for entity-audit.
//!
//! This layer contains:
//! - **Services**: The ordered decoration pipeline and the source patcher
//! - **Ports**: Interface definitions (traits) for the host's collaborators
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{AuditPipeline, EntityReport, GenerationReport, PatchRecord, SourcePatcher};

// Re-export port traits (for adapter implementation)
pub use ports::{ArtifactRenderer, Filesystem, StrategyComposer};

pub use error::ApplicationError;
