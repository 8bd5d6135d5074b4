//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from the host.
//! The `entity-audit-adapters` crate provides implementations.

use crate::domain::{ArtifactKind, AuditStrategy, RenderContext};
use crate::error::AuditResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `entity_audit_adapters::filesystem::LocalFilesystem` (production)
/// - `entity_audit_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
///
/// Paths are resolved against the project root by the caller.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> AuditResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> AuditResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> AuditResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for rendering the shared audit artifacts.
///
/// Implemented by:
/// - `entity_audit_adapters::renderer::JavaArtifactRenderer`
pub trait ArtifactRenderer: Send + Sync {
    /// Render the source text of one artifact.
    fn render(&self, kind: ArtifactKind, context: &RenderContext) -> AuditResult<String>;
}

/// Port for composing the sibling generator behind an audit strategy.
///
/// Only called for strategies that require composition, once per run and
/// before any artifact is rendered.
pub trait StrategyComposer: Send + Sync {
    fn compose(&self, strategy: AuditStrategy) -> AuditResult<()>;
}
