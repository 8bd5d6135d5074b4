//! Infrastructure adapters for entity-audit.
//!
//! This crate implements the ports defined in
//! `entity_audit_core::application::ports` and reads/writes the JHipster
//! project metadata (`.yo-rc.json`, `.jhipster/*.json`).
//! It contains all external dependencies and I/O operations.

pub mod composer;
pub mod entity_loader;
pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use composer::RecordingComposer;
pub use entity_loader::{EntityDocument, EntityLoadError, JhipsterProject, ProjectLoader};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::JavaArtifactRenderer;
