//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to run the decoration
//! pipeline against a project.

pub mod patch_service;
pub mod pipeline;
pub mod report;

pub use patch_service::SourcePatcher;
pub use pipeline::AuditPipeline;
pub use report::{EntityReport, GenerationReport, PatchRecord};
