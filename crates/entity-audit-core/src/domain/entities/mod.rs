pub mod artifact;
pub mod common;
pub mod entity;
pub mod field;
pub mod project;
pub mod registry;
pub mod render_context;

pub use crate::domain::DomainError;
pub use artifact::{ArtifactKind, ArtifactSet, GeneratedArtifact};
pub use entity::EntityConfig;
pub use field::{FieldModifiers, FieldSpec};
pub use project::{AuditSettings, ProjectConfig};
pub use registry::SharedEntityRegistry;
pub use render_context::RenderContext;
