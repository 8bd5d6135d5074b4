//! Artifact renderers.

mod java;

pub use java::JavaArtifactRenderer;
