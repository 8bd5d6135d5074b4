//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `entity-audit-adapters`
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations (the edit primitive is built on it)
//!   - `ArtifactRenderer`: Templated-file rendering
//!   - `StrategyComposer`: Composition of the audit persistence strategy

pub mod output;

pub use output::{ArtifactRenderer, Filesystem, StrategyComposer};
