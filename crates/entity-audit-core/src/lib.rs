//! Domain and application layers for adding entity auditing to a generated
//! JHipster project.
//!
//! The [`domain`] module is pure: entity metadata, field augmentation, audit
//! strategy selection and text patches over Java sources. The
//! [`application`] module drives those through three ports
//! ([`Filesystem`](application::ports::Filesystem),
//! [`ArtifactRenderer`](application::ports::ArtifactRenderer) and
//! [`StrategyComposer`](application::ports::StrategyComposer)) that the
//! adapters crate implements and the CLI wires together.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use entity_audit_core::prelude::*;
//!
//! let project = ProjectConfig::new("./my-app", "com.mycompany.myapp");
//! let settings = AuditSettings::new("custom").with_audited_entities(["Foo"]);
//! let mut entities = vec![EntityConfig::new("Foo")];
//!
//! // Adapters are injected by the host.
//! let pipeline = AuditPipeline::new(filesystem, renderer, composer);
//! let report = pipeline.run(&project, &settings, &mut entities).unwrap();
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Everything a host needs to run the pipeline.
pub mod prelude {
    pub use crate::application::{
        AuditPipeline, GenerationReport,
        ports::{ArtifactRenderer, Filesystem, StrategyComposer},
    };
    pub use crate::domain::{
        ArtifactKind, AuditFlags, AuditFramework, AuditSettings, AuditStrategy, DtoStrategy,
        EntityConfig, FieldSpec, PatchOutcome, ProjectConfig, RenderContext,
        SharedEntityRegistry,
    };
    pub use crate::error::{AuditError, AuditResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
