// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for entity-audit.
//!
//! This module contains the pure decoration logic: strategy selection,
//! field augmentation and text patching. All I/O, rendering and composition
//! concerns are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Patches work on strings, never on files
//! - **Plain data**: Entities are Clone + PartialEq and serde-friendly
//!
// Public API - what the world sees
pub mod augment;
pub mod entities;
pub mod error;
pub mod patch;
pub mod strategy;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use augment::{FieldAugmenter, missing_audit_fields, prepare_entity};
pub use entities::{
    ArtifactKind, ArtifactSet, AuditSettings, EntityConfig, FieldModifiers, FieldSpec,
    GeneratedArtifact, ProjectConfig, RenderContext, SharedEntityRegistry,
    common::RelativePath,
    field::{STANDARD_AUDIT_FIELD_NAMES, standard_audit_fields},
};
pub use crate::error::ErrorCategory;
pub use error::DomainError;
pub use patch::{
    AuditBase, InheritanceTarget, PatchOutcome, PatchStep, PatchedText, TextPatch,
    architecture_test_path, patch_architecture_test,
};
pub use strategy::{AuditFlags, AuditStrategy};
pub use validation::DomainValidator;
pub use value_objects::{AuditFramework, DtoStrategy};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn validator_rejects_duplicate_entity_names() {
        let entities = vec![EntityConfig::new("Foo"), EntityConfig::new("Foo")];
        assert_eq!(
            DomainValidator::validate_entities(&entities),
            Err(DomainError::DuplicateEntity { name: "Foo".into() })
        );
    }

    #[test]
    fn validator_checks_each_entity() {
        let entities = vec![EntityConfig::new("Foo"), EntityConfig::new("not valid")];
        assert!(matches!(
            DomainValidator::validate_entities(&entities),
            Err(DomainError::InvalidEntity { .. })
        ));
    }

    #[test]
    fn validator_accepts_project() {
        let project = ProjectConfig::new(".", "com.mycompany.myapp");
        assert!(DomainValidator::validate_project(&project).is_ok());
    }

    // ========================================================================
    // Error metadata
    // ========================================================================

    #[test]
    fn validation_errors_have_suggestions() {
        let err = DomainError::DuplicateField {
            entity: "Foo".into(),
            field: "title".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains(".jhipster/Foo.json")));
    }

    // ========================================================================
    // Stage interplay
    // ========================================================================

    #[test]
    fn augmented_entity_yields_inheritance_targets() {
        let project = ProjectConfig::new(".", "com.mycompany.myapp");
        let settings = AuditSettings::new("custom").with_audited_entities(["Foo"]);
        let augmenter = FieldAugmenter::new(settings.audited_entities.iter().map(String::as_str));

        let mut entity = EntityConfig::new("Foo");
        augmenter.configure(&mut entity);
        prepare_entity(&mut entity, &project);

        let targets = InheritanceTarget::for_entity(&entity, &project).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(entity.table_prefix(), Some("jhi"));
    }
}
