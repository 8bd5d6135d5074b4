use std::collections::HashSet;

use crate::domain::{
    entities::{ArtifactSet, EntityConfig, ProjectConfig},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across the pipeline.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project(project: &ProjectConfig) -> Result<(), DomainError> {
        project.validate()
    }

    pub fn validate_entity(entity: &EntityConfig) -> Result<(), DomainError> {
        entity.validate()
    }

    /// Every entity individually, plus name uniqueness across the set.
    pub fn validate_entities(entities: &[EntityConfig]) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entity in entities {
            entity.validate()?;
            if !seen.insert(entity.name()) {
                return Err(DomainError::DuplicateEntity {
                    name: entity.name().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn validate_artifacts(artifacts: &ArtifactSet) -> Result<(), DomainError> {
        artifacts.validate()
    }
}
