//! Field augmentation.
//!
//! Decides which entities are audited and appends the standard audit fields
//! they are missing. Existing fields always take precedence, and a second
//! pass over the same entity adds nothing.

use std::collections::HashSet;

use crate::domain::entities::{
    entity::EntityConfig,
    field::{FieldSpec, standard_audit_fields},
    project::ProjectConfig,
};

/// Applies the audit decision and field additions to entity configurations.
#[derive(Debug, Clone)]
pub struct FieldAugmenter<'a> {
    audited: HashSet<&'a str>,
}

impl<'a> FieldAugmenter<'a> {
    /// Build an augmenter for an externally supplied audited-entity list.
    pub fn new<I>(audited_entities: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            audited: audited_entities.into_iter().collect(),
        }
    }

    /// Whether the entity is audited: named in the list, or already flagged.
    pub fn is_audited(&self, entity: &EntityConfig) -> bool {
        self.audited.contains(entity.name()) || entity.is_audit_enabled()
    }

    /// Configure one entity and return the fields that were appended.
    ///
    /// Non-audited entities are left untouched.
    pub fn configure(&self, entity: &mut EntityConfig) -> Vec<FieldSpec> {
        if !self.is_audited(entity) {
            return Vec::new();
        }
        entity.set_audit_enabled(true);

        let missing = missing_audit_fields(entity);
        entity.append_fields(missing.iter().cloned());
        missing
    }
}

/// Standard audit fields the entity does not declare yet, in canonical order.
pub fn missing_audit_fields(entity: &EntityConfig) -> Vec<FieldSpec> {
    standard_audit_fields()
        .into_iter()
        .filter(|f| !entity.has_field(&f.name))
        .collect()
}

/// Attach per-entity table naming to an audited entity.
pub fn prepare_entity(entity: &mut EntityConfig, project: &ProjectConfig) {
    if !entity.is_audit_enabled() {
        return;
    }
    entity.set_table_prefix(project.table_prefix());
}
