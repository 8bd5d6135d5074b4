use std::collections::BTreeMap;

use crate::domain::entities::{entity::EntityConfig, field::FieldSpec};

/// Project-wide view from entity name to its field list.
///
/// Older consumers read entity fields through a shared name-keyed map. The
/// registry here is a projection over the entity configurations rather than
/// a second copy, so its field sequence for an entity is always the entity's
/// own field sequence.
#[derive(Debug, Clone, Copy)]
pub struct SharedEntityRegistry<'a> {
    entities: &'a [EntityConfig],
}

impl<'a> SharedEntityRegistry<'a> {
    pub fn new(entities: &'a [EntityConfig]) -> Self {
        Self { entities }
    }

    pub fn get(&self, name: &str) -> Option<&'a EntityConfig> {
        self.entities.iter().find(|e| e.name() == name)
    }

    pub fn fields(&self, name: &str) -> Option<&'a [FieldSpec]> {
        self.get(name).map(EntityConfig::fields)
    }

    pub fn field_names(&self, name: &str) -> Option<Vec<&'a str>> {
        self.get(name).map(|e| e.field_names().collect())
    }

    pub fn names(&self) -> impl Iterator<Item = &'a str> {
        self.entities.iter().map(EntityConfig::name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Owned, ordered copy for serialization to legacy consumers.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<FieldSpec>> {
        self.entities
            .iter()
            .map(|e| (e.name().to_string(), e.fields().to_vec()))
            .collect()
    }
}
