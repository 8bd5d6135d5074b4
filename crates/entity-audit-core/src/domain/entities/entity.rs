use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::field::FieldSpec, error::DomainError, value_objects::DtoStrategy,
};

/// One domain entity as configured by the host.
///
/// Created by the host before the pipeline runs, selectively mutated by the
/// field augmenter, and persisted by the host afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityConfig {
    name: String,
    fields: Vec<FieldSpec>,
    #[serde(default)]
    enable_audit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    persist_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rest_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity_package: Option<String>,
    #[serde(default)]
    dto: DtoStrategy,
    #[serde(default)]
    built_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_prefix: Option<String>,
}

impl EntityConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            enable_audit: false,
            persist_class: None,
            rest_class: None,
            entity_package: None,
            dto: DtoStrategy::No,
            built_in: false,
            table_prefix: None,
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.enable_audit = enabled;
        self
    }

    pub fn with_persist_class(mut self, class: impl Into<String>) -> Self {
        self.persist_class = Some(class.into());
        self
    }

    pub fn with_rest_class(mut self, class: impl Into<String>) -> Self {
        self.rest_class = Some(class.into());
        self
    }

    pub fn with_entity_package(mut self, package: impl Into<String>) -> Self {
        self.entity_package = Some(package.into());
        self
    }

    pub fn with_dto(mut self, dto: DtoStrategy) -> Self {
        self.dto = dto;
        self
    }

    pub fn with_built_in(mut self, built_in: bool) -> Self {
        self.built_in = built_in;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn is_audit_enabled(&self) -> bool {
        self.enable_audit
    }

    pub fn is_built_in(&self) -> bool {
        self.built_in
    }

    pub fn dto(&self) -> DtoStrategy {
        self.dto
    }

    /// Persistence class name; defaults to the entity name.
    pub fn persist_class(&self) -> &str {
        self.persist_class.as_deref().unwrap_or(&self.name)
    }

    /// REST/DTO class name; defaults to `<PersistClass>DTO`.
    pub fn rest_class(&self) -> String {
        self.rest_class
            .clone()
            .unwrap_or_else(|| format!("{}DTO", self.persist_class()))
    }

    /// Sub-package the entity lives in, if any. Empty strings count as none.
    pub fn entity_package(&self) -> Option<&str> {
        self.entity_package.as_deref().filter(|p| !p.is_empty())
    }

    pub fn table_prefix(&self) -> Option<&str> {
        self.table_prefix.as_deref()
    }

    // ── Mutation (pipeline only) ─────────────────────────────────────────────

    pub(crate) fn set_audit_enabled(&mut self, enabled: bool) {
        self.enable_audit = enabled;
    }

    pub(crate) fn append_fields(&mut self, fields: impl IntoIterator<Item = FieldSpec>) {
        self.fields.extend(fields);
    }

    pub(crate) fn set_table_prefix(&mut self, prefix: impl Into<String>) {
        self.table_prefix = Some(prefix.into());
    }

    // ── Validation ───────────────────────────────────────────────────────────

    pub fn validate(&self) -> Result<(), DomainError> {
        if !is_java_identifier(&self.name) {
            return Err(DomainError::InvalidEntity {
                entity: self.name.clone(),
                reason: "name must be a valid Java identifier".into(),
            });
        }

        if let Some(class) = &self.persist_class {
            if !is_java_identifier(class) {
                return Err(DomainError::InvalidEntity {
                    entity: self.name.clone(),
                    reason: format!("persist class '{class}' is not a valid Java identifier"),
                });
            }
        }

        if let Some(package) = self.entity_package() {
            if !package.split(['.', '/']).all(is_java_identifier) {
                return Err(DomainError::InvalidEntity {
                    entity: self.name.clone(),
                    reason: format!("entity package '{package}' is not a valid package path"),
                });
            }
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DomainError::DuplicateField {
                    entity: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// ASCII Java identifier check; generated names never use Unicode letters.
pub(crate) fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
