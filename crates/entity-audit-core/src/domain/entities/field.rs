use serde::{Deserialize, Serialize};

/// Names of the standard audit fields, in canonical order.
pub const STANDARD_AUDIT_FIELD_NAMES: [&str; 4] =
    ["createdBy", "createdDate", "lastModifiedBy", "lastModifiedDate"];

/// Column type used for the two "who" audit columns.
const AUDIT_USER_COLUMN: &str = "varchar(50)";

/// One attribute of a domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(default)]
    pub modifiers: FieldModifiers,
}

/// Generation hints attached to a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldModifiers {
    /// Value is produced by the backend; hidden on the create form.
    pub auto_generated: bool,
    /// Not editable once persisted.
    pub read_only: bool,
    /// Not rendered in the entity body or its form.
    pub excluded_from_form: bool,
    /// `NOT NULL` at the database level.
    pub non_nullable: bool,
}

impl FieldModifiers {
    /// Modifiers carried by every standard audit field.
    pub const AUDIT: Self = Self {
        auto_generated: true,
        read_only: true,
        excluded_from_form: true,
        non_nullable: true,
    };
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            column_type: None,
            modifiers: FieldModifiers::default(),
        }
    }

    pub fn with_column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: FieldModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this field has the name of one of the standard audit fields.
    pub fn is_standard_audit_name(&self) -> bool {
        STANDARD_AUDIT_FIELD_NAMES.contains(&self.name.as_str())
    }
}

/// Fresh copies of the four standard audit fields, in canonical order.
///
/// Every call allocates new values, so appending the result to one entity
/// never aliases another entity's fields.
pub fn standard_audit_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("createdBy", "String")
            .with_column_type(AUDIT_USER_COLUMN)
            .with_modifiers(FieldModifiers::AUDIT),
        FieldSpec::new("createdDate", "Instant").with_modifiers(FieldModifiers::AUDIT),
        FieldSpec::new("lastModifiedBy", "String")
            .with_column_type(AUDIT_USER_COLUMN)
            .with_modifiers(FieldModifiers::AUDIT),
        FieldSpec::new("lastModifiedDate", "Instant").with_modifiers(FieldModifiers::AUDIT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fields_follow_canonical_order() {
        let names: Vec<_> = standard_audit_fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, STANDARD_AUDIT_FIELD_NAMES);
    }

    #[test]
    fn standard_fields_carry_audit_modifiers() {
        for field in standard_audit_fields() {
            assert_eq!(field.modifiers, FieldModifiers::AUDIT, "{}", field.name);
            assert!(field.is_standard_audit_name());
        }
    }

    #[test]
    fn user_columns_are_varchar_50() {
        let fields = standard_audit_fields();
        assert_eq!(fields[0].column_type.as_deref(), Some("varchar(50)"));
        assert_eq!(fields[1].column_type, None);
        assert_eq!(fields[2].column_type.as_deref(), Some("varchar(50)"));
        assert_eq!(fields[3].field_type, "Instant");
    }
}
