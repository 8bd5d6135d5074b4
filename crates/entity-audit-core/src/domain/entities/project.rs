use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::domain::{
    entities::{common::RelativePath, entity::is_java_identifier, render_context::to_snake_case},
    error::DomainError,
};

/// Main source root of a generated Spring project.
pub const MAIN_SOURCE_ROOT: &str = "src/main/java/";
/// Test source root of a generated Spring project.
pub const TEST_SOURCE_ROOT: &str = "src/test/java/";
/// Default prefix of framework-owned tables.
pub const DEFAULT_JHI_PREFIX: &str = "jhi";

/// Audit configuration supplied by the host for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSettings {
    /// Raw `auditFramework` value (`no`, `javers`, `custom`).
    #[serde(default)]
    pub audit_framework: Option<String>,
    /// Whether the audit browsing page is generated. Accepts `true` or `"true"`.
    #[serde(default, deserialize_with = "bool_or_string")]
    pub audit_page: bool,
    /// Entities to audit in addition to those already flagged.
    #[serde(default)]
    pub audited_entities: Vec<String>,
}

impl AuditSettings {
    /// Settings with an explicit `auditFramework` value. Use `default()` for
    /// "no value configured".
    pub fn new(audit_framework: impl Into<String>) -> Self {
        Self {
            audit_framework: Some(audit_framework.into()),
            ..Self::default()
        }
    }

    pub fn with_audit_page(mut self, audit_page: bool) -> Self {
        self.audit_page = audit_page;
        self
    }

    pub fn with_audited_entities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audited_entities = names.into_iter().map(Into::into).collect();
        self
    }
}

fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"a boolean or \"true\"/\"false\"",
            )),
        },
    }
}

/// Project-wide facts needed to resolve output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    root: PathBuf,
    package_name: String,
    jhi_prefix: String,
    main_source_root: RelativePath,
    test_source_root: RelativePath,
}

impl ProjectConfig {
    pub fn new(root: impl Into<PathBuf>, package_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            package_name: package_name.into(),
            jhi_prefix: DEFAULT_JHI_PREFIX.to_string(),
            main_source_root: RelativePath::new(MAIN_SOURCE_ROOT),
            test_source_root: RelativePath::new(TEST_SOURCE_ROOT),
        }
    }

    pub fn with_jhi_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.jhi_prefix = prefix.into();
        self
    }

    pub fn with_source_roots(
        self,
        main: impl Into<PathBuf>,
        test: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        self.with_main_source_root(main)?.with_test_source_root(test)
    }

    pub fn with_main_source_root(mut self, main: impl Into<PathBuf>) -> Result<Self, DomainError> {
        self.main_source_root = RelativePath::try_new(main)?;
        Ok(self)
    }

    pub fn with_test_source_root(mut self, test: impl Into<PathBuf>) -> Result<Self, DomainError> {
        self.test_source_root = RelativePath::try_new(test)?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn jhi_prefix(&self) -> &str {
        &self.jhi_prefix
    }

    /// `com.mycompany.myapp` → `com/mycompany/myapp`.
    pub fn package_folder(&self) -> PathBuf {
        self.package_name.split('.').collect()
    }

    /// Package folder under the main source root, relative to the project root.
    pub fn absolute_package_folder(&self) -> RelativePath {
        self.main_source_root
            .join_package(&self.package_name)
            .unwrap_or_else(|_| self.main_source_root.clone())
    }

    /// Package folder under the test source root, relative to the project root.
    pub fn absolute_package_test_folder(&self) -> RelativePath {
        self.test_source_root
            .join_package(&self.package_name)
            .unwrap_or_else(|_| self.test_source_root.clone())
    }

    /// Table-name form of the framework prefix (`JHI-App` → `jhi_app`).
    pub fn table_prefix(&self) -> String {
        to_snake_case(&self.jhi_prefix)
    }

    /// Resolve a project-relative path against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.package_name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "package_name",
            });
        }

        if let Some(bad) = self
            .package_name
            .split('.')
            .find(|segment| !is_java_identifier(segment))
        {
            return Err(DomainError::InvalidPackageName {
                package: self.package_name.clone(),
                reason: format!("segment '{bad}' is not a valid Java identifier"),
            });
        }

        Ok(())
    }
}
