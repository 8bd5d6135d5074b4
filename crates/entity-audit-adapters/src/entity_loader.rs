//! JHipster project loader.
//!
//! Reads the project descriptor (`.yo-rc.json`) and the entity definitions
//! (`.jhipster/*.json`) of an already generated project, converting them
//! into domain [`ProjectConfig`] / [`EntityConfig`] values. Augmented
//! entities are written back into their JSON documents with every unknown
//! key preserved.
//!
//! # Directory layout expected
//!
//! ```text
//! my-app/
//! ├── .yo-rc.json             ← packageName, jhiPrefix, audit settings
//! ├── .jhipster/
//! │   ├── Foo.json
//! │   └── Bar.json
//! └── src/main/java/...
//! ```
//!
//! # Field mapping
//!
//! | JSON key        | Field modifier        |
//! |-----------------|-----------------------|
//! | `autoGenerate`  | `auto_generated`      |
//! | `readonly`      | `read_only`           |
//! | `javaInherited` | `excluded_from_form`  |
//! | `nullable: false` | `non_nullable`      |

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use entity_audit_core::domain::{
    AuditSettings, DtoStrategy, EntityConfig, FieldModifiers, FieldSpec, ProjectConfig,
};

/// Project descriptor file name.
pub const YO_RC_FILE: &str = ".yo-rc.json";
/// Directory holding one JSON document per entity.
pub const ENTITIES_DIR: &str = ".jhipster";

const JHIPSTER_KEY: &str = "generator-jhipster";
const AUDIT_BLUEPRINT_KEY: &str = "generator-jhipster-entity-audit";

/// Errors raised while reading or updating project metadata.
#[derive(Debug, Error)]
pub enum EntityLoadError {
    #[error("Not a JHipster project: {} not found", path.display())]
    ProjectNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

// ── Document types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct YoRc {
    #[serde(rename = "generator-jhipster")]
    jhipster: JhipsterSection,
    #[serde(rename = "generator-jhipster-entity-audit", default)]
    audit: AuditSettings,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct JhipsterSection {
    package_name: Option<String>,
    jhi_prefix: Option<String>,
    base_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityJson {
    name: Option<String>,
    #[serde(default)]
    fields: Vec<FieldJson>,
    #[serde(default)]
    enable_audit: bool,
    persist_class: Option<String>,
    rest_class: Option<String>,
    entity_package: Option<String>,
    dto: Option<String>,
    #[serde(default)]
    built_in: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldJson {
    field_name: String,
    field_type: String,
    column_type: Option<String>,
    #[serde(default)]
    auto_generate: bool,
    #[serde(default)]
    readonly: bool,
    #[serde(default)]
    java_inherited: bool,
    nullable: Option<bool>,
}

impl From<FieldJson> for FieldSpec {
    fn from(f: FieldJson) -> Self {
        let field = FieldSpec::new(f.field_name, f.field_type).with_modifiers(FieldModifiers {
            auto_generated: f.auto_generate,
            read_only: f.readonly,
            excluded_from_form: f.java_inherited,
            non_nullable: f.nullable == Some(false),
        });
        match f.column_type {
            Some(column) => field.with_column_type(column),
            None => field,
        }
    }
}

/// JSON form of a field, as the host generator writes it.
fn field_to_json(field: &FieldSpec) -> Value {
    let mut obj = Map::new();
    obj.insert("fieldName".into(), json!(field.name));
    obj.insert("fieldType".into(), json!(field.field_type));
    if let Some(column) = &field.column_type {
        obj.insert("columnType".into(), json!(column));
    }
    let m = field.modifiers;
    if m.auto_generated {
        obj.insert("autoGenerate".into(), json!(true));
    }
    if m.read_only {
        obj.insert("readonly".into(), json!(true));
    }
    if m.excluded_from_form {
        obj.insert("javaInherited".into(), json!(true));
    }
    if m.non_nullable {
        obj.insert("nullable".into(), json!(false));
    }
    Value::Object(obj)
}

// ── Project ───────────────────────────────────────────────────────────────────

/// Project-level facts read from `.yo-rc.json`.
#[derive(Debug, Clone)]
pub struct JhipsterProject {
    pub root: PathBuf,
    pub package_name: Option<String>,
    pub jhi_prefix: Option<String>,
    pub base_name: Option<String>,
    /// Audit blueprint section; empty when the blueprint is not configured.
    pub audit: AuditSettings,
}

impl JhipsterProject {
    /// Build the domain project configuration.
    ///
    /// `package_override` wins over the descriptor's `packageName`.
    pub fn project_config(
        &self,
        package_override: Option<&str>,
    ) -> Result<ProjectConfig, EntityLoadError> {
        let package = package_override
            .map(str::to_string)
            .or_else(|| self.package_name.clone())
            .ok_or_else(|| EntityLoadError::Invalid {
                path: self.root.join(YO_RC_FILE),
                reason: "missing generator-jhipster.packageName".into(),
            })?;

        let mut project = ProjectConfig::new(&self.root, package);
        if let Some(prefix) = &self.jhi_prefix {
            project = project.with_jhi_prefix(prefix);
        }
        Ok(project)
    }
}

/// One `.jhipster/<Name>.json` document and the entity parsed from it.
#[derive(Debug, Clone)]
pub struct EntityDocument {
    pub path: PathBuf,
    raw: Value,
    pub entity: EntityConfig,
}

impl EntityDocument {
    /// Parse a document. The entity name defaults to the file stem.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, EntityLoadError> {
        let path = path.into();
        let raw: Value = serde_json::from_str(text).map_err(|source| EntityLoadError::Parse {
            path: path.clone(),
            source,
        })?;
        if !raw.is_object() {
            return Err(EntityLoadError::Invalid {
                path,
                reason: "entity definition must be a JSON object".into(),
            });
        }

        let parsed: EntityJson =
            serde_json::from_value(raw.clone()).map_err(|source| EntityLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        let name = match parsed.name {
            Some(name) => name,
            None => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| EntityLoadError::Invalid {
                    path: path.clone(),
                    reason: "cannot derive entity name".into(),
                })?,
        };

        let mut entity = EntityConfig::new(name)
            .with_fields(parsed.fields.into_iter().map(FieldSpec::from))
            .with_audit(parsed.enable_audit)
            .with_built_in(parsed.built_in);
        if let Some(class) = parsed.persist_class {
            entity = entity.with_persist_class(class);
        }
        if let Some(class) = parsed.rest_class {
            entity = entity.with_rest_class(class);
        }
        if let Some(package) = parsed.entity_package {
            entity = entity.with_entity_package(package);
        }
        if let Some(dto) = parsed.dto {
            entity = entity.with_dto(dto.parse().unwrap_or(DtoStrategy::No));
        }

        Ok(Self { path, raw, entity })
    }

    /// The document updated from `updated`, or `None` when nothing changed.
    ///
    /// Only the audit flag and fields missing from the document are touched.
    pub fn render_updated(&self, updated: &EntityConfig) -> Option<String> {
        let mut raw = self.raw.clone();
        let obj = raw.as_object_mut()?;
        let mut changed = false;

        if updated.is_audit_enabled() && obj.get("enableAudit") != Some(&Value::Bool(true)) {
            obj.insert("enableAudit".into(), Value::Bool(true));
            changed = true;
        }

        let fields = obj
            .entry("fields")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Some(fields) = fields.as_array_mut() {
            let present: Vec<String> = fields
                .iter()
                .filter_map(|f| f.get("fieldName").and_then(Value::as_str))
                .map(str::to_string)
                .collect();
            for field in updated.fields() {
                if !present.contains(&field.name) {
                    fields.push(field_to_json(field));
                    changed = true;
                }
            }
        }

        if !changed {
            return None;
        }
        serde_json::to_string_pretty(&raw).ok().map(|s| s + "\n")
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads project metadata from a project root directory.
pub struct ProjectLoader {
    root: PathBuf,
}

impl ProjectLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read `.yo-rc.json`.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_project(&self) -> Result<JhipsterProject, EntityLoadError> {
        let path = self.root.join(YO_RC_FILE);
        if !path.exists() {
            return Err(EntityLoadError::ProjectNotFound { path });
        }

        let text = read(&path)?;
        let yo_rc: YoRc = serde_json::from_str(&text).map_err(|source| EntityLoadError::Parse {
            path: path.clone(),
            source,
        })?;

        debug!(
            package = ?yo_rc.jhipster.package_name,
            framework = ?yo_rc.audit.audit_framework,
            "Loaded project descriptor"
        );

        Ok(JhipsterProject {
            root: self.root.clone(),
            package_name: yo_rc.jhipster.package_name,
            jhi_prefix: yo_rc.jhipster.jhi_prefix,
            base_name: yo_rc.jhipster.base_name,
            audit: yo_rc.audit,
        })
    }

    /// Read every `.jhipster/*.json`, sorted by file name.
    ///
    /// A project without the directory simply has no entities.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_entities(&self) -> Result<Vec<EntityDocument>, EntityLoadError> {
        let dir = self.root.join(ENTITIES_DIR);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No entity directory");
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| EntityLoadError::Io {
                path: dir.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let document = EntityDocument::parse(path, &read(path)?)?;
            debug!(entity = %document.entity.name(), "Loaded entity");
            documents.push(document);
        }

        debug!(count = documents.len(), "Finished loading entities");
        Ok(documents)
    }
}

fn read(path: &Path) -> Result<String, EntityLoadError> {
    fs::read_to_string(path).map_err(|source| EntityLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
