//! Run report returned by the pipeline.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{AuditFlags, AuditStrategy, PatchOutcome};

/// What one pipeline run did, in stage order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub flags: AuditFlags,
    pub strategy: AuditStrategy,
    /// Namespace of the composed sibling generator, if any.
    pub composed: Option<String>,
    pub entities: Vec<EntityReport>,
    /// Artifact paths relative to the project root.
    pub artifacts: Vec<PathBuf>,
    pub patches: Vec<PatchRecord>,
}

/// Augmentation result for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReport {
    pub name: String,
    pub audited: bool,
    pub added_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_prefix: Option<String>,
}

/// Outcome of one patch step on one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchRecord {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    pub step: String,
    pub outcome: PatchOutcome,
}

impl GenerationReport {
    pub fn new(flags: AuditFlags) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            flags,
            strategy: flags.strategy(),
            composed: None,
            entities: Vec::new(),
            artifacts: Vec::new(),
            patches: Vec::new(),
        }
    }

    pub fn audited_entities(&self) -> impl Iterator<Item = &EntityReport> {
        self.entities.iter().filter(|e| e.audited)
    }

    pub fn added_field_count(&self) -> usize {
        self.entities.iter().map(|e| e.added_fields.len()).sum()
    }

    pub fn patch_count(&self, outcome: PatchOutcome) -> usize {
        self.patches.iter().filter(|p| p.outcome == outcome).count()
    }

    /// Distinct files whose content changed.
    pub fn changed_files(&self) -> Vec<&PathBuf> {
        let mut files: Vec<&PathBuf> = self
            .patches
            .iter()
            .filter(|p| p.outcome.is_change())
            .map(|p| &p.path)
            .collect();
        files.dedup();
        files
    }
}
