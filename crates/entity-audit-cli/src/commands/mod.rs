//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on the core pipeline
//! and the adapters. No decoration logic lives here.

pub mod apply;
pub mod completions;
pub mod config;
pub mod fields;
pub mod init;

use tracing::debug;

use entity_audit_adapters::{EntityDocument, JhipsterProject, ProjectLoader};
use entity_audit_core::{
    domain::{AuditSettings, EntityConfig, ProjectConfig},
    error::AuditError,
};

use crate::{cli::ProjectArgs, config::AppConfig, error::CliResult};

/// Everything a command needs from the project directory.
pub struct LoadedProject {
    pub project: ProjectConfig,
    pub settings: AuditSettings,
    pub documents: Vec<EntityDocument>,
}

impl LoadedProject {
    /// Fresh copies of the entity definitions, in file-name order.
    pub fn entities(&self) -> Vec<EntityConfig> {
        self.documents.iter().map(|d| d.entity.clone()).collect()
    }
}

/// Read `.yo-rc.json` and `.jhipster/*.json`, then merge the audit settings.
pub fn load_project(
    args: &ProjectArgs,
    config: &AppConfig,
    audit_page: bool,
) -> CliResult<LoadedProject> {
    let loader = ProjectLoader::new(&args.project_dir);
    let descriptor = loader.load_project()?;
    let documents = loader.load_entities()?;

    let project = project_config(&descriptor, args, config)?;
    let settings = merge_settings(&descriptor.audit, config, args, audit_page);

    debug!(
        package = %project.package_name(),
        framework = ?settings.audit_framework,
        audited = settings.audited_entities.len(),
        entities = documents.len(),
        "Project loaded"
    );

    Ok(LoadedProject {
        project,
        settings,
        documents,
    })
}

fn project_config(
    descriptor: &JhipsterProject,
    args: &ProjectArgs,
    config: &AppConfig,
) -> CliResult<ProjectConfig> {
    let package = args
        .package
        .as_deref()
        .or(config.project.package_name.as_deref());
    let mut project = descriptor.project_config(package)?;

    if let Some(prefix) = &config.project.jhi_prefix {
        project = project.with_jhi_prefix(prefix);
    }
    if let Some(main) = &config.project.main_source_root {
        project = project.with_main_source_root(main).map_err(AuditError::from)?;
    }
    if let Some(test) = &config.project.test_source_root {
        project = project.with_test_source_root(test).map_err(AuditError::from)?;
    }
    Ok(project)
}

/// Command line beats config, config beats `.yo-rc.json`. Audited entity
/// lists are unioned in that order without duplicates.
pub fn merge_settings(
    descriptor: &AuditSettings,
    config: &AppConfig,
    args: &ProjectArgs,
    audit_page: bool,
) -> AuditSettings {
    let framework = args
        .framework
        .map(|f| f.to_string())
        .or_else(|| config.audit.framework.clone())
        .or_else(|| descriptor.audit_framework.clone());

    let mut audited: Vec<String> = Vec::new();
    for name in descriptor
        .audited_entities
        .iter()
        .chain(&config.audit.audited_entities)
        .chain(&args.entities)
    {
        if !audited.contains(name) {
            audited.push(name.clone());
        }
    }

    AuditSettings {
        audit_framework: framework,
        audit_page: audit_page || config.audit.audit_page || descriptor.audit_page,
        audited_entities: audited,
    }
}
