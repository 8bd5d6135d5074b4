//! Audit Pipeline - main application orchestrator.
//!
//! Runs the four decoration stages in order:
//! 1. Select the strategy and compose its collaborator
//! 2. Configure and prepare every entity
//! 3. Emit the shared artifacts
//! 4. Patch the already-written sources
//!
//! Any failure aborts the remaining stages. Files written before the
//! failure are kept.

use std::path::PathBuf;
use tracing::{info, instrument};

use crate::{
    application::{
        ports::{ArtifactRenderer, Filesystem, StrategyComposer},
        services::{
            patch_service::SourcePatcher,
            report::{EntityReport, GenerationReport, PatchRecord},
        },
    },
    domain::{
        ArtifactKind, ArtifactSet, AuditFlags, AuditSettings, DomainValidator as validator,
        EntityConfig, FieldAugmenter, GeneratedArtifact, ProjectConfig, RenderContext,
        prepare_entity,
    },
    error::AuditResult,
};

/// The entity-audit decoration pipeline.
pub struct AuditPipeline {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn ArtifactRenderer>,
    composer: Box<dyn StrategyComposer>,
}

impl AuditPipeline {
    /// Create a pipeline with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use entity_audit_core::application::{AuditPipeline, ports::*};
    ///
    /// let pipeline = AuditPipeline::new(
    ///     filesystem, // impl Filesystem
    ///     renderer,   // impl ArtifactRenderer
    ///     composer,   // impl StrategyComposer
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn ArtifactRenderer>,
        composer: Box<dyn StrategyComposer>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            composer,
        }
    }

    /// Run all stages against one project.
    ///
    /// `entities` is mutated in place: audited entities gain the flag, the
    /// missing audit fields and their table prefix.
    #[instrument(
        skip_all,
        fields(
            project = %project.root().display(),
            package = %project.package_name(),
            entities = entities.len()
        )
    )]
    pub fn run(
        &self,
        project: &ProjectConfig,
        settings: &AuditSettings,
        entities: &mut [EntityConfig],
    ) -> AuditResult<GenerationReport> {
        validator::validate_project(project)?;
        validator::validate_entities(entities)?;

        // 1. Strategy
        let flags = AuditFlags::select(settings);
        let mut report = GenerationReport::new(flags);
        report.composed = self.compose(&flags)?;

        // 2. Entities
        report.entities = Self::configure_entities(project, settings, entities);

        // 3. Artifacts
        report.artifacts = self.emit_artifacts(project, &flags)?;

        // 4. Sources
        report.patches = self.patch_sources(project, entities)?;

        info!(
            audited = report.audited_entities().count(),
            added_fields = report.added_field_count(),
            changed_files = report.changed_files().len(),
            "Audit pipeline completed"
        );
        Ok(report)
    }

    /// Compose the sibling generator of the selected strategy, if any.
    #[instrument(skip_all, fields(strategy = %flags.strategy()))]
    pub fn compose(&self, flags: &AuditFlags) -> AuditResult<Option<String>> {
        let strategy = flags.strategy();
        let Some(namespace) = strategy.generator_namespace() else {
            info!("No audit strategy selected");
            return Ok(None);
        };

        self.composer.compose(strategy)?;
        info!(namespace, "Composed audit strategy");
        Ok(Some(namespace.to_string()))
    }

    /// Decide auditing, append the missing audit fields and prepare table
    /// naming for every entity. Needs no adapters.
    #[instrument(skip_all)]
    pub fn configure_entities(
        project: &ProjectConfig,
        settings: &AuditSettings,
        entities: &mut [EntityConfig],
    ) -> Vec<EntityReport> {
        let augmenter = FieldAugmenter::new(settings.audited_entities.iter().map(String::as_str));

        entities
            .iter_mut()
            .map(|entity| {
                let added = augmenter.configure(entity);
                prepare_entity(entity, project);
                if entity.is_audit_enabled() {
                    info!(entity = %entity.name(), added = added.len(), "Entity audited");
                }
                EntityReport {
                    name: entity.name().to_string(),
                    audited: entity.is_audit_enabled(),
                    added_fields: added.into_iter().map(|f| f.name).collect(),
                    table_prefix: entity.table_prefix().map(str::to_string),
                }
            })
            .collect()
    }

    /// Render and write the three shared artifacts. Runs unconditionally.
    #[instrument(skip_all)]
    pub fn emit_artifacts(
        &self,
        project: &ProjectConfig,
        flags: &AuditFlags,
    ) -> AuditResult<Vec<PathBuf>> {
        let context = RenderContext::new(project, flags);

        let mut set = ArtifactSet::new(project.root());
        for kind in ArtifactKind::ALL {
            let content = self.renderer.render(kind, &context)?;
            set.add(GeneratedArtifact {
                kind,
                path: kind.path_in(project)?,
                content,
            });
        }
        validator::validate_artifacts(&set)?;

        let mut written = Vec::with_capacity(set.len());
        for artifact in set.iter() {
            let path = project.resolve(&artifact.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &artifact.content)?;
            info!(artifact = %artifact.kind, path = %artifact.path, "Artifact written");
            written.push(artifact.path.as_path().to_path_buf());
        }
        Ok(written)
    }

    /// Patch the architecture test, then every audited entity's sources.
    #[instrument(skip_all)]
    pub fn patch_sources(
        &self,
        project: &ProjectConfig,
        entities: &[EntityConfig],
    ) -> AuditResult<Vec<PatchRecord>> {
        let patcher = SourcePatcher::new(self.filesystem.as_ref());

        let mut records = patcher.patch_architecture_test(project)?;
        for entity in entities {
            records.extend(patcher.patch_entity(entity, project)?);
        }
        Ok(records)
    }
}
