//! Source Patcher - post-processes already-written sources.
//!
//! Each edit is a read-modify-write of one file through the filesystem port.
//! A file is only written back when its content changed.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ports::Filesystem, services::report::PatchRecord},
    domain::{
        DomainError, EntityConfig, InheritanceTarget, PatchOutcome, PatchedText, ProjectConfig,
        RelativePath, architecture_test_path, patch_architecture_test,
    },
    error::AuditResult,
};

/// How loudly a missing target file is reported.
#[derive(Debug, Clone, Copy)]
enum MissingFile {
    Debug,
    Warn,
}

/// Applies the architecture-test and inheritance patches.
pub struct SourcePatcher<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> SourcePatcher<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Let the architecture test tolerate the audit package.
    #[instrument(skip_all)]
    pub fn patch_architecture_test(&self, project: &ProjectConfig) -> AuditResult<Vec<PatchRecord>> {
        let path = architecture_test_path(project)?;
        let package = project.package_name();
        self.edit_file(project, &path, None, MissingFile::Debug, |content| {
            Ok(patch_architecture_test(content, package))
        })
    }

    /// Make an audited entity's persistence class (and MapStruct DTO) inherit
    /// the auditing base classes. Built-in and non-audited entities are skipped.
    #[instrument(skip_all, fields(entity = %entity.name()))]
    pub fn patch_entity(
        &self,
        entity: &EntityConfig,
        project: &ProjectConfig,
    ) -> AuditResult<Vec<PatchRecord>> {
        let mut records = Vec::new();
        for target in InheritanceTarget::for_entity(entity, project)? {
            let package = project.package_name();
            records.extend(self.edit_file(
                project,
                &target.path,
                Some(entity.name()),
                MissingFile::Warn,
                |content| target.apply(content, package),
            )?);
        }
        Ok(records)
    }

    fn edit_file<F>(
        &self,
        project: &ProjectConfig,
        path: &RelativePath,
        entity: Option<&str>,
        missing: MissingFile,
        edit: F,
    ) -> AuditResult<Vec<PatchRecord>>
    where
        F: FnOnce(&str) -> Result<PatchedText, DomainError>,
    {
        let absolute = project.resolve(path);
        let record = |step: String, outcome: PatchOutcome| PatchRecord {
            path: path.as_path().to_path_buf(),
            entity: entity.map(str::to_string),
            step,
            outcome,
        };

        if !self.filesystem.exists(&absolute) {
            match missing {
                MissingFile::Debug => debug!(path = %path, "File not found, skipping patch"),
                MissingFile::Warn => warn!(path = %path, "File not found, skipping patch"),
            }
            return Ok(vec![record("read".into(), PatchOutcome::FileMissing)]);
        }

        let original = self.filesystem.read_to_string(&absolute)?;
        let patched = edit(&original)?;

        for step in &patched.steps {
            if step.outcome == PatchOutcome::AnchorNotFound {
                debug!(path = %path, step = %step.label, "Anchor not found, step skipped");
            }
        }

        if patched.changed() && patched.content != original {
            self.filesystem.write_file(&absolute, &patched.content)?;
            info!(path = %path, "Patched");
        }

        Ok(patched
            .steps
            .into_iter()
            .map(|s| record(s.label, s.outcome))
            .collect())
    }
}
