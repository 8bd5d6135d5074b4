use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{common::RelativePath, project::ProjectConfig},
    error::DomainError,
};

/// The shared source units written on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// `domain/enumeration/EntityAuditAction.java`
    AuditAction,
    /// `domain/EntityAuditEvent.java`
    AuditEvent,
    /// `service/dto/AbstractAuditingDTO.java`
    AuditingDto,
}

impl ArtifactKind {
    pub const ALL: [Self; 3] = [Self::AuditAction, Self::AuditEvent, Self::AuditingDto];

    /// Path relative to the package folder.
    pub const fn package_relative_path(&self) -> &'static str {
        match self {
            Self::AuditAction => "domain/enumeration/EntityAuditAction.java",
            Self::AuditEvent => "domain/EntityAuditEvent.java",
            Self::AuditingDto => "service/dto/AbstractAuditingDTO.java",
        }
    }

    /// Path relative to the project root.
    pub fn path_in(&self, project: &ProjectConfig) -> Result<RelativePath, DomainError> {
        project
            .absolute_package_folder()
            .join(self.package_relative_path())
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuditAction => "audit-action",
            Self::AuditEvent => "audit-event",
            Self::AuditingDto => "auditing-dto",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered source unit ready to be written.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: RelativePath,
    pub content: String,
}

impl GeneratedArtifact {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// The artifacts produced by one emitter run, rooted at the project root.
///
/// Contains no business logic, only data.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub(crate) root: PathBuf,
    pub(crate) artifacts: Vec<GeneratedArtifact>,
}

impl ArtifactSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            artifacts: Vec::new(),
        }
    }

    pub fn add(&mut self, artifact: GeneratedArtifact) {
        self.artifacts.push(artifact);
    }

    pub fn with_artifact(mut self, artifact: GeneratedArtifact) -> Self {
        self.add(artifact);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for artifact in &self.artifacts {
            if !seen.insert(artifact.path.as_path()) {
                return Err(DomainError::DuplicateArtifact {
                    path: artifact.path.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn artifact_paths_live_under_package_folder() {
        let project = ProjectConfig::new(".", "com.mycompany.myapp");
        let paths: Vec<_> = ArtifactKind::ALL
            .iter()
            .map(|k| k.path_in(&project).unwrap().into_path_buf())
            .collect();

        assert_eq!(
            paths,
            [
                Path::new("src/main/java/com/mycompany/myapp/domain/enumeration/EntityAuditAction.java"),
                Path::new("src/main/java/com/mycompany/myapp/domain/EntityAuditEvent.java"),
                Path::new("src/main/java/com/mycompany/myapp/service/dto/AbstractAuditingDTO.java"),
            ]
        );
    }

    #[test]
    fn set_rejects_duplicate_paths() {
        let artifact = GeneratedArtifact {
            kind: ArtifactKind::AuditEvent,
            path: RelativePath::new("a/B.java"),
            content: String::new(),
        };
        let set = ArtifactSet::new("/out")
            .with_artifact(artifact.clone())
            .with_artifact(artifact);
        assert!(set.validate().is_err());
    }
}
