use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A path inside the project tree, relative to the project root.
///
/// Never absolute and never climbs out of the root with `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Build from trusted segments such as the source-root constants.
    ///
    /// Only normal components are kept, so a stray leading `/` or `..` is
    /// dropped instead of escaping the project.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(
            path.as_ref()
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part),
                    _ => None,
                })
                .collect(),
        )
    }

    /// Strict constructor for user-supplied paths.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check(&path)?;
        Ok(Self(path))
    }

    /// Append a relative segment.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        check(segment)?;
        Ok(Self(self.0.join(segment)))
    }

    /// Append a dotted Java package as nested folders.
    pub fn join_package(&self, package: &str) -> Result<Self, DomainError> {
        let folder: PathBuf = package.split('.').filter(|s| !s.is_empty()).collect();
        self.join(folder)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn check(path: &Path) -> Result<(), DomainError> {
    let escapes = path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
