//! Errors surfaced to the user, with hints and a process exit code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use entity_audit_adapters::EntityLoadError;
use entity_audit_core::error::AuditError;

pub use entity_audit_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

/// Every way a command can fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Flags that parse but make no sense together.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The directory has no `.yo-rc.json`.
    #[error("Not a JHipster project: {} not found", path.display())]
    ProjectNotFound { path: PathBuf },

    /// `.yo-rc.json` or an entity document could not be used.
    #[error("Unreadable project metadata: {0}")]
    Metadata(#[source] EntityLoadError),

    /// Unreadable, invalid or unwritable configuration, or an unknown key.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("Audit failed: {0}")]
    Core(#[from] AuditError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A report or document could not be serialised.
    #[error("Failed to serialise {what}")]
    Serialization {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            context: source.to_string(),
            source,
        }
    }
}

impl From<EntityLoadError> for CliError {
    fn from(err: EntityLoadError) -> Self {
        match err {
            EntityLoadError::ProjectNotFound { path } => CliError::ProjectNotFound { path },
            other => CliError::Metadata(other),
        }
    }
}

impl CliError {
    /// Hints printed under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["See entity-audit help <COMMAND>".into()],

            Self::ProjectNotFound { path } => {
                let root = path.parent().unwrap_or(path);
                vec![
                    format!("No .yo-rc.json in '{}'", root.display()),
                    "Run entity-audit from the root of a generated project".into(),
                    "Or pass the project directory: entity-audit apply ../my-app".into(),
                ]
            }

            Self::Metadata(err) => match err {
                EntityLoadError::Parse { path, .. } => vec![
                    format!("'{}' is not valid JSON", path.display()),
                    "Fix or regenerate the file, then re-run".into(),
                ],
                EntityLoadError::Invalid { .. } => vec![
                    "Set generator-jhipster.packageName in .yo-rc.json".into(),
                    "Or pass it explicitly: --package com.example.app".into(),
                ],
                _ => vec!["Check file permissions".into()],
            },

            Self::Config { .. } => vec![
                "Show the active file: entity-audit config path".into(),
                "Create a default config: entity-audit init".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    vec!["Check write permissions on the project directory".into()]
                }
                _ => vec!["Check the path and available disk space".into()],
            },

            Self::Serialization { .. } => vec![
                "This appears to be a bug in entity-audit".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Classification behind [`Self::exit_code`].
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
            Self::Metadata(EntityLoadError::Io { .. }) => ErrorCategory::Internal,
            Self::Metadata(_) => ErrorCategory::UserError,
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Io { .. } => ErrorCategory::Internal,
            Self::Serialization { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit status; see the table in `main.rs`.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Message, optional cause chain and suggestions, ready for stderr.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("\u{2717} Error:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.red().to_string()),
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!(
                    "  {}\n",
                    paint(&format!("caused by: {err}"), |t| t.dimmed().to_string())
                ));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Suggestions:", |t| t.yellow().bold().to_string())
            ));
            for suggestion in suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.", |t| t.dimmed().to_string())
            ));
        }
        out
    }

    /// Record the failure; user mistakes at warn, the rest at error.
    pub fn log(&self) {
        let category = self.category();
        let exit_code = self.exit_code();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, exit_code, "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, exit_code, "{self}")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

/// Drives the exit code and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flags, bad metadata, invalid package names.
    UserError,
    /// No `.yo-rc.json` where one was expected.
    NotFound,
    Configuration,
    /// I/O and anything that looks like a bug.
    Internal,
}

/// Attach a "what were we doing" message to an I/O failure.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::Io {
            context: f().into(),
            source,
        })
    }
}
