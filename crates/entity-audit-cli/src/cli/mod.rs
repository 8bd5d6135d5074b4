//! Command-line surface. Parsing only; the handlers live in `commands`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// `entity-audit [GLOBAL FLAGS] <COMMAND>`
#[derive(Debug, Parser)]
#[command(
    name    = "entity-audit",
    bin_name = "entity-audit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Entity auditing for generated Spring projects",
    long_about = "entity-audit adds creation/modification auditing to the entities \
                  of an already generated JHipster project: it flags entities, appends \
                  the audit fields, emits the shared audit classes and patches the \
                  persistence classes to inherit the auditing base.",
    after_help = "EXAMPLES:\n\
        \x20 entity-audit apply --framework custom --entity Book --entity Author\n\
        \x20 entity-audit apply --dry-run --output-format json\n\
        \x20 entity-audit fields --entity Book\n\
        \x20 entity-audit completions bash > /usr/share/bash-completion/completions/entity-audit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full audit pipeline against a project.
    #[command(
        about = "Apply entity auditing to a project",
        after_help = "EXAMPLES:\n\
            \x20 entity-audit apply\n\
            \x20 entity-audit apply --framework javers --audit-page\n\
            \x20 entity-audit apply --entity Book --dry-run\n\
            \x20 entity-audit apply ../my-app --package com.example.app"
    )]
    Apply(ApplyArgs),

    /// Show the entity fields after augmentation.
    #[command(
        about = "Print audited entity fields as JSON",
        after_help = "EXAMPLES:\n\
            \x20 entity-audit fields\n\
            \x20 entity-audit fields --entity Book --entity Author"
    )]
    Fields(FieldsArgs),

    /// Initialise an entity-audit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 entity-audit init           # default location\n\
            \x20 entity-audit init --local   # .entity-audit.toml in CWD\n\
            \x20 entity-audit init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 entity-audit completions bash > ~/.local/share/bash-completion/completions/entity-audit\n\
            \x20 entity-audit completions zsh  > ~/.zfunc/_entity-audit\n\
            \x20 entity-audit completions fish > ~/.config/fish/completions/entity-audit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the entity-audit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 entity-audit config get audit.framework\n\
            \x20 entity-audit config list\n\
            \x20 entity-audit config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Arguments locating the project and the entities to audit.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// Root of the generated project (the directory holding `.yo-rc.json`).
    #[arg(
        value_name = "PROJECT_DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub project_dir: PathBuf,

    /// Audit this entity (repeatable).  Adds to the configured list.
    #[arg(
        short = 'e',
        long = "entity",
        value_name = "NAME",
        action = clap::ArgAction::Append,
        help = "Entity to audit (repeatable)"
    )]
    pub entities: Vec<String>,

    /// Audit framework, overriding config and `.yo-rc.json`.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        value_enum,
        help = "Audit framework"
    )]
    pub framework: Option<Framework>,

    /// Base Java package, overriding `.yo-rc.json`.
    #[arg(
        short = 'p',
        long = "package",
        value_name = "PACKAGE",
        help = "Base Java package"
    )]
    pub package: Option<String>,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `entity-audit apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Generate the audit browsing page.
    #[arg(long = "audit-page", help = "Enable the audit page")]
    pub audit_page: bool,

    /// Run everything in memory and report what would change.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,
}

// ── fields ────────────────────────────────────────────────────────────────────

/// Arguments for `entity-audit fields`.
#[derive(Debug, Args)]
pub struct FieldsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Include entities that are not audited.
    #[arg(long = "all", help = "Include non-audited entities")]
    pub all: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `entity-audit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.entity-audit.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `entity-audit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `entity-audit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `audit.framework`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Audit frameworks accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Framework {
    /// No auditing; fields are still added to flagged entities.
    #[value(alias = "none")]
    No,
    Javers,
    Custom,
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::No => write!(f, "no"),
            Self::Javers => write!(f, "javers"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
