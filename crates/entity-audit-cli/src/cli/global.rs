//! Flags shared by every subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so `entity-audit apply
//! -vv` and `entity-audit -vv apply` are equivalent.

use clap::Args;
use std::path::PathBuf;

/// Logging, output and config-file flags.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` pipeline stages, `-vv` skipped anchors and missing
    /// files, `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain, uncoloured text. Also set by `NO_COLOR`.
    #[arg(long = "no-color", global = true, env = "NO_COLOR", help = "Disable colours")]
    pub no_color: bool,

    /// Read configuration from this TOML file instead of the default
    /// locations.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "ENTITY_AUDIT_CONFIG",
        help = "Use this config file"
    )]
    pub config: Option<PathBuf>,

    /// `json` turns reports and logs into machine-readable documents.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Report format"
    )]
    pub output_format: OutputFormat,

    /// Append uncoloured logs to this file as well.
    #[arg(long = "log-file", global = true, value_name = "FILE", help = "Also log to a file")]
    pub log_file: Option<PathBuf>,
}

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise.
    #[default]
    Auto,
    /// Coloured, with status symbols.
    Human,
    /// Status symbols without colour.
    Plain,
    /// One pretty-printed JSON document on stdout.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value; anything unknown is `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "human" => Self::Human,
            "plain" => Self::Plain,
            "json" => Self::Json,
            _ => Self::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_values_are_case_insensitive() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config(" plain "), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_config("yaml"), OutputFormat::Auto);
    }
}
