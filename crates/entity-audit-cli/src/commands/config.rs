//! `entity-audit config`: inspect configuration values.

use crate::{
    cli::{ConfigCommands, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                return output.json(config, "configuration");
            }
            let serialised = toml::to_string_pretty(config).map_err(|e| CliError::Config {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_path(global.config.as_deref());
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let display_path = |p: &Option<std::path::PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    };

    match key {
        "audit.framework" => Ok(config.audit.framework.clone().unwrap_or_default()),
        "audit.audit_page" => Ok(config.audit.audit_page.to_string()),
        "audit.audited_entities" => Ok(config.audit.audited_entities.join(",")),
        "project.package_name" => Ok(config.project.package_name.clone().unwrap_or_default()),
        "project.jhi_prefix" => Ok(config.project.jhi_prefix.clone().unwrap_or_default()),
        "project.main_source_root" => Ok(display_path(&config.project.main_source_root)),
        "project.test_source_root" => Ok(display_path(&config.project.test_source_root)),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::Config {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
