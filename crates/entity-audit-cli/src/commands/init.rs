//! `entity-audit init`: write a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default entity-audit configuration file.
pub fn execute(args: InitArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let config_path = target_path(&args, global);

    // Bail early if the file already exists and --force was not given.
    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let content = render_default()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, content)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

fn target_path(args: &InitArgs, global: &GlobalArgs) -> PathBuf {
    if args.local {
        return PathBuf::from(LOCAL_CONFIG_FILE);
    }
    global.config.clone().unwrap_or_else(AppConfig::config_path)
}

/// Default config as TOML, with a short header.
fn render_default() -> CliResult<String> {
    let body = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::Config {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    Ok(format!(
        "# entity-audit configuration, created {}\n\
         # audit.framework: no | javers | custom\n\
         # Environment overrides: ENTITY_AUDIT__<SECTION>__<KEY>\n\n{body}",
        chrono::Local::now().format("%Y-%m-%d"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn global(config: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config,
            output_format: OutputFormat::Plain,
            log_file: None,
        }
    }

    #[test]
    fn default_file_parses_back() {
        let text = render_default().unwrap();
        assert!(text.starts_with("# entity-audit configuration"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn local_flag_targets_working_directory() {
        let args = InitArgs {
            local: true,
            force: false,
        };
        assert_eq!(
            target_path(&args, &global(Some("/tmp/x.toml".into()))),
            PathBuf::from(LOCAL_CONFIG_FILE)
        );
    }

    #[test]
    fn explicit_config_path_is_used() {
        let args = InitArgs {
            local: false,
            force: false,
        };
        assert_eq!(
            target_path(&args, &global(Some("/tmp/x.toml".into()))),
            PathBuf::from("/tmp/x.toml")
        );
    }

    #[test]
    fn existing_file_is_kept_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "keep = true\n").unwrap();

        let g = global(Some(path.clone()));
        let output = OutputManager::new(&g, &AppConfig::default());
        execute(
            InitArgs {
                local: false,
                force: false,
            },
            &g,
            &output,
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep = true\n");
    }

    #[test]
    fn force_overwrites_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let g = global(Some(path.clone()));
        let output = OutputManager::new(&g, &AppConfig::default());
        execute(
            InitArgs {
                local: false,
                force: true,
            },
            &g,
            &output,
        )
        .unwrap();

        assert!(std::fs::read_to_string(&path).unwrap().contains("[audit]"));
    }
}
