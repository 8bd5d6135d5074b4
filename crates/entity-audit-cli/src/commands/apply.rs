//! Implementation of the `entity-audit apply` command.
//!
//! Responsibility: load the project, run the core pipeline with the chosen
//! filesystem, write the augmented entity documents back and display the
//! report.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use entity_audit_adapters::{
    JavaArtifactRenderer, LocalFilesystem, MemoryFilesystem, RecordingComposer,
};
use entity_audit_core::{
    application::{AuditPipeline, GenerationReport, ports::Filesystem},
    domain::{EntityConfig, PatchOutcome},
};

use crate::{
    cli::{ApplyArgs, OutputFormat},
    commands::{LoadedProject, load_project},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Where the run's writes go.
enum Sink {
    Disk(LocalFilesystem),
    DryRun(MemoryFilesystem),
}

impl Sink {
    fn new(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun(MemoryFilesystem::overlay(LocalFilesystem::new()))
        } else {
            Self::Disk(LocalFilesystem::new())
        }
    }

    fn boxed(&self) -> Box<dyn Filesystem> {
        match self {
            Self::Disk(fs) => Box::new(*fs),
            Self::DryRun(fs) => Box::new(fs.clone()),
        }
    }

    fn port(&self) -> &dyn Filesystem {
        match self {
            Self::Disk(fs) => fs,
            Self::DryRun(fs) => fs,
        }
    }
}

/// JSON shape of an `apply` run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplySummary<'a> {
    dry_run: bool,
    #[serde(flatten)]
    report: &'a GenerationReport,
    updated_entity_files: &'a [PathBuf],
}

/// Execute the `entity-audit apply` command.
///
/// 1. Load `.yo-rc.json` and the entity documents
/// 2. Run the pipeline against disk or an in-memory overlay
/// 3. Write back entity documents that gained the flag or fields
/// 4. Print the report
#[instrument(skip_all, fields(project = %args.project.project_dir.display(), dry_run = args.dry_run))]
pub fn execute(args: ApplyArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let loaded = load_project(&args.project, config, args.audit_page)?;
    let mut entities = loaded.entities();

    let sink = Sink::new(args.dry_run);
    let pipeline = AuditPipeline::new(
        sink.boxed(),
        Box::new(JavaArtifactRenderer::new()),
        Box::new(RecordingComposer::new()),
    );

    let report = pipeline.run(&loaded.project, &loaded.settings, &mut entities)?;
    let updated = write_back(&loaded, &entities, sink.port())?;

    info!(
        run_id = %report.run_id,
        updated_entities = updated.len(),
        "Apply finished"
    );

    if output.format() == OutputFormat::Json {
        return output.json(
            &ApplySummary {
                dry_run: args.dry_run,
                report: &report,
                updated_entity_files: &updated,
            },
            "apply report",
        );
    }

    show_report(&report, &updated, loaded.project.root(), output)?;
    if let Sink::DryRun(memory) = &sink {
        show_dry_run(memory, loaded.project.root(), output)?;
    }
    Ok(())
}

/// Persist entity documents whose audit flag or fields changed.
fn write_back(
    loaded: &LoadedProject,
    entities: &[EntityConfig],
    filesystem: &dyn Filesystem,
) -> CliResult<Vec<PathBuf>> {
    let mut updated = Vec::new();
    for (document, entity) in loaded.documents.iter().zip(entities) {
        let Some(text) = document.render_updated(entity) else {
            continue;
        };
        filesystem.write_file(&document.path, &text)?;
        debug!(path = %document.path.display(), "Entity document updated");
        updated.push(relative_to(loaded.project.root(), &document.path));
    }
    Ok(updated)
}

fn show_report(
    report: &GenerationReport,
    updated: &[PathBuf],
    root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!("Entity audit ({})", report.strategy))?;
    if let Some(namespace) = &report.composed {
        output.info(&format!("Composed {namespace}"))?;
    }

    for entity in report.audited_entities() {
        if entity.added_fields.is_empty() {
            output.print(&format!("  {}: audit fields already present", entity.name))?;
        } else {
            output.success(&format!(
                "{}: added {}",
                entity.name,
                entity.added_fields.join(", ")
            ))?;
        }
    }

    for path in &report.artifacts {
        output.print(&format!("  wrote {}", path.display()))?;
    }
    for path in updated {
        output.print(&format!("  updated {}", path.display()))?;
    }
    for path in report.changed_files() {
        output.print(&format!("  patched {}", path.display()))?;
    }

    for record in &report.patches {
        if record.outcome == PatchOutcome::Conflicting {
            output.warning(&format!(
                "{} already extends another class; left unchanged",
                record.path.display()
            ))?;
        }
        if record.outcome == PatchOutcome::FileMissing && record.entity.is_some() {
            output.warning(&format!("{} not found; skipped", record.path.display()))?;
        }
    }

    output.success(&format!(
        "{} audited entities, {} fields added, {} files patched under {}",
        report.audited_entities().count(),
        report.added_field_count(),
        report.changed_files().len(),
        root.display()
    ))?;
    Ok(())
}

fn show_dry_run(memory: &MemoryFilesystem, root: &Path, output: &OutputManager) -> CliResult<()> {
    let files = memory.list_files();
    output.info(&format!("Dry run: {} files would be written", files.len()))?;
    for path in files {
        output.print(&format!("  {}", relative_to(root, &path).display()))?;
    }
    Ok(())
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
