//! `entity-audit fields`: print entity fields after augmentation.
//!
//! Runs only the entity configuration stage and prints the shared registry
//! as JSON. No file is touched.

use std::collections::BTreeMap;

use tracing::instrument;

use entity_audit_core::{
    application::AuditPipeline,
    domain::{EntityConfig, FieldSpec, SharedEntityRegistry},
};

use crate::{
    cli::FieldsArgs, commands::load_project, config::AppConfig, error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.project.project_dir.display()))]
pub fn execute(args: FieldsArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let loaded = load_project(&args.project, config, false)?;
    let mut entities = loaded.entities();

    AuditPipeline::configure_entities(&loaded.project, &loaded.settings, &mut entities);

    let registry = SharedEntityRegistry::new(&entities);
    output.json(&projection(&registry, args.all), "entity fields")
}

/// Registry snapshot, limited to audited entities unless `all` is set.
fn projection(registry: &SharedEntityRegistry<'_>, all: bool) -> BTreeMap<String, Vec<FieldSpec>> {
    let mut snapshot = registry.snapshot();
    if !all {
        snapshot.retain(|name, _| registry.get(name).is_some_and(EntityConfig::is_audit_enabled));
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_audit_core::domain::{AuditSettings, ProjectConfig, STANDARD_AUDIT_FIELD_NAMES};

    fn configured() -> Vec<EntityConfig> {
        let project = ProjectConfig::new(".", "com.mycompany.myapp");
        let settings = AuditSettings::new("custom").with_audited_entities(["Book"]);
        let mut entities = vec![
            EntityConfig::new("Book").with_field(FieldSpec::new("title", "String")),
            EntityConfig::new("Author"),
        ];
        AuditPipeline::configure_entities(&project, &settings, &mut entities);
        entities
    }

    #[test]
    fn only_audited_entities_by_default() {
        let entities = configured();
        let registry = SharedEntityRegistry::new(&entities);

        let shown = projection(&registry, false);
        assert_eq!(shown.keys().collect::<Vec<_>>(), ["Book"]);

        let names: Vec<&str> = shown["Book"].iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names[0], "title");
        assert_eq!(&names[1..], STANDARD_AUDIT_FIELD_NAMES);
    }

    #[test]
    fn all_includes_untouched_entities() {
        let entities = configured();
        let registry = SharedEntityRegistry::new(&entities);

        let shown = projection(&registry, true);
        assert_eq!(shown.len(), 2);
        assert!(shown["Author"].is_empty());
    }
}
