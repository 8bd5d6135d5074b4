//! Integration tests for entity-audit-core.
//!
//! The pipeline runs against an in-memory filesystem; the renderer and the
//! strategy composer are mockall mocks so call order and counts can be checked.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use entity_audit_core::{
    application::ApplicationError,
    domain::{
        ArtifactKind, AuditSettings, AuditStrategy, DomainError, DtoStrategy, EntityConfig,
        FieldSpec, PatchOutcome, ProjectConfig, RenderContext, STANDARD_AUDIT_FIELD_NAMES,
        SharedEntityRegistry,
    },
    error::{AuditError, AuditResult},
    prelude::*,
};
use mockall::{Sequence, mock, predicate::eq};

mock! {
    pub Composer {}
    impl StrategyComposer for Composer {
        fn compose(&self, strategy: AuditStrategy) -> AuditResult<()>;
    }
}

mock! {
    pub Renderer {}
    impl ArtifactRenderer for Renderer {
        fn render(&self, kind: ArtifactKind, context: &RenderContext) -> AuditResult<String>;
    }
}

#[derive(Clone, Default)]
struct FakeFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    read_only: bool,
}

impl FakeFs {
    fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }
}

impl Filesystem for FakeFs {
    fn create_dir_all(&self, _path: &Path) -> AuditResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> AuditResult<()> {
        if self.read_only {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only filesystem".into(),
            }
            .into());
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> AuditResult<String> {
        self.read(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not found".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

const ROOT: &str = "/work/app";
const ARCH_TEST: &str = "/work/app/src/test/java/com/mycompany/myapp/TechnicalStructureTest.java";
const FOO: &str = "/work/app/src/main/java/com/mycompany/myapp/domain/Foo.java";
const FOO_DTO: &str = "/work/app/src/main/java/com/mycompany/myapp/service/dto/FooDTO.java";
const AUDIT_EVENT: &str = "/work/app/src/main/java/com/mycompany/myapp/domain/EntityAuditEvent.java";

const ARCH_SOURCE: &str = "\
import static com.tngtech.archunit.library.Architectures.layeredArchitecture;

class TechnicalStructureTest {
    static final ArchRule rule = layeredArchitecture()
        .ignoreDependency(belongToAnyOf(MyappApp.class), alwaysTrue());
}
";

const FOO_SOURCE: &str = "\
package com.mycompany.myapp.domain;

import java.io.Serializable;

public class Foo implements Serializable {
}
";

const FOO_DTO_SOURCE: &str = "\
package com.mycompany.myapp.service.dto;

import java.io.Serializable;

public class FooDTO implements Serializable {
}
";

fn project() -> ProjectConfig {
    ProjectConfig::new(ROOT, "com.mycompany.myapp")
}

fn seeded_fs() -> FakeFs {
    FakeFs::default()
        .with_file(ARCH_TEST, ARCH_SOURCE)
        .with_file(FOO, FOO_SOURCE)
        .with_file(FOO_DTO, FOO_DTO_SOURCE)
}

fn echo_renderer() -> MockRenderer {
    let mut renderer = MockRenderer::new();
    renderer
        .expect_render()
        .returning(|kind, ctx| Ok(format!("// {kind} for {}", ctx.package_name())));
    renderer
}

fn composer_expecting(strategy: AuditStrategy) -> MockComposer {
    let mut composer = MockComposer::new();
    composer
        .expect_compose()
        .with(eq(strategy))
        .times(1)
        .returning(|_| Ok(()));
    composer
}

fn idle_composer() -> MockComposer {
    let mut composer = MockComposer::new();
    composer.expect_compose().times(0);
    composer
}

fn pipeline(fs: &FakeFs, renderer: MockRenderer, composer: MockComposer) -> AuditPipeline {
    AuditPipeline::new(Box::new(fs.clone()), Box::new(renderer), Box::new(composer))
}

fn entities() -> Vec<EntityConfig> {
    vec![
        EntityConfig::new("Foo")
            .with_field(FieldSpec::new("title", "String"))
            .with_dto(DtoStrategy::Mapstruct),
        EntityConfig::new("Bar").with_field(FieldSpec::new("name", "String")),
    ]
}

#[test]
fn full_run_with_custom_strategy() {
    let fs = seeded_fs();
    let pipeline = pipeline(&fs, echo_renderer(), composer_expecting(AuditStrategy::CustomBacked));
    let settings = AuditSettings::new("custom").with_audited_entities(["Foo"]);
    let mut entities = entities();

    let report = pipeline.run(&project(), &settings, &mut entities).unwrap();

    assert_eq!(report.strategy, AuditStrategy::CustomBacked);
    assert_eq!(
        report.composed.as_deref(),
        Some("jhipster-entity-audit:spring-boot-custom-audit")
    );
    assert_eq!(report.artifacts.len(), 3);
    assert_eq!(
        fs.read(AUDIT_EVENT).as_deref(),
        Some("// audit-event for com.mycompany.myapp")
    );

    let foo = fs.read(FOO).unwrap();
    assert!(foo.contains("public class Foo extends AbstractAuditingEntity implements Serializable"));
    let dto = fs.read(FOO_DTO).unwrap();
    assert!(dto.contains("public class FooDTO extends AbstractAuditingDTO implements Serializable"));

    let arch = fs.read(ARCH_TEST).unwrap();
    assert!(arch.contains("import com.mycompany.myapp.audit.EntityAuditEventListener;"));
    assert!(arch.contains(".ignoreDependency(resideInAPackage(\"com.mycompany.myapp.audit\"), alwaysTrue())"));
}

#[test]
fn audited_entity_gains_fields_and_other_is_untouched() {
    let fs = seeded_fs();
    let pipeline = pipeline(&fs, echo_renderer(), composer_expecting(AuditStrategy::JaversBacked));
    let settings = AuditSettings::new("javers").with_audited_entities(["Foo"]);
    let mut entities = entities();
    let bar_before = entities[1].clone();

    let report = pipeline.run(&project(), &settings, &mut entities).unwrap();

    let foo_names: Vec<_> = entities[0].field_names().collect();
    assert_eq!(foo_names[1..], STANDARD_AUDIT_FIELD_NAMES);
    assert_eq!(entities[0].table_prefix(), Some("jhi"));
    assert_eq!(entities[1], bar_before);

    assert_eq!(report.entities[0].added_fields, STANDARD_AUDIT_FIELD_NAMES);
    assert!(!report.entities[1].audited);

    let registry = SharedEntityRegistry::new(&entities);
    assert_eq!(registry.fields("Foo"), Some(entities[0].fields()));
    assert_eq!(registry.field_names("Bar"), Some(vec!["name"]));
}

#[test]
fn no_strategy_skips_composition_but_still_emits_artifacts() {
    let fs = seeded_fs();
    let pipeline = pipeline(&fs, echo_renderer(), idle_composer());
    let mut entities = entities();

    let report = pipeline
        .run(&project(), &AuditSettings::new("no"), &mut entities)
        .unwrap();

    assert_eq!(report.strategy, AuditStrategy::NoAudit);
    assert_eq!(report.composed, None);
    assert!(fs.read(AUDIT_EVENT).is_some());
    assert_eq!(fs.read(FOO).as_deref(), Some(FOO_SOURCE));
}

#[test]
fn unknown_framework_composes_nothing() {
    let fs = seeded_fs();
    let pipeline = pipeline(&fs, echo_renderer(), idle_composer());
    let mut entities = entities();

    let report = pipeline
        .run(&project(), &AuditSettings::new("envers"), &mut entities)
        .unwrap();

    assert!(report.flags.any);
    assert_eq!(report.strategy, AuditStrategy::NoAudit);
    assert_eq!(report.composed, None);
}

#[test]
fn composition_happens_before_rendering() {
    let mut seq = Sequence::new();
    let mut composer = MockComposer::new();
    composer
        .expect_compose()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let mut renderer = MockRenderer::new();
    renderer
        .expect_render()
        .times(3)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(String::new()));

    let fs = seeded_fs();
    let pipeline = pipeline(&fs, renderer, composer);
    pipeline
        .run(&project(), &AuditSettings::new("javers"), &mut entities())
        .unwrap();
}

#[test]
fn second_run_changes_nothing() {
    let fs = seeded_fs();
    let settings = AuditSettings::new("custom").with_audited_entities(["Foo"]);
    let mut entities = entities();

    let first = pipeline(&fs, echo_renderer(), composer_expecting(AuditStrategy::CustomBacked));
    first.run(&project(), &settings, &mut entities).unwrap();
    let foo_after_first = fs.read(FOO).unwrap();
    let arch_after_first = fs.read(ARCH_TEST).unwrap();
    let fields_after_first = entities[0].fields().to_vec();

    let second = pipeline(&fs, echo_renderer(), composer_expecting(AuditStrategy::CustomBacked));
    let report = second.run(&project(), &settings, &mut entities).unwrap();

    assert_eq!(fs.read(FOO).unwrap(), foo_after_first);
    assert_eq!(fs.read(ARCH_TEST).unwrap(), arch_after_first);
    assert_eq!(entities[0].fields(), fields_after_first.as_slice());
    assert_eq!(report.added_field_count(), 0);
    assert_eq!(report.patch_count(PatchOutcome::Applied), 0);
    assert!(report.changed_files().is_empty());
}

#[test]
fn missing_files_are_skipped() {
    let fs = FakeFs::default();
    let pipeline = pipeline(&fs, echo_renderer(), idle_composer());
    let settings = AuditSettings::default().with_audited_entities(["Foo"]);

    let report = pipeline.run(&project(), &settings, &mut entities()).unwrap();

    assert!(report.patches.iter().all(|p| p.outcome == PatchOutcome::FileMissing));
    assert_eq!(report.patches.len(), 3);
}

#[test]
fn built_in_entities_are_not_patched() {
    let user_path = "/work/app/src/main/java/com/mycompany/myapp/domain/User.java";
    let fs = FakeFs::default().with_file(user_path, "public class User implements Serializable {}");
    let pipeline = pipeline(&fs, echo_renderer(), idle_composer());
    let mut entities = vec![EntityConfig::new("User").with_built_in(true).with_audit(true)];

    let report = pipeline
        .run(&project(), &AuditSettings::default(), &mut entities)
        .unwrap();

    assert_eq!(entities[0].fields().len(), 4);
    assert!(report.patches.iter().all(|p| p.entity.is_none()));
    assert_eq!(
        fs.read(user_path).as_deref(),
        Some("public class User implements Serializable {}")
    );
}

#[test]
fn render_failure_aborts_before_patching() {
    let mut renderer = MockRenderer::new();
    renderer.expect_render().returning(|kind, _| {
        Err(ApplicationError::RenderingFailed {
            artifact: kind.to_string(),
            reason: "template missing".into(),
        }
        .into())
    });

    let fs = seeded_fs();
    let pipeline = pipeline(&fs, renderer, idle_composer());
    let settings = AuditSettings::default().with_audited_entities(["Foo"]);

    let err = pipeline.run(&project(), &settings, &mut entities()).unwrap_err();

    assert!(matches!(
        err,
        AuditError::Application(ApplicationError::RenderingFailed { .. })
    ));
    assert_eq!(fs.read(FOO).as_deref(), Some(FOO_SOURCE));
}

#[test]
fn write_failure_names_the_file() {
    let fs = FakeFs {
        read_only: true,
        ..seeded_fs()
    };
    let pipeline = pipeline(&fs, echo_renderer(), idle_composer());

    let err = pipeline
        .run(&project(), &AuditSettings::default(), &mut entities())
        .unwrap_err();

    assert!(err.to_string().contains("EntityAuditAction.java"), "{err}");
}

#[test]
fn invalid_input_fails_before_composition() {
    let fs = seeded_fs();
    let pipeline = pipeline(&fs, echo_renderer(), idle_composer());
    let mut entities = vec![EntityConfig::new("Foo"), EntityConfig::new("Foo")];

    let err = pipeline
        .run(&project(), &AuditSettings::new("javers"), &mut entities)
        .unwrap_err();

    assert!(matches!(
        err,
        AuditError::Domain(DomainError::DuplicateEntity { .. })
    ));
}

#[test]
fn sub_package_entity_is_patched_in_its_folder() {
    let path = "/work/app/src/main/java/com/mycompany/myapp/billing/domain/Invoice.java";
    let source = "import java.io.Serializable;\n\npublic class Invoice implements Serializable {}\n";
    let fs = FakeFs::default().with_file(path, source);
    let pipeline = pipeline(&fs, echo_renderer(), idle_composer());
    let mut entities = vec![
        EntityConfig::new("Invoice")
            .with_entity_package("billing")
            .with_audit(true),
    ];

    pipeline
        .run(&project(), &AuditSettings::default(), &mut entities)
        .unwrap();

    assert_eq!(
        fs.read(path).unwrap(),
        "import java.io.Serializable;\nimport com.mycompany.myapp.domain.AbstractAuditingEntity;\n\npublic class Invoice extends AbstractAuditingEntity implements Serializable {}\n"
    );
}
