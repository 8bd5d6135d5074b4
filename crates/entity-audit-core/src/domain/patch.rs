//! Pattern-anchored text patching of generated Java sources.
//!
//! A [`TextPatch`] wraps the content of one file and applies ordered edits
//! to it. Every edit reports a [`PatchOutcome`]; a missing anchor is never
//! an error. Edits are idempotent: text that is already present is not
//! inserted again, and a class that already extends something is left as is.

use std::fmt;
use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{common::RelativePath, entity::EntityConfig, project::ProjectConfig},
    error::DomainError,
};

/// Anchor line for the extra static imports of the architecture test.
pub const ARCHUNIT_IMPORT_ANCHOR: &str =
    "import static com.tngtech.archunit.library.Architectures.layeredArchitecture;";
/// Anchor for the extra dependency exclusions of the architecture test.
pub const IGNORE_DEPENDENCY_ANCHOR: &str = ".ignoreDependency";
/// Anchor line for the base-class import of entities in a sub-package.
pub const SERIALIZABLE_IMPORT_ANCHOR: &str = "import java.io.Serializable;";
/// File name of the architecture test under the test package folder.
pub const ARCHITECTURE_TEST_FILE: &str = "TechnicalStructureTest.java";

/// Continuation indent of chained `.ignoreDependency` calls.
const CLAUSE_INDENT: &str = "\n        ";

/// Result of one edit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchOutcome {
    /// The text was changed.
    Applied,
    /// Everything the step would insert is already there.
    AlreadyApplied,
    /// The anchor does not occur; the step was skipped.
    AnchorNotFound,
    /// The class already extends a different base; left untouched.
    Conflicting,
    /// The target file does not exist; the step was skipped.
    FileMissing,
}

impl PatchOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::AlreadyApplied => "already-applied",
            Self::AnchorNotFound => "anchor-not-found",
            Self::Conflicting => "conflicting",
            Self::FileMissing => "file-missing",
        }
    }

    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labelled edit and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchStep {
    pub label: String,
    pub outcome: PatchOutcome,
}

/// Patched content plus the per-step outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedText {
    pub content: String,
    pub steps: Vec<PatchStep>,
}

impl PatchedText {
    /// Whether any step changed the content.
    pub fn changed(&self) -> bool {
        self.steps.iter().any(|s| s.outcome.is_change())
    }
}

/// Ordered in-memory edits over one file's content.
#[derive(Debug, Clone)]
pub struct TextPatch {
    content: String,
    steps: Vec<PatchStep>,
}

impl TextPatch {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            steps: Vec::new(),
        }
    }

    /// Insert `lines` right after the first line containing `anchor`.
    ///
    /// Lines already present anywhere in the file are left out.
    pub fn insert_lines_after(
        &mut self,
        label: impl Into<String>,
        anchor: &str,
        lines: &[String],
    ) -> PatchOutcome {
        let outcome = match end_of_first_line_containing(&self.content, anchor) {
            None => PatchOutcome::AnchorNotFound,
            Some(pos) => {
                let missing: Vec<&String> = lines
                    .iter()
                    .filter(|line| !contains_line(&self.content, line))
                    .collect();

                if missing.is_empty() {
                    PatchOutcome::AlreadyApplied
                } else {
                    let mut block = String::new();
                    if !self.content[..pos].ends_with('\n') {
                        block.push('\n');
                    }
                    for line in missing {
                        block.push_str(line);
                        block.push('\n');
                    }
                    self.content.insert_str(pos, &block);
                    PatchOutcome::Applied
                }
            }
        };
        self.record(label, outcome)
    }

    /// Insert `clauses` in front of the first occurrence of `anchor`, each
    /// followed by a continuation line break.
    pub fn insert_clauses_before(
        &mut self,
        label: impl Into<String>,
        anchor: &str,
        clauses: &[String],
    ) -> PatchOutcome {
        let outcome = match self.content.find(anchor) {
            None => PatchOutcome::AnchorNotFound,
            Some(pos) => {
                let missing: Vec<&String> = clauses
                    .iter()
                    .filter(|clause| !self.content.contains(clause.as_str()))
                    .collect();

                if missing.is_empty() {
                    PatchOutcome::AlreadyApplied
                } else {
                    let block: String = missing
                        .iter()
                        .map(|clause| format!("{clause}{CLAUSE_INDENT}"))
                        .collect();
                    self.content.insert_str(pos, &block);
                    PatchOutcome::Applied
                }
            }
        };
        self.record(label, outcome)
    }

    /// Make the declaration of `class_name` extend `base`.
    ///
    /// Only a real declaration matches (`public [abstract|final] class Name`
    /// followed by a word boundary); `FooBar` never matches `Foo`. Matches on
    /// comment lines (`//`, `/*`, `*`) are skipped.
    pub fn extend_class(
        &mut self,
        label: impl Into<String>,
        class_name: &str,
        base: &str,
    ) -> Result<PatchOutcome, DomainError> {
        let pattern = format!(
            r"\bpublic\s+(?:(?:abstract|final)\s+)*class\s+{}\b",
            regex::escape(class_name)
        );
        let declaration = Regex::new(&pattern).map_err(|e| DomainError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        let found = declaration
            .find_iter(&self.content)
            .find(|m| !on_comment_line(&self.content, m.start()));
        let outcome = match found {
            None => PatchOutcome::AnchorNotFound,
            Some(m) => {
                let insert_at = m.end() + generic_params_len(&self.content[m.end()..]);
                let header_end = self.content[insert_at..]
                    .find('{')
                    .map_or(self.content.len(), |i| insert_at + i);
                let header = &self.content[insert_at..header_end];

                match existing_superclass(header) {
                    Some(existing) if existing == base => PatchOutcome::AlreadyApplied,
                    Some(_) => PatchOutcome::Conflicting,
                    None => {
                        self.content.insert_str(insert_at, &format!(" extends {base}"));
                        PatchOutcome::Applied
                    }
                }
            }
        };
        Ok(self.record(label, outcome))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn finish(self) -> PatchedText {
        PatchedText {
            content: self.content,
            steps: self.steps,
        }
    }

    fn record(&mut self, label: impl Into<String>, outcome: PatchOutcome) -> PatchOutcome {
        self.steps.push(PatchStep {
            label: label.into(),
            outcome,
        });
        outcome
    }
}

/// Whether the text before `at` on its line opens or continues a comment.
fn on_comment_line(content: &str, at: usize) -> bool {
    let line_start = content[..at].rfind('\n').map_or(0, |i| i + 1);
    let before = content[line_start..at].trim_start();
    before.starts_with('*') || before.starts_with("/*") || before.contains("//")
}

/// Byte offset just past the first line containing `needle`.
fn end_of_first_line_containing(content: &str, needle: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        offset += line.len();
        if line.contains(needle) {
            return Some(offset);
        }
    }
    None
}

fn contains_line(content: &str, line: &str) -> bool {
    let wanted = line.trim();
    content.lines().any(|l| l.trim() == wanted)
}

/// Length of a `<...>` parameter list at the start of `rest`, if any.
fn generic_params_len(rest: &str) -> usize {
    if !rest.starts_with('<') {
        return 0;
    }
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
    }
    0
}

/// Superclass named in a declaration header (`extends X implements Y`).
fn existing_superclass(header: &str) -> Option<&str> {
    let mut words = header.split_whitespace();
    words.find(|w| *w == "extends")?;
    words
        .next()
        .map(|w| w.split(['<', '{', ',']).next().unwrap_or(w))
}

// ── Java-specific patches ────────────────────────────────────────────────────

/// Auditing base classes spliced into audited entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditBase {
    /// `domain.AbstractAuditingEntity`, for persistence classes.
    Entity,
    /// `service.dto.AbstractAuditingDTO`, for MapStruct DTOs.
    Dto,
}

impl AuditBase {
    pub const fn simple_name(&self) -> &'static str {
        match self {
            Self::Entity => "AbstractAuditingEntity",
            Self::Dto => "AbstractAuditingDTO",
        }
    }

    pub fn qualified_name(&self, package: &str) -> String {
        match self {
            Self::Entity => format!("{package}.domain.{}", self.simple_name()),
            Self::Dto => format!("{package}.service.dto.{}", self.simple_name()),
        }
    }

    const fn layer_folder(&self) -> &'static str {
        match self {
            Self::Entity => "domain",
            Self::Dto => "service/dto",
        }
    }
}

/// One source file of an audited entity that should inherit an auditing base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceTarget {
    pub entity: String,
    pub class_name: String,
    pub base: AuditBase,
    /// Path relative to the project root.
    pub path: RelativePath,
    /// Whether the entity lives in a sub-package and needs an explicit import.
    pub needs_import: bool,
}

impl InheritanceTarget {
    /// Files to patch for one entity. Empty for non-audited and built-in
    /// entities; the DTO is included only for MapStruct entities.
    pub fn for_entity(
        entity: &EntityConfig,
        project: &ProjectConfig,
    ) -> Result<Vec<Self>, DomainError> {
        if entity.is_built_in() || !entity.is_audit_enabled() {
            return Ok(Vec::new());
        }

        let mut folder = project.absolute_package_folder();
        if let Some(sub) = entity.entity_package() {
            folder = folder.join(sub.split(['.', '/']).collect::<PathBuf>())?;
        }
        let needs_import = entity.entity_package().is_some();

        let mut targets = vec![Self::new(
            entity,
            &folder,
            entity.persist_class().to_string(),
            AuditBase::Entity,
            needs_import,
        )?];
        if entity.dto().is_mapped() {
            targets.push(Self::new(
                entity,
                &folder,
                entity.rest_class(),
                AuditBase::Dto,
                needs_import,
            )?);
        }
        Ok(targets)
    }

    fn new(
        entity: &EntityConfig,
        folder: &RelativePath,
        class_name: String,
        base: AuditBase,
        needs_import: bool,
    ) -> Result<Self, DomainError> {
        let path = folder
            .join(base.layer_folder())?
            .join(format!("{class_name}.java"))?;
        Ok(Self {
            entity: entity.name().to_string(),
            class_name,
            base,
            path,
            needs_import,
        })
    }

    /// Apply the import and `extends` rewrite to the file content.
    pub fn apply(&self, content: &str, package: &str) -> Result<PatchedText, DomainError> {
        let mut patch = TextPatch::new(content);
        if self.needs_import {
            patch.insert_lines_after(
                format!("import {}", self.base.simple_name()),
                SERIALIZABLE_IMPORT_ANCHOR,
                &[format!("import {};", self.base.qualified_name(package))],
            );
        }
        patch.extend_class(
            format!("{} extends {}", self.class_name, self.base.simple_name()),
            &self.class_name,
            self.base.simple_name(),
        )?;
        Ok(patch.finish())
    }
}

/// Path of the architecture test, relative to the project root.
pub fn architecture_test_path(project: &ProjectConfig) -> Result<RelativePath, DomainError> {
    project
        .absolute_package_test_folder()
        .join(ARCHITECTURE_TEST_FILE)
}

/// Let the layered-architecture test tolerate the audit package.
pub fn patch_architecture_test(content: &str, package: &str) -> PatchedText {
    let imports = [
        "import static com.tngtech.archunit.core.domain.JavaClass.Predicates.type;".to_string(),
        "import static com.tngtech.archunit.core.domain.JavaClass.Predicates.resideInAPackage;"
            .to_string(),
        format!("import {package}.audit.EntityAuditEventListener;"),
        format!("import {package}.domain.AbstractAuditingEntity;"),
    ];
    let clauses = [
        format!(".ignoreDependency(resideInAPackage(\"{package}.audit\"), alwaysTrue())"),
        ".ignoreDependency(type(AbstractAuditingEntity.class), type(EntityAuditEventListener.class))"
            .to_string(),
    ];

    let mut patch = TextPatch::new(content);
    patch.insert_lines_after("archunit imports", ARCHUNIT_IMPORT_ANCHOR, &imports);
    patch.insert_clauses_before("ignore audit dependencies", IGNORE_DEPENDENCY_ANCHOR, &clauses);
    patch.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DtoStrategy;
    use std::path::Path;

    const ENTITY_SOURCE: &str = "\
package com.mycompany.myapp.domain;

import java.io.Serializable;

@Entity
public class Foo implements Serializable {
    private Long id;
}
";

    const ARCH_TEST: &str = "\
package com.mycompany.myapp;

import static com.tngtech.archunit.base.DescribedPredicate.alwaysTrue;
import static com.tngtech.archunit.library.Architectures.layeredArchitecture;

class TechnicalStructureTest {
    @ArchTest
    static final ArchRule respectsTechnicalArchitectureLayers = layeredArchitecture()
        .consideringAllDependencies()
        .whereLayer(\"Config\").mayNotBeAccessedByAnyLayer()
        .ignoreDependency(belongToAnyOf(MyappApp.class), alwaysTrue());
}
";

    fn project() -> ProjectConfig {
        ProjectConfig::new(".", "com.mycompany.myapp")
    }

    #[test]
    fn extends_declaration_without_import() {
        let target = InheritanceTarget::for_entity(&EntityConfig::new("Foo").with_audit(true), &project())
            .unwrap()
            .remove(0);
        let patched = target.apply(ENTITY_SOURCE, "com.mycompany.myapp").unwrap();

        assert!(patched.content.contains(
            "public class Foo extends AbstractAuditingEntity implements Serializable {"
        ));
        assert!(!patched.content.contains("import com.mycompany.myapp.domain.AbstractAuditingEntity;"));
        assert_eq!(patched.steps.len(), 1);
        assert!(patched.changed());
    }

    #[test]
    fn sub_package_entity_gets_import() {
        let entity = EntityConfig::new("Foo").with_audit(true).with_entity_package("billing");
        let target = InheritanceTarget::for_entity(&entity, &project()).unwrap().remove(0);
        let patched = target.apply(ENTITY_SOURCE, "com.mycompany.myapp").unwrap();

        assert!(patched.content.contains(
            "import java.io.Serializable;\nimport com.mycompany.myapp.domain.AbstractAuditingEntity;\n"
        ));
        assert_eq!(
            target.path.as_path(),
            Path::new("src/main/java/com/mycompany/myapp/billing/domain/Foo.java")
        );
    }

    #[test]
    fn inheritance_patch_is_idempotent() {
        let entity = EntityConfig::new("Foo").with_audit(true).with_entity_package("billing");
        let target = InheritanceTarget::for_entity(&entity, &project()).unwrap().remove(0);

        let once = target.apply(ENTITY_SOURCE, "com.mycompany.myapp").unwrap();
        let twice = target.apply(&once.content, "com.mycompany.myapp").unwrap();

        assert_eq!(once.content, twice.content);
        assert!(!twice.changed());
        assert!(twice.steps.iter().all(|s| s.outcome == PatchOutcome::AlreadyApplied));
    }

    #[test]
    fn class_name_prefix_does_not_match() {
        let mut patch = TextPatch::new("public class FooBar implements Serializable {}");
        let outcome = patch.extend_class("Foo", "Foo", "AbstractAuditingEntity").unwrap();
        assert_eq!(outcome, PatchOutcome::AnchorNotFound);
        assert_eq!(patch.content(), "public class FooBar implements Serializable {}");
    }

    #[test]
    fn comment_mention_is_not_a_declaration() {
        let source = "// see Foo class\npublic final class Foo {\n}";
        let mut patch = TextPatch::new(source);
        patch.extend_class("Foo", "Foo", "Base").unwrap();
        assert_eq!(patch.content(), "// see Foo class\npublic final class Foo extends Base {\n}");
    }

    #[test]
    fn commented_out_declarations_are_skipped() {
        let source = "/**\n * public class Foo was split out of Bar.\n */\n// public class Foo {\npublic class Foo implements Serializable {\n}";
        let mut patch = TextPatch::new(source);
        let outcome = patch.extend_class("Foo", "Foo", "AbstractAuditingEntity").unwrap();
        assert_eq!(outcome, PatchOutcome::Applied);
        assert_eq!(
            patch.content(),
            "/**\n * public class Foo was split out of Bar.\n */\n// public class Foo {\npublic class Foo extends AbstractAuditingEntity implements Serializable {\n}"
        );
    }

    #[test]
    fn only_comments_mean_no_anchor() {
        let mut patch = TextPatch::new("/* public class Foo */
");
        let outcome = patch.extend_class("Foo", "Foo", "Base").unwrap();
        assert_eq!(outcome, PatchOutcome::AnchorNotFound);
    }

    #[test]
    fn generic_parameters_are_skipped() {
        let mut patch = TextPatch::new("public class Page<T extends Comparable<T>> {}");
        patch.extend_class("Page", "Page", "Base").unwrap();
        assert_eq!(
            patch.content(),
            "public class Page<T extends Comparable<T>> extends Base {}"
        );
    }

    #[test]
    fn different_superclass_conflicts() {
        let mut patch = TextPatch::new("public class Foo extends Other implements Serializable {}");
        let outcome = patch.extend_class("Foo", "Foo", "AbstractAuditingEntity").unwrap();
        assert_eq!(outcome, PatchOutcome::Conflicting);
    }

    #[test]
    fn mapstruct_entity_targets_dto_too() {
        let entity = EntityConfig::new("Foo")
            .with_audit(true)
            .with_dto(DtoStrategy::Mapstruct);
        let targets = InheritanceTarget::for_entity(&entity, &project()).unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].class_name, "FooDTO");
        assert_eq!(targets[1].base, AuditBase::Dto);
        assert_eq!(
            targets[1].path.as_path(),
            Path::new("src/main/java/com/mycompany/myapp/service/dto/FooDTO.java")
        );
    }

    #[test]
    fn built_in_and_plain_entities_have_no_targets() {
        let built_in = EntityConfig::new("User").with_audit(true).with_built_in(true);
        assert!(InheritanceTarget::for_entity(&built_in, &project()).unwrap().is_empty());
        assert!(InheritanceTarget::for_entity(&EntityConfig::new("Foo"), &project()).unwrap().is_empty());
    }

    #[test]
    fn architecture_test_scenario() {
        let patched = patch_architecture_test(ARCH_TEST, "com.mycompany.myapp");
        let expected_imports = "\
import static com.tngtech.archunit.library.Architectures.layeredArchitecture;
import static com.tngtech.archunit.core.domain.JavaClass.Predicates.type;
import static com.tngtech.archunit.core.domain.JavaClass.Predicates.resideInAPackage;
import com.mycompany.myapp.audit.EntityAuditEventListener;
import com.mycompany.myapp.domain.AbstractAuditingEntity;
";
        let expected_clauses = "\
        .ignoreDependency(resideInAPackage(\"com.mycompany.myapp.audit\"), alwaysTrue())
        .ignoreDependency(type(AbstractAuditingEntity.class), type(EntityAuditEventListener.class))
        .ignoreDependency(belongToAnyOf(MyappApp.class), alwaysTrue());";

        assert!(patched.content.contains(expected_imports), "{}", patched.content);
        assert!(patched.content.contains(expected_clauses), "{}", patched.content);
        assert!(patched.steps.iter().all(|s| s.outcome == PatchOutcome::Applied));
    }

    #[test]
    fn architecture_test_uses_project_package() {
        let source = ARCH_TEST.replace("com.mycompany.myapp", "org.acme.shop");
        let patched = patch_architecture_test(&source, "org.acme.shop");
        assert!(patched.content.contains("import org.acme.shop.audit.EntityAuditEventListener;"));
        assert!(!patched.content.contains("com.mycompany"));
    }

    #[test]
    fn architecture_test_patch_is_idempotent() {
        let once = patch_architecture_test(ARCH_TEST, "com.mycompany.myapp");
        let twice = patch_architecture_test(&once.content, "com.mycompany.myapp");
        assert_eq!(once.content, twice.content);
        assert!(!twice.changed());
    }

    #[test]
    fn missing_anchors_leave_content_alone() {
        let patched = patch_architecture_test("class Empty {}\n", "com.mycompany.myapp");
        assert_eq!(patched.content, "class Empty {}\n");
        assert!(patched.steps.iter().all(|s| s.outcome == PatchOutcome::AnchorNotFound));
    }

    #[test]
    fn anchor_on_last_line_without_newline() {
        let mut patch = TextPatch::new("import java.io.Serializable;");
        patch.insert_lines_after("x", SERIALIZABLE_IMPORT_ANCHOR, &["import a.B;".into()]);
        assert_eq!(patch.content(), "import java.io.Serializable;\nimport a.B;\n");
    }

    #[test]
    fn architecture_test_path_is_under_test_root() {
        assert_eq!(
            architecture_test_path(&project()).unwrap().as_path(),
            Path::new("src/test/java/com/mycompany/myapp/TechnicalStructureTest.java")
        );
    }
}
