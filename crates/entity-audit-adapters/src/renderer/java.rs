//! Renderer for the three shared Java artifacts.
//!
//! Templates ship inside the binary and use `{{VARIABLE}}` placeholders
//! resolved from the [`RenderContext`].

use entity_audit_core::{
    application::{ApplicationError, ports::ArtifactRenderer},
    domain::{ArtifactKind, AuditFramework, RenderContext},
    error::AuditResult,
};
use tracing::{debug, instrument};

const AUDIT_ACTION: &str = include_str!("templates/EntityAuditAction.java.tmpl");
const AUDIT_EVENT_TABLE: &str = include_str!("templates/EntityAuditEvent.custom.java.tmpl");
const AUDIT_EVENT_JAVERS: &str = include_str!("templates/EntityAuditEvent.javers.java.tmpl");
const AUDITING_DTO: &str = include_str!("templates/AbstractAuditingDTO.java.tmpl");

/// Renders the audit action enum, the event-log entity and the base DTO.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaArtifactRenderer;

impl JavaArtifactRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Template for one artifact. The event entity is table-backed unless
    /// Javers owns the history.
    fn template(kind: ArtifactKind, framework: AuditFramework) -> &'static str {
        match (kind, framework) {
            (ArtifactKind::AuditAction, _) => AUDIT_ACTION,
            (ArtifactKind::AuditEvent, AuditFramework::Javers) => AUDIT_EVENT_JAVERS,
            (ArtifactKind::AuditEvent, _) => AUDIT_EVENT_TABLE,
            (ArtifactKind::AuditingDto, _) => AUDITING_DTO,
        }
    }
}

impl ArtifactRenderer for JavaArtifactRenderer {
    #[instrument(skip_all, fields(artifact = %kind))]
    fn render(&self, kind: ArtifactKind, context: &RenderContext) -> AuditResult<String> {
        let framework = AuditFramework::from_config(context.get("AUDIT_FRAMEWORK"));
        let rendered = context.render(Self::template(kind, framework));

        if let Some(start) = rendered.find("{{") {
            let end = rendered[start..].find("}}").map_or(rendered.len(), |i| start + i + 2);
            return Err(ApplicationError::RenderingFailed {
                artifact: kind.to_string(),
                reason: format!("unresolved placeholder {}", &rendered[start..end]),
            }
            .into());
        }

        debug!(bytes = rendered.len(), "Rendered artifact");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_audit_core::domain::{AuditFlags, AuditSettings, ProjectConfig};

    fn context(framework: &str, prefix: &str) -> RenderContext {
        let project = ProjectConfig::new(".", "org.acme.shop").with_jhi_prefix(prefix);
        RenderContext::new(&project, &AuditFlags::select(&AuditSettings::new(framework)))
    }

    #[test]
    fn action_enum_uses_package() {
        let out = JavaArtifactRenderer::new()
            .render(ArtifactKind::AuditAction, &context("custom", "jhi"))
            .unwrap();
        assert!(out.starts_with("package org.acme.shop.domain.enumeration;"));
        assert!(out.contains("DELETE(\"DELETE\")"));
    }

    #[test]
    fn custom_event_is_table_backed_with_prefix() {
        let out = JavaArtifactRenderer::new()
            .render(ArtifactKind::AuditEvent, &context("custom", "ShopApp"))
            .unwrap();
        assert!(out.contains("@Table(name = \"shop_app_entity_audit_event\")"));
        assert!(!out.contains("CdoSnapshot"));
    }

    #[test]
    fn javers_event_reads_snapshots() {
        let out = JavaArtifactRenderer::new()
            .render(ArtifactKind::AuditEvent, &context("javers", "jhi"))
            .unwrap();
        assert!(out.contains("fromJaversSnapshot(CdoSnapshot snapshot)"));
        assert!(out.contains("import org.acme.shop.domain.enumeration.EntityAuditAction;"));
        assert!(!out.contains("@Table"));
    }

    #[test]
    fn dto_is_abstract_base() {
        let out = JavaArtifactRenderer::new()
            .render(ArtifactKind::AuditingDto, &context("no", "jhi"))
            .unwrap();
        assert!(out.starts_with("package org.acme.shop.service.dto;"));
        assert!(out.contains("public abstract class AbstractAuditingDTO implements Serializable"));
    }

    #[test]
    fn no_placeholder_survives_rendering() {
        let renderer = JavaArtifactRenderer::new();
        for framework in ["no", "javers", "custom"] {
            for kind in ArtifactKind::ALL {
                let out = renderer.render(kind, &context(framework, "jhi")).unwrap();
                assert!(!out.contains("{{"), "{kind} / {framework}");
            }
        }
    }
}
