//! Strategy selection.
//!
//! Turns the raw `auditFramework` setting into the convenience flags consumed
//! by the later stages and into the one [`AuditStrategy`] whose collaborator
//! gets composed before anything is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{entities::project::AuditSettings, value_objects::AuditFramework};

/// Flags derived once per run from the audit settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFlags {
    pub framework: AuditFramework,
    /// `auditFramework == "custom"`
    pub custom: bool,
    /// `auditFramework == "javers"`
    pub javers: bool,
    /// `auditFramework` is set to anything but `no`, recognised or not.
    pub any: bool,
    pub audit_page: bool,
}

impl AuditFlags {
    /// Derive the flags. Never fails; an unknown value still counts for
    /// `any` but composes no strategy.
    pub fn select(settings: &AuditSettings) -> Self {
        let raw = settings.audit_framework.as_deref().map(str::trim);
        let framework = AuditFramework::from_config(raw);
        Self {
            framework,
            custom: framework == AuditFramework::Custom,
            javers: framework == AuditFramework::Javers,
            any: raw.is_some_and(|v| !v.is_empty() && v != "no"),
            audit_page: settings.audit_page,
        }
    }

    pub fn strategy(&self) -> AuditStrategy {
        AuditStrategy::from(self.framework)
    }
}

/// The persist-audit-event capability, one variant per backing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditStrategy {
    NoAudit,
    JaversBacked,
    CustomBacked,
}

impl AuditStrategy {
    /// Namespace of the sibling generator implementing this strategy.
    pub const fn generator_namespace(&self) -> Option<&'static str> {
        match self {
            Self::NoAudit => None,
            Self::JaversBacked => Some("jhipster-entity-audit:spring-boot-javers"),
            Self::CustomBacked => Some("jhipster-entity-audit:spring-boot-custom-audit"),
        }
    }

    pub const fn requires_composition(&self) -> bool {
        self.generator_namespace().is_some()
    }
}

impl From<AuditFramework> for AuditStrategy {
    fn from(framework: AuditFramework) -> Self {
        match framework {
            AuditFramework::None => Self::NoAudit,
            AuditFramework::Javers => Self::JaversBacked,
            AuditFramework::Custom => Self::CustomBacked,
        }
    }
}

impl fmt::Display for AuditStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoAudit => "no-audit",
            Self::JaversBacked => "javers-backed",
            Self::CustomBacked => "custom-backed",
        })
    }
}
