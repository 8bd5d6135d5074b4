//! Domain value objects: AuditFramework, DtoStrategy.
//!
//! # Design
//!
//! Plain value types: `Copy`, compared by value, no identity.
//! Parsing is deliberately lenient for [`AuditFramework`]: configuration
//! values nobody recognises select "no strategy" instead of failing.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// ── AuditFramework ───────────────────────────────────────────────────────────

/// The persistence mechanism selected for audit history.
///
/// Immutable for the duration of one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditFramework {
    /// No history persistence; only the audit columns are added.
    #[default]
    #[serde(rename = "no", alias = "none")]
    None,
    /// History is persisted through Javers snapshots.
    Javers,
    /// History is persisted into the `EntityAuditEvent` table.
    Custom,
}

impl AuditFramework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "no",
            Self::Javers => "javers",
            Self::Custom => "custom",
        }
    }

    /// Parse an optional raw configuration value.
    ///
    /// Absent, `"no"` and unrecognised values all map to [`AuditFramework::None`].
    pub fn from_config(value: Option<&str>) -> Self {
        value.map_or(Self::None, |v| v.parse().unwrap_or_default())
    }

    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for AuditFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditFramework {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "javers" => Self::Javers,
            "custom" => Self::Custom,
            _ => Self::None,
        })
    }
}

// ── DtoStrategy ──────────────────────────────────────────────────────────────

/// How an entity exposes itself over REST.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtoStrategy {
    /// The persistence class is returned directly.
    #[default]
    No,
    /// A separate DTO is generated and mapped with MapStruct.
    Mapstruct,
}

impl DtoStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Mapstruct => "mapstruct",
        }
    }

    pub const fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapstruct)
    }
}

impl fmt::Display for DtoStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DtoStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "mapstruct" => Self::Mapstruct,
            _ => Self::No,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_framework_parses_known_values() {
        assert_eq!(AuditFramework::from_config(Some("javers")), AuditFramework::Javers);
        assert_eq!(AuditFramework::from_config(Some("custom")), AuditFramework::Custom);
        assert_eq!(AuditFramework::from_config(Some("no")), AuditFramework::None);
    }

    #[test]
    fn audit_framework_unknown_is_none() {
        assert_eq!(AuditFramework::from_config(Some("hibernate-envers")), AuditFramework::None);
        assert_eq!(AuditFramework::from_config(Some("")), AuditFramework::None);
        assert_eq!(AuditFramework::from_config(None), AuditFramework::None);
    }

    #[test]
    fn audit_framework_serde_accepts_no() {
        let parsed: AuditFramework = serde_json::from_str("\"no\"").unwrap();
        assert_eq!(parsed, AuditFramework::None);
        assert_eq!(serde_json::to_string(&AuditFramework::Javers).unwrap(), "\"javers\"");
    }

    #[test]
    fn dto_strategy_parses_case_insensitive() {
        assert_eq!("MapStruct".parse::<DtoStrategy>().unwrap(), DtoStrategy::Mapstruct);
        assert_eq!("no".parse::<DtoStrategy>().unwrap(), DtoStrategy::No);
        assert!(DtoStrategy::Mapstruct.is_mapped());
    }
}
