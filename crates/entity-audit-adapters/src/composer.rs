//! Strategy composer adapter.
//!
//! The persistence strategies themselves live in sibling generators of the
//! host. This adapter records which one was requested so the host can
//! schedule it, and logs the namespace.

use std::sync::{Arc, RwLock};

use entity_audit_core::{
    application::{ApplicationError, ports::StrategyComposer},
    domain::AuditStrategy,
    error::AuditResult,
};
use tracing::info;

/// Composer that records every requested strategy.
#[derive(Debug, Clone, Default)]
pub struct RecordingComposer {
    composed: Arc<RwLock<Vec<AuditStrategy>>>,
}

impl RecordingComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strategies composed so far, in call order.
    pub fn composed(&self) -> Vec<AuditStrategy> {
        self.composed
            .read()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl StrategyComposer for RecordingComposer {
    fn compose(&self, strategy: AuditStrategy) -> AuditResult<()> {
        let Some(namespace) = strategy.generator_namespace() else {
            return Err(ApplicationError::CompositionFailed {
                strategy: strategy.to_string(),
                reason: "strategy has no generator to compose".into(),
            }
            .into());
        };

        let mut composed = self
            .composed
            .write()
            .map_err(|_| ApplicationError::StateLockError)?;
        composed.push(strategy);

        info!(namespace, "Composing with sibling generator");
        Ok(())
    }
}
