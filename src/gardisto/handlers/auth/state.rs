//! Shared gate state: configuration plus the pluggable collaborators.

use std::sync::Arc;

use super::{config::GateConfig, oauth::IdentityBridge, strategy::Strategy};

/// Process-wide authentication state, shared as `Extension<Arc<GateState>>`.
/// Constructed once at startup and never mutated by a request.
pub struct GateState {
    config: GateConfig,
    strategy: Arc<dyn Strategy>,
    bridge: Option<Arc<dyn IdentityBridge>>,
}

impl GateState {
    #[must_use]
    pub fn new(config: GateConfig, strategy: Arc<dyn Strategy>) -> Self {
        Self {
            config,
            strategy,
            bridge: None,
        }
    }

    #[must_use]
    pub fn with_bridge(mut self, bridge: Arc<dyn IdentityBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub(super) fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub(super) fn bridge(&self) -> Option<&dyn IdentityBridge> {
        self.bridge.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gardisto::handlers::auth::StaticStrategy;

    #[test]
    fn gate_state_exposes_config_and_defaults_to_no_bridge() {
        let state = GateState::new(GateConfig::new(), Arc::new(StaticStrategy::default()));
        assert_eq!(state.config().auth_login_path(), "/login");
        assert!(state.bridge().is_none());
    }
}
