//! Current-state resolution

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::MonitorResult;
use crate::event_store::StateStore;
use crate::types::ServiceSeen;

/// Answers "what is the latest known state of each service"
pub struct CurrentStateResolver {
    store: Arc<dyn StateStore>,
}

impl CurrentStateResolver {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Latest transition of every service, keyed by service name
    ///
    /// Services without transitions are absent. One lookup per service.
    pub fn latest_states(&self) -> MonitorResult<BTreeMap<String, ServiceSeen>> {
        Ok(self
            .store
            .latest_transitions()?
            .into_iter()
            .map(|t| (t.service_name.clone(), ServiceSeen::from(t)))
            .collect())
    }
}
