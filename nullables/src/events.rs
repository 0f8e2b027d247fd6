//! Event recorder: captures governance notifications for assertions.

use std::sync::{Arc, Mutex};

use tally_governance::GovernanceEvent;

/// Collects every event delivered to the listeners it hands out.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<GovernanceEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener suitable for `GovernanceEngine::subscribe`.
    pub fn listener(&self) -> Box<dyn Fn(&GovernanceEvent) + Send + Sync> {
        let sink = Arc::clone(&self.events);
        Box::new(move |event| sink.lock().unwrap().push(event.clone()))
    }

    /// Everything recorded so far, in delivery order.
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<GovernanceEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}
