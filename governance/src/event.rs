//! Notifications emitted by the governance engine.

use serde::{Deserialize, Serialize};
use tally_types::{AccountId, ProposalId, Timestamp, TokenAmount};

/// Governance notifications, delivered in emission order via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GovernanceEvent {
    ProposalCreated {
        id: ProposalId,
        proposer: AccountId,
        title: String,
        start_time: Timestamp,
        end_time: Timestamp,
    },
    VoteCast {
        id: ProposalId,
        voter: AccountId,
        support: bool,
        weight: TokenAmount,
    },
    ProposalExecuted {
        id: ProposalId,
    },
    VotingDurationUpdated {
        value: u64,
    },
    ProposalThresholdUpdated {
        value: TokenAmount,
    },
    QuorumThresholdUpdated {
        value: u8,
    },
    /// An admin-approved mint was forwarded to the ledger.
    TokensMinted {
        to: AccountId,
        amount: TokenAmount,
    },
}

/// Synchronous fan-out event bus for governance events.
///
/// Listeners are invoked inline on the emitting call, after the state change
/// they describe has been applied.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&GovernanceEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &GovernanceEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    #[test]
    fn emit_calls_all_listeners() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();

        let c1 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));

        let c2 = Arc::clone(&counter);
        bus.subscribe(Box::new(move |_| {
            c2.fetch_add(10, Ordering::SeqCst);
        }));

        bus.emit(&GovernanceEvent::ProposalExecuted { id: 0 });

        assert_eq!(counter.load(Ordering::SeqCst), 11);
        assert_eq!(bus.listener_count(), 2);
    }

    #[test]
    fn emit_with_no_listeners_is_noop() {
        let bus = EventBus::new();
        bus.emit(&GovernanceEvent::QuorumThresholdUpdated { value: 20 });
    }

    #[test]
    fn listeners_see_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Arc::clone(&seen);
        bus.subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())));

        bus.emit(&GovernanceEvent::VotingDurationUpdated { value: 86_400 });
        bus.emit(&GovernanceEvent::ProposalExecuted { id: 4 });

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], GovernanceEvent::ProposalExecuted { id: 4 });
    }
}
