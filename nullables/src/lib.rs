//! Nullable infrastructure for deterministic testing.
//!
//! Everything the governance engine consumes from outside (time, the token
//! ledger, the admin check, notification delivery) has a test-friendly
//! implementation here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Never touches the filesystem or network
//!
//! Usage: hand these to `GovernanceEngine` in tests instead of real collaborators.

pub mod clock;
pub mod events;
pub mod gate;
pub mod ledger;

pub use clock::NullClock;
pub use events::EventRecorder;
pub use gate::NullAccessGate;
pub use ledger::NullLedger;
