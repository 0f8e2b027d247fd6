//! Operation scripts: a JSON list of timed governance calls replayed in order.
//!
//! ```json
//! [
//!   {"at": 0, "op": "create_proposal", "caller": "alice", "title": "t", "description": "d"},
//!   {"at": 86400, "op": "vote", "caller": "bob", "id": 0, "support": true},
//!   {"at": 691201, "op": "execute", "id": 0}
//! ]
//! ```

use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tally_governance::{
    GovernanceEngine, GovernanceEvent, GovernanceOverview, ProposalState, ProposalSummary,
};
use tally_types::{AccountId, ProposalId, Timestamp, TokenAmount};

use crate::ledger::{AdminList, MemoryLedger};

pub type DaemonEngine = GovernanceEngine<Arc<MemoryLedger>, AdminList>;

/// One scripted call and the time it happens at.
#[derive(Clone, Debug, Deserialize)]
pub struct Step {
    /// Unix seconds passed to the engine as `now`.
    #[serde(default)]
    pub at: u64,
    #[serde(flatten)]
    pub op: Operation,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    CreateProposal {
        caller: AccountId,
        title: String,
        description: String,
    },
    Vote {
        caller: AccountId,
        id: ProposalId,
        support: bool,
    },
    Execute {
        id: ProposalId,
    },
    UpdateVotingDuration {
        caller: AccountId,
        value: u64,
    },
    UpdateProposalThreshold {
        caller: AccountId,
        value: u64,
    },
    UpdateQuorumThreshold {
        caller: AccountId,
        value: u8,
    },
    Mint {
        caller: AccountId,
        to: AccountId,
        amount: u64,
    },
    /// Ledger-side transfer, outside governance; lets scripts move voting power.
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: u64,
    },
}

/// Parse a script from JSON text.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<Step>> {
    serde_json::from_str(text).context("parsing operation script")
}

/// Counts of applied and rejected steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
}

/// A proposal summary together with its state at the end of the run.
#[derive(Debug, Serialize)]
pub struct ProposalReport {
    #[serde(flatten)]
    pub summary: ProposalSummary,
    pub state: ProposalState,
}

/// The last line of a replay: totals, parameters and every proposal.
#[derive(Debug, Serialize)]
pub struct FinalReport {
    pub summary: ReplaySummary,
    pub governance: GovernanceOverview,
    pub proposals: Vec<ProposalReport>,
}

/// Outcome of one step, as written to the output.
#[derive(Serialize)]
struct StepLine<'a> {
    step: usize,
    at: u64,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [GovernanceEvent]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Write `line` as a single line of JSON.
///
/// Amounts are written as plain integers, including those above `u64::MAX`.
pub fn write_line(out: &mut impl Write, line: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, line).context("encoding replay output")?;
    writeln!(out).context("writing replay output")?;
    Ok(())
}

/// Run every step against `engine`, writing one JSON line per step to `out`.
///
/// Rejected steps are reported and the replay carries on; only I/O failures
/// abort it.
pub fn replay(
    engine: &mut DaemonEngine,
    steps: &[Step],
    out: &mut impl Write,
) -> anyhow::Result<ReplaySummary> {
    let emitted: Arc<Mutex<Vec<GovernanceEvent>>> = Arc::default();
    let sink = Arc::clone(&emitted);
    engine.subscribe(Box::new(move |event| {
        sink.lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone())
    }));

    let mut summary = ReplaySummary::default();
    for (index, step) in steps.iter().enumerate() {
        let now = Timestamp::new(step.at);
        let result = apply(engine, &step.op, now);
        let events: Vec<GovernanceEvent> = emitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect();

        match result {
            Ok(()) => {
                summary.applied += 1;
                let line = StepLine {
                    step: index,
                    at: step.at,
                    ok: true,
                    events: Some(events.as_slice()),
                    kind: None,
                    error: None,
                };
                write_line(out, &line)?;
            }
            Err(rejection) => {
                summary.rejected += 1;
                tracing::warn!(step = index, at = step.at, error = %rejection.message, "step rejected");
                let line = StepLine {
                    step: index,
                    at: step.at,
                    ok: false,
                    events: None,
                    kind: Some(rejection.kind.as_str()),
                    error: Some(rejection.message.as_str()),
                };
                write_line(out, &line)?;
            }
        }
    }
    Ok(summary)
}

struct Rejection {
    kind: String,
    message: String,
}

fn apply(engine: &mut DaemonEngine, op: &Operation, now: Timestamp) -> Result<(), Rejection> {
    let governance = |e: tally_governance::GovernanceError| Rejection {
        kind: format!("{:?}", e.kind()),
        message: e.to_string(),
    };
    match op {
        Operation::CreateProposal {
            caller,
            title,
            description,
        } => engine
            .create_proposal(caller, title.as_str(), description.as_str(), now)
            .map(|_| ())
            .map_err(governance),
        Operation::Vote {
            caller,
            id,
            support,
        } => engine
            .vote(caller, *id, *support, now)
            .map(|_| ())
            .map_err(governance),
        Operation::Execute { id } => engine.execute_proposal(*id, now).map_err(governance),
        Operation::UpdateVotingDuration { caller, value } => engine
            .update_voting_duration(caller, *value)
            .map_err(governance),
        Operation::UpdateProposalThreshold { caller, value } => engine
            .update_proposal_threshold(caller, TokenAmount::new(u128::from(*value)))
            .map_err(governance),
        Operation::UpdateQuorumThreshold { caller, value } => engine
            .update_quorum_threshold(caller, *value)
            .map_err(governance),
        Operation::Mint { caller, to, amount } => engine
            .mint(caller, to, TokenAmount::new(u128::from(*amount)))
            .map_err(governance),
        Operation::Transfer { from, to, amount } => engine
            .oracle()
            .transfer(from, to, TokenAmount::new(u128::from(*amount)))
            .map_err(|message| Rejection {
                kind: "External".to_string(),
                message,
            }),
    }
}

/// Every proposal with its state as of `now`.
pub fn report(engine: &DaemonEngine, now: Timestamp) -> anyhow::Result<Vec<ProposalReport>> {
    let count = engine.governance_params().proposal_count;
    engine
        .proposals(0, usize::try_from(count).unwrap_or(usize::MAX))
        .into_iter()
        .map(|summary| {
            let state = engine.proposal_state(summary.id, now)?;
            Ok(ProposalReport { summary, state })
        })
        .collect()
}
