//! Action phases
//!
//! ```text
//! Idle → Validating → Rejected → Idle
//!                   → Submitting → Succeeded → Refetching → Idle
//!                                → Failed → (Refetching →) Idle
//! ```
//!
//! A failed move still refetches, hence `Failed → Refetching`.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPhase {
    #[default]
    Idle,
    Validating,
    Rejected,
    Submitting,
    Succeeded,
    Failed,
    Refetching,
}

impl ActionPhase {
    pub fn can_transition_to(self, next: ActionPhase) -> bool {
        use ActionPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Rejected)
                | (Validating, Submitting)
                | (Rejected, Idle)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Refetching)
                | (Failed, Refetching)
                | (Failed, Idle)
                | (Refetching, Idle)
        )
    }

    /// Whether a request of this action may be on the wire
    pub fn is_busy(self) -> bool {
        matches!(self, ActionPhase::Submitting | ActionPhase::Refetching)
    }
}

/// Phase published for a whole list.
///
/// Actions on different records may overlap. Each run reports its own
/// phase here; the published value prefers a run that is on the wire, and
/// only becomes `Idle` once every run has finished.
#[derive(Debug)]
pub(crate) struct PhaseBoard {
    publish: watch::Sender<ActionPhase>,
    runs: Mutex<BTreeMap<u64, ActionPhase>>,
    next_run: AtomicU64,
}

impl PhaseBoard {
    pub(crate) fn new() -> Self {
        let (publish, _) = watch::channel(ActionPhase::Idle);
        Self {
            publish,
            runs: Mutex::new(BTreeMap::new()),
            next_run: AtomicU64::new(0),
        }
    }

    pub(crate) fn current(&self) -> ActionPhase {
        *self.publish.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ActionPhase> {
        self.publish.subscribe()
    }

    fn report(&self, run: u64, phase: ActionPhase) {
        let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        if phase == ActionPhase::Idle {
            runs.remove(&run);
        } else {
            runs.insert(run, phase);
        }

        let shown = if phase.is_busy() {
            phase
        } else if let Some(busy) = runs.values().copied().find(|p| p.is_busy()) {
            busy
        } else if phase != ActionPhase::Idle {
            phase
        } else {
            runs.values().next().copied().unwrap_or(ActionPhase::Idle)
        };
        self.publish.send_replace(shown);
    }
}

/// Phase of one running action
pub(crate) struct PhaseRun<'a> {
    id: u64,
    current: ActionPhase,
    action: &'static str,
    board: &'a PhaseBoard,
}

impl<'a> PhaseRun<'a> {
    pub(crate) fn start(action: &'static str, board: &'a PhaseBoard) -> Self {
        let mut run = Self {
            id: board.next_run.fetch_add(1, Ordering::Relaxed),
            current: ActionPhase::Idle,
            action,
            board,
        };
        run.advance(ActionPhase::Validating);
        run
    }

    pub(crate) fn advance(&mut self, next: ActionPhase) {
        if !self.current.can_transition_to(next) {
            tracing::warn!(
                action = self.action,
                from = ?self.current,
                to = ?next,
                "Unexpected phase transition"
            );
        }
        tracing::trace!(action = self.action, phase = ?next, "Phase");
        self.current = next;
        self.board.report(self.id, next);
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> ActionPhase {
        self.current
    }
}

impl Drop for PhaseRun<'_> {
    fn drop(&mut self) {
        if self.current != ActionPhase::Idle {
            self.board.report(self.id, ActionPhase::Idle);
        }
    }
}
