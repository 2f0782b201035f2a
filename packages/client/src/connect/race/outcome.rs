//! Outcome aggregation for a single race
//!
//! Every racer reports here exactly once. The first success wins and every
//! other racer is cancelled through its own gate; later successes are
//! closed on arrival. The first genuine failure is kept so that an all-fail
//! race can surface something the caller recognises.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tracing::{debug, trace};

use super::gate::Gate;
use crate::error::{self, Result};

struct State<S> {
    winner: Option<S>,
    failure: Option<io::Error>,
    remaining: usize,
}

/// Shared result slot for one race.
pub(crate) struct Outcome<S> {
    state: Mutex<State<S>>,
    settled: Notify,
    gates: Vec<Arc<Gate>>,
}

impl<S> Outcome<S> {
    /// `gates[i]` is the completion gate of the racer at position `i`.
    pub(crate) fn new(gates: Vec<Arc<Gate>>) -> Self {
        Self {
            state: Mutex::new(State {
                winner: None,
                failure: None,
                remaining: gates.len(),
            }),
            settled: Notify::new(),
            gates,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Signal `position`'s gate, counting it as settled on the first transition.
    fn settle(&self, state: &mut State<S>, position: usize) -> bool {
        if !self.gates[position].signal() {
            return false;
        }
        state.remaining = state.remaining.saturating_sub(1);
        true
    }

    fn notify_if_settled(&self, state: &State<S>) {
        if state.remaining == 0 {
            self.settled.notify_waiters();
        }
    }

    pub(crate) fn report_success(&self, position: usize, socket: S) {
        let mut state = self.lock();
        if self.gates[position].is_done() {
            trace!(position, "racer already settled, closing its socket");
            drop(socket);
            return;
        }

        if state.winner.is_none() {
            debug!(position, "racer won");
            state.winner = Some(socket);
            for other in (0..self.gates.len()).filter(|&i| i != position) {
                if self.settle(&mut state, other) {
                    trace!(position = other, "racer cancelled");
                }
            }
        } else {
            trace!(position, "late success, closing its socket");
            drop(socket);
        }

        self.settle(&mut state, position);
        self.notify_if_settled(&state);
    }

    pub(crate) fn report_failure(&self, position: usize, err: io::Error) {
        let mut state = self.lock();
        if self.gates[position].is_done() {
            return;
        }
        if state.failure.is_none() {
            state.failure = Some(err);
        }
        self.settle(&mut state, position);
        self.notify_if_settled(&state);
    }

    /// Settle a racer that went away without reporting.
    ///
    /// No failure is recorded for it. A no-op once the racer has settled.
    pub(crate) fn abandon(&self, position: usize) {
        let mut state = self.lock();
        if self.settle(&mut state, position) {
            trace!(position, "racer abandoned");
            self.notify_if_settled(&state);
        }
    }

    /// Wait for every racer to settle, then hand out the result.
    pub(crate) async fn join(&self) -> Result<S> {
        loop {
            let notified = self.settled.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            let remaining = self.lock().remaining;
            if remaining == 0 {
                break;
            }
            notified.await;
        }

        let mut state = self.lock();
        if let Some(winner) = state.winner.take() {
            return Ok(winner);
        }
        match state.failure.take() {
            Some(failure) => Err(error::socket_connect(failure)),
            None => Err(error::no_viable_address()),
        }
    }
}
