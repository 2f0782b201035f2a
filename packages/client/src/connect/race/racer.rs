//! A single connection attempt inside a race

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use super::candidate::Candidate;
use super::gate::Gate;
use super::outcome::Outcome;
use crate::connect::tcp::SocketFactory;

/// Settles the racer as abandoned if its task ends without reporting,
/// which covers panics inside the factory and aborted tasks.
struct SettleOnDrop<'a, S> {
    outcome: &'a Outcome<S>,
    position: usize,
}

impl<S> Drop for SettleOnDrop<'_, S> {
    fn drop(&mut self) {
        self.outcome.abandon(self.position);
    }
}

pub(crate) struct Racer<F: SocketFactory> {
    pub(crate) candidate: Candidate,
    pub(crate) factory: Arc<F>,
    pub(crate) outcome: Arc<Outcome<F::Stream>>,
    /// Predecessor's completion gate; `None` for the first candidate
    pub(crate) start: Option<Arc<Gate>>,
    pub(crate) done: Arc<Gate>,
    pub(crate) server_names: Arc<[String]>,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) race_start: Instant,
}

impl<F: SocketFactory> Racer<F> {
    pub(crate) async fn run(self) {
        let position = self.candidate.position;
        let address = self.candidate.address;
        let _guard = SettleOnDrop {
            outcome: &self.outcome,
            position,
        };

        if let Some(start) = &self.start {
            tokio::select! {
                biased;
                () = self.done.signaled() => {
                    trace!(position, %address, "racer cancelled before starting");
                    return;
                }
                released = start.wait_from(self.race_start) => {
                    trace!(
                        position,
                        %address,
                        released,
                        elapsed = ?self.race_start.elapsed(),
                        "racer starting"
                    );
                }
            }
        }

        if self.done.is_done() {
            return;
        }

        debug!(position, %address, "connecting");
        let result = tokio::select! {
            biased;
            () = self.done.signaled() => {
                trace!(position, %address, "racer cancelled while connecting");
                return;
            }
            result = self.attempt() => result,
        };

        match result {
            Ok(stream) => self.outcome.report_success(position, stream),
            Err(e) => {
                debug!(position, %address, "connection attempt failed: {e}");
                self.outcome.report_failure(position, e);
            }
        }
    }

    async fn attempt(&self) -> io::Result<F::Stream> {
        let address = self.candidate.address;
        let mut socket = self.factory.create(&address)?;
        self.factory.apply_server_names(&mut socket, &self.server_names);
        let connecting = self.factory.connect(socket, address);

        match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("connect to {address} timed out after {limit:?}"),
                    )
                })?,
            None => connecting.await,
        }
    }
}
