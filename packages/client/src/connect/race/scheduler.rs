//! Happy Eyeballs (RFC 6555) race scheduling
//!
//! Every candidate gets its own task. Candidate `i` starts as soon as
//! candidate `i - 1` finishes or `i * fallback_delay` after the race began,
//! whichever comes first, so a single unreachable address never stalls the
//! rest of the list.

use std::mem;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::candidate::Candidate;
use super::gate::Gate;
use super::outcome::Outcome;
use super::racer::Racer;
use crate::config::{ConnectConfig, DualStackMode};
use crate::connect::tcp::SocketFactory;
use crate::error::{self, Result};

/// The subset of `ConnectConfig` a race reads.
#[derive(Debug, Clone)]
pub struct RaceSettings {
    pub dual_stack: DualStackMode,
    pub connect_timeout: Option<Duration>,
    pub fallback_delay: Duration,
    pub server_names: Vec<String>,
}

impl From<&ConnectConfig> for RaceSettings {
    fn from(config: &ConnectConfig) -> Self {
        Self {
            dual_stack: config.dual_stack,
            connect_timeout: config.connect_timeout,
            fallback_delay: config.fallback_delay,
            server_names: config.server_names.clone(),
        }
    }
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self::from(&ConnectConfig::default())
    }
}

/// Racer tasks of one race. Dropping the set aborts whatever is still running,
/// so abandoning a race also closes its sockets.
struct RacerSet(Vec<JoinHandle<()>>);

impl RacerSet {
    async fn reap(mut self) {
        for handle in mem::take(&mut self.0) {
            match handle.await {
                Err(e) if e.is_panic() => warn!("racer task panicked: {e}"),
                _ => {}
            }
        }
    }
}

impl Drop for RacerSet {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Race connections to `addrs` on `port` and return the first one to succeed.
///
/// Returns once every racer has settled: the winner is the only socket left
/// open. When nothing connects the first genuine failure is returned as
/// `SocketConnect`; when filtering leaves nothing to try, `NoViableAddress`.
///
/// # Errors
///
/// `NoViableAddress` or `SocketConnect { proxied: false }`.
pub async fn race<F: SocketFactory>(
    factory: Arc<F>,
    addrs: &[IpAddr],
    port: u16,
    settings: &RaceSettings,
) -> Result<F::Stream> {
    let allowed = settings.dual_stack.filter(addrs);
    let candidates = Candidate::plan(&allowed, port, settings.fallback_delay);
    if candidates.is_empty() {
        debug!(
            resolved = addrs.len(),
            dual_stack = ?settings.dual_stack,
            "no address left to race"
        );
        return Err(error::no_viable_address());
    }

    let gates: Vec<Arc<Gate>> = candidates
        .iter()
        .map(|c| Arc::new(Gate::new(c.delay)))
        .collect();
    let outcome = Arc::new(Outcome::new(gates.clone()));
    let server_names: Arc<[String]> = settings.server_names.clone().into();
    let race_start = Instant::now();

    debug!(candidates = candidates.len(), port, "starting race");

    let mut racers = RacerSet(Vec::with_capacity(candidates.len()));
    for candidate in &candidates {
        let position = candidate.position;
        let racer = Racer {
            candidate: *candidate,
            factory: Arc::clone(&factory),
            outcome: Arc::clone(&outcome),
            start: position.checked_sub(1).map(|prev| Arc::clone(&gates[prev])),
            done: Arc::clone(&gates[position]),
            server_names: Arc::clone(&server_names),
            connect_timeout: settings.connect_timeout,
            race_start,
        };
        racers.0.push(tokio::spawn(racer.run()));
    }

    let result = outcome.join().await;
    racers.reap().await;

    match &result {
        Ok(_) => debug!(elapsed = ?race_start.elapsed(), "race won"),
        Err(e) => debug!(elapsed = ?race_start.elapsed(), "race lost: {e}"),
    }
    result
}
