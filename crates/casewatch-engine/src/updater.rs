//! The poll, diff, render and dispatch loop.
//!
//! ```text
//! Idle -> Fetching -> FetchFailed                      (sleep backoff)
//!                  -> Parsed -> NoChange               (adopt snapshot)
//!                            -> Changed -> Dispatching (adopt on success)
//! any  -> Stopped                                      (stop signal, wakes a sleep)
//! ```
//!
//! The stored snapshot only moves forward when a cycle has nothing left to
//! say about it: after a baseline, a quiet cycle, a full dispatch or a render
//! failure. A fetch failure or a rejected send leaves it in place, so the next
//! cycle re-derives the same deltas.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use casewatch_core::diff::{changed_only, compute_deltas};
use casewatch_core::render::{build_renderer, Renderer};
use casewatch_core::{log_critical, log_op_end, log_op_error, log_op_start, Snapshot};
use casewatch_core_types::CycleId;
use chrono::Utc;
use tokio::sync::watch;

use crate::config::UpdaterConfig;
use crate::sink::Sink;
use crate::source::{fetch_snapshot, RecordSource};

/// Where the orchestrator is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdaterState {
    Idle,
    Fetching,
    FetchFailed,
    Parsed,
    NoChange,
    Changed,
    Dispatching,
    Stopped,
}

/// Result of one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Source failed; snapshot kept, backoff applies
    FetchFailed,
    /// First snapshot adopted without diffing
    Baseline,
    /// Nothing changed since the stored snapshot
    NoChange,
    /// Every rendered message was accepted
    Dispatched { messages: usize },
    /// Deltas could not be rendered; snapshot adopted, nothing sent
    RenderFailed,
    /// Sink rejected a message; `sent` messages went out before it
    DispatchFailed { sent: usize },
}

/// External request to stop, checked at the top of every cycle
#[async_trait]
pub trait StopSignal: Sync {
    fn should_stop(&self) -> bool;

    /// Resolves once a stop is requested, cutting the sleep between cycles
    /// short. Signals that cannot be awaited never resolve.
    async fn stopped(&self) {
        std::future::pending::<()>().await
    }
}

impl StopSignal for AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StopSignal for watch::Receiver<bool> {
    fn should_stop(&self) -> bool {
        *self.borrow()
    }

    async fn stopped(&self) {
        let mut rx = self.clone();
        // A dropped sender can no longer ask for a stop
        if rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await
        }
    }
}

pub struct Updater<S, K> {
    config: UpdaterConfig,
    source: S,
    sink: K,
    renderer: Box<dyn Renderer>,
    previous: Snapshot,
    state: UpdaterState,
}

impl<S, K> Updater<S, K>
where
    S: RecordSource,
    K: Sink,
{
    /// Build an orchestrator with an empty stored snapshot.
    ///
    /// The configuration is expected to have passed `validate()`.
    pub fn new(config: UpdaterConfig, source: S, sink: K) -> Self {
        let renderer = build_renderer(&config.render);
        Self {
            config,
            source,
            sink,
            renderer,
            previous: Snapshot::default(),
            state: UpdaterState::Idle,
        }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn state(&self) -> UpdaterState {
        self.state
    }

    /// Snapshot the next cycle will be compared against
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    fn transition(&mut self, next: UpdaterState) {
        tracing::debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }

    fn adopt(&mut self, current: Snapshot) {
        self.previous = current;
    }

    /// Run exactly one cycle and report how it ended.
    ///
    /// Never fails: every error is logged and folded into the outcome.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let cycle_id = CycleId::new();
        let channel_id = self.config.channel_id;
        log_op_start!(
            "poll_cycle",
            cycle_id = cycle_id.as_str(),
            channel_id = channel_id
        );
        let start = Instant::now();

        let outcome = self.cycle(&cycle_id).await;

        log_op_end!(
            "poll_cycle",
            duration_ms = start.elapsed().as_millis() as u64,
            cycle_id = cycle_id.as_str(),
            outcome = ?outcome
        );
        self.transition(UpdaterState::Idle);
        outcome
    }

    async fn cycle(&mut self, cycle_id: &CycleId) -> CycleOutcome {
        let channel_id = self.config.channel_id;

        self.transition(UpdaterState::Fetching);
        let fetched = fetch_snapshot(
            &self.source,
            self.config.region,
            self.config.fetch_timeout(),
        )
        .await;
        let current = match fetched {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.transition(UpdaterState::FetchFailed);
                log_critical!(
                    "fetch",
                    err,
                    cycle_id = cycle_id.as_str(),
                    channel_id = channel_id
                );
                return CycleOutcome::FetchFailed;
            }
        };
        self.transition(UpdaterState::Parsed);

        if self.previous.is_empty() {
            tracing::info!(
                cycle_id = cycle_id.as_str(),
                record_count = current.len(),
                "baseline snapshot adopted"
            );
            self.transition(UpdaterState::NoChange);
            self.adopt(current);
            return CycleOutcome::Baseline;
        }

        let deltas = changed_only(compute_deltas(&self.previous, &current));
        if deltas.is_empty() {
            self.transition(UpdaterState::NoChange);
            self.adopt(current);
            return CycleOutcome::NoChange;
        }
        self.transition(UpdaterState::Changed);
        tracing::info!(
            cycle_id = cycle_id.as_str(),
            delta_count = deltas.len(),
            "changes detected"
        );

        let render_start = Instant::now();
        let messages = match self.renderer.render(&deltas, Utc::now()) {
            Ok(messages) => messages,
            Err(err) => {
                log_op_error!(
                    "render",
                    err,
                    duration_ms = render_start.elapsed().as_millis() as u64,
                    cycle_id = cycle_id.as_str(),
                    format = self.renderer.format().as_str()
                );
                self.adopt(current);
                return CycleOutcome::RenderFailed;
            }
        };

        self.transition(UpdaterState::Dispatching);
        let dispatch_start = Instant::now();
        let mut sent = 0;
        for message in &messages {
            if let Err(err) = self.sink.send(channel_id, message).await {
                let err = err.with_channel_id(channel_id);
                log_op_error!(
                    "dispatch",
                    err,
                    duration_ms = dispatch_start.elapsed().as_millis() as u64,
                    cycle_id = cycle_id.as_str(),
                    channel_id = channel_id,
                    message_count = sent
                );
                return CycleOutcome::DispatchFailed { sent };
            }
            sent += 1;
        }

        self.adopt(current);
        CycleOutcome::Dispatched { messages: sent }
    }

    /// Loop cycles until `stop` asks to stop.
    ///
    /// Sleeps the poll interval after every cycle, or the backoff interval
    /// after a failed fetch. A cycle in progress always completes; a stop
    /// requested during the sleep ends it early.
    pub async fn run<T>(&mut self, stop: &T)
    where
        T: StopSignal + ?Sized,
    {
        tracing::info!(
            channel_id = self.config.channel_id,
            region = self.config.region.as_str(),
            format = self.renderer.format().as_str(),
            poll_interval_secs = self.config.poll_interval_secs,
            "updater started"
        );

        loop {
            if stop.should_stop() {
                self.transition(UpdaterState::Stopped);
                tracing::info!(channel_id = self.config.channel_id, "updater stopped");
                return;
            }

            let wait = match self.run_cycle().await {
                CycleOutcome::FetchFailed => self.config.backoff_interval(),
                _ => self.config.poll_interval(),
            };
            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = stop.stopped() => {}
            }
        }
    }
}
