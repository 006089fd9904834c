//! casewatch engine - the polling orchestrator
//!
//! Owns the fetch, diff, render and dispatch cycle and everything with a
//! side effect: the record source, the sink and the clock.
//!
//! ## Logging Ownership
//!
//! The engine owns lifecycle logging for every cycle:
//! - `log_op_start!` at the top of a cycle
//! - `log_op_end!` when the cycle settles
//! - `log_critical!` when the source fails, `log_op_error!` for render and dispatch failures
//!
//! The core crate only uses `tracing::debug!()` for internal details.

pub mod config;
pub mod sink;
pub mod source;
pub mod updater;

pub use config::UpdaterConfig;
pub use sink::{MemorySink, Sink, StdoutSink, WriterSink};
pub use source::{JsonFileSource, RecordSource, Region, RegionSelector};
pub use updater::{CycleOutcome, StopSignal, Updater, UpdaterState};
