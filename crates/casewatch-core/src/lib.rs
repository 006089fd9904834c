//! casewatch core - snapshot diffing and notification rendering
//!
//! This crate holds everything that does not touch the network or a clock:
//! - Record, snapshot and metric models
//! - Count normalization for human-formatted numbers
//! - The snapshot diff engine producing per-location deltas
//! - Table, prose and card renderers
//! - The line chunker that keeps text messages under a size limit
//! - The error and logging facilities shared by every casewatch crate

pub mod chunk;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod render;

#[doc(hidden)]
pub use casewatch_core_types as core_types;

// Re-export commonly used types
pub use diff::{changed_only, compute_deltas, Delta, MetricChange};
pub use errors::{CaseWatchError, ExError, ExErrorKind};
pub use model::{Metric, Record, Snapshot};
pub use render::{build_renderer, Message, OutputFormat, RenderOptions, Renderer};
