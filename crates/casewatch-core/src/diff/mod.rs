//! Snapshot delta engine.
//!
//! Compares the previous poll's snapshot with the current one and produces
//! one [`Delta`] per location of the current snapshot.
//!
//! ## Entry point
//!
//! ```ignore
//! use casewatch_core::diff::{compute_deltas, changed_only};
//!
//! let deltas = changed_only(compute_deltas(&previous, &current));
//! ```
//!
//! ## Guarantees
//!
//! - **Totality**: malformed metric values count as zero, the engine never fails.
//! - **Order**: deltas follow the first appearance of each location in `current`.
//! - **Additions and changes only**: a location that disappears from the feed
//!   produces no delta.

pub mod engine;
pub mod model;

pub use engine::{changed_only, compute_deltas};
pub use model::{Delta, MetricChange};
