//! Structured logging facility for casewatch
//!
//! - Single initialization point via `init(profile, severity)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`, `log_critical!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use casewatch_core::logging_facility::{init, Profile, Severity};
//!
//! init(Profile::Development, Severity::Info);
//! ```
//!
//! Severity `critical` has no tracing level of its own. Critical events are
//! emitted at ERROR with `severity = "critical"` attached, so a filter set to
//! `critical` passes ERROR events and downstream tooling keys on the field.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile, Severity};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
