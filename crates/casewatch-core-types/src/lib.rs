//! Core types shared across casewatch facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: CycleId for tagging every event of one poll cycle
//! - **Schema constants**: Canonical field keys, event names and severities

pub mod correlation;
pub mod schema;

pub use correlation::CycleId;
