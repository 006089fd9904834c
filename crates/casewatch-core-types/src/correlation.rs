//! Correlation types for cycle tracking
//!
//! Every poll cycle of the orchestrator gets a fresh [`CycleId`] so that the
//! fetch, diff, render and dispatch events of one cycle can be grouped.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleId(String);

impl CycleId {
    /// Generate a new CycleId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_id_generation() {
        let id1 = CycleId::new();
        let id2 = CycleId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_cycle_id_display() {
        let id = CycleId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_cycle_ids_are_time_ordered() {
        let earlier = CycleId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = CycleId::new();
        assert!(earlier.as_str() < later.as_str());
    }

    #[test]
    fn test_serialization() {
        let id = CycleId::from_string("cycle-1".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cycle-1\"");
        let deserialized: CycleId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
