//! In-memory sink.
//!
//! Records every accepted message so tests can assert on dispatch order.
//! [`MemorySink::rejecting_after`] simulates a channel that stops accepting
//! messages part way through a cycle. Clones share the same buffer.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use casewatch_core::errors::{CaseWatchError, ExError};
use casewatch_core::Message;

use super::Sink;

#[derive(Debug, Default)]
struct SinkState {
    sent: Vec<(u64, Message)>,
    attempts: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<SinkState>>,
    /// Number of sends accepted before every further send is rejected
    accept_limit: Option<usize>,
}

fn poison_err<T>(_: PoisonError<T>) -> ExError {
    ExError::from(CaseWatchError::Internal {
        message: "memory sink lock poisoned".to_string(),
    })
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that accepts `accepted` messages and rejects the rest
    pub fn rejecting_after(accepted: usize) -> Self {
        Self {
            accept_limit: Some(accepted),
            ..Self::default()
        }
    }

    /// Accepted messages with their channel, in send order
    pub fn sent(&self) -> Vec<(u64, Message)> {
        self.state
            .lock()
            .map(|s| s.sent.clone())
            .unwrap_or_default()
    }

    /// Number of send calls, accepted or not
    pub fn attempts(&self) -> usize {
        self.state.lock().map(|s| s.attempts).unwrap_or_default()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn send(&self, channel_id: u64, message: &Message) -> Result<(), ExError> {
        let mut state = self.state.lock().map_err(poison_err)?;
        state.attempts += 1;

        if self
            .accept_limit
            .is_some_and(|limit| state.sent.len() >= limit)
        {
            return Err(ExError::from(CaseWatchError::DispatchRejected {
                channel_id,
                reason: "channel refused message".to_string(),
            })
            .with_op("send"));
        }

        state.sent.push((channel_id, message.clone()));
        Ok(())
    }
}
