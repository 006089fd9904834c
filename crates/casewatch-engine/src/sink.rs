//! Message delivery.
//!
//! - [`Sink`]: trait implemented by every downstream channel
//! - [`WriterSink`] / [`StdoutSink`]: write messages to an async stream
//! - [`MemorySink`]: records messages in memory for tests and dry runs

pub mod memory;
pub mod writer;

use async_trait::async_trait;
use casewatch_core::errors::ExError;
use casewatch_core::Message;

pub use memory::MemorySink;
pub use writer::{StdoutSink, WriterSink};

/// Downstream channel for rendered messages.
///
/// The orchestrator sends a cycle's messages one at a time, in order, and
/// never retries a failed send.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Deliver one message to a channel.
    ///
    /// # Errors
    ///
    /// Returns `DispatchRejected` when the channel refuses the message.
    async fn send(&self, channel_id: u64, message: &Message) -> Result<(), ExError>;
}
