use async_trait::async_trait;
use casewatch_core::errors::{CaseWatchError, ExError};
use casewatch_core::Message;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use super::Sink;

/// Writes each message as a channel header line followed by its body.
///
/// Text messages are written verbatim, cards as one line of JSON.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

/// Sink printing to standard output
pub type StdoutSink = WriterSink<tokio::io::Stdout>;

impl StdoutSink {
    pub fn stdout() -> Self {
        WriterSink::new(tokio::io::stdout())
    }
}

impl<W> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

fn rejected(channel_id: u64, reason: String) -> ExError {
    ExError::from(CaseWatchError::DispatchRejected { channel_id, reason }).with_op("send")
}

#[async_trait]
impl<W> Sink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&self, channel_id: u64, message: &Message) -> Result<(), ExError> {
        let body = match message {
            Message::Text(text) => text.clone(),
            Message::Card(card) => serde_json::to_string(card)
                .map_err(|e| rejected(channel_id, format!("card encoding failed: {e}")))?,
        };

        let mut writer = self.writer.lock().await;
        let framed = format!("#{channel_id}\n{body}\n");
        writer
            .write_all(framed.as_bytes())
            .await
            .map_err(|e| rejected(channel_id, e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| rejected(channel_id, e.to_string()))
    }
}
