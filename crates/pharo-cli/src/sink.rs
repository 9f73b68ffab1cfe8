use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use pharo_composer::{OutgoingPost, PostSink, SinkError};
use pharo_core::ChannelId;

/// Writes submissions to a stream instead of a chat server.
pub struct WriterSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, value: serde_json::Value) -> Result<(), SinkError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| SinkError::Unavailable("output lock poisoned".into()))?;
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| SinkError::Rejected(e.to_string()))?;
        writeln!(out, "{text}").map_err(|e| SinkError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl<W: Write + Send> PostSink for WriterSink<W> {
    async fn create_post(&self, post: &OutgoingPost) -> Result<(), SinkError> {
        let value = serde_json::to_value(post).map_err(|e| SinkError::Rejected(e.to_string()))?;
        self.emit(serde_json::json!({ "post": value }))
    }

    async fn execute_command(&self, channel: &ChannelId, command: &str) -> Result<(), SinkError> {
        self.emit(serde_json::json!({ "command": command, "channel_id": channel }))
    }

    async fn react(&self, channel: &ChannelId, emoji: &str, add: bool) -> Result<(), SinkError> {
        self.emit(serde_json::json!({ "reaction": emoji, "add": add, "channel_id": channel }))
    }
}
