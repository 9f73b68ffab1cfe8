use async_trait::async_trait;
use pharo_core::ChannelId;
use serde::{Deserialize, Serialize};

use crate::error::SinkError;

/// A fully assembled post handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingPost {
    pub channel_id: ChannelId,
    pub user_id: String,
    pub message: String,
    pub file_ids: Vec<String>,
    /// Client-side id (`{user_id}:{create_at}`) used to reconcile the echo.
    pub pending_post_id: String,
    /// Milliseconds since the Unix epoch.
    pub create_at: i64,
}

impl OutgoingPost {
    pub fn new(
        channel_id: ChannelId,
        user_id: &str,
        message: String,
        file_ids: Vec<String>,
    ) -> Self {
        let create_at = chrono::Utc::now().timestamp_millis();
        Self {
            channel_id,
            user_id: user_id.to_string(),
            message,
            file_ids,
            pending_post_id: format!("{user_id}:{create_at}"),
            create_at,
        }
    }
}

/// The message transport the composer submits through.
///
/// Implementations own networking and persistence; the composer never
/// touches either directly.
#[async_trait]
pub trait PostSink: Send + Sync {
    /// Publish a post with its attachments.
    async fn create_post(&self, post: &OutgoingPost) -> Result<(), SinkError>;

    /// Run a slash command in the channel.
    async fn execute_command(&self, channel: &ChannelId, command: &str) -> Result<(), SinkError>;

    /// Add (or remove) an emoji reaction on the latest post in the channel.
    async fn react(&self, channel: &ChannelId, emoji: &str, add: bool) -> Result<(), SinkError>;
}
