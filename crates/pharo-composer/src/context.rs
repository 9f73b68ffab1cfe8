use pharo_core::{ChannelId, ChannelType};
use serde::{Deserialize, Serialize};

const MARKET_COMMENTARY: &str = "market-commentary";
const RESEARCH_PREFIX: &str = "/research/channels/";
const TWEETS_ADMIN: &str = "tweets-admin";
const TWEETS_PREFIX: &str = "tweets-";
const TWEETS: &str = "tweets";

/// Which composer a channel gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Structured composer: topic, source, subject, other tags, flags.
    Standard,
    /// Tweet composer for channel administrators.
    TweetAdmin,
    /// Tweet composer: topic plus free text.
    Tweet,
    /// Read-only tweet feed; nothing may be posted.
    TweetDisabled,
    /// Plain free-text composer.
    Default,
}

impl Variant {
    pub fn accepts_input(self) -> bool {
        self != Variant::TweetDisabled
    }

    pub fn is_tweet(self) -> bool {
        matches!(self, Variant::Tweet | Variant::TweetAdmin)
    }
}

/// Classify a channel path. Rules are checked in order, first match wins.
pub fn select_variant(path: &str, channel_type: ChannelType) -> Variant {
    if path.contains(MARKET_COMMENTARY) {
        Variant::Standard
    } else if path.starts_with(RESEARCH_PREFIX) && channel_type != ChannelType::Private {
        Variant::Standard
    } else if path.contains(TWEETS_ADMIN) {
        Variant::TweetAdmin
    } else if path.contains(TWEETS_PREFIX) {
        Variant::Tweet
    } else if path.contains(TWEETS) {
        Variant::TweetDisabled
    } else {
        Variant::Default
    }
}

/// Where the user is composing. Rebuilt on every navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerContext {
    pub channel_id: ChannelId,
    pub channel_path: String,
    pub channel_type: ChannelType,
    pub variant: Variant,
    /// Channel membership, used by the notify-all confirmation.
    #[serde(default)]
    pub member_count: usize,
}

impl ComposerContext {
    pub fn navigate(
        channel_id: impl Into<ChannelId>,
        channel_path: impl Into<String>,
        channel_type: ChannelType,
    ) -> Self {
        let channel_path = channel_path.into();
        let variant = select_variant(&channel_path, channel_type);
        Self {
            channel_id: channel_id.into(),
            channel_path,
            channel_type,
            variant,
            member_count: 0,
        }
    }

    pub fn with_member_count(mut self, member_count: usize) -> Self {
        self.member_count = member_count;
        self
    }

    pub fn is_admin_variant(&self) -> bool {
        self.variant == Variant::TweetAdmin
    }
}
