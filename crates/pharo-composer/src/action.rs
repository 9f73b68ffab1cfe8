use std::sync::LazyLock;

use regex::Regex;

static REACTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([+-]):([^:\s]+):\s*$").ok());

static AT_CHANNEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(^|[^\w@])@(all|channel)\b").ok());

/// What a submitted message asks the platform to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction<'a> {
    /// Leading `/`: run a slash command.
    Command(&'a str),
    /// `+:emoji:` or `-:emoji:` on the latest post.
    Reaction { add: bool, emoji: &'a str },
    /// Ordinary post.
    Post,
}

pub fn classify(message: &str) -> SubmitAction<'_> {
    if message.starts_with('/') {
        return SubmitAction::Command(message.trim_end());
    }
    if let Some(caps) = REACTION.as_ref().and_then(|re| re.captures(message)) {
        if let (Some(sign), Some(emoji)) = (caps.get(1), caps.get(2)) {
            return SubmitAction::Reaction {
                add: sign.as_str() == "+",
                emoji: emoji.as_str(),
            };
        }
    }
    SubmitAction::Post
}

/// True when the message notifies the whole channel.
pub fn mentions_channel(message: &str) -> bool {
    AT_CHANNEL.as_ref().is_some_and(|re| re.is_match(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_prefix_is_command() {
        assert_eq!(classify("/away  "), SubmitAction::Command("/away"));
        assert_eq!(classify(" /away"), SubmitAction::Post);
    }

    #[test]
    fn reactions_parse_sign_and_emoji() {
        assert_eq!(
            classify("+:thumbsup:"),
            SubmitAction::Reaction {
                add: true,
                emoji: "thumbsup"
            }
        );
        assert_eq!(
            classify("-:smile: "),
            SubmitAction::Reaction {
                add: false,
                emoji: "smile"
            }
        );
        assert_eq!(classify("+:two words:"), SubmitAction::Post);
        assert_eq!(classify("great +:smile:"), SubmitAction::Post);
    }

    #[test]
    fn channel_mentions() {
        assert!(mentions_channel("heads up @channel"));
        assert!(mentions_channel("@ALL please read"));
        assert!(!mentions_channel("mail me at desk@channel.com"));
        assert!(!mentions_channel("@channels are fun"));
        assert!(!mentions_channel("nothing here"));
    }
}
