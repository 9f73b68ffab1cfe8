use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform channel identifier. Drafts are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Channel kind as reported by the chat platform.
///
/// Serialised with the platform's single-letter codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    #[serde(rename = "D")]
    Direct,
    #[serde(rename = "G")]
    Group,
    #[default]
    #[serde(rename = "O")]
    Public,
    #[serde(rename = "P")]
    Private,
}

impl ChannelType {
    pub fn is_direct_or_group(self) -> bool {
        matches!(self, ChannelType::Direct | ChannelType::Group)
    }

    /// Parse either a wire code (`O`, `P`, `D`, `G`) or a lowercase name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "o" | "open" | "public" => Some(ChannelType::Public),
            "p" | "private" => Some(ChannelType::Private),
            "d" | "direct" | "dm" => Some(ChannelType::Direct),
            "g" | "group" | "gm" => Some(ChannelType::Group),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChannelType::Direct => "direct",
            ChannelType::Group => "group",
            ChannelType::Public => "public",
            ChannelType::Private => "private",
        };
        f.write_str(s)
    }
}

/// The posting user's job title, as stored on their profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub user_id: String,
    pub position: String,
}

impl UserRole {
    pub fn new(user_id: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            position: position.into(),
        }
    }

    /// True when the position contains any of `exempt_positions`
    /// (case-insensitive). Exempt users may post without structured fields.
    pub fn is_exempt(&self, exempt_positions: &[String]) -> bool {
        let position = self.position.to_lowercase();
        exempt_positions
            .iter()
            .any(|p| !p.is_empty() && position.contains(&p.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exempt() -> Vec<String> {
        vec!["portfolio".to_string(), "managing partner".to_string()]
    }

    #[test]
    fn exemption_is_case_insensitive() {
        assert!(UserRole::new("u1", "Senior Portfolio Manager").is_exempt(&exempt()));
        assert!(UserRole::new("u1", "MANAGING PARTNER").is_exempt(&exempt()));
        assert!(!UserRole::new("u1", "Research Analyst").is_exempt(&exempt()));
    }

    #[test]
    fn empty_exempt_entry_matches_nothing() {
        let role = UserRole::new("u1", "Analyst");
        assert!(!role.is_exempt(&[String::new()]));
    }

    #[test]
    fn channel_type_wire_codes() {
        assert_eq!(serde_json::to_string(&ChannelType::Private).unwrap(), r#""P""#);
        let t: ChannelType = serde_json::from_str(r#""D""#).unwrap();
        assert_eq!(t, ChannelType::Direct);
    }

    #[test]
    fn channel_type_parse_accepts_names_and_codes() {
        assert_eq!(ChannelType::parse("O"), Some(ChannelType::Public));
        assert_eq!(ChannelType::parse("private"), Some(ChannelType::Private));
        assert_eq!(ChannelType::parse("gm"), Some(ChannelType::Group));
        assert_eq!(ChannelType::parse("channel"), None);
    }
}
