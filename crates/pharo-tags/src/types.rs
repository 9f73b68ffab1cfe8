use serde::{Deserialize, Deserializer, Serialize};

/// A selectable tag from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_other_tags: Vec<TagRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Older documents ship this as the string `"true"`.
    #[serde(default, deserialize_with = "flag_or_string")]
    pub show_hashtag: bool,
}

impl Tag {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_related(mut self, related: Vec<TagRef>) -> Self {
        self.related_other_tags = related;
        self
    }

    pub fn with_hashtag(mut self) -> Self {
        self.show_hashtag = true;
        self
    }

    pub fn option(&self) -> TagOption {
        TagOption {
            value: self.tag.clone(),
            label: self.name.clone(),
        }
    }
}

/// Reference to an "other" tag related to a topic or source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub name: String,
}

impl TagRef {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
        }
    }
}

/// Topic tags, grouped as the catalog document ships them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicTags {
    #[serde(default, deserialize_with = "null_as_default")]
    pub asset_topic_tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country_topic_tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub general_topic_tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region_topic_tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internal_topic_tags: Vec<Tag>,
}

/// A team tag applied automatically to users whose position matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTag {
    #[serde(default)]
    pub tag: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_positions: Vec<String>,
}

/// `{ value, label }` pair as consumed by select widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOption {
    pub value: String,
    pub label: String,
}

impl From<&TagRef> for TagOption {
    fn from(r: &TagRef) -> Self {
        Self {
            value: r.tag.clone(),
            label: r.name.clone(),
        }
    }
}

/// A labelled group of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub label: String,
    pub options: Vec<TagOption>,
}

impl TagGroup {
    pub fn new(label: &str, options: Vec<TagOption>) -> Self {
        Self {
            label: label.to_string(),
            options,
        }
    }
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn flag_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}
