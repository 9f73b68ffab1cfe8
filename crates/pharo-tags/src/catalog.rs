use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{null_as_default, GroupTag, Tag, TagGroup, TagOption, TopicTags};

/// The tag vocabulary offered by the structured composer.
///
/// Loaded once per session and treated as immutable; every list defaults to
/// empty so a partial document still produces a usable catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic_tags: TopicTags,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_tags: Vec<GroupTag>,
}

impl TagCatalog {
    /// Decode a catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.all_topic_tags().next().is_none()
            && self.source_tags.is_empty()
            && self.common_tags.is_empty()
            && self.group_tags.is_empty()
    }

    /// Every topic tag: asset, country, general, region, then internal.
    pub fn all_topic_tags(&self) -> impl Iterator<Item = &Tag> {
        let t = &self.topic_tags;
        t.asset_topic_tags
            .iter()
            .chain(&t.country_topic_tags)
            .chain(&t.general_topic_tags)
            .chain(&t.region_topic_tags)
            .chain(&t.internal_topic_tags)
    }

    /// Topic options grouped for display.
    pub fn grouped_topic_tags(&self) -> Vec<TagGroup> {
        let t = &self.topic_tags;
        [
            ("General Tags", &t.general_topic_tags),
            ("Region Tags", &t.region_topic_tags),
            ("Country Tags", &t.country_topic_tags),
            ("Asset Tags", &t.asset_topic_tags),
            ("Internal Tags", &t.internal_topic_tags),
        ]
        .into_iter()
        .map(|(label, tags)| TagGroup::new(label, tags.iter().map(Tag::option).collect()))
        .collect()
    }

    pub fn source_options(&self) -> Vec<TagOption> {
        self.source_tags.iter().map(Tag::option).collect()
    }

    pub fn common_options(&self) -> Vec<TagOption> {
        self.common_tags.iter().map(Tag::option).collect()
    }

    pub fn topic(&self, tag: &str) -> Option<&Tag> {
        self.all_topic_tags().find(|t| t.tag == tag)
    }

    pub fn source(&self, tag: &str) -> Option<&Tag> {
        self.source_tags.iter().find(|t| t.tag == tag)
    }

    /// Display name for a topic, falling back to the raw tag.
    pub fn topic_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.topic(tag).map(|t| t.name.as_str()).unwrap_or(tag)
    }

    /// Display name for a source, falling back to the raw tag.
    pub fn source_label<'a>(&'a self, tag: &'a str) -> &'a str {
        self.source(tag).map(|t| t.name.as_str()).unwrap_or(tag)
    }

    pub fn topic_region(&self, tag: &str) -> Option<&str> {
        self.topic(tag)
            .and_then(|t| t.region.as_deref())
            .filter(|r| !r.trim().is_empty())
    }

    /// Whether the source's own tag is appended as a hashtag.
    pub fn source_shows_hashtag(&self, tag: &str) -> bool {
        self.source(tag).is_some_and(|t| t.show_hashtag)
    }

    /// Team tags for a position. A group contributes its tag once, on the
    /// first of its `related_positions` found in `position`.
    pub fn group_tags_for(&self, position: &str) -> Vec<&str> {
        self.group_tags
            .iter()
            .filter(|g| {
                g.related_positions
                    .iter()
                    .any(|p| !p.is_empty() && position.contains(p.as_str()))
            })
            .map(|g| g.tag.as_str())
            .collect()
    }
}
