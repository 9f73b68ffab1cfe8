use std::collections::HashSet;

use crate::catalog::TagCatalog;
use crate::types::{Tag, TagGroup, TagOption};

pub const COMMON_GROUP: &str = "Common Tags";
pub const TOPIC_GROUP: &str = "Topic Tags";
pub const SOURCE_GROUP: &str = "Source Tags";

/// "Other" tags offered for the current selection, as three groups:
/// common, topic-derived and source-derived.
///
/// Without a selected topic (or source) the corresponding group is the union
/// of `related_other_tags` across every topic (or source) in the catalog.
/// Each group is de-duplicated by tag value, first occurrence kept.
pub fn related_other_tags(
    catalog: &TagCatalog,
    topic: Option<&str>,
    source: Option<&str>,
) -> Vec<TagGroup> {
    let topic = topic.filter(|t| !t.trim().is_empty());
    let source = source.filter(|s| !s.trim().is_empty());

    let topic_related = match topic {
        Some(tag) => collect_related(catalog.topic(tag)),
        None => collect_related(catalog.all_topic_tags()),
    };
    let source_related = match source {
        Some(tag) => collect_related(catalog.source(tag)),
        None => collect_related(catalog.source_tags.iter()),
    };

    vec![
        TagGroup::new(COMMON_GROUP, dedup(catalog.common_options())),
        TagGroup::new(TOPIC_GROUP, topic_related),
        TagGroup::new(SOURCE_GROUP, source_related),
    ]
}

fn collect_related<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Vec<TagOption> {
    dedup(
        tags.into_iter()
            .flat_map(|t| t.related_other_tags.iter().map(TagOption::from))
            .collect(),
    )
}

fn dedup(options: Vec<TagOption>) -> Vec<TagOption> {
    let mut seen = HashSet::new();
    options
        .into_iter()
        .filter(|o| seen.insert(o.value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TagRef, TopicTags};

    fn catalog() -> TagCatalog {
        TagCatalog {
            topic_tags: TopicTags {
                country_topic_tags: vec![
                    Tag::new("usa", "USA").with_related(vec![
                        TagRef::new("fed", "Fed"),
                        TagRef::new("rates", "Rates"),
                        TagRef::new("fed", "Federal Reserve"),
                    ]),
                    Tag::new("uk", "UK").with_related(vec![
                        TagRef::new("boe", "BoE"),
                        TagRef::new("rates", "Rates"),
                    ]),
                ],
                ..Default::default()
            },
            source_tags: vec![
                Tag::new("reuters", "Reuters").with_related(vec![TagRef::new("wire", "Wire")]),
                Tag::new("bbg", "Bloomberg").with_related(vec![TagRef::new("terminal", "Terminal")]),
            ],
            common_tags: vec![Tag::new("breaking", "Breaking"), Tag::new("breaking", "Again")],
            group_tags: vec![],
        }
    }

    fn values(group: &TagGroup) -> Vec<&str> {
        group.options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn selected_topic_narrows_topic_group() {
        let groups = related_other_tags(&catalog(), Some("usa"), None);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].label, COMMON_GROUP);
        assert_eq!(values(&groups[0]), vec!["breaking"]);
        assert_eq!(values(&groups[1]), vec!["fed", "rates"]);
        assert_eq!(groups[1].options[0].label, "Fed");
        // no source selected: union over every source
        assert_eq!(values(&groups[2]), vec!["wire", "terminal"]);
    }

    #[test]
    fn no_selection_broadens_to_union() {
        let groups = related_other_tags(&catalog(), None, None);
        assert_eq!(values(&groups[1]), vec!["fed", "rates", "boe"]);
        assert_eq!(values(&groups[2]), vec!["wire", "terminal"]);
    }

    #[test]
    fn selected_source_narrows_source_group() {
        let groups = related_other_tags(&catalog(), None, Some("bbg"));
        assert_eq!(values(&groups[2]), vec!["terminal"]);
    }

    #[test]
    fn unknown_selection_yields_empty_group() {
        let groups = related_other_tags(&catalog(), Some("mars"), Some("nobody"));
        assert!(groups[1].options.is_empty());
        assert!(groups[2].options.is_empty());
    }

    #[test]
    fn blank_selection_counts_as_none() {
        let groups = related_other_tags(&catalog(), Some("  "), None);
        assert_eq!(values(&groups[1]), vec!["fed", "rates", "boe"]);
    }
}
