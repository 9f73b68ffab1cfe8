//! Turns a draft into the text that is actually posted.
//!
//! Standard layout:
//!
//! ```text
//! ##### [:exclamation: ][Topic - ]Subject \r\n
//! [`Source` ]message\r\n\r\n
//!  #topic #source #region #other... #group... [#important @channel] [#dualpublish]
//! ```

use std::collections::HashSet;

use pharo_core::config::ComposerConfig;
use pharo_core::UserRole;
use pharo_drafts::{DraftField, DraftState};
use pharo_tags::TagCatalog;
use tracing::debug;

use crate::context::Variant;
use crate::error::{ComposeError, Result, ValidationError};

const HEADER_PREFIX: &str = "##### ";
const CRITICAL_MARKER: &str = ":exclamation: ";
const LINE_BREAK: &str = "\r\n";
const IMPORTANT_TAGS: &str = "#important @channel";
const DUAL_PUBLISH_TAG: &str = "#dualpublish";
const ELLIPSIS: &str = "...";

/// Composition rules that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposePolicy {
    pub exempt_positions: Vec<String>,
    pub subject_words: usize,
    pub confirm_notify_all: bool,
    pub notify_all_threshold: usize,
}

impl Default for ComposePolicy {
    fn default() -> Self {
        Self::from(&ComposerConfig::default())
    }
}

impl From<&ComposerConfig> for ComposePolicy {
    fn from(c: &ComposerConfig) -> Self {
        Self {
            exempt_positions: c.exempt_positions.clone(),
            subject_words: c.subject_words,
            confirm_notify_all: c.confirm_notify_all,
            notify_all_threshold: c.notify_all_threshold,
        }
    }
}

/// Builds outgoing message text. Pure: no I/O, no draft mutation.
pub struct Assembler<'a> {
    catalog: &'a TagCatalog,
    policy: &'a ComposePolicy,
}

impl<'a> Assembler<'a> {
    pub fn new(catalog: &'a TagCatalog, policy: &'a ComposePolicy) -> Self {
        Self { catalog, policy }
    }

    /// Validate `draft` for `variant` and produce the message to submit.
    pub fn assemble(&self, variant: Variant, draft: &DraftState, role: &UserRole) -> Result<String> {
        match variant {
            Variant::Standard => {
                self.validate_standard(draft, role)?;
                Ok(self.standard(draft, role))
            }
            Variant::Tweet | Variant::TweetAdmin => {
                if draft.is_blank(DraftField::Topic) {
                    return Err(ValidationError {
                        missing_fields: vec![DraftField::Topic],
                    }
                    .into());
                }
                Ok(self.tweet(draft))
            }
            Variant::TweetDisabled => Err(ComposeError::PostingDisabled),
            Variant::Default => Ok(draft.message.clone()),
        }
    }

    /// Topic, source and subject are all required unless the role is exempt.
    pub fn validate_standard(
        &self,
        draft: &DraftState,
        role: &UserRole,
    ) -> std::result::Result<(), ValidationError> {
        if role.is_exempt(&self.policy.exempt_positions) {
            return Ok(());
        }
        let missing_fields: Vec<DraftField> = DraftField::ALL
            .into_iter()
            .filter(|f| draft.is_blank(*f))
            .collect();
        if missing_fields.is_empty() {
            Ok(())
        } else {
            debug!(missing = ?missing_fields, "draft failed validation");
            Err(ValidationError { missing_fields })
        }
    }

    /// First words of the message followed by an ellipsis.
    pub fn auto_subject(&self, message: &str) -> String {
        let words: Vec<&str> = message
            .split_whitespace()
            .take(self.policy.subject_words)
            .collect();
        if words.is_empty() {
            String::new()
        } else {
            format!("{} {ELLIPSIS}", words.join(" "))
        }
    }

    fn standard(&self, draft: &DraftState, role: &UserRole) -> String {
        let topic = draft.topic.trim();
        let source = draft.source.trim();
        let mut subject = draft.subject.trim().to_string();

        if subject.is_empty() && !topic.is_empty() {
            subject = self.auto_subject(&draft.message);
            // Attachment-only posts keep the topic header.
            if subject.is_empty() {
                subject = ELLIPSIS.to_string();
            }
        }
        // Nothing structured (exempt role, bare text): still give it a header.
        if subject.is_empty() && source.is_empty() {
            subject = self.auto_subject(&draft.message);
        }

        let mut out = String::new();
        if !subject.is_empty() {
            out.push_str(HEADER_PREFIX);
            if draft.critical {
                out.push_str(CRITICAL_MARKER);
            }
            if !topic.is_empty() {
                out.push_str(self.catalog.topic_label(topic));
                out.push_str(" - ");
            }
            out.push_str(&subject);
            out.push(' ');
            out.push_str(LINE_BREAK);
        } else if draft.critical {
            out.push_str(CRITICAL_MARKER);
        }

        if !source.is_empty() {
            out.push('`');
            out.push_str(self.catalog.source_label(source));
            out.push_str("` ");
        }

        out.push_str(&draft.message);
        out.push_str(LINE_BREAK);
        out.push_str(LINE_BREAK);

        for tag in self.standard_hashtags(draft, role) {
            out.push_str(" #");
            out.push_str(&tag);
        }
        if draft.critical {
            out.push(' ');
            out.push_str(IMPORTANT_TAGS);
        }
        if draft.dual_publish {
            out.push(' ');
            out.push_str(DUAL_PUBLISH_TAG);
        }
        out
    }

    fn tweet(&self, draft: &DraftState) -> String {
        let topic = draft.topic.trim();

        let mut out = String::new();
        if !topic.is_empty() {
            out.push('`');
            out.push_str(self.catalog.topic_label(topic));
            out.push_str("` - ");
        }
        out.push_str(&draft.message);
        out.push(' ');

        let mut tags = Hashtags::default();
        tags.push(topic);
        if let Some(region) = self.catalog.topic_region(topic) {
            tags.push(region);
        }
        for tag in tags.into_vec() {
            out.push_str(" #");
            out.push_str(&tag);
        }

        if draft.critical {
            out = format!("** {out} #important **");
        }
        out
    }

    /// Tag-derived hashtags in posting order, lower-cased, duplicates dropped.
    fn standard_hashtags(&self, draft: &DraftState, role: &UserRole) -> Vec<String> {
        let topic = draft.topic.trim();
        let source = draft.source.trim();

        let mut tags = Hashtags::default();
        tags.push(topic);
        if self.catalog.source_shows_hashtag(source) {
            tags.push(source);
        }
        if let Some(region) = self.catalog.topic_region(topic) {
            tags.push(region);
        }
        for other in &draft.other_tags {
            tags.push(other);
        }
        for group in self.catalog.group_tags_for(&role.position) {
            tags.push(group);
        }
        tags.into_vec()
    }
}

#[derive(Default)]
struct Hashtags {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl Hashtags {
    fn push(&mut self, raw: &str) {
        let tag = raw.trim().trim_start_matches('#').to_lowercase();
        if !tag.is_empty() && self.seen.insert(tag.clone()) {
            self.ordered.push(tag);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
