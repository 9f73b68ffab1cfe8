use serde::{Deserialize, Serialize};
use std::fmt;

/// In-progress, unsent message state for one channel.
///
/// `topic` and `source` hold catalog tag values; an empty string means
/// nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftState {
    pub message: String,
    pub topic: String,
    pub source: String,
    pub subject: String,
    /// Selected "other" tags in selection order, no duplicates.
    pub other_tags: Vec<String>,
    pub critical: bool,
    pub dual_publish: bool,
    /// Uploaded attachments ready to send with the post.
    pub file_ids: Vec<String>,
    /// Client ids of uploads that have not finished yet.
    pub uploads_in_progress: Vec<String>,
}

impl DraftState {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn set_topic(&mut self, tag: impl Into<String>) {
        self.topic = tag.into();
    }

    pub fn clear_topic(&mut self) {
        self.topic.clear();
    }

    pub fn set_source(&mut self, tag: impl Into<String>) {
        self.source = tag.into();
    }

    pub fn clear_source(&mut self) {
        self.source.clear();
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Add an "other" tag. Returns false if it was already selected.
    pub fn select_other(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if tag.trim().is_empty() || self.other_tags.contains(&tag) {
            return false;
        }
        self.other_tags.push(tag);
        true
    }

    pub fn deselect_other(&mut self, tag: &str) -> bool {
        let before = self.other_tags.len();
        self.other_tags.retain(|t| t != tag);
        self.other_tags.len() != before
    }

    /// Replace the whole selection, dropping duplicates.
    pub fn set_other_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.other_tags.clear();
        for tag in tags {
            self.select_other(tag);
        }
    }

    pub fn start_upload(&mut self, client_id: impl Into<String>) {
        self.uploads_in_progress.push(client_id.into());
    }

    /// Move a finished upload into the attachment list.
    pub fn finish_upload(&mut self, client_id: &str, file_id: impl Into<String>) {
        self.uploads_in_progress.retain(|id| id != client_id);
        self.file_ids.push(file_id.into());
    }

    /// Drop an attachment or an in-flight upload by id.
    pub fn remove_attachment(&mut self, id: &str) -> bool {
        let before = self.file_ids.len() + self.uploads_in_progress.len();
        self.file_ids.retain(|f| f != id);
        self.uploads_in_progress.retain(|u| u != id);
        self.file_ids.len() + self.uploads_in_progress.len() != before
    }

    pub fn has_uploads_in_progress(&self) -> bool {
        !self.uploads_in_progress.is_empty()
    }

    /// Something worth sending: non-blank text or at least one attachment.
    pub fn has_content(&self) -> bool {
        !self.message.trim().is_empty() || !self.file_ids.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        *self == DraftState::default()
    }

    /// Value of a structured field, for validation.
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Topic => &self.topic,
            DraftField::Source => &self.source,
            DraftField::Subject => &self.subject,
        }
    }

    pub fn is_blank(&self, field: DraftField) -> bool {
        self.field(field).trim().is_empty()
    }
}

/// Structured draft fields that can be required before submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Topic,
    Source,
    Subject,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Topic, DraftField::Source, DraftField::Subject];
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DraftField::Topic => "topic",
            DraftField::Source => "source",
            DraftField::Subject => "subject",
        };
        f.write_str(s)
    }
}
