use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pharo_core::UserRole;
use pharo_drafts::{DraftState, DraftStore};
use pharo_tags::{related_other_tags, TagCatalog, TagGroup};
use tracing::{info, warn};

use crate::action::{classify, mentions_channel, SubmitAction};
use crate::assemble::{Assembler, ComposePolicy};
use crate::context::ComposerContext;
use crate::error::{ComposeError, Result};
use crate::sink::{OutgoingPost, PostSink};

/// Why a submit did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another submit is still running.
    InFlight,
    UploadsInProgress,
    /// No text and no attachments.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted(OutgoingPost),
    CommandExecuted,
    Reacted,
    Ignored(IgnoreReason),
    /// The message notifies a large channel; resubmit with
    /// [`Composer::submit_confirmed`] once the user agrees.
    NeedsConfirmation { members: usize },
}

/// The post composer for the channel currently in view.
///
/// Drafts live in the [`DraftStore`] keyed by channel, so navigating away and
/// back restores them. Only one submit runs at a time.
pub struct Composer {
    context: ComposerContext,
    role: UserRole,
    catalog: Arc<TagCatalog>,
    policy: ComposePolicy,
    drafts: Arc<dyn DraftStore>,
    sink: Arc<dyn PostSink>,
    submitting: AtomicBool,
}

impl Composer {
    pub fn new(
        context: ComposerContext,
        role: UserRole,
        catalog: Arc<TagCatalog>,
        policy: ComposePolicy,
        drafts: Arc<dyn DraftStore>,
        sink: Arc<dyn PostSink>,
    ) -> Self {
        Self {
            context,
            role,
            catalog,
            policy,
            drafts,
            sink,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn context(&self) -> &ComposerContext {
        &self.context
    }

    /// Switch to another channel. The previous channel's draft stays stored.
    pub fn navigate(&mut self, context: ComposerContext) {
        info!(
            channel = %context.channel_id,
            variant = ?context.variant,
            "composer switched channel"
        );
        self.context = context;
    }

    /// Swap in a newer catalog snapshot (e.g. after the startup fetch lands).
    pub fn set_catalog(&mut self, catalog: Arc<TagCatalog>) {
        self.catalog = catalog;
    }

    pub fn draft(&self) -> Result<DraftState> {
        Ok(self.drafts.load_or_default(&self.context.channel_id)?)
    }

    /// Apply an edit to the current channel's draft and persist it.
    pub fn edit_draft(&self, edit: impl FnOnce(&mut DraftState)) -> Result<DraftState> {
        let mut draft = self.draft()?;
        edit(&mut draft);
        self.drafts.save(&self.context.channel_id, &draft)?;
        Ok(draft)
    }

    /// "Other" tag groups for the draft's current topic and source.
    pub fn related_tags(&self) -> Result<Vec<TagGroup>> {
        let draft = self.draft()?;
        Ok(related_other_tags(
            &self.catalog,
            Some(draft.topic.as_str()),
            Some(draft.source.as_str()),
        ))
    }

    /// The message that would be posted right now.
    pub fn preview(&self) -> Result<String> {
        let draft = self.draft()?;
        Assembler::new(&self.catalog, &self.policy).assemble(self.context.variant, &draft, &self.role)
    }

    pub async fn submit(&self) -> Result<SubmitOutcome> {
        self.submit_inner(false).await
    }

    /// Submit after the user confirmed notifying the whole channel.
    pub async fn submit_confirmed(&self) -> Result<SubmitOutcome> {
        self.submit_inner(true).await
    }

    async fn submit_inner(&self, confirmed: bool) -> Result<SubmitOutcome> {
        if !self.context.variant.accepts_input() {
            return Err(ComposeError::PostingDisabled);
        }
        let Some(_guard) = SubmitGuard::acquire(&self.submitting) else {
            return Ok(SubmitOutcome::Ignored(IgnoreReason::InFlight));
        };

        let channel = &self.context.channel_id;
        let draft = self.draft()?;

        if draft.has_uploads_in_progress() {
            return Ok(SubmitOutcome::Ignored(IgnoreReason::UploadsInProgress));
        }
        if !draft.has_content() {
            return Ok(SubmitOutcome::Ignored(IgnoreReason::Empty));
        }

        let members = self.context.member_count;
        if !confirmed
            && self.policy.confirm_notify_all
            && members > self.policy.notify_all_threshold
            && mentions_channel(&draft.message)
        {
            return Ok(SubmitOutcome::NeedsConfirmation { members });
        }

        let outcome = match classify(&draft.message) {
            SubmitAction::Command(command) => {
                self.sink
                    .execute_command(channel, command)
                    .await
                    .inspect_err(|e| warn!(channel = %channel, error = %e, "command failed"))?;
                SubmitOutcome::CommandExecuted
            }
            SubmitAction::Reaction { add, emoji } => {
                self.sink
                    .react(channel, emoji, add)
                    .await
                    .inspect_err(|e| warn!(channel = %channel, error = %e, "reaction failed"))?;
                SubmitOutcome::Reacted
            }
            SubmitAction::Post => {
                let message = Assembler::new(&self.catalog, &self.policy).assemble(
                    self.context.variant,
                    &draft,
                    &self.role,
                )?;
                let post = OutgoingPost::new(
                    channel.clone(),
                    &self.role.user_id,
                    message,
                    draft.file_ids.clone(),
                );
                self.sink
                    .create_post(&post)
                    .await
                    .inspect_err(|e| warn!(channel = %channel, error = %e, "post rejected, draft kept"))?;
                info!(channel = %channel, pending = %post.pending_post_id, "post submitted");
                SubmitOutcome::Posted(post)
            }
        };

        self.drafts.clear(channel)?;
        Ok(outcome)
    }
}

/// Holds the `submitting` flag for the duration of one submit.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);
        let first = SubmitGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(SubmitGuard::acquire(&flag).is_none());
        drop(first);
        assert!(SubmitGuard::acquire(&flag).is_some());
    }
}
