use dashmap::DashMap;
use pharo_core::ChannelId;
use tracing::debug;

use crate::error::Result;
use crate::types::DraftState;

/// Per-channel draft persistence.
///
/// Saving an empty draft removes it, so navigating away from an untouched
/// channel leaves nothing behind.
pub trait DraftStore: Send + Sync {
    fn load(&self, channel: &ChannelId) -> Result<Option<DraftState>>;

    fn save(&self, channel: &ChannelId, draft: &DraftState) -> Result<()>;

    fn clear(&self, channel: &ChannelId) -> Result<()>;

    /// The stored draft, or a fresh one when the channel has none.
    fn load_or_default(&self, channel: &ChannelId) -> Result<DraftState> {
        Ok(self.load(channel)?.unwrap_or_default())
    }
}

/// Process-local draft store.
#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: DashMap<ChannelId, DraftState>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self, channel: &ChannelId) -> Result<Option<DraftState>> {
        Ok(self.drafts.get(channel).map(|d| d.value().clone()))
    }

    fn save(&self, channel: &ChannelId, draft: &DraftState) -> Result<()> {
        if draft.is_empty() {
            return self.clear(channel);
        }
        debug!(channel = %channel, "draft saved");
        self.drafts.insert(channel.clone(), draft.clone());
        Ok(())
    }

    fn clear(&self, channel: &ChannelId) -> Result<()> {
        self.drafts.remove(channel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafts_are_keyed_by_channel() {
        let store = MemoryDraftStore::new();
        let a = ChannelId::from("a");
        let b = ChannelId::from("b");

        store.save(&a, &DraftState::with_message("for a")).unwrap();
        store.save(&b, &DraftState::with_message("for b")).unwrap();

        assert_eq!(store.load(&a).unwrap().unwrap().message, "for a");
        assert_eq!(store.load(&b).unwrap().unwrap().message, "for b");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn saving_empty_draft_clears() {
        let store = MemoryDraftStore::new();
        let a = ChannelId::from("a");
        store.save(&a, &DraftState::with_message("x")).unwrap();
        store.save(&a, &DraftState::default()).unwrap();
        assert!(store.load(&a).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn load_or_default_for_unknown_channel() {
        let store = MemoryDraftStore::new();
        let draft = store.load_or_default(&ChannelId::from("nope")).unwrap();
        assert!(draft.is_empty());
    }
}
