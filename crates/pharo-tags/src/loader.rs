use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use pharo_core::config::CatalogConfig;
use tracing::{info, warn};

use crate::catalog::TagCatalog;
use crate::error::{CatalogError, Result};

const USER_AGENT: &str = "pharo-composer";

/// Everything fetched from the remote configuration location at startup.
#[derive(Debug, Clone, Default)]
pub struct RemoteConfig {
    pub tags: TagCatalog,
    /// Client settings document, kept opaque.
    pub settings: serde_json::Value,
}

/// Fetches the tag catalog and settings documents over HTTP.
pub struct CatalogLoader {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogLoader {
    pub fn new(config: CatalogConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "http client build failed, using defaults");
                reqwest::Client::new()
            });
        Self { client, config }
    }

    /// Fetch and decode the tag catalog.
    pub async fn fetch_tags(&self) -> Result<TagCatalog> {
        let body = self.fetch_text(&self.config.tags_url).await?;
        TagCatalog::from_json(&body)
    }

    /// Fetch the settings document as untyped JSON.
    pub async fn fetch_settings(&self) -> Result<serde_json::Value> {
        let body = self.fetch_text(&self.config.settings_url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch both documents. Failures degrade to empty values and are logged,
    /// never returned.
    pub async fn load(&self) -> RemoteConfig {
        let (tags, settings) = tokio::join!(self.fetch_tags(), self.fetch_settings());

        let tags = tags.unwrap_or_else(|e| {
            warn!(url = %self.config.tags_url, error = %e, "tag catalog unavailable, using empty catalog");
            TagCatalog::default()
        });
        let settings = settings.unwrap_or_else(|e| {
            warn!(url = %self.config.settings_url, error = %e, "settings unavailable");
            serde_json::Value::Null
        });

        info!(
            topics = tags.all_topic_tags().count(),
            sources = tags.source_tags.len(),
            "remote configuration loaded"
        );
        RemoteConfig { tags, settings }
    }

    /// Read a catalog document from disk.
    pub fn load_file(path: impl AsRef<Path>) -> Result<TagCatalog> {
        let body = std::fs::read_to_string(path)?;
        TagCatalog::from_json(&body)
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

/// Catalog shared between composers.
///
/// Starts empty; a background refresh swaps in the fetched catalog. Readers
/// take an `Arc` snapshot and never wait on the fetch.
#[derive(Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<TagCatalog>>>,
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: TagCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Current catalog. Empty until the first load completes.
    pub fn snapshot(&self) -> Arc<TagCatalog> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    pub fn replace(&self, catalog: TagCatalog) {
        let catalog = Arc::new(catalog);
        match self.inner.write() {
            Ok(mut guard) => *guard = catalog,
            Err(poisoned) => *poisoned.into_inner() = catalog,
        }
    }

    /// One-shot background fetch. The returned handle may be dropped.
    pub fn spawn_refresh(&self, loader: CatalogLoader) -> tokio::task::JoinHandle<RemoteConfig> {
        let shared = self.clone();
        tokio::spawn(async move {
            let remote = loader.load().await;
            shared.replace(remote.tags.clone());
            remote
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;

    #[test]
    fn shared_catalog_starts_empty_and_swaps() {
        let shared = SharedCatalog::new();
        let before = shared.snapshot();
        assert!(before.is_empty());

        let mut catalog = TagCatalog::default();
        catalog.common_tags.push(Tag::new("breaking", "Breaking"));
        shared.replace(catalog);

        // old snapshots are unaffected
        assert!(before.is_empty());
        assert_eq!(shared.snapshot().common_tags.len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let a = SharedCatalog::new();
        let b = a.clone();
        let mut catalog = TagCatalog::default();
        catalog.source_tags.push(Tag::new("reuters", "Reuters"));
        a.replace(catalog);
        assert_eq!(b.snapshot().source_tags.len(), 1);
    }
}
