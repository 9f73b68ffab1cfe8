use std::sync::{Mutex, MutexGuard};

use pharo_core::ChannelId;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{DraftError, Result};
use crate::store::DraftStore;
use crate::types::DraftState;

/// Drafts persisted in SQLite so they survive restarts.
///
/// Wraps a single connection in a `Mutex`; the payload column holds the
/// draft as JSON.
pub struct SqliteDraftStore {
    db: Mutex<Connection>,
}

impl SqliteDraftStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Open (or create) the database at `path` and run the schema migration.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        crate::db::init_db(&conn)?;
        Ok(Self::new(conn))
    }

    /// Channels that currently hold a draft, most recently updated first.
    pub fn channels(&self) -> Result<Vec<ChannelId>> {
        let db = self.conn()?;
        let mut stmt =
            db.prepare("SELECT channel_id FROM drafts ORDER BY updated_at DESC, channel_id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut channels = Vec::new();
        for row in rows {
            channels.push(ChannelId(row?));
        }
        Ok(channels)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| DraftError::LockPoisoned)
    }
}

impl DraftStore for SqliteDraftStore {
    #[instrument(skip(self), fields(channel = %channel))]
    fn load(&self, channel: &ChannelId) -> Result<Option<DraftState>> {
        let db = self.conn()?;
        let payload: Option<String> = db
            .query_row(
                "SELECT payload FROM drafts WHERE channel_id = ?1",
                params![channel.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, draft), fields(channel = %channel))]
    fn save(&self, channel: &ChannelId, draft: &DraftState) -> Result<()> {
        if draft.is_empty() {
            return self.clear(channel);
        }

        let payload = serde_json::to_string(draft)?;
        let now = chrono::Utc::now().to_rfc3339();
        let db = self.conn()?;
        db.execute(
            "INSERT INTO drafts (id, channel_id, payload, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(channel_id) DO UPDATE
                SET payload = excluded.payload, updated_at = excluded.updated_at",
            params![Uuid::now_v7().to_string(), channel.as_str(), payload, now],
        )?;
        debug!("draft saved");
        Ok(())
    }

    #[instrument(skip(self), fields(channel = %channel))]
    fn clear(&self, channel: &ChannelId) -> Result<()> {
        let db = self.conn()?;
        let removed = db.execute(
            "DELETE FROM drafts WHERE channel_id = ?1",
            params![channel.as_str()],
        )?;
        if removed > 0 {
            debug!("draft cleared");
        }
        Ok(())
    }
}
