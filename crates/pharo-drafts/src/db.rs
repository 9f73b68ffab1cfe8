use rusqlite::Connection;

use crate::error::Result;

/// Initialise the drafts table.
///
/// Safe to call on every startup: uses `IF NOT EXISTS` throughout.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS drafts (
            id          TEXT PRIMARY KEY,
            channel_id  TEXT NOT NULL UNIQUE,
            payload     TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );",
    )?;
    Ok(())
}
