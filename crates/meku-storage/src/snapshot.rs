//! Persisted snapshot of lightweight session state
//!
//! Three keys survive a reload: the view mode, the displayed model URL
//! and the backend chat id. Legacy clients wrote the literal strings
//! "undefined" and "null" into this store; those are treated the same
//! as an absent key.

use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::Result;

pub const KEY_APP_MODE: &str = "appMode";
pub const KEY_MODEL_URL: &str = "modelUrl";
pub const KEY_CHAT_ID: &str = "chatId";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    /// Saved view mode ("home" | "chat" | "model")
    pub mode: Option<String>,
    /// Saved model URL, if a model was displayed
    pub model_url: Option<String>,
    /// Saved backend chat id
    pub chat_id: Option<String>,
}

pub struct SnapshotStore {
    db: Database,
}

impl SnapshotStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read the persisted snapshot, cleaning junk sentinel values.
    pub fn load(&self) -> Result<PersistedSnapshot> {
        Ok(PersistedSnapshot {
            mode: clean(self.db.get_setting(KEY_APP_MODE)?),
            model_url: clean(self.db.get_setting(KEY_MODEL_URL)?),
            chat_id: clean(self.db.get_setting(KEY_CHAT_ID)?),
        })
    }

    /// Mirror the snapshot into the store. `None` fields remove their key
    /// so a later load does not resurrect stale state.
    pub fn save(&self, snapshot: &PersistedSnapshot) -> Result<()> {
        let snapshot = snapshot.clone();
        self.db.transaction(|conn| {
            write_key(conn, KEY_APP_MODE, snapshot.mode.as_deref())?;
            write_key(conn, KEY_MODEL_URL, snapshot.model_url.as_deref())?;
            write_key(conn, KEY_CHAT_ID, snapshot.chat_id.as_deref())?;
            Ok(())
        })?;

        Ok(())
    }

    /// Remove all persisted keys (back-to-home).
    pub fn clear(&self) -> Result<()> {
        self.db.transaction(|conn| {
            for key in [KEY_APP_MODE, KEY_MODEL_URL, KEY_CHAT_ID] {
                conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
            }
            Ok(())
        })?;

        tracing::debug!("Cleared persisted snapshot");

        Ok(())
    }
}

impl Clone for SnapshotStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

fn write_key(conn: &rusqlite::Connection, key: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => {
            let updated_at = chrono::Utc::now().to_rfc3339();
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
        }
        None => {
            conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
        }
    }
    Ok(())
}

/// Treat absent, "undefined" and "null" strings as "no saved value".
fn clean(value: Option<String>) -> Option<String> {
    match value {
        Some(v) if v.is_empty() || v == "undefined" || v == "null" => None,
        other => other,
    }
}
