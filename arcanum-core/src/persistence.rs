//! SQLite persistence for spellbook grant records.
//!
//! One row per player, JSON payload in a BLOB column:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS grant_records (
//!     player_id  TEXT PRIMARY KEY,
//!     data       BLOB NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```
//!
//! JSON inside a BLOB keeps the schema stable if the record ever grows
//! beyond two booleans. WAL mode allows reads while the simulation thread
//! writes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::error::{ArcanumError, Result};
use crate::grants::GrantRecord;
use crate::types::PlayerId;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS grant_records (
    player_id  TEXT PRIMARY KEY,
    data       BLOB NOT NULL,
    updated_at TEXT NOT NULL
);";

/// Handle to an open SQLite database of [`GrantRecord`]s.
pub struct GrantStore {
    conn: Connection,
    db_path: PathBuf,
}

impl std::fmt::Debug for GrantStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrantStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl GrantStore {
    /// Open (or create) the grant database at `path`, creating the schema
    /// and enabling WAL mode.
    ///
    /// # Errors
    /// Returns [`ArcanumError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), "grant store opened");

        Ok(Self { conn, db_path })
    }

    /// Open an in-memory database (tests).
    ///
    /// # Errors
    /// Returns [`ArcanumError::Database`] on SQLite failures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Save (upsert) a player's grant record.
    ///
    /// # Errors
    /// Returns [`ArcanumError::Serialization`] if JSON encoding fails, or
    /// [`ArcanumError::Database`] on SQLite failures.
    pub fn save(&self, player: PlayerId, record: &GrantRecord) -> Result<()> {
        let json =
            serde_json::to_vec(record).map_err(|e| ArcanumError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO grant_records (player_id, data, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(player_id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at",
            params![player.0.to_string(), json, now],
        )?;

        debug!(%player, ?record, "saved grant record");
        Ok(())
    }

    /// Load a single player's grant record, or `None` if no row exists.
    ///
    /// # Errors
    /// Returns [`ArcanumError::Serialization`] if JSON decoding fails, or
    /// [`ArcanumError::Database`] on SQLite failures.
    pub fn load(&self, player: PlayerId) -> Result<Option<GrantRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT data FROM grant_records WHERE player_id = ?1")?;

        let data: Option<Vec<u8>> =
            match stmt.query_row(params![player.0.to_string()], |row| row.get(0)) {
                Ok(data) => Some(data),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e.into()),
            };

        let Some(data) = data else { return Ok(None) };
        let record = serde_json::from_slice(&data)
            .map_err(|e| ArcanumError::Serialization(e.to_string()))?;
        Ok(Some(record))
    }

    /// Load every stored record, keyed by player. Rows with unparseable
    /// player ids are skipped with a warning rather than failing the load.
    ///
    /// # Errors
    /// Returns [`ArcanumError::Database`] on SQLite failures or
    /// [`ArcanumError::Serialization`] for a corrupt payload.
    pub fn load_all(&self) -> Result<HashMap<PlayerId, GrantRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT player_id, data FROM grant_records")?;

        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let data: Vec<u8> = row.get(1)?;
            Ok((id, data))
        })?;

        let mut records = HashMap::new();
        for row in rows {
            let (id, data) = row?;
            let Ok(uuid) = uuid::Uuid::parse_str(&id) else {
                warn!(id = %id, "skipping grant row with invalid player id");
                continue;
            };
            let record: GrantRecord = serde_json::from_slice(&data)
                .map_err(|e| ArcanumError::Serialization(e.to_string()))?;
            records.insert(PlayerId(uuid), record);
        }
        Ok(records)
    }

    /// Delete a player's record. Returns `true` if a row was removed.
    ///
    /// # Errors
    /// Returns [`ArcanumError::Database`] on SQLite failures.
    pub fn delete(&self, player: PlayerId) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM grant_records WHERE player_id = ?1",
            params![player.0.to_string()],
        )?;
        Ok(deleted > 0)
    }

    /// Number of stored records.
    ///
    /// # Errors
    /// Returns [`ArcanumError::Database`] on SQLite failures.
    pub fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM grant_records", [], |row| row.get(0))?;
        #[allow(clippy::cast_sign_loss)]
        Ok(count as usize)
    }

    /// Path to the database file (`:memory:` for in-memory stores).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_save_load() {
        let store = GrantStore::open_in_memory().expect("open");
        let player = PlayerId::new();
        let record = GrantRecord {
            enchantments: true,
            wizardry: false,
        };

        store.save(player, &record).expect("save");
        let loaded = store.load(player).expect("load").expect("Some");
        assert_eq!(loaded, record);
    }

    #[test]
    fn load_nonexistent_returns_none() {
        let store = GrantStore::open_in_memory().expect("open");
        assert!(store.load(PlayerId::new()).expect("load").is_none());
    }

    #[test]
    fn upsert_overwrites() {
        let store = GrantStore::open_in_memory().expect("open");
        let player = PlayerId::new();

        store
            .save(player, &GrantRecord {
                enchantments: true,
                wizardry: false,
            })
            .expect("save");
        store
            .save(player, &GrantRecord {
                enchantments: true,
                wizardry: true,
            })
            .expect("save again");

        let loaded = store.load(player).expect("load").expect("Some");
        assert!(loaded.wizardry);
        assert_eq!(store.count().expect("count"), 1);
    }

    #[test]
    fn load_all_returns_every_player() {
        let store = GrantStore::open_in_memory().expect("open");
        let a = PlayerId::new();
        let b = PlayerId::new();

        store
            .save(a, &GrantRecord {
                enchantments: true,
                wizardry: true,
            })
            .expect("save");
        store.save(b, &GrantRecord::default()).expect("save");

        let all = store.load_all().expect("load all");
        assert_eq!(all.len(), 2);
        assert!(all[&a].enchantments);
        assert!(!all[&b].enchantments);
    }

    #[test]
    fn delete_removes_the_row() {
        let store = GrantStore::open_in_memory().expect("open");
        let player = PlayerId::new();
        store.save(player, &GrantRecord::default()).expect("save");

        assert!(store.delete(player).expect("delete"));
        assert!(!store.delete(player).expect("delete again"));
        assert!(store.load(player).expect("load").is_none());
    }

    #[test]
    fn file_backed_store_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("grants.db");
        let player = PlayerId::new();

        {
            let store = GrantStore::open(&path).expect("open");
            store
                .save(player, &GrantRecord {
                    enchantments: true,
                    wizardry: false,
                })
                .expect("save");
        }

        let store = GrantStore::open(&path).expect("reopen");
        let loaded = store.load(player).expect("load").expect("Some");
        assert!(loaded.enchantments);
    }
}
