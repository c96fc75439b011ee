//! Spellbook grant tracking — per-player one-shot gates.
//!
//! Each player may receive each spellbook exactly once. Records are
//! created lazily on the first grant-eligible event, flip only false→true,
//! and regress only through the explicit [`GrantTracker::reset`]
//! administrative path.
//!
//! The tracker is a value handlers receive by reference — never a global —
//! so tests can hand handlers a fresh one. When built with a backing
//! store, every mutation is written through so grants survive restarts.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::error::Result;
use crate::persistence::GrantStore;
use crate::types::PlayerId;

/// Which one-shot spellbook a gate controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookKind {
    /// The enchantments spellbook.
    Enchantments,
    /// The wizardry spellbook.
    Wizardry,
}

/// A player's grant record: one boolean per book kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRecord {
    /// Whether the enchantments book has been issued.
    pub enchantments: bool,
    /// Whether the wizardry book has been issued.
    pub wizardry: bool,
}

impl GrantRecord {
    /// Whether the given book kind has been issued.
    #[must_use]
    pub fn is_granted(&self, kind: BookKind) -> bool {
        match kind {
            BookKind::Enchantments => self.enchantments,
            BookKind::Wizardry => self.wizardry,
        }
    }

    fn grant(&mut self, kind: BookKind) {
        match kind {
            BookKind::Enchantments => self.enchantments = true,
            BookKind::Wizardry => self.wizardry = true,
        }
    }
}

/// Tracks which spellbooks each player has received.
#[derive(Debug)]
pub struct GrantTracker {
    records: RwLock<HashMap<PlayerId, GrantRecord>>,
    store: Option<GrantStore>,
}

impl GrantTracker {
    /// An in-memory tracker with no persistence (tests, ephemeral worlds).
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            store: None,
        }
    }

    /// A tracker backed by a [`GrantStore`]; existing records are loaded
    /// and every mutation is written through.
    ///
    /// # Errors
    /// Returns a database error if the initial load fails.
    pub fn with_store(store: GrantStore) -> Result<Self> {
        let records = store.load_all()?;
        info!(players = records.len(), "loaded spellbook grant records");
        Ok(Self {
            records: RwLock::new(records),
            store: Some(store),
        })
    }

    /// Whether `player` has received the given book.
    ///
    /// Players with no record yet have received nothing.
    #[must_use]
    pub fn is_granted(&self, player: PlayerId, kind: BookKind) -> bool {
        self.records
            .read()
            .get(&player)
            .is_some_and(|record| record.is_granted(kind))
    }

    /// Mark the given book as issued to `player`. Idempotent: a second
    /// call for the same kind changes nothing.
    ///
    /// # Errors
    /// Returns a database error if the write-through fails; the in-memory
    /// state is not updated in that case.
    pub fn mark_granted(&self, player: PlayerId, kind: BookKind) -> Result<()> {
        let mut records = self.records.write();
        let mut record = records.get(&player).copied().unwrap_or_default();
        record.grant(kind);
        if let Some(store) = &self.store {
            store.save(player, &record)?;
        }
        records.insert(player, record);
        info!(%player, ?kind, "spellbook granted");
        Ok(())
    }

    /// Clear both gates for `player`, re-enabling the one-shot grants.
    ///
    /// # Errors
    /// Returns a database error if the write-through fails.
    pub fn reset(&self, player: PlayerId) -> Result<()> {
        let mut records = self.records.write();
        let record = GrantRecord::default();
        if let Some(store) = &self.store {
            store.save(player, &record)?;
        }
        records.insert(player, record);
        info!(%player, "spellbook grants reset");
        Ok(())
    }

    /// Snapshot of a player's record, if one exists yet.
    #[must_use]
    pub fn record(&self, player: PlayerId) -> Option<GrantRecord> {
        self.records.read().get(&player).copied()
    }
}

impl Default for GrantTracker {
    fn default() -> Self {
        Self::new()
    }
}
