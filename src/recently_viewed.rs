// ABOUTME: Client-local recently-viewed recipe ledger
// ABOUTME: Size-bounded, deduplicated, most-recent-first deque over pluggable storage

use crate::models::Recipe;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

/// Maximum number of entries retained in the ledger
pub const MAX_RECENTLY_VIEWED: usize = 12;

/// One ledger entry. Stores a full recipe snapshot taken at viewing time,
/// not a live reference, so it may go stale relative to the canonical record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyViewedEntry {
    /// Snapshot of the recipe as it looked when viewed
    pub recipe: Recipe,
}

/// Backing storage for the ledger. The ledger is a single-writer structure
/// confined to one client context, so implementations need no cross-writer
/// coordination.
pub trait LedgerStorage {
    /// Load the raw serialized ledger, or `None` when nothing is stored
    fn load(&self) -> Option<String>;

    /// Persist the raw serialized ledger
    fn save(&self, raw: &str);
}

/// Most-recent-first ledger of viewed recipes.
///
/// Reads fail open: unavailable or malformed storage yields an empty
/// sequence rather than an error.
pub struct RecentlyViewedLedger<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> RecentlyViewedLedger<S> {
    /// Create a ledger over the given storage
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Return the stored sequence, most recent first.
    ///
    /// Missing or malformed storage is treated as an empty ledger.
    pub fn read(&self) -> Vec<Recipe> {
        let Some(raw) = self.storage.load() else {
            return Vec::new();
        };
        match serde_json::from_str::<VecDeque<RecentlyViewedEntry>>(&raw) {
            Ok(entries) => entries.into_iter().map(|e| e.recipe).collect(),
            Err(e) => {
                tracing::debug!("discarding malformed recently-viewed data: {e}");
                Vec::new()
            }
        }
    }

    /// Record a viewing of `recipe`.
    ///
    /// A recipe without an identifier is ignored. Otherwise any existing
    /// entry with the same id is removed, the snapshot is prepended, and the
    /// deque is truncated to [`MAX_RECENTLY_VIEWED`] before persisting.
    pub fn record(&self, recipe: &Recipe) {
        if recipe.id.is_nil() {
            return;
        }

        let mut entries: VecDeque<RecentlyViewedEntry> = self
            .read()
            .into_iter()
            .map(|recipe| RecentlyViewedEntry { recipe })
            .collect();

        entries.retain(|entry| entry.recipe.id != recipe.id);
        entries.push_front(RecentlyViewedEntry {
            recipe: recipe.clone(),
        });
        entries.truncate(MAX_RECENTLY_VIEWED);

        match serde_json::to_string(&entries) {
            Ok(raw) => self.storage.save(&raw),
            Err(e) => tracing::debug!("failed to serialize recently-viewed ledger: {e}"),
        }
    }

    /// Identifiers currently in the ledger, most recent first
    pub fn ids(&self) -> Vec<Uuid> {
        self.read().into_iter().map(|r| r.id).collect()
    }
}

/// In-memory storage, used in tests and as a session-scoped fallback
#[derive(Default)]
pub struct MemoryStorage {
    raw: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Create empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.raw.lock().map(|guard| guard.clone()).unwrap_or(None)
    }

    fn save(&self, raw: &str) {
        if let Ok(mut guard) = self.raw.lock() {
            *guard = Some(raw.to_owned());
        }
    }
}

/// File-backed storage for a persistent per-client ledger
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LedgerStorage for FileStorage {
    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn save(&self, raw: &str) {
        if let Err(e) = std::fs::write(&self.path, raw) {
            tracing::debug!(path = %self.path.display(), "failed to persist recently-viewed ledger: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipe;

    fn recipe(n: u128, title: &str) -> Recipe {
        Recipe {
            id: Uuid::from_u128(n),
            title: title.to_owned(),
            ..Recipe::default()
        }
    }

    #[test]
    fn read_is_empty_without_storage() {
        let ledger = RecentlyViewedLedger::new(MemoryStorage::new());
        assert!(ledger.read().is_empty());
    }

    #[test]
    fn read_fails_open_on_malformed_data() {
        let storage = MemoryStorage::new();
        storage.save("not json at all");
        let ledger = RecentlyViewedLedger::new(storage);
        assert!(ledger.read().is_empty());
    }

    #[test]
    fn record_prepends_most_recent() {
        let ledger = RecentlyViewedLedger::new(MemoryStorage::new());
        ledger.record(&recipe(1, "first"));
        ledger.record(&recipe(2, "second"));

        let titles: Vec<String> = ledger.read().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn record_ignores_nil_id() {
        let ledger = RecentlyViewedLedger::new(MemoryStorage::new());
        ledger.record(&Recipe::default());
        assert!(ledger.read().is_empty());
    }

    #[test]
    fn rerecording_moves_to_front_without_growth() {
        let ledger = RecentlyViewedLedger::new(MemoryStorage::new());
        for n in 1..=12 {
            ledger.record(&recipe(n, &format!("recipe {n}")));
        }
        assert_eq!(ledger.read().len(), MAX_RECENTLY_VIEWED);

        // The 5th recorded recipe sits mid-list; re-viewing it must move it
        // to index 0 without duplicating it.
        ledger.record(&recipe(5, "recipe 5"));

        let ids = ledger.ids();
        assert_eq!(ids.len(), MAX_RECENTLY_VIEWED);
        assert_eq!(ids[0], Uuid::from_u128(5));
        assert_eq!(ids.iter().filter(|id| **id == Uuid::from_u128(5)).count(), 1);
    }

    #[test]
    fn ledger_is_capped() {
        let ledger = RecentlyViewedLedger::new(MemoryStorage::new());
        for n in 1..=20 {
            ledger.record(&recipe(n, &format!("recipe {n}")));
        }

        let ids = ledger.ids();
        assert_eq!(ids.len(), MAX_RECENTLY_VIEWED);
        // Oldest entries fell off; the newest 12 remain in reverse order.
        assert_eq!(ids[0], Uuid::from_u128(20));
        assert_eq!(ids[11], Uuid::from_u128(9));
    }
}
