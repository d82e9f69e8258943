//! The favorites store: the single source of truth for favorite venue ids.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use nearby_core::constants::{CHANGE_STREAM_CAPACITY, FAVORITES_STORAGE_KEY};
use tokio::sync::broadcast;

use crate::storage::KeyValueStore;

/// Snapshot of the favorite venue ids.
pub type FavoriteIds = HashSet<String>;

/// Set of favorite venue ids mirrored to durable key-value storage.
///
/// Construct one per process and hand clones to every controller that needs
/// it; clones are handles onto the same set, storage and change stream.
/// Every mutation persists the full set synchronously and then emits the full
/// set on the change stream.
#[derive(Clone)]
pub struct FavoritesStore {
    ids: Rc<RefCell<FavoriteIds>>,
    storage: Rc<dyn KeyValueStore>,
    changes: broadcast::Sender<FavoriteIds>,
}

impl FavoritesStore {
    /// Loads the persisted set from `storage`.
    ///
    /// A missing key yields an empty set. Unreadable storage or an
    /// unparseable value is logged and also yields an empty set.
    pub fn load(storage: impl KeyValueStore + 'static) -> Self {
        let ids = match storage.get(FAVORITES_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(error = %e, "stored favorites are not a list of ids; starting empty");
                    FavoriteIds::new()
                }
            },
            Ok(None) => FavoriteIds::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored favorites; starting empty");
                FavoriteIds::new()
            }
        };
        tracing::debug!(count = ids.len(), "loaded favorites");

        let (changes, _) = broadcast::channel(CHANGE_STREAM_CAPACITY);
        Self {
            ids: Rc::new(RefCell::new(ids)),
            storage: Rc::new(storage),
            changes,
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.borrow().contains(id)
    }

    /// Adds `id`. No-op (no write, no notification) if already present.
    pub fn add(&self, id: &str) {
        if !self.ids.borrow_mut().insert(id.to_owned()) {
            return;
        }
        tracing::debug!(venue_id = id, "favorite added");
        self.persist_and_notify();
    }

    /// Removes `id`. No-op if absent.
    pub fn remove(&self, id: &str) {
        if !self.ids.borrow_mut().remove(id) {
            return;
        }
        tracing::debug!(venue_id = id, "favorite removed");
        self.persist_and_notify();
    }

    pub fn toggle(&self, id: &str) {
        if self.is_favorite(id) {
            self.remove(id);
        } else {
            self.add(id);
        }
    }

    /// Empties the set. Always persists and notifies, even when already empty.
    pub fn clear(&self) {
        self.ids.borrow_mut().clear();
        tracing::debug!("favorites cleared");
        self.persist_and_notify();
    }

    #[must_use]
    pub fn current_ids(&self) -> FavoriteIds {
        self.ids.borrow().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    /// Subscribes to the change stream. Each message is the full set after a
    /// mutation, delivered in mutation order. Drop the receiver to unsubscribe.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FavoriteIds> {
        self.changes.subscribe()
    }

    fn persist_and_notify(&self) {
        let snapshot = self.current_ids();

        let mut sorted: Vec<&str> = snapshot.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        match serde_json::to_string(&sorted) {
            Ok(serialized) => {
                if let Err(e) = self.storage.set(FAVORITES_STORAGE_KEY, &serialized) {
                    tracing::warn!(error = %e, "failed to persist favorites");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize favorites"),
        }

        // No subscribers is not an error.
        let _ = self.changes.send(snapshot);
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids.borrow())
            .field("subscribers", &self.changes.receiver_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "favorites_test.rs"]
mod tests;
