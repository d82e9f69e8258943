//! Favorites screen coordination.

use nearby_core::VenueListing;
use tokio::sync::broadcast;

use crate::favorites::{FavoriteIds, FavoritesStore};
use crate::stream::{drain_pending, recv_snapshot};

/// Derives the favorited subset of the list screen's venues.
///
/// The subset is computed from the full list only in [`Self::set_source`].
/// Store notifications afterwards only narrow it: a venue favorited after
/// seeding does not appear until the next `set_source`.
pub struct FavoritesController {
    favorites: FavoritesStore,
    listings: Vec<VenueListing>,
    changes: Option<broadcast::Receiver<FavoriteIds>>,
}

impl FavoritesController {
    #[must_use]
    pub fn new(favorites: FavoritesStore) -> Self {
        let changes = Some(favorites.subscribe());
        Self {
            favorites,
            listings: Vec::new(),
            changes,
        }
    }

    /// Recomputes the subset from `all`, typically whenever the favorites
    /// screen becomes visible.
    pub fn set_source(&mut self, all: &[VenueListing]) {
        // Notifications queued before seeding describe older states.
        drain_pending(&mut self.changes);
        let ids = self.favorites.current_ids();
        self.listings = all
            .iter()
            .filter(|listing| ids.contains(listing.id()))
            .cloned()
            .collect();
        tracing::debug!(
            total = all.len(),
            favorites = self.listings.len(),
            "favorites view seeded"
        );
    }

    #[must_use]
    pub fn listings(&self) -> &[VenueListing] {
        &self.listings
    }

    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.listings.is_empty()
    }

    /// Delegates to the favorites store; the subset shrinks when the
    /// notification is processed.
    pub fn remove(&self, id: &str) {
        self.favorites.remove(id);
    }

    /// Waits for the next store notification and narrows the subset.
    pub async fn process_next(&mut self) {
        let ids = recv_snapshot(&mut self.changes).await;
        self.apply(&ids);
    }

    /// Applies every notification already queued, in order, without waiting.
    pub fn sync(&mut self) {
        for ids in drain_pending(&mut self.changes) {
            self.apply(&ids);
        }
    }

    fn apply(&mut self, ids: &FavoriteIds) {
        self.listings.retain(|listing| ids.contains(listing.id()));
    }
}
