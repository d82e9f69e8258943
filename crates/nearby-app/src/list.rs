//! Venue list screen coordination.
//!
//! [`ListController`] owns the list's load state, re-fetches on every
//! simulated position change and keeps favorite flags in step with the
//! [`FavoritesStore`]. Events are pulled one at a time with
//! [`ListController::process_next`], so the caller decides where the single
//! execution context lives.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use nearby_catalog::CatalogError;
use nearby_core::{Position, VenueListing};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::favorites::{FavoriteIds, FavoritesStore};
use crate::simulator::LocationSimulator;
use crate::source::VenueSource;
use crate::stream::recv_snapshot;

/// Load state of the venue list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    /// A fetch is outstanding. `previous` stays on screen meanwhile.
    Loading { previous: Option<Vec<VenueListing>> },
    Loaded {
        listings: Vec<VenueListing>,
        /// Favorite ids among `listings`.
        favorite_ids: FavoriteIds,
    },
    /// The last fetch failed; the stale list stays visible under a
    /// dismissible banner.
    LoadedWithError {
        listings: Vec<VenueListing>,
        favorite_ids: FavoriteIds,
        message: String,
    },
    /// No list was ever loaded and the last fetch failed.
    ErrorEmpty { message: String },
}

/// What a call to [`ListController::process_next`] handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEventKind {
    /// A timer tick advanced the simulator.
    Tick,
    /// A new simulated position triggered a fetch.
    PositionChanged,
    FavoritesChanged,
    /// The current fetch finished (successfully, with an error, or cancelled).
    FetchCompleted,
    /// A superseded fetch finished and its result was dropped.
    FetchDiscarded,
}

enum ListEvent {
    Tick,
    PositionChanged(Position),
    FavoritesChanged(FavoriteIds),
    FetchCompleted(FetchCompletion),
}

struct FetchCompletion {
    generation: u64,
    result: Result<Vec<VenueListing>, CatalogError>,
}

pub struct ListController {
    source: Arc<dyn VenueSource>,
    favorites: FavoritesStore,
    simulator: LocationSimulator,
    state: ListState,
    position: Position,
    favorite_ids: FavoriteIds,
    last_updated: Option<DateTime<Utc>>,
    location_rx: Option<broadcast::Receiver<Position>>,
    favorites_rx: Option<broadcast::Receiver<FavoriteIds>>,
    fetch_tx: mpsc::UnboundedSender<FetchCompletion>,
    fetch_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    in_flight: Option<JoinHandle<()>>,
    generation: u64,
    active: bool,
}

impl ListController {
    pub fn new(source: Arc<dyn VenueSource>, favorites: FavoritesStore) -> Self {
        let simulator = LocationSimulator::new();
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            source,
            favorite_ids: favorites.current_ids(),
            favorites,
            position: simulator.current_position(),
            simulator,
            state: ListState::Idle,
            last_updated: None,
            location_rx: None,
            favorites_rx: None,
            fetch_tx,
            fetch_rx,
            in_flight: None,
            generation: 0,
            active: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// The list currently on screen, including the stale list kept during a
    /// reload or after an error.
    #[must_use]
    pub fn listings(&self) -> Option<&[VenueListing]> {
        match &self.state {
            ListState::Loaded { listings, .. } | ListState::LoadedWithError { listings, .. } => {
                Some(listings.as_slice())
            }
            ListState::Loading { previous } => previous.as_deref(),
            ListState::Idle | ListState::ErrorEmpty { .. } => None,
        }
    }

    /// Error text to show, either as a banner or full screen.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ListState::LoadedWithError { message, .. } | ListState::ErrorEmpty { message } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorite_ids.contains(id)
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// When the last successful load finished.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Direct access to the simulator, e.g. to subscribe to it or to step it
    /// without waiting for the timer.
    pub fn simulator_mut(&mut self) -> &mut LocationSimulator {
        &mut self.simulator
    }

    /// Subscribes to both change streams, starts the simulator and, if no
    /// list has been loaded yet, fetches one. Calling it while active does
    /// nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.location_rx = Some(self.simulator.subscribe());
        self.favorites_rx = Some(self.favorites.subscribe());
        self.position = self.simulator.current_position();
        self.favorite_ids = self.favorites.current_ids();
        self.refresh_displayed_favorites();
        self.simulator.start();
        tracing::debug!(position = %self.position, "list controller activated");

        if self.last_updated.is_none() {
            self.fetch();
        }
    }

    /// Stops the simulator, drops both subscriptions and abandons any
    /// in-flight fetch without surfacing its result.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.simulator.stop();
        self.location_rx = None;
        self.favorites_rx = None;
        self.abandon_in_flight();
        tracing::debug!("list controller deactivated");
    }

    /// Fetches the venues at the current position. A fetch already in flight
    /// is superseded: its task is aborted and any late result is discarded.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
            tracing::debug!(generation = self.generation, "superseding in-flight fetch");
        }
        self.generation += 1;
        let generation = self.generation;

        let previous = self.take_listings();
        self.state = ListState::Loading { previous };

        let request = self.source.fetch_venues(self.position);
        let completions = self.fetch_tx.clone();
        tracing::debug!(generation, position = %self.position, "fetching venues");
        self.in_flight = Some(tokio::spawn(async move {
            let result = request.await;
            // The controller may already be gone.
            let _ = completions.send(FetchCompletion { generation, result });
        }));
    }

    /// User-triggered retry after an error.
    pub fn retry(&mut self) {
        self.fetch();
    }

    /// User-triggered manual refresh.
    pub fn refresh(&mut self) {
        self.fetch();
    }

    /// User-initiated cancellation of the outstanding fetch. The screen goes
    /// back to what it showed before the fetch, with no error.
    pub fn cancel(&mut self) {
        self.abandon_in_flight();
    }

    /// Delegates to the favorites store. The displayed flags change when the
    /// store's notification is processed. Empty ids and ids not among the
    /// displayed listings are ignored.
    pub fn toggle_favorite(&self, id: &str) {
        let displayed = !id.is_empty()
            && self
                .listings()
                .is_some_and(|listings| listings.iter().any(|l| l.id() == id));
        if !displayed {
            tracing::debug!(venue_id = id, "ignoring toggle for venue not on screen");
            return;
        }
        self.favorites.toggle(id);
    }

    /// Dismisses the error banner shown over a stale list.
    pub fn dismiss_error(&mut self) {
        if !matches!(self.state, ListState::LoadedWithError { .. }) {
            return;
        }
        if let ListState::LoadedWithError {
            listings,
            favorite_ids,
            ..
        } = std::mem::replace(&mut self.state, ListState::Idle)
        {
            self.state = ListState::Loaded {
                listings,
                favorite_ids,
            };
        }
    }

    /// Waits for the next event from the simulator, the favorites store or
    /// the outstanding fetch, and applies it.
    pub async fn process_next(&mut self) -> ListEventKind {
        let event = self.next_event().await;
        self.handle(event)
    }

    async fn next_event(&mut self) -> ListEvent {
        tokio::select! {
            biased;
            Some(completion) = self.fetch_rx.recv() => ListEvent::FetchCompleted(completion),
            ids = recv_snapshot(&mut self.favorites_rx) => ListEvent::FavoritesChanged(ids),
            position = recv_snapshot(&mut self.location_rx) => ListEvent::PositionChanged(position),
            _ = self.simulator.tick() => ListEvent::Tick,
        }
    }

    fn handle(&mut self, event: ListEvent) -> ListEventKind {
        match event {
            ListEvent::Tick => ListEventKind::Tick,
            ListEvent::PositionChanged(position) => {
                self.position = position;
                self.fetch();
                ListEventKind::PositionChanged
            }
            ListEvent::FavoritesChanged(ids) => {
                self.favorite_ids = ids;
                self.refresh_displayed_favorites();
                ListEventKind::FavoritesChanged
            }
            ListEvent::FetchCompleted(completion) => self.complete_fetch(completion),
        }
    }

    fn complete_fetch(&mut self, completion: FetchCompletion) -> ListEventKind {
        if completion.generation != self.generation {
            tracing::debug!(
                generation = completion.generation,
                current = self.generation,
                "discarding superseded fetch result"
            );
            return ListEventKind::FetchDiscarded;
        }
        self.in_flight = None;

        match completion.result {
            Ok(listings) => {
                tracing::info!(venues = listings.len(), position = %self.position, "venue list loaded");
                let favorite_ids = self.displayed_favorites(&listings);
                self.last_updated = Some(Utc::now());
                self.state = ListState::Loaded {
                    listings,
                    favorite_ids,
                };
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!("fetch cancelled");
                self.restore_after_abandon();
            }
            Err(e) => {
                tracing::warn!(error = %e, position = %self.position, "venue fetch failed");
                let message = e.user_message();
                self.state = match self.take_listings() {
                    Some(listings) => ListState::LoadedWithError {
                        favorite_ids: self.displayed_favorites(&listings),
                        listings,
                        message,
                    },
                    None => ListState::ErrorEmpty { message },
                };
            }
        }
        ListEventKind::FetchCompleted
    }

    fn abandon_in_flight(&mut self) {
        let Some(task) = self.in_flight.take() else {
            return;
        };
        task.abort();
        // Any completion already queued carries the old generation.
        self.generation += 1;
        self.restore_after_abandon();
    }

    /// Leaves `Loading` for the state shown before the fetch started.
    fn restore_after_abandon(&mut self) {
        if !matches!(self.state, ListState::Loading { .. }) {
            return;
        }
        if let ListState::Loading { previous } = std::mem::replace(&mut self.state, ListState::Idle)
        {
            self.state = match previous {
                Some(listings) => ListState::Loaded {
                    favorite_ids: self.displayed_favorites(&listings),
                    listings,
                },
                None => ListState::Idle,
            };
        }
    }

    fn take_listings(&mut self) -> Option<Vec<VenueListing>> {
        match std::mem::replace(&mut self.state, ListState::Idle) {
            ListState::Loaded { listings, .. } | ListState::LoadedWithError { listings, .. } => {
                Some(listings)
            }
            ListState::Loading { previous } => previous,
            ListState::Idle | ListState::ErrorEmpty { .. } => None,
        }
    }

    fn displayed_favorites(&self, listings: &[VenueListing]) -> FavoriteIds {
        listings
            .iter()
            .map(VenueListing::id)
            .filter(|id| self.favorite_ids.contains(*id))
            .map(str::to_owned)
            .collect()
    }

    fn refresh_displayed_favorites(&mut self) {
        let updated = match &self.state {
            ListState::Loaded { listings, .. } | ListState::LoadedWithError { listings, .. } => {
                self.displayed_favorites(listings)
            }
            _ => return,
        };
        if let ListState::Loaded { favorite_ids, .. }
        | ListState::LoadedWithError { favorite_ids, .. } = &mut self.state
        {
            *favorite_ids = updated;
        }
    }
}

impl Drop for ListController {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
