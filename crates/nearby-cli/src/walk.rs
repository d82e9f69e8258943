use std::sync::Arc;

use nearby_app::{FavoritesController, FavoritesStore, ListController, ListEventKind};
use nearby_catalog::VenueClient;

use crate::render::{print_favorites, print_list};

/// Runs the list screen until `ticks` position changes have been handled or
/// Ctrl-C is pressed, then prints the favorites screen derived from the last list.
pub async fn run(favorites: FavoritesStore, ticks: Option<u32>) -> anyhow::Result<()> {
    let client = VenueClient::new()?;
    let mut list = ListController::new(Arc::new(client), favorites.clone());
    let mut favorites_view = FavoritesController::new(favorites);

    list.activate();
    let mut position_changes = 0u32;

    loop {
        let kind = tokio::select! {
            kind = list.process_next() => kind,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        };

        match kind {
            ListEventKind::FetchCompleted | ListEventKind::FavoritesChanged => print_list(&list),
            ListEventKind::PositionChanged => {
                position_changes += 1;
                println!("\n→ moved to {}", list.position());
            }
            ListEventKind::Tick | ListEventKind::FetchDiscarded => {}
        }

        // Wait for the refetch triggered by the last position change.
        if ticks.is_some_and(|limit| position_changes >= limit) && !list.is_fetching() {
            break;
        }
    }

    list.deactivate();

    if let Some(listings) = list.listings() {
        favorites_view.set_source(listings);
    }
    print_favorites(&favorites_view);
    Ok(())
}
