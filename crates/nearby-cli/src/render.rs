use nearby_app::{FavoritesController, ListController, ListState};

pub fn print_list(list: &ListController) {
    match list.state() {
        ListState::Idle | ListState::Loading { previous: None } => println!("Loading venues…"),
        ListState::ErrorEmpty { message } => println!("⚠ {message} (retry with a new walk)"),
        _ => {
            if let Some(message) = list.error_message() {
                println!("⚠ {message}");
            }
            let Some(listings) = list.listings() else {
                return;
            };
            if listings.is_empty() {
                println!("No venues nearby.");
            }
            println!("Venues near {}:", list.position());
            for listing in listings {
                let star = if list.is_favorite(listing.id()) { "★" } else { " " };
                println!(
                    "{star} {:<32} {:<24} {}",
                    listing.name(),
                    listing.id(),
                    listing.short_description()
                );
            }
        }
    }
}

pub fn print_favorites(view: &FavoritesController) {
    if !view.has_any() {
        println!("\nNo favorites in the last list.");
        return;
    }
    println!("\nFavorites in the last list:");
    for listing in view.listings() {
        println!("★ {} ({})", listing.name(), listing.image_url());
    }
}
