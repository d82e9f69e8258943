mod render;
mod walk;

use clap::{Parser, Subcommand};
use nearby_app::{FavoritesStore, JsonFileStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nearby")]
#[command(about = "Walk a loop through Helsinki and list the restaurants nearby")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Follow the simulated walk, printing the venue list after every refresh.
    Walk {
        /// Stop after this many position changes (runs until Ctrl-C when omitted).
        #[arg(long)]
        ticks: Option<u32>,
    },
    /// Manage favorite venues.
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
}

#[derive(Debug, Subcommand)]
enum FavoritesCommand {
    List,
    Add { id: String },
    Remove { id: String },
    Toggle { id: String },
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = nearby_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let favorites = FavoritesStore::load(JsonFileStore::new(&config.favorites_path));

    let cli = Cli::parse();
    match cli.command {
        Commands::Walk { ticks } => walk::run(favorites, ticks).await?,
        Commands::Favorites { command } => run_favorites(&favorites, command),
    }

    Ok(())
}

fn run_favorites(favorites: &FavoritesStore, command: FavoritesCommand) {
    match command {
        FavoritesCommand::List => {}
        FavoritesCommand::Add { id } => favorites.add(&id),
        FavoritesCommand::Remove { id } => favorites.remove(&id),
        FavoritesCommand::Toggle { id } => favorites.toggle(&id),
        FavoritesCommand::Clear => favorites.clear(),
    }

    let mut ids: Vec<String> = favorites.current_ids().into_iter().collect();
    ids.sort_unstable();
    if ids.is_empty() {
        println!("No favorites yet.");
    }
    for id in ids {
        println!("★ {id}");
    }
}
