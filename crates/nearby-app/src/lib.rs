//! Coordination layer: favorites, the simulated walk, and the two screen
//! controllers that react to them.
//!
//! Everything in this crate except the spawned timer and fetch tasks runs on
//! one execution context. Shared handles are `Rc`-based and therefore `!Send`;
//! drive them from a single task (`#[tokio::main(flavor = "current_thread")]`
//! or a `LocalSet`).

pub mod favorites;
pub mod favorites_view;
pub mod list;
pub mod simulator;
pub mod source;
pub mod storage;
mod stream;

pub use favorites::{FavoriteIds, FavoritesStore};
pub use favorites_view::FavoritesController;
pub use list::{ListController, ListEventKind, ListState};
pub use simulator::LocationSimulator;
pub use source::{FetchFuture, VenueSource};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
