pub mod favorites_store;

pub use favorites_store::FavoritesStore;
