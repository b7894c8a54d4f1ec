//! Favourite stops.
//!
//! A small stop ID → stop name mapping kept in the per-origin store,
//! projected onto the page as a list of cards plus a star button on the
//! bus-times header.

mod binder;
mod render;
mod set;
mod store;

pub use binder::{BindOutcome, FavouriteButtonBinder};
pub use render::FavouriteRenderer;
pub use set::{FavouriteEntry, FavouriteSet, Toggled};
pub use store::{FAVOURITES_KEY, FavouriteStore, load_favourites};
