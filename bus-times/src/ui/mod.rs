//! Page surface and browser capabilities.
//!
//! The favourites feature never reaches for ambient globals. Everything it
//! touches on the page, in the navigation history or in the fragment
//! refresh machinery is passed in through the traits defined here.

mod history;
mod model;
mod refresh;

pub use history::{History, Location};
pub use model::{
    BusTimesHeader, BusTimesPane, FavouriteCard, FavouriteToggle, FavouritesSection, PageModel,
};
pub use refresh::RefreshQueue;

use crate::domain::{Stop, StopId};
use crate::theme::Theme;

/// Element ID of the favourites section.
pub const FAVOURITES_SECTION_ID: &str = "favourites-section";

/// Element ID of the favourites list container.
pub const FAVOURITES_LIST_ID: &str = "favourites-list";

/// Element ID of the bus-times container.
pub const BUS_TIMES_ID: &str = "bus-times";

/// Class carried by every favourite toggle control.
pub const FAVOURITE_TOGGLE_CLASS: &str = "favourite-toggle";

/// Query parameter naming the selected stop.
pub const STOP_ID_PARAM: &str = "stop_id";

/// The parts of the page the client script manipulates.
///
/// Each accessor returns `None` when the element is absent, in which case
/// callers skip the update.
pub trait Page {
    /// The favourites section, with its visibility and card list.
    fn favourites_section(&mut self) -> Option<&mut FavouritesSection>;

    /// The header of the bus-times view, present only while a stop is shown.
    fn bus_times_header(&mut self) -> Option<&mut BusTimesHeader>;

    /// Apply a colour theme to the document.
    fn apply_theme(&mut self, theme: Theme);
}

/// Navigation state: the current URL and the session history.
pub trait Navigation {
    /// The `stop_id` query parameter of the current entry, if valid.
    fn current_stop_id(&self) -> Option<StopId>;

    /// Push a history entry selecting `stop_id`, without reloading.
    fn push_stop_id(&mut self, stop_id: &StopId);

    /// Step back one history entry. Returns `false` at the start of history.
    fn back(&mut self) -> bool;
}

/// Partial-page refresh of the bus-times fragment.
///
/// Completion is reported back to the application as
/// [`UiEvent::BusTimesRefreshed`](crate::app::UiEvent::BusTimesRefreshed).
pub trait ViewRefresh {
    /// Ask for the bus-times fragment to be reloaded for `stop_id`.
    fn request_refresh(&mut self, stop_id: &StopId);
}

/// Stop search suggestions.
pub trait Autocomplete {
    /// Stops matching `query`, best first.
    fn suggest(&self, query: &str) -> Vec<Stop>;
}
