//! In-memory page model.
//!
//! Mirrors the elements the client script works with, so the favourites
//! behaviour can run (and be rendered) without a browser.

use crate::board::BoardResult;
use crate::domain::StopId;
use crate::theme::Theme;

use super::Page;

/// A star button that adds or removes a stop from the favourites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteToggle {
    pub stop_id: StopId,
    pub stop_name: String,
    /// Whether the stop is currently a favourite.
    pub active: bool,
}

impl FavouriteToggle {
    pub fn label(&self) -> &'static str {
        if self.active { "★" } else { "☆" }
    }

    pub fn title(&self) -> &'static str {
        if self.active {
            "Remove from favourites"
        } else {
            "Add to favourites"
        }
    }
}

/// One entry in the favourites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouriteCard {
    pub stop_id: StopId,
    pub stop_name: String,
}

impl FavouriteCard {
    /// The toggle control shown on the card. Cards only exist for
    /// favourites, so it is always active.
    pub fn toggle(&self) -> FavouriteToggle {
        FavouriteToggle {
            stop_id: self.stop_id.clone(),
            stop_name: self.stop_name.clone(),
            active: true,
        }
    }
}

/// The favourites section and its list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouritesSection {
    visible: bool,
    list: Option<Vec<FavouriteCard>>,
}

impl FavouritesSection {
    /// A hidden section with an empty list.
    pub fn new() -> Self {
        Self {
            visible: false,
            list: Some(Vec::new()),
        }
    }

    /// A section whose list container is missing from the page.
    pub fn without_list() -> Self {
        Self {
            visible: false,
            list: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn has_list(&self) -> bool {
        self.list.is_some()
    }

    /// Cards currently in the list (empty if the list is missing).
    pub fn cards(&self) -> &[FavouriteCard] {
        self.list.as_deref().unwrap_or(&[])
    }

    /// Clear the list and fill it with `cards`.
    ///
    /// Returns `false` without doing anything if the list is missing.
    pub fn replace_cards(&mut self, cards: Vec<FavouriteCard>) -> bool {
        match &mut self.list {
            Some(list) => {
                *list = cards;
                true
            }
            None => false,
        }
    }
}

impl Default for FavouritesSection {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading row of the bus-times view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusTimesHeader {
    /// The stop this fragment was built for.
    pub stop_id: StopId,
    /// Heading text: the displayed stop's name.
    pub heading: String,
    /// At most one toggle control.
    pub toggle: Option<FavouriteToggle>,
}

impl BusTimesHeader {
    pub fn new(stop_id: StopId, heading: impl Into<String>) -> Self {
        Self {
            stop_id,
            heading: heading.into(),
            toggle: None,
        }
    }
}

/// Contents of the bus-times container.
#[derive(Debug, Clone, Default)]
pub struct BusTimesPane {
    pub header: Option<BusTimesHeader>,
    pub board: Option<BoardResult>,
}

impl BusTimesPane {
    /// An empty container, as on first load without a stop.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fragment for a freshly built board. Only successful boards
    /// carry a heading.
    pub fn from_board(board: BoardResult) -> Self {
        let header = board
            .as_ref()
            .ok()
            .map(|b| BusTimesHeader::new(b.stop_id.clone(), b.stop_name.clone()));
        Self {
            header,
            board: Some(board),
        }
    }
}

/// The whole page.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub theme: Theme,
    pub favourites: Option<FavouritesSection>,
    pub bus_times: BusTimesPane,
}

impl PageModel {
    /// A page with every element present and nothing displayed.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            favourites: Some(FavouritesSection::new()),
            bus_times: BusTimesPane::empty(),
        }
    }

    /// Swap in a new bus-times fragment, discarding the old one (and with
    /// it any toggle control).
    pub fn show_bus_times(&mut self, pane: BusTimesPane) {
        self.bus_times = pane;
    }
}

impl Page for PageModel {
    fn favourites_section(&mut self) -> Option<&mut FavouritesSection> {
        self.favourites.as_mut()
    }

    fn bus_times_header(&mut self) -> Option<&mut BusTimesHeader> {
        self.bus_times.header.as_mut()
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
