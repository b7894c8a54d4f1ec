//! Askama templates for the page and its fragments.

use askama::Template;

use crate::board::BusRow;
use crate::config::AppConfig;
use crate::domain::StopId;
use crate::ui::{BusTimesHeader, BusTimesPane, FavouriteCard, FavouritesSection, PageModel};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The single page: search box, favourites and bus times.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub logo_url: Option<String>,
    pub theme: &'static str,
    pub theme_label: &'static str,
    /// Selected stop, or empty.
    pub stop_id: String,
    /// Pre-rendered [`FavouritesTemplate`].
    pub favourites_html: String,
    /// Pre-rendered [`BusTimesTemplate`].
    pub bus_times_html: String,
}

// ============================================================================
// Fragment Templates (swapped in place, no base.html)
// ============================================================================

/// Favourites section with its card list.
#[derive(Template)]
#[template(path = "favourites.html")]
pub struct FavouritesTemplate {
    pub visible: bool,
    pub has_list: bool,
    pub cards: Vec<FavouriteCard>,
}

impl FavouritesTemplate {
    pub fn from_section(section: &FavouritesSection) -> Self {
        Self {
            visible: section.is_visible(),
            has_list: section.has_list(),
            cards: section.cards().to_vec(),
        }
    }
}

/// Contents of the bus-times container.
#[derive(Template)]
#[template(path = "bus_times.html")]
pub struct BusTimesTemplate {
    pub header: Option<BusTimesHeader>,
    pub error: Option<String>,
    pub buses: Vec<BusRow>,
}

impl BusTimesTemplate {
    pub fn from_pane(pane: &BusTimesPane) -> Self {
        let (error, buses) = match &pane.board {
            Some(Ok(board)) => (None, board.buses.clone()),
            Some(Err(e)) => (Some(e.to_string()), Vec::new()),
            None => (None, Vec::new()),
        };
        Self {
            header: pane.header.clone(),
            error,
            buses,
        }
    }
}

/// Render just the bus-times fragment.
pub fn render_bus_times(pane: &BusTimesPane) -> Result<String, askama::Error> {
    BusTimesTemplate::from_pane(pane).render()
}

/// Render the whole page as it currently stands.
///
/// A page without a favourites section renders none.
pub fn render_page(
    page: &PageModel,
    config: &AppConfig,
    stop_id: Option<&StopId>,
) -> Result<String, askama::Error> {
    let favourites_html = match &page.favourites {
        Some(section) => FavouritesTemplate::from_section(section).render()?,
        None => String::new(),
    };

    IndexTemplate {
        title: config.title().to_string(),
        logo_url: config.logo_url.clone(),
        theme: page.theme.as_str(),
        theme_label: page.theme.toggle_label(),
        stop_id: stop_id.map(|s| s.to_string()).unwrap_or_default(),
        favourites_html,
        bus_times_html: render_bus_times(&page.bus_times)?,
    }
    .render()
}
