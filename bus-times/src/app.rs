//! Page-level application context.
//!
//! Owns the favourites store and dispatches user events to the renderer
//! and binder. One instance lives for the lifetime of a page.

use tracing::{debug, info};

use crate::domain::{Stop, StopId};
use crate::favourites::{FavouriteButtonBinder, FavouriteRenderer, FavouriteStore, Toggled};
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use crate::ui::{Autocomplete, Navigation, Page, ViewRefresh};

/// Things the user (or the page) can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A favourite toggle control was clicked.
    ToggleFavourite { stop_id: StopId, stop_name: String },
    /// A favourites card was clicked outside its toggle.
    OpenFavourite { stop_id: StopId },
    /// A search suggestion was picked.
    SelectSuggestion { stop_id: StopId },
    /// The bus-times fragment finished loading.
    BusTimesRefreshed,
    /// The browser's back button was used.
    NavigatedBack,
    /// The theme button was clicked.
    ToggleTheme,
}

/// The capabilities an event handler may touch.
pub struct Surface<'a> {
    pub page: &'a mut dyn Page,
    pub navigation: &'a mut dyn Navigation,
    pub refresh: &'a mut dyn ViewRefresh,
}

/// Application context for one page.
#[derive(Debug)]
pub struct FavouritesApp<S> {
    store: FavouriteStore<S>,
    renderer: FavouriteRenderer,
    binder: FavouriteButtonBinder,
    theme: Theme,
}

impl<S: KeyValueStore> FavouritesApp<S> {
    /// Load persisted state from `storage`.
    pub fn new(storage: S) -> Self {
        let store = FavouriteStore::load(storage);
        let theme = Theme::load(store.storage());
        Self {
            store,
            renderer: FavouriteRenderer,
            binder: FavouriteButtonBinder,
            theme,
        }
    }

    /// Initial page setup: apply the theme, draw the favourites and, if the
    /// page was opened on a stop, bind its toggle.
    pub fn start(&self, surface: &mut Surface<'_>) {
        surface.page.apply_theme(self.theme);
        self.renderer.render(self.store.favourites(), surface.page);
        self.binder
            .bind(&self.store, &*surface.navigation, surface.page);
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: UiEvent, surface: &mut Surface<'_>) {
        debug!(?event, "handling event");
        match event {
            UiEvent::ToggleFavourite { stop_id, stop_name } => {
                let outcome = self.store.toggle(&stop_id, &stop_name);
                match outcome {
                    Toggled::Added => info!(stop_id = %stop_id, "added favourite"),
                    Toggled::Removed => info!(stop_id = %stop_id, "removed favourite"),
                }
                self.renderer.render(self.store.favourites(), surface.page);
                self.binder
                    .bind(&self.store, &*surface.navigation, surface.page);
            }
            UiEvent::OpenFavourite { stop_id } | UiEvent::SelectSuggestion { stop_id } => {
                self.renderer
                    .activate(&stop_id, surface.navigation, surface.refresh);
            }
            UiEvent::BusTimesRefreshed => {
                self.binder
                    .bind(&self.store, &*surface.navigation, surface.page);
            }
            UiEvent::NavigatedBack => {
                if surface.navigation.back()
                    && let Some(stop_id) = surface.navigation.current_stop_id()
                {
                    surface.refresh.request_refresh(&stop_id);
                }
            }
            UiEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.theme.save(self.store.storage_mut());
                surface.page.apply_theme(self.theme);
            }
        }
    }

    /// Search suggestions for the stop search box.
    pub fn suggest<A: Autocomplete + ?Sized>(&self, autocomplete: &A, query: &str) -> Vec<Stop> {
        autocomplete.suggest(query.trim())
    }

    /// The favourites store.
    pub fn store(&self) -> &FavouriteStore<S> {
        &self.store
    }

    /// The current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ArrivalBoard;
    use crate::favourites::FAVOURITES_KEY;
    use crate::gtfs::StopDirectory;
    use crate::storage::MemoryStore;
    use crate::ui::{BusTimesPane, History, PageModel, RefreshQueue};

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    struct Harness {
        page: PageModel,
        history: History,
        refresh: RefreshQueue,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                page: PageModel::new(Theme::Light),
                history: History::default(),
                refresh: RefreshQueue::new(),
            }
        }

        fn surface(&mut self) -> Surface<'_> {
            Surface {
                page: &mut self.page,
                navigation: &mut self.history,
                refresh: &mut self.refresh,
            }
        }

        /// Play the part of the fragment loader for any queued refreshes.
        fn complete_refreshes<S: KeyValueStore>(&mut self, app: &mut FavouritesApp<S>, name: &str) {
            while let Some(stop_id) = self.refresh.pop() {
                self.page.show_bus_times(BusTimesPane::from_board(Ok(ArrivalBoard {
                    stop_id,
                    stop_name: name.to_string(),
                    buses: vec![],
                })));
                app.handle(UiEvent::BusTimesRefreshed, &mut self.surface());
            }
        }

        fn header_toggle_count(&self) -> usize {
            self.page
                .bus_times
                .header
                .as_ref()
                .map_or(0, |h| usize::from(h.toggle.is_some()))
        }
    }

    #[test]
    fn toggle_round_trip_updates_page() {
        let mut app = FavouritesApp::new(MemoryStore::new());
        let mut h = Harness::new();
        app.start(&mut h.surface());
        assert!(!h.page.favourites.as_ref().unwrap().is_visible());

        let toggle = UiEvent::ToggleFavourite {
            stop_id: stop("101"),
            stop_name: "Main St Station".into(),
        };

        app.handle(toggle.clone(), &mut h.surface());
        let section = h.page.favourites.as_ref().unwrap();
        assert!(section.is_visible());
        assert_eq!(section.cards().len(), 1);
        assert_eq!(section.cards()[0].stop_name, "Main St Station");

        app.handle(toggle, &mut h.surface());
        let section = h.page.favourites.as_ref().unwrap();
        assert!(!section.is_visible());
        assert!(section.cards().is_empty());
    }

    #[test]
    fn opening_a_favourite_binds_one_toggle() {
        let mut storage = MemoryStore::new();
        storage.set(FAVOURITES_KEY, r#"{"5":"King St"}"#).unwrap();
        let mut app = FavouritesApp::new(storage);
        let mut h = Harness::new();
        app.start(&mut h.surface());

        app.handle(
            UiEvent::OpenFavourite { stop_id: stop("5") },
            &mut h.surface(),
        );
        assert_eq!(h.history.current_stop_id(), Some(stop("5")));
        h.complete_refreshes(&mut app, "King St");

        // Extra refresh notifications must not add more controls
        app.handle(UiEvent::BusTimesRefreshed, &mut h.surface());
        app.handle(UiEvent::BusTimesRefreshed, &mut h.surface());

        assert_eq!(h.header_toggle_count(), 1);
        let toggle = h.page.bus_times.header.as_ref().unwrap().toggle.as_ref().unwrap();
        assert!(toggle.active);
    }

    #[test]
    fn header_toggle_click_adds_favourite_and_syncs() {
        let mut app = FavouritesApp::new(MemoryStore::new());
        let mut h = Harness::new();
        app.start(&mut h.surface());

        app.handle(
            UiEvent::SelectSuggestion { stop_id: stop("101") },
            &mut h.surface(),
        );
        h.complete_refreshes(&mut app, "Main St Station");

        let toggle = h.page.bus_times.header.as_ref().unwrap().toggle.clone().unwrap();
        assert!(!toggle.active);

        app.handle(
            UiEvent::ToggleFavourite {
                stop_id: toggle.stop_id,
                stop_name: toggle.stop_name,
            },
            &mut h.surface(),
        );

        assert!(app.store().contains(&stop("101")));
        assert_eq!(h.header_toggle_count(), 1);
        assert!(h.page.bus_times.header.as_ref().unwrap().toggle.as_ref().unwrap().active);
        assert_eq!(h.page.favourites.as_ref().unwrap().cards().len(), 1);
    }

    #[test]
    fn toggle_during_pending_refresh_keeps_header_stop() {
        let mut app = FavouritesApp::new(MemoryStore::new());
        let mut h = Harness::new();

        app.handle(UiEvent::SelectSuggestion { stop_id: stop("101") }, &mut h.surface());
        h.complete_refreshes(&mut app, "Main St Station");

        // Stop 5 selected but its fragment has not arrived
        app.handle(UiEvent::SelectSuggestion { stop_id: stop("5") }, &mut h.surface());
        app.handle(
            UiEvent::ToggleFavourite {
                stop_id: stop("7"),
                stop_name: "Bay St".into(),
            },
            &mut h.surface(),
        );

        let toggle = h.page.bus_times.header.as_ref().unwrap().toggle.clone().unwrap();
        assert_eq!(toggle.stop_id, stop("101"));
        assert_eq!(toggle.stop_name, "Main St Station");

        h.complete_refreshes(&mut app, "King St");
        let toggle = h.page.bus_times.header.as_ref().unwrap().toggle.clone().unwrap();
        assert_eq!(toggle.stop_id, stop("5"));
        assert_eq!(toggle.stop_name, "King St");
        assert!(!toggle.active);
    }

    #[test]
    fn back_requests_refresh_for_previous_stop() {
        let mut app = FavouritesApp::new(MemoryStore::new());
        let mut h = Harness::new();

        app.handle(UiEvent::SelectSuggestion { stop_id: stop("1") }, &mut h.surface());
        app.handle(UiEvent::SelectSuggestion { stop_id: stop("2") }, &mut h.surface());
        while h.refresh.pop().is_some() {}

        app.handle(UiEvent::NavigatedBack, &mut h.surface());
        assert_eq!(h.refresh.pop(), Some(stop("1")));

        // Back to the start page: nothing to refresh
        app.handle(UiEvent::NavigatedBack, &mut h.surface());
        assert!(h.refresh.is_empty());
    }

    #[test]
    fn theme_toggle_persists_and_applies() {
        let mut storage = MemoryStore::new();
        {
            let mut app = FavouritesApp::new(&mut storage);
            let mut h = Harness::new();
            app.handle(UiEvent::ToggleTheme, &mut h.surface());
            assert_eq!(app.theme(), Theme::Dark);
            assert_eq!(h.page.theme, Theme::Dark);
        }

        let app = FavouritesApp::new(storage);
        let mut h = Harness::new();
        app.start(&mut h.surface());
        assert_eq!(h.page.theme, Theme::Dark);
    }

    #[test]
    fn malformed_storage_starts_empty() {
        let mut storage = MemoryStore::new();
        storage.set(FAVOURITES_KEY, "not json").unwrap();

        let app = FavouritesApp::new(storage);
        let mut h = Harness::new();
        app.start(&mut h.surface());

        assert!(app.store().favourites().is_empty());
        assert!(!h.page.favourites.as_ref().unwrap().is_visible());
    }

    #[test]
    fn suggest_trims_query() {
        let app = FavouritesApp::new(MemoryStore::new());
        let stops = StopDirectory::from_stops(vec![Stop::new(stop("5"), "King St")]);

        let results = app.suggest(&stops, "  king ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, stop("5"));
    }
}
