//! Projection of the favourites set onto the page.

use tracing::trace;

use crate::domain::StopId;
use crate::ui::{FavouriteCard, Navigation, Page, ViewRefresh};

use super::set::FavouriteSet;

/// Rebuilds the favourites list and handles clicks on its cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct FavouriteRenderer;

impl FavouriteRenderer {
    /// One card per favourite, in set order.
    pub fn cards(&self, set: &FavouriteSet) -> Vec<FavouriteCard> {
        set.iter()
            .map(|entry| FavouriteCard {
                stop_id: entry.stop_id.clone(),
                stop_name: entry.stop_name.clone(),
            })
            .collect()
    }

    /// Clear and rebuild the favourites list, showing the section only
    /// when there is something in it.
    ///
    /// Does nothing if the section or its list is missing from the page.
    pub fn render<P: Page + ?Sized>(&self, set: &FavouriteSet, page: &mut P) {
        let Some(section) = page.favourites_section() else {
            trace!("no favourites section on page, skipping render");
            return;
        };

        if !section.replace_cards(self.cards(set)) {
            trace!("no favourites list on page, skipping render");
            return;
        }
        section.set_visible(!set.is_empty());
    }

    /// A card was clicked (outside its toggle control): select that stop
    /// and load its arrivals in place.
    pub fn activate<N, R>(&self, stop_id: &StopId, navigation: &mut N, refresh: &mut R)
    where
        N: Navigation + ?Sized,
        R: ViewRefresh + ?Sized,
    {
        navigation.push_stop_id(stop_id);
        refresh.request_refresh(stop_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crate::ui::{FavouritesSection, History, PageModel, RefreshQueue};

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[test]
    fn render_shows_one_card_per_entry() {
        let mut set = FavouriteSet::new();
        set.insert(stop("101"), "Main St Station");
        set.insert(stop("5"), "King St");

        let mut page = PageModel::new(Theme::Light);
        FavouriteRenderer.render(&set, &mut page);

        let section = page.favourites.as_ref().unwrap();
        assert!(section.is_visible());
        let names: Vec<_> = section.cards().iter().map(|c| c.stop_name.as_str()).collect();
        assert_eq!(names, ["Main St Station", "King St"]);
    }

    #[test]
    fn render_empty_set_hides_section() {
        let mut page = PageModel::new(Theme::Light);
        let mut set = FavouriteSet::new();
        set.insert(stop("1"), "One");
        FavouriteRenderer.render(&set, &mut page);

        set.remove(&stop("1"));
        FavouriteRenderer.render(&set, &mut page);

        let section = page.favourites.as_ref().unwrap();
        assert!(!section.is_visible());
        assert!(section.cards().is_empty());
    }

    #[test]
    fn render_without_section_is_noop() {
        let mut page = PageModel::new(Theme::Light);
        page.favourites = None;

        let mut set = FavouriteSet::new();
        set.insert(stop("1"), "One");
        FavouriteRenderer.render(&set, &mut page);

        assert!(page.favourites.is_none());
    }

    #[test]
    fn render_without_list_leaves_section_alone() {
        let mut page = PageModel::new(Theme::Light);
        page.favourites = Some(FavouritesSection::without_list());

        let mut set = FavouriteSet::new();
        set.insert(stop("1"), "One");
        FavouriteRenderer.render(&set, &mut page);

        assert!(!page.favourites.as_ref().unwrap().is_visible());
    }

    #[test]
    fn activate_pushes_history_and_requests_refresh() {
        let mut history = History::default();
        let mut refresh = RefreshQueue::new();

        FavouriteRenderer.activate(&stop("101"), &mut history, &mut refresh);

        assert_eq!(history.current_stop_id(), Some(stop("101")));
        assert_eq!(history.current().to_string(), "/?stop_id=101");
        assert_eq!(refresh.pop(), Some(stop("101")));
    }
}
