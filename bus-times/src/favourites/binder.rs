//! Favourite toggle control on the bus-times header.

use tracing::trace;

use crate::storage::KeyValueStore;
use crate::ui::{FavouriteToggle, Navigation, Page};

use super::store::FavouriteStore;

/// What a bind pass did to the bus-times header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// A new toggle control was added.
    Inserted,
    /// The existing control was kept and its state brought up to date.
    Synced,
    /// No stop is selected or the header is missing.
    Skipped,
}

/// Keeps exactly one favourite toggle in the bus-times header.
#[derive(Debug, Clone, Copy, Default)]
pub struct FavouriteButtonBinder;

impl FavouriteButtonBinder {
    /// Ensure the header for the selected stop has a toggle reflecting
    /// whether that stop is a favourite.
    ///
    /// Safe to call any number of times per refresh: an existing control
    /// is updated in place, never duplicated. A header still showing a
    /// different stop than the one selected is left alone until its
    /// refresh lands.
    pub fn bind<S, N, P>(
        &self,
        store: &FavouriteStore<S>,
        navigation: &N,
        page: &mut P,
    ) -> BindOutcome
    where
        S: KeyValueStore,
        N: Navigation + ?Sized,
        P: Page + ?Sized,
    {
        let Some(stop_id) = navigation.current_stop_id() else {
            trace!("no stop selected, not binding favourite toggle");
            return BindOutcome::Skipped;
        };

        let Some(header) = page.bus_times_header() else {
            trace!(stop_id = %stop_id, "no bus-times header, not binding favourite toggle");
            return BindOutcome::Skipped;
        };

        if header.stop_id != stop_id {
            trace!(
                stop_id = %stop_id,
                shown = %header.stop_id,
                "bus-times fragment is stale, waiting for refresh"
            );
            return BindOutcome::Skipped;
        }

        let active = store.contains(&stop_id);

        if let Some(toggle) = header.toggle.as_mut() {
            toggle.active = active;
            return BindOutcome::Synced;
        }

        header.toggle = Some(FavouriteToggle {
            stop_id,
            stop_name: header.heading.clone(),
            active,
        });
        BindOutcome::Inserted
    }
}
