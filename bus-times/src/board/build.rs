//! Assembling a board from realtime and scheduled arrivals.

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::debug;

use crate::config::MAX_ARRIVALS;
use crate::domain::StopId;
use crate::gtfs::StopDirectory;

use super::arrival::{Arrival, ArrivalBoard, BoardError, BoardResult, BusRow};

/// Build the board for the `stop_id` query parameter.
///
/// `realtime` is `None` when the realtime feed could not be fetched. The
/// static schedule is consulted when realtime is unavailable or has nothing
/// upcoming for the stop; it is only queried in that case.
///
/// Arrivals before `now` are dropped, the rest are sorted by time and
/// limited to [`MAX_ARRIVALS`].
pub fn build_board<F>(
    stop_id: Option<&str>,
    stops: &StopDirectory,
    realtime: Option<Vec<Arrival>>,
    scheduled: F,
    now: DateTime<Tz>,
) -> BoardResult
where
    F: FnOnce(&StopId) -> Vec<Arrival>,
{
    let raw = stop_id
        .filter(|s| !s.is_empty())
        .ok_or(BoardError::NoStopSelected)?;
    let stop_id = StopId::parse(raw).map_err(|_| BoardError::InvalidStop)?;
    let stop = stops.lookup(&stop_id).ok_or(BoardError::InvalidStop)?;

    let realtime_available = realtime.is_some();
    if !realtime_available {
        debug!(stop_id = %stop_id, "realtime unavailable, using scheduled times");
    }

    let mut upcoming: Vec<Arrival> = realtime
        .unwrap_or_default()
        .into_iter()
        .filter(|a| a.arrival_time >= now)
        .collect();

    if upcoming.is_empty() || !realtime_available {
        upcoming.extend(
            scheduled(&stop_id)
                .into_iter()
                .filter(|a| a.arrival_time >= now),
        );
    }

    if upcoming.is_empty() {
        return Err(BoardError::NoUpcomingBuses { stop_id });
    }

    upcoming.sort_by_key(|a| a.arrival_time);
    upcoming.truncate(MAX_ARRIVALS);

    Ok(ArrivalBoard {
        stop_id,
        stop_name: stop.name.clone(),
        buses: upcoming.iter().map(|a| BusRow::new(a, now)).collect(),
    })
}
