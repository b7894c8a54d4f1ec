//! Arrival and board types.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::StopId;

use super::countdown::format_countdown;

/// A bus expected at a stop.
///
/// Produced either from the realtime feed or from the static schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub route_id: String,
    pub route_name: String,
    pub trip_headsign: String,
    pub arrival_time: DateTime<Tz>,
    pub is_realtime: bool,
}

/// One row of the board, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusRow {
    /// ISO 8601 arrival time.
    pub arrival_time: String,
    pub route_id: String,
    pub route_name: String,
    pub trip_headsign: String,
    pub is_realtime: bool,
    /// Whole minutes until arrival, never negative.
    pub countdown: i64,
    pub countdown_text: String,
    /// "Arriving" for realtime predictions, "Scheduled" otherwise.
    pub arrival_type: &'static str,
    /// 12-hour clock time, e.g. "02:05 PM".
    pub arrival_time_formatted: String,
}

impl BusRow {
    /// Format `arrival` relative to `now`.
    pub fn new(arrival: &Arrival, now: DateTime<Tz>) -> Self {
        let countdown = (arrival.arrival_time - now).num_seconds() / 60;
        let countdown = countdown.max(0);

        Self {
            arrival_time: arrival.arrival_time.to_rfc3339(),
            route_id: arrival.route_id.clone(),
            route_name: arrival.route_name.clone(),
            trip_headsign: arrival.trip_headsign.clone(),
            is_realtime: arrival.is_realtime,
            countdown,
            countdown_text: format_countdown(countdown),
            arrival_type: if arrival.is_realtime {
                "Arriving"
            } else {
                "Scheduled"
            },
            arrival_time_formatted: arrival.arrival_time.format("%I:%M %p").to_string(),
        }
    }
}

/// Upcoming arrivals at one stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalBoard {
    pub stop_id: StopId,
    pub stop_name: String,
    pub buses: Vec<BusRow>,
}

/// Why a board could not be shown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("No stop selected")]
    NoStopSelected,

    #[error("Invalid stop ID")]
    InvalidStop,

    #[error("No upcoming buses found for this stop.")]
    NoUpcomingBuses { stop_id: StopId },
}

/// A board or the reason there isn't one.
pub type BoardResult = Result<ArrivalBoard, BoardError>;
