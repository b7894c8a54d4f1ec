//! Scheduled arrivals from the static feed.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use crate::board::Arrival;
use crate::domain::StopId;

use super::error::GtfsError;
use super::time::parse_static_time;
use super::{open_table, read_table};

const ROUTES_FILE: &str = "routes.txt";
const TRIPS_FILE: &str = "trips.txt";
const STOP_TIMES_FILE: &str = "stop_times.txt";

#[derive(Debug, Deserialize)]
struct RouteRecord {
    route_id: String,
    #[serde(default)]
    route_short_name: String,
}

#[derive(Debug, Deserialize)]
struct TripRecord {
    trip_id: String,
    route_id: String,
    #[serde(default)]
    trip_headsign: String,
}

#[derive(Debug, Deserialize)]
struct StopTimeRecord {
    trip_id: String,
    #[serde(default)]
    arrival_time: String,
    stop_id: String,
}

#[derive(Debug, Clone)]
struct Trip {
    route_id: String,
    headsign: String,
}

/// A trip's scheduled visit to a stop.
#[derive(Debug, Clone)]
struct ScheduledCall {
    trip_id: String,
    arrival_time: String,
}

/// Timetable used when realtime predictions are missing.
///
/// Service calendars are not consulted: every trip is assumed to run on
/// the requested day. Only the service day of `now`'s calendar date is
/// resolved, so after midnight the previous day's `24:xx:xx` calls are not
/// shown.
#[derive(Debug, Clone, Default)]
pub struct StaticSchedule {
    /// route_id → route_short_name
    routes: HashMap<String, String>,
    trips: HashMap<String, Trip>,
    /// stop_id → calls at that stop
    calls: HashMap<String, Vec<ScheduledCall>>,
}

impl StaticSchedule {
    /// Build a schedule from the content of `routes.txt`, `trips.txt` and
    /// `stop_times.txt`.
    pub fn from_readers(
        routes: impl Read,
        trips: impl Read,
        stop_times: impl Read,
    ) -> Result<Self, GtfsError> {
        let routes = read_table::<RouteRecord>(ROUTES_FILE, routes)?
            .into_iter()
            .map(|r| (r.route_id, r.route_short_name))
            .collect();

        let trips = read_table::<TripRecord>(TRIPS_FILE, trips)?
            .into_iter()
            .map(|t| {
                let trip = Trip {
                    route_id: t.route_id,
                    headsign: t.trip_headsign,
                };
                (t.trip_id, trip)
            })
            .collect();

        let mut calls: HashMap<String, Vec<ScheduledCall>> = HashMap::new();
        for st in read_table::<StopTimeRecord>(STOP_TIMES_FILE, stop_times)? {
            calls.entry(st.stop_id).or_default().push(ScheduledCall {
                trip_id: st.trip_id,
                arrival_time: st.arrival_time,
            });
        }

        Ok(Self {
            routes,
            trips,
            calls,
        })
    }

    /// Load the schedule tables from an extracted feed directory.
    pub fn load(dir: &Path) -> Result<Self, GtfsError> {
        Self::from_readers(
            open_table(dir, ROUTES_FILE)?,
            open_table(dir, TRIPS_FILE)?,
            open_table(dir, STOP_TIMES_FILE)?,
        )
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Scheduled arrivals at `stop_id` on today's service date, at or after
    /// `now`, in file order.
    ///
    /// Calls with no arrival time, an unparseable time or an unknown trip
    /// are skipped. Calls past midnight belonging to yesterday's service
    /// date are not returned.
    pub fn arrivals_at(&self, stop_id: &StopId, now: DateTime<Tz>) -> Vec<Arrival> {
        let Some(calls) = self.calls.get(stop_id.as_str()) else {
            return Vec::new();
        };

        let service_date = now.date_naive();
        let tz = now.timezone();

        calls
            .iter()
            .filter_map(|call| {
                let Some(trip) = self.trips.get(&call.trip_id) else {
                    debug!(trip_id = %call.trip_id, "stop time references unknown trip");
                    return None;
                };

                let arrival_time = match parse_static_time(&call.arrival_time, service_date, tz) {
                    Ok(t) => t,
                    Err(e) => {
                        debug!(trip_id = %call.trip_id, error = %e, "skipping stop time");
                        return None;
                    }
                };

                if arrival_time < now {
                    return None;
                }

                let route_name = self
                    .routes
                    .get(&trip.route_id)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(&trip.route_id);

                Some(Arrival {
                    route_id: trip.route_id.clone(),
                    route_name: route_name.clone(),
                    trip_headsign: trip.headsign.clone(),
                    arrival_time,
                    is_realtime: false,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use chrono_tz::America::Toronto;

    const ROUTES: &str = "\
route_id,agency_id,route_short_name,route_long_name
R1,HSR,1,King
R5,HSR,,Delaware
";

    const TRIPS: &str = "\
route_id,service_id,trip_id,trip_headsign
R1,WK,T1,Eastgate
R1,WK,T2,University
R5,WK,T3,Meadowlands
";

    const STOP_TIMES: &str = "\
trip_id,arrival_time,departure_time,stop_id,stop_sequence
T1,08:00:00,08:00:00,101,1
T2,13:15:00,13:15:00,101,1
T3,25:05:00,25:05:00,101,4
T9,14:00:00,14:00:00,101,1
T2,,,101,2
T1,12:30:00,12:30:00,5,2
";

    fn schedule() -> StaticSchedule {
        StaticSchedule::from_readers(ROUTES.as_bytes(), TRIPS.as_bytes(), STOP_TIMES.as_bytes())
            .unwrap()
    }

    fn noon() -> DateTime<Tz> {
        Toronto.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap()
    }

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[test]
    fn counts() {
        let schedule = schedule();
        assert_eq!(schedule.route_count(), 2);
        assert_eq!(schedule.trip_count(), 3);
    }

    #[test]
    fn upcoming_calls_only() {
        let arrivals = schedule().arrivals_at(&stop("101"), noon());

        let trips: Vec<_> = arrivals.iter().map(|a| a.trip_headsign.as_str()).collect();
        assert_eq!(trips, ["University", "Meadowlands"]);
        assert!(arrivals.iter().all(|a| !a.is_realtime));
    }

    #[test]
    fn route_name_falls_back_to_id() {
        let arrivals = schedule().arrivals_at(&stop("101"), noon());
        assert_eq!(arrivals[0].route_name, "1");
        assert_eq!(arrivals[1].route_name, "R5");
    }

    #[test]
    fn past_midnight_trip_lands_next_day() {
        let arrivals = schedule().arrivals_at(&stop("101"), noon());
        let late = &arrivals[1];
        assert_eq!(late.arrival_time.date_naive(), noon().date_naive().succ_opt().unwrap());
        assert_eq!((late.arrival_time.hour(), late.arrival_time.minute()), (1, 5));
    }

    #[test]
    fn after_midnight_uses_the_new_service_date() {
        // 00:30 on the 2nd: yesterday's 25:05 call (01:05 today) is not
        // resolved, only today's instance on the 3rd
        let now = Toronto.with_ymd_and_hms(2024, 10, 2, 0, 30, 0).unwrap();
        let arrivals = schedule().arrivals_at(&stop("101"), now);

        let late: Vec<_> = arrivals
            .iter()
            .filter(|a| a.trip_headsign == "Meadowlands")
            .collect();
        assert_eq!(late.len(), 1);
        assert_eq!(
            late[0].arrival_time.date_naive(),
            now.date_naive().succ_opt().unwrap()
        );
    }

    #[test]
    fn unknown_stop_has_no_arrivals() {
        assert!(schedule().arrivals_at(&stop("999"), noon()).is_empty());
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("routes.txt"), ROUTES).unwrap();
        std::fs::write(dir.path().join("trips.txt"), TRIPS).unwrap();
        std::fs::write(dir.path().join("stop_times.txt"), STOP_TIMES).unwrap();

        let schedule = StaticSchedule::load(dir.path()).unwrap();
        assert_eq!(schedule.arrivals_at(&stop("5"), noon()).len(), 1);
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("routes.txt"), ROUTES).unwrap();

        let err = StaticSchedule::load(dir.path()).unwrap_err();
        assert!(matches!(err, GtfsError::Io { .. }));
    }
}
