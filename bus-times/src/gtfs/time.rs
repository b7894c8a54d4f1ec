//! GTFS schedule times.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::error::GtfsError;

/// Resolve a GTFS `arrival_time` on a service date.
///
/// GTFS times are measured from the start of the service day and may run
/// past midnight: `25:30:00` is 01:30 on the following calendar day.
///
/// # Examples
///
/// ```
/// use bus_times::gtfs::parse_static_time;
/// use chrono::{NaiveDate, Timelike};
/// use chrono_tz::America::Toronto;
///
/// let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
/// let t = parse_static_time("25:30:00", date, Toronto).unwrap();
/// assert_eq!(t.date_naive(), NaiveDate::from_ymd_opt(2024, 10, 2).unwrap());
/// assert_eq!((t.hour(), t.minute()), (1, 30));
/// ```
pub fn parse_static_time(
    value: &str,
    service_date: NaiveDate,
    tz: Tz,
) -> Result<DateTime<Tz>, GtfsError> {
    let invalid = || GtfsError::InvalidTime {
        value: value.to_string(),
    };

    let mut parts = value.trim().split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    let seconds: u32 = s.parse().map_err(|_| invalid())?;

    if m.len() != 2 || s.len() != 2 {
        return Err(invalid());
    }

    let time = NaiveTime::from_hms_opt(hours % 24, minutes, seconds).ok_or_else(invalid)?;
    let date = service_date
        .checked_add_days(Days::new(u64::from(hours / 24)))
        .ok_or_else(invalid)?;

    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| GtfsError::NonexistentLocalTime {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::America::Toronto;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_time() {
        let t = parse_static_time("14:05:30", date(2024, 10, 1), Toronto).unwrap();
        assert_eq!(t.date_naive(), date(2024, 10, 1));
        assert_eq!((t.hour(), t.minute(), t.second()), (14, 5, 30));
    }

    #[test]
    fn single_digit_hour() {
        let t = parse_static_time("8:00:00", date(2024, 10, 1), Toronto).unwrap();
        assert_eq!(t.hour(), 8);
    }

    #[test]
    fn past_midnight_rolls_over() {
        let t = parse_static_time("24:10:00", date(2024, 12, 31), Toronto).unwrap();
        assert_eq!(t.date_naive(), date(2025, 1, 1));
        assert_eq!((t.hour(), t.minute()), (0, 10));

        let t = parse_static_time("49:00:00", date(2024, 10, 1), Toronto).unwrap();
        assert_eq!(t.date_naive(), date(2024, 10, 3));
        assert_eq!(t.hour(), 1);
    }

    #[test]
    fn rejects_malformed() {
        let d = date(2024, 10, 1);
        assert!(parse_static_time("", d, Toronto).is_err());
        assert!(parse_static_time("14:05", d, Toronto).is_err());
        assert!(parse_static_time("14:05:00:00", d, Toronto).is_err());
        assert!(parse_static_time("14:5:00", d, Toronto).is_err());
        assert!(parse_static_time("14:60:00", d, Toronto).is_err());
        assert!(parse_static_time("ab:cd:ef", d, Toronto).is_err());
        assert!(parse_static_time("-1:00:00", d, Toronto).is_err());
    }

    #[test]
    fn daylight_saving_gap() {
        // Clocks in Toronto jumped from 02:00 to 03:00 on 2024-03-10
        let err = parse_static_time("02:30:00", date(2024, 3, 10), Toronto).unwrap_err();
        assert!(matches!(err, GtfsError::NonexistentLocalTime { .. }));
    }
}
