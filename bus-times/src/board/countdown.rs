//! Human-readable countdowns.

/// Describe how far away an arrival is.
///
/// # Examples
///
/// ```
/// use bus_times::board::format_countdown;
///
/// assert_eq!(format_countdown(0), "Arriving right now");
/// assert_eq!(format_countdown(1), "Arriving in 1 minute");
/// assert_eq!(format_countdown(12), "Arriving in 12 minutes");
/// assert_eq!(format_countdown(75), "Arriving in 1 hr 15 min");
/// ```
pub fn format_countdown(minutes: i64) -> String {
    match minutes {
        m if m <= 0 => "Arriving right now".to_string(),
        1 => "Arriving in 1 minute".to_string(),
        m if m >= 60 => format!("Arriving in {} hr {} min", m / 60, m % 60),
        m => format!("Arriving in {} minutes", m),
    }
}
