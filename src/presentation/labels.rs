use chrono::NaiveDate;

const CALENDAR_FORMAT: &str = "%b %-d";

/// Describes how far `date` is from `today`: "Today", "Tomorrow", "in N days"
/// within the coming week, and a short calendar date ("Jan 8") otherwise.
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        days @ 2..=6 => format!("in {days} days"),
        _ => date.format(CALENDAR_FORMAT).to_string(),
    }
}

/// Renders minor currency units as a plain decimal amount, e.g. `123456` as `1234.56`.
pub fn format_minor_units(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}
