use chrono::{DateTime, Local, Utc};

pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_duration_minutes(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Whole minutes between two instants, rounded to the nearest minute.
pub fn duration_between(entry: Option<DateTime<Utc>>, exit: Option<DateTime<Utc>>) -> String {
    match (entry, exit) {
        (Some(entry), Some(exit)) => {
            let seconds = (exit - entry).num_seconds().max(0);
            format_duration_minutes((seconds + 30) / 60)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Render the statistics average (milliseconds) as a duration.
pub fn format_average(milliseconds: f64) -> String {
    if milliseconds <= 0.0 {
        return format_duration_minutes(0);
    }
    format_duration_minutes((milliseconds / 60_000.0).round() as i64)
}
