//! Date helper functions

use chrono::{NaiveDate, Utc};

use crate::content::parse_post_date;

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(date, "YYYY-MM-DD") // -> "2024-01-15"
/// format_date(date, "LL")         // -> "January 15, 2024"
/// ```
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a post's raw date for display, passing unreadable dates through
pub fn display_date(raw: &str, format: &str) -> String {
    match parse_post_date(raw) {
        Some(date) => format_date(date, format),
        None => raw.to_string(),
    }
}

/// Today's calendar date in an IANA timezone, UTC when `timezone` is empty or unknown
pub fn today(timezone: &str) -> NaiveDate {
    let now = Utc::now();
    match timezone.parse::<chrono_tz::Tz>() {
        Ok(tz) if !timezone.is_empty() => now.with_timezone(&tz).date_naive(),
        _ => now.date_naive(),
    }
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Localized presets first
    let format = match format {
        "LL" => "MMMM D, YYYY",
        "L" => "MM/DD/YYYY",
        other => other,
    };

    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        // Day of month
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("D", "%-d"),
        // Day of week
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
