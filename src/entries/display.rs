// src/entries/display.rs
//! Human-readable renderings used in entry responses.

use chrono::NaiveDate;

/// `"13:05"` -> `"1:05 PM"`. Input without an `H:M` shape is returned unchanged.
pub fn format_time_12h(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_string();
    };
    if hours.is_empty() || minutes.is_empty() {
        return time.to_string();
    }
    let Ok(hour) = hours.trim().parse::<u32>() else {
        return time.to_string();
    };

    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    format!("{}:{:0>2} {}", hour12, minutes, period)
}

/// `2026-01-05` -> `"Mon, January 5, 2026"`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%a, %B %-d, %Y").to_string()
}
