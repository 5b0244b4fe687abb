// src/entries/adapter.rs
//! Maps stored rows into `TimeEntry` values for aggregation.

use chrono::{DateTime, NaiveDate};

use super::models::{EntryDate, EntryRow, TimeEntry};

/// Date layouts accepted from clients and found in older rows
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y"];

/// Parse a calendar date from ISO, RFC 3339 timestamp, US `M/D/YYYY`
/// or long `June 2, 2025` form.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

impl From<EntryRow> for TimeEntry {
    fn from(row: EntryRow) -> Self {
        let date = match parse_entry_date(&row.date) {
            Some(d) => EntryDate::Parsed(d),
            None => EntryDate::Raw(row.date),
        };

        TimeEntry {
            id: row.id,
            date,
            time_in: row.time_in,
            time_out: row.time_out,
            break_time: row.break_time,
            note: row.note,
            created_by: row.created_by,
        }
    }
}

/// Order-preserving conversion; nothing is filtered or rejected
pub fn normalize(rows: Vec<EntryRow>) -> Vec<TimeEntry> {
    rows.into_iter().map(TimeEntry::from).collect()
}
