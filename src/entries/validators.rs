// src/entries/validators.rs

use super::adapter::parse_entry_date;
use super::models::{EntryRequest, NormalizedEntry};
use crate::common::{ValidationResult, Validator};
use crate::progress::calculator::{canonical_time, parse_time_of_day, BreakMinutes};

const MAX_NOTE_LENGTH: usize = 1000;

// ============================================================================
// Time Entry Validators
// ============================================================================

pub struct EntryValidator;

impl Validator<EntryRequest> for EntryValidator {
    fn validate(&self, data: &EntryRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        // Validate date
        if data.date.trim().is_empty() {
            result.add_error("date", "Please select a date");
        } else if parse_entry_date(&data.date).is_none() {
            result.add_error("date", "Date must be YYYY-MM-DD, M/D/YYYY, 'June 2, 2025' or an RFC 3339 timestamp");
        }

        // Validate times
        let time_in = parse_time_of_day(&data.time_in);
        if time_in.is_none() {
            result.add_error("time_in", "Time in must be in HH:MM (24-hour) format");
        }

        let time_out = parse_time_of_day(&data.time_out);
        if time_out.is_none() {
            result.add_error("time_out", "Time out must be in HH:MM (24-hour) format");
        }

        // Overnight sessions are not supported
        if let (Some(start), Some(end)) = (time_in, time_out) {
            if end < start {
                result.add_error("time_out", "Time out must not be earlier than time in");
            }
        }

        // Validate break
        let break_text = data.break_time.as_ref().map(|b| b.as_text());
        match break_text.as_deref().map(BreakMinutes::parse_strict) {
            Some(Err(e)) => result.add_error("break_time", &format!("Invalid break: {}", e)),
            Some(Ok(minutes)) => {
                if let (Some(start), Some(end)) = (time_in, time_out) {
                    if end >= start && minutes.minutes() > end - start {
                        result.add_error("break_time", "Break cannot be longer than the session");
                    }
                }
            }
            None => {}
        }

        // Validate note length if provided
        if let Some(note) = &data.note {
            if note.chars().count() > MAX_NOTE_LENGTH {
                result.add_error("note", "Note must be at most 1000 characters");
            }
        }

        result
    }
}

impl EntryRequest {
    /// Canonical storage values. Returns `None` if the request would not
    /// pass `EntryValidator`.
    pub fn normalized(&self) -> Option<NormalizedEntry> {
        let break_minutes = match &self.break_time {
            Some(b) => BreakMinutes::parse_strict(&b.as_text()).ok()?,
            None => BreakMinutes::ZERO,
        };

        Some(NormalizedEntry {
            date: parse_entry_date(&self.date)?,
            time_in: canonical_time(&self.time_in)?,
            time_out: canonical_time(&self.time_out)?,
            break_time: break_minutes.to_storage(),
            note: self
                .note
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        })
    }
}
