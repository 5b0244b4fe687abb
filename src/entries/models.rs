// src/entries/models.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

use super::display::{format_date_long, format_time_12h};
use crate::progress::calculator::compute_hours;
use crate::progress::aggregator::round_hours;

// ============================================================================
// Persistence Models
// ============================================================================

/// Row as stored in the `entries` table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EntryRow {
    pub id: i64,
    pub date: String,
    pub time_in: String,
    pub time_out: String,
    pub break_time: String,
    pub note: Option<String>,
    pub created_by: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// ============================================================================
// Domain Models
// ============================================================================

/// Entry date: structured when recognisable, otherwise the stored text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl EntryDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            EntryDate::Parsed(d) => Some(*d),
            EntryDate::Raw(_) => None,
        }
    }
}

impl Serialize for EntryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EntryDate::Parsed(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            EntryDate::Raw(raw) => serializer.serialize_str(raw),
        }
    }
}

/// A logged work session as consumed by progress aggregation.
/// Time fields stay textual; the calculator decides what is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub id: i64,
    pub date: EntryDate,
    pub time_in: String,
    pub time_out: String,
    pub break_time: String,
    pub note: Option<String>,
    pub created_by: String,
}

impl TimeEntry {
    pub fn hours(&self) -> f64 {
        compute_hours(&self.time_in, &self.time_out, Some(self.break_time.as_str()))
    }
}

// ============================================================================
// Request Models
// ============================================================================

/// Break length as sent by clients: `"60"`, `""` or `60`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BreakInput {
    Minutes(i64),
    Text(String),
}

impl BreakInput {
    pub fn as_text(&self) -> String {
        match self {
            BreakInput::Minutes(m) => m.to_string(),
            BreakInput::Text(t) => t.clone(),
        }
    }
}

/// Body for creating an entry and for the full-replace update
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRequest {
    pub date: String,
    pub time_in: String,
    pub time_out: String,
    #[serde(default)]
    pub break_time: Option<BreakInput>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Canonical values ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    pub date: NaiveDate,
    pub time_in: String,
    pub time_out: String,
    pub break_time: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    #[serde(default)]
    pub order: SortOrder,
}

// ============================================================================
// Response Models
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub id: i64,
    pub date: EntryDate,
    pub date_display: Option<String>,
    pub time_in: String,
    pub time_out: String,
    pub time_in_display: String,
    pub time_out_display: String,
    pub break_time: String,
    pub note: Option<String>,
    pub hours: f64,
}

impl From<&TimeEntry> for EntryResponse {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.date.clone(),
            date_display: entry.date.as_date().map(format_date_long),
            time_in: entry.time_in.clone(),
            time_out: entry.time_out.clone(),
            time_in_display: format_time_12h(&entry.time_in),
            time_out_display: format_time_12h(&entry.time_out),
            break_time: entry.break_time.clone(),
            note: entry.note.clone(),
            hours: round_hours(entry.hours()),
        }
    }
}
