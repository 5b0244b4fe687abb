// src/progress/aggregator.rs
//! Folds a user's entries into completion figures against their target.

use serde::Serialize;

use super::calculator::compute_hours;
use crate::entries::models::TimeEntry;

/// One grid cell represents a standard eight-hour day
pub const HOURS_PER_DAY_BLOCK: f64 = 8.0;

/// Aggregate progress for one user
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub completed_hours: f64,
    pub completion_percentage: u32,
    pub completed_day_blocks: u32,
    pub total_day_blocks: u32,
}

impl ProgressSummary {
    /// Blocks still to fill. Completed may exceed total after overtime.
    pub fn remaining_day_blocks(&self) -> u32 {
        self.total_day_blocks.saturating_sub(self.completed_day_blocks)
    }

    /// Hours still owed against `required_hours`, never negative
    pub fn remaining_hours(&self, required_hours: u32) -> f64 {
        round_hours((f64::from(required_hours) - self.completed_hours).max(0.0))
    }
}

/// A cell of the day-block grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBlock {
    pub index: u32,
    pub completed: bool,
    pub label: String,
}

/// Rounds to two decimal places, the precision hours are shown with
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

fn round_to_count(value: f64) -> u32 {
    // Inputs are finite and non-negative here
    value.round().max(0.0) as u32
}

/// Sum worked hours and derive percentage and day-block counts.
///
/// Hours are summed unrounded and rounded once. With `required_hours == 0`
/// (target unset) the percentage and both block counts are zero.
pub fn aggregate(entries: &[TimeEntry], required_hours: u32) -> ProgressSummary {
    let raw_total: f64 = entries
        .iter()
        .map(|e| compute_hours(&e.time_in, &e.time_out, Some(e.break_time.as_str())))
        .sum();
    let completed_hours = round_hours(raw_total);

    if required_hours == 0 {
        return ProgressSummary {
            completed_hours,
            completion_percentage: 0,
            completed_day_blocks: 0,
            total_day_blocks: 0,
        };
    }

    let required = f64::from(required_hours);
    let completion_percentage = round_to_count(completed_hours / required * 100.0).min(100);

    ProgressSummary {
        completed_hours,
        completion_percentage,
        completed_day_blocks: round_to_count(completed_hours / HOURS_PER_DAY_BLOCK),
        total_day_blocks: round_to_count(required / HOURS_PER_DAY_BLOCK),
    }
}

/// Grid cells for the block view; cell `i` (1-based) is filled when
/// `i <= completed_day_blocks`.
pub fn day_blocks(summary: &ProgressSummary) -> Vec<DayBlock> {
    (1..=summary.total_day_blocks)
        .map(|index| {
            let completed = index <= summary.completed_day_blocks;
            DayBlock {
                index,
                completed,
                label: format!(
                    "Day {} - {}",
                    index,
                    if completed { "Completed" } else { "Pending" }
                ),
            }
        })
        .collect()
}

/// Plain-text progress line for sharing
pub fn share_text(summary: &ProgressSummary, required_hours: u32) -> String {
    if required_hours == 0 {
        return format!(
            "I've logged {} OJT hours so far.",
            format_hours(summary.completed_hours)
        );
    }

    format!(
        "I've completed {} of {} OJT hours ({}%). {} of {} days done.",
        format_hours(summary.completed_hours),
        required_hours,
        summary.completion_percentage,
        summary.completed_day_blocks.min(summary.total_day_blocks),
        summary.total_day_blocks
    )
}

fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        let text = format!("{:.2}", hours);
        text.trim_end_matches('0').to_string()
    }
}
