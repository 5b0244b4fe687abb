//! # Progress Module
//!
//! Worked-hours arithmetic and progress toward the required-hours target:
//! - `calculator`: hours for one session
//! - `aggregator`: totals, completion percentage and day blocks
//! - HTTP views over the authenticated user's progress

pub mod aggregator;
pub mod calculator;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::progress_routes;
