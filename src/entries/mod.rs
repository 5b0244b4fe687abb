//! # Entries Module
//!
//! Recording, listing, editing and deleting the work sessions a user logs,
//! plus the adapter that turns stored rows into values progress
//! aggregation can consume.

pub mod adapter;
pub mod display;
pub mod edit_flow;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod routes;
pub mod validators;


pub use routes::entries_routes;
