// src/services/mod.rs
//
// Shared services used across domain modules

pub mod required_hours;

pub use required_hours::RequiredHoursService;
