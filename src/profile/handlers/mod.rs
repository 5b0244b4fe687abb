// src/profile/handlers/mod.rs

pub mod profile;
pub mod required_hours;
