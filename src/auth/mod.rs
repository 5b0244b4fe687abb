//! # Auth Module
//!
//! This module handles authentication against the external identity provider:
//! - HS256 token verification
//! - Lazy creation of the local user profile
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;


pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
