//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Profile fields the identity provider attaches to its tokens
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl Claims {
    /// Display name offered by the provider, if any
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata
            .full_name
            .as_deref()
            .or(self.user_metadata.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub req_hours: i64,
    pub created_at: Option<String>,
}

impl User {
    /// A user without a name or a target must finish onboarding first
    pub fn needs_onboarding(&self) -> bool {
        self.name.trim().is_empty() || self.req_hours <= 0
    }
}
