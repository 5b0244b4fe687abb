// src/profile/models.rs

use serde::{Deserialize, Serialize};

/// Upper bound accepted for a required-hours target
pub const MAX_REQUIRED_HOURS: i64 = 10_000;

/// Onboarding and profile edit. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "reqHours")]
    pub req_hours: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredHoursPayload {
    #[serde(rename = "requiredHours")]
    pub required_hours: i64,
}
