// src/profile/validators.rs

use super::models::*;
use crate::common::{ValidationResult, Validator};

const MAX_NAME_LENGTH: usize = 255;

// ============================================================================
// Profile Validators
// ============================================================================

fn check_required_hours(result: &mut ValidationResult, field: &str, hours: i64) {
    if hours <= 0 {
        result.add_error(field, "Required hours must be greater than 0");
    } else if hours > MAX_REQUIRED_HOURS {
        result.add_error(field, "Required hours must be at most 10000");
    }
}

pub struct ProfileValidator;

impl Validator<UpdateProfileRequest> for ProfileValidator {
    fn validate(&self, data: &UpdateProfileRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.is_none() && data.req_hours.is_none() {
            result.add_error("profile", "Nothing to update");
        }

        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                result.add_error("name", "Name is required");
            } else if name.len() > MAX_NAME_LENGTH {
                result.add_error("name", "Name must be less than 255 characters");
            }
        }

        if let Some(hours) = data.req_hours {
            check_required_hours(&mut result, "reqHours", hours);
        }

        result
    }
}

pub struct RequiredHoursValidator;

impl Validator<RequiredHoursPayload> for RequiredHoursValidator {
    fn validate(&self, data: &RequiredHoursPayload) -> ValidationResult {
        let mut result = ValidationResult::new();
        check_required_hours(&mut result, "requiredHours", data.required_hours);
        result
    }
}
