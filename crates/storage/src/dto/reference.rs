use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{OPEN_CLASSIFICATION, Stroke};

/// Request payload for registering a swimmer
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSwimmerRequest {
    /// Generated as `ATH-<year>-<NNNN>` when omitted
    #[validate(length(min = 1, max = 50))]
    pub athlete_id: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(range(min = 1, max = 120))]
    pub age: i32,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(length(max = 20), custom(function = "validate_classification"))]
    pub classification: Option<String>,

    #[validate(length(max = 50))]
    pub country: Option<String>,

    #[validate(length(max = 100))]
    pub club: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMeetRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub date: NaiveDate,

    #[validate(length(max = 100))]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(range(
        min = 1,
        max = 1500,
        message = "Distance must be between 1 and 1500 metres"
    ))]
    pub distance: i32,

    pub stroke: Stroke,
}

fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    const VALID_GENDERS: &[&str] = &["M", "F", "X"];

    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_gender"))
    }
}

// "Open" labels the unclassified ranking group and cannot be a real code.
fn validate_classification(code: &str) -> Result<(), validator::ValidationError> {
    if code.trim().eq_ignore_ascii_case(OPEN_CLASSIFICATION) {
        Err(validator::ValidationError::new("reserved_classification"))
    } else {
        Ok(())
    }
}
