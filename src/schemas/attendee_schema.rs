use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::models::NewAttendee;
use crate::utils::validation::{ValidationError, lenient_opt_string, lenient_string, validate_payload};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateAttendeeSchema {
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone: Option<String>,
}

impl CreateAttendeeSchema {
    pub fn into_new_attendee(mut self) -> Result<NewAttendee, ValidationError> {
        // Normalize email for consistent duplicate checks and storage
        self.email = self.email.trim().to_lowercase();
        validate_payload(&self)?;
        Ok(NewAttendee {
            name: self.name,
            email: self.email,
            phone: self.phone,
        })
    }
}

/// Validates an untyped JSON body as an attendee registration.
pub fn parse_attendee(body: Value) -> Result<NewAttendee, ValidationError> {
    if !body.is_object() {
        return Err(ValidationError::single("body", "Expected a JSON object"));
    }
    let schema: CreateAttendeeSchema = serde_json::from_value(body)
        .map_err(|e| ValidationError::single("body", e.to_string()))?;
    schema.into_new_attendee()
}
