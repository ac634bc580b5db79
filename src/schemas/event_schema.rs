use std::borrow::Cow;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::Validate;

use crate::models::NewEvent;
use crate::utils::validation::{ValidationError, lenient_opt_string, lenient_string, validate_payload};

const CAPACITY_MESSAGE: &str = "Capacity must be a positive number";

// Request schema: missing or wrong-typed strings read as "" so they surface as field errors
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateEventSchema {
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(custom(function = "validate_event_date"))]
    pub date: String,

    #[serde(default, deserialize_with = "coerce_capacity")]
    #[validate(range(min = 1, max = 2147483647, message = "Capacity must be a positive number"))]
    pub capacity: i64,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: Option<String>,
}

/// Accepts a JSON number or a numeric string. Anything that is not a whole number
/// becomes 0, which the range rule then rejects.
fn coerce_capacity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(capacity_from_value(&value).unwrap_or(0))
}

fn capacity_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
        _ => None,
    }
}

fn whole_number(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parses the date formats a client may send: RFC 3339, a naive
/// `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC) or a bare `YYYY-MM-DD`.
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn validate_event_date(date: &str) -> Result<(), validator::ValidationError> {
    // MySQL DATETIME only covers years 1000..=9999
    match parse_event_date(date) {
        Some(dt) if (1000..=9999).contains(&dt.year()) => Ok(()),
        _ => Err(validator::ValidationError::new("date").with_message(Cow::Borrowed("Invalid date"))),
    }
}

impl CreateEventSchema {
    /// Checks every rule and converts into a typed `NewEvent`.
    pub fn into_new_event(self) -> Result<NewEvent, ValidationError> {
        validate_payload(&self)?;

        let date = parse_event_date(&self.date)
            .ok_or_else(|| ValidationError::single("date", "Invalid date"))?
            .trunc_subsecs(3);
        let capacity = i32::try_from(self.capacity)
            .map_err(|_| ValidationError::single("capacity", CAPACITY_MESSAGE))?;

        Ok(NewEvent {
            title: self.title,
            description: self.description,
            date,
            capacity,
            category: self.category,
            location: self.location,
        })
    }
}

/// Validates an untyped JSON body as an event creation request.
pub fn parse_event(body: Value) -> Result<NewEvent, ValidationError> {
    if !body.is_object() {
        return Err(ValidationError::single("body", "Expected a JSON object"));
    }
    let schema: CreateEventSchema = serde_json::from_value(body)
        .map_err(|e| ValidationError::single("body", e.to_string()))?;
    schema.into_new_event()
}
