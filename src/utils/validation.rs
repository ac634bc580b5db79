use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// A rejected payload: every violated rule, grouped by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Validation error")]
pub struct ValidationError {
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_string(), vec![message.into()]);
        Self { fields }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        // Build a structured map: field -> [messages]
        let fields = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let msgs: Vec<String> = errs
                    .iter()
                    .map(|e| e.message.clone().unwrap_or_else(|| "Invalid input".into()).to_string())
                    .collect();
                (field.to_string(), msgs)
            })
            .collect();
        Self { fields }
    }
}

/// Validate a payload implementing `validator::Validate`, collecting every failed rule.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ValidationError> {
    payload.validate().map_err(ValidationError::from)
}

/// Reads a string field without failing the whole payload on a type mismatch.
/// Non-string values become "", which the field's own rule then rejects.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Optional counterpart of [`lenient_string`]: `null` stays absent, any other
/// non-string becomes `Some("")`.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        _ => Some(String::new()),
    })
}
