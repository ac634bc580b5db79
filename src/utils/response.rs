use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// JSON body of every error response: `{"error": "..."}`, plus per-field
/// messages when a payload failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            errors: None,
        }
    }

    /// Error constructor that includes structured field errors
    pub fn with_errors(message: impl Into<String>, errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            error: message.into(),
            errors: Some(errors),
        }
    }
}

/// Body returned by successful deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
}

impl SuccessBody {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
