use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Substrings the backend's free-text errors carry when the template tables
/// have not been created yet. Only consulted when the rejection has no kind.
const LEGACY_SCHEMA_MARKERS: [&str; 3] = ["no such table", "budget_templates", "global_categories"];

/// Rejection kind the backend sends for a missing schema.
pub const SCHEMA_NOT_READY_KIND: &str = "schema_not_ready";

/// Failure of a single backend command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Database setup required: {0}")]
    SchemaNotReady(String),
    #[error("{0}")]
    Command(String),
    #[error("Could not encode arguments for `{command}`: {message}")]
    Encode { command: &'static str, message: String },
    #[error("Unexpected response from `{command}`: {message}")]
    Decode { command: &'static str, message: String },
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Structured rejection payload; `kind` is optional so plain strings still fit.
#[derive(Debug, Deserialize)]
struct Rejection {
    #[serde(default)]
    kind: Option<String>,
    #[serde(alias = "error")]
    message: String,
}

impl BackendError {
    /// Classify a free-text rejection.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if LEGACY_SCHEMA_MARKERS.iter().any(|marker| message.contains(marker)) {
            BackendError::SchemaNotReady(message)
        } else {
            BackendError::Command(message)
        }
    }

    /// Classify a rejection value, honouring a structured `kind` when present.
    pub fn from_rejection(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(message) => BackendError::from_message(message),
            other => match serde_json::from_value::<Rejection>(other.clone()) {
                Ok(Rejection { kind: Some(kind), message }) if kind == SCHEMA_NOT_READY_KIND => {
                    BackendError::SchemaNotReady(message)
                }
                Ok(Rejection { kind: Some(_), message }) => BackendError::Command(message),
                Ok(Rejection { kind: None, message }) => BackendError::from_message(message),
                Err(_) => BackendError::Command(other.to_string()),
            },
        }
    }

    pub fn is_schema_not_ready(&self) -> bool {
        matches!(self, BackendError::SchemaNotReady(_))
    }
}

/// A single client-side validation failure, reported next to its field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every validation failure of one form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.entry(error.field).or_insert(error.message);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(error);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.values().cloned().collect::<Vec<_>>().join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for FieldErrors {}

/// Failure reading or writing local preferences.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrefsError {
    #[error("Local storage is not available")]
    Unavailable,
    #[error("Could not write preference `{key}`: {message}")]
    Write { key: String, message: String },
    #[error("Could not encode preference `{key}`: {message}")]
    Encode { key: String, message: String },
}

/// Invalid IANA timezone name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown timezone: {0}")]
pub struct TimezoneError(pub String);

/// Umbrella error returned by store operations and catalog helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Validation(#[from] FieldErrors),
    #[error(transparent)]
    Prefs(#[from] PrefsError),
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error.into())
    }
}

impl AppError {
    pub fn is_schema_not_ready(&self) -> bool {
        matches!(self, AppError::Backend(err) if err.is_schema_not_ready())
    }

    /// Field errors, when the failure happened before any backend call.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_messages_are_classified_as_schema_not_ready() {
        let err = BackendError::from_message("no such table: budget_templates");
        assert!(err.is_schema_not_ready());
        let err = BackendError::from_message("error reading global_categories");
        assert!(err.is_schema_not_ready());
        let err = BackendError::from_message("Category not found");
        assert_eq!(err, BackendError::Command("Category not found".to_string()));
    }

    #[test]
    fn structured_kind_wins_over_message_text() {
        let err = BackendError::from_rejection(json!({
            "kind": "schema_not_ready",
            "message": "templates missing"
        }));
        assert!(err.is_schema_not_ready());

        let err = BackendError::from_rejection(json!({
            "kind": "not_found",
            "message": "no such table mentioned in passing"
        }));
        assert!(!err.is_schema_not_ready());
    }

    #[test]
    fn unrecognised_rejection_shapes_keep_their_text() {
        let err = BackendError::from_rejection(json!(42));
        assert_eq!(err, BackendError::Command("42".to_string()));
        let err = BackendError::from_rejection(json!("plain failure"));
        assert_eq!(err.to_string(), "plain failure");
    }

    #[test]
    fn field_errors_keep_first_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.push(ValidationError::new("amount", "Amount must be greater than 0"));
        errors.push(ValidationError::new("amount", "second"));
        errors.push(ValidationError::new("what", "Description is required"));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("amount"), Some("Amount must be greater than 0"));
        assert!(errors.into_result(()).is_err());
    }
}
