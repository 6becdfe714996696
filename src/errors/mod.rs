//! Error handling module for the donation subsystem.
//!
//! Provides the per-field validation taxonomy, storage errors, and the error returned from submission.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const REQUIRED: &str = "REQUIRED";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    pub const BELOW_MINIMUM: &str = "BELOW_MINIMUM";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
    pub const CORRUPT_DATA: &str = "CORRUPT_DATA";
    pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
    pub const IDENTIFIER_EXHAUSTED: &str = "IDENTIFIER_EXHAUSTED";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Form field a validation error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Amount,
    Name,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Name => "name",
            Field::Email => "email",
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Field is empty after trimming
    Required(String),
    /// Field does not have the expected shape
    InvalidFormat(String),
    /// Amount under the accepted minimum
    BelowMinimum(String),
}

impl FieldError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FieldError::Required(_) => codes::REQUIRED,
            FieldError::InvalidFormat(_) => codes::INVALID_FORMAT,
            FieldError::BelowMinimum(_) => codes::BELOW_MINIMUM,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FieldError::Required(msg) => msg,
            FieldError::InvalidFormat(msg) => msg,
            FieldError::BelowMinimum(msg) => msg,
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

/// Error details as handed to the form for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl From<&FieldError> for ErrorDetails {
    fn from(err: &FieldError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.message().to_string(),
        }
    }
}

/// Every field error found in a draft, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first error recorded for a field wins.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.entry(field).or_insert(error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, err)| (*field, err))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, err) in &self.errors {
            map.serialize_entry(field.as_str(), &ErrorDetails::from(err))?;
        }
        map.end()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, err)| format!("{}: {}", field.as_str(), err.message()))
            .collect();
        write!(f, "{}: {}", codes::VALIDATION_ERROR, parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Record store error.
#[derive(Debug)]
pub enum StoreError {
    /// The host storage could not be reached or refused the operation
    Unavailable(String),
    /// The persisted blob could not be parsed
    Corrupt(String),
    /// The collection could not be serialized
    Serialization(String),
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => codes::STORAGE_UNAVAILABLE,
            StoreError::Corrupt(_) => codes::CORRUPT_DATA,
            StoreError::Serialization(_) => codes::SERIALIZATION_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            StoreError::Unavailable(msg) => msg.clone(),
            StoreError::Corrupt(msg) => msg.clone(),
            StoreError::Serialization(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Storage error: {:?}", err);
        StoreError::Unavailable(format!("Storage error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        StoreError::Serialization(format!("JSON error: {}", err))
    }
}

/// Why a submission did not produce a record.
#[derive(Debug)]
pub enum SubmitError {
    /// The draft failed validation; nothing was written
    Invalid(FieldErrors),
    /// Every minted identifier collided with an existing record
    IdentifierExhausted { attempts: u32 },
    /// The record could not be persisted
    Storage(StoreError),
}

impl SubmitError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SubmitError::Invalid(_) => codes::VALIDATION_ERROR,
            SubmitError::IdentifierExhausted { .. } => codes::IDENTIFIER_EXHAUSTED,
            SubmitError::Storage(err) => err.error_code(),
        }
    }

    /// Field errors, when the failure was a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::Invalid(errors) => write!(f, "{}", errors),
            SubmitError::IdentifierExhausted { attempts } => write!(
                f,
                "{}: no unique identifier after {} attempts",
                self.error_code(),
                attempts
            ),
            SubmitError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Storage(err) => Some(err),
            SubmitError::IdentifierExhausted { .. } => None,
        }
    }
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        SubmitError::Invalid(errors)
    }
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        SubmitError::Storage(err)
    }
}

/// Configuration could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: String,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: invalid value {:?} for {}",
            codes::CONFIG_ERROR,
            self.value,
            self.key
        )
    }
}

impl std::error::Error for ConfigError {}
