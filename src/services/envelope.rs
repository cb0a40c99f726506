//! Uniform success/failure wrapper returned by every write operation.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Field name to human readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single message for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record `message` for `field`, appending to any message already there.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        self.0
            .entry(field.into())
            .and_modify(|existing| {
                existing.push_str("; ");
                existing.push_str(&message);
            })
            .or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Business rule that rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// Bad or missing input, duplicate language code.
    Validation,
    /// The referenced id does not exist.
    NotFound,
    /// Integrity violation such as deleting a row that still has children.
    Conflict,
}

/// Error half of an [`Envelope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub fields: FieldErrors,
}

impl Rejection {
    pub fn validation(fields: FieldErrors) -> Self {
        Self {
            kind: RejectionKind::Validation,
            fields,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: RejectionKind::NotFound,
            fields: FieldErrors::single("id", message),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: RejectionKind::Conflict,
            fields: FieldErrors::single("id", message),
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fields)
    }
}

/// Result of a service operation: either the payload or the rejection.
///
/// Callers branch on the variant; infrastructure failures travel separately
/// as [`super::InfrastructureError`].
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Error(Rejection),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The payload, if the operation succeeded.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// The rejection, if the operation failed.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Success(_) => None,
            Self::Error(rejection) => Some(rejection),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Self::Success(value) => Envelope::Success(f(value)),
            Self::Error(rejection) => Envelope::Error(rejection),
        }
    }

    pub fn into_result(self) -> Result<T, Rejection> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error(rejection) => Err(rejection),
        }
    }
}
