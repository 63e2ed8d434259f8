//! Request validation errors.

use thiserror::Error;

/// A request that is well-formed HTTP but unacceptable input.
///
/// Every variant maps to `400 Bad Request`; the message is shown to the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Product creation without an image file.
    #[error("an image file is required")]
    MissingImage,

    /// A required form field was not sent or was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field was sent but its value is unusable.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Form field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The uploaded image has no bytes.
    #[error("the uploaded image is empty")]
    EmptyFile,

    /// The uploaded image exceeds the configured limit.
    #[error("the uploaded image exceeds {max} bytes")]
    FileTooLarge {
        /// Limit in bytes.
        max: usize,
    },

    /// The request body could not be decoded.
    #[error("malformed request body: {0}")]
    Malformed(String),
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, reason: impl ToString) -> Self {
        Self::InvalidField {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Returns the trimmed value of a required text field.
pub(crate) fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}
