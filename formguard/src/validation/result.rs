use serde::Serialize;

use crate::registry::FieldId;

/// Information about a single field that failed on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name, or its id when unnamed.
    pub field_name: String,
    /// Field ID (for focusing).
    pub field_id: FieldId,
    /// Error message.
    pub message: String,
}

/// Result of submitting a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation; submission is blocked.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Get the ID of the first invalid field (for focusing).
    pub fn first_invalid_field(&self) -> Option<FieldId> {
        self.first_error().map(|e| e.field_id)
    }
}

/// Current validity of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub valid: bool,
    /// The messages explaining why, empty when valid.
    pub messages: Vec<String>,
}

impl Validity {
    pub fn valid() -> Self {
        Self {
            valid: true,
            messages: Vec::new(),
        }
    }
}
