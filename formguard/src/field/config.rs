//! Field configuration builder.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::registry::TargetId;

/// Which check of the validation chain failed.
///
/// Also the key for message overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// Required field left empty.
    Required,
    /// Shorter than the minimum or exact length. Exact-length fields that
    /// are too long report this kind too.
    TooShort,
    /// Longer than the maximum length.
    TooLong,
    /// Pattern mismatch or unaccepted characters.
    Invalid,
    /// The custom rule rejected the value.
    Custom,
    /// The host's own constraints (e.g. email syntax) failed.
    Native,
}

/// Outcome of a custom validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
    /// Invalid, and this message replaces any configured one.
    InvalidWithMessage(String),
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }
}

impl From<Result<(), String>> for Verdict {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(msg) => Self::InvalidWithMessage(msg),
        }
    }
}

impl From<Option<String>> for Verdict {
    fn from(message: Option<String>) -> Self {
        match message {
            None => Self::Valid,
            Some(msg) => Self::InvalidWithMessage(msg),
        }
    }
}

/// A caller-supplied validation rule.
#[derive(Clone)]
pub struct CustomRule(Arc<dyn Fn(&str) -> Verdict + Send + Sync>);

impl CustomRule {
    pub fn new<F, V>(f: F) -> Self
    where
        F: Fn(&str) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Self(Arc::new(move |value| f(value).into()))
    }

    pub fn check(&self, value: &str) -> Verdict {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRule(..)")
    }
}

/// Options for registering a field.
///
/// Options left unset fall back to the engine's
/// [`FieldDefaults`](crate::FieldDefaults).
///
/// # Example
///
/// ```
/// use formguard::{FailureKind, FieldConfig};
///
/// let config = FieldConfig::new()
///     .required(true)
///     .min_length(3)
///     .max_length(20)
///     .message(FailureKind::Required, "Pick a username");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    pub(crate) target: Option<TargetId>,
    pub(crate) required: bool,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) exact_length: Option<usize>,
    pub(crate) pattern: Option<String>,
    pub(crate) custom: Option<CustomRule>,
    pub(crate) accept: Option<String>,
    pub(crate) allow_unaccepted: Option<bool>,
    pub(crate) mask: Option<String>,
    pub(crate) slots: Option<String>,
    pub(crate) unmask_on_read: Option<bool>,
    pub(crate) show_full_mask: Option<bool>,
    pub(crate) hide_dot_slots: Option<bool>,
    pub(crate) validate_on_input: Option<bool>,
    pub(crate) validate_unmasked: Option<bool>,
    pub(crate) messages: HashMap<FailureKind, String>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report errors to an existing display target. Without one, the engine
    /// creates a target for the field.
    pub fn target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Require exactly `len` characters. Not combinable with min or max.
    pub fn exact_length(mut self, len: usize) -> Self {
        self.exact_length = Some(len);
        self
    }

    /// Regex the public value must match somewhere.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Custom rule run against the effective value.
    ///
    /// The closure may return `bool`, `Result<(), String>` or
    /// `Option<String>`; a message makes the field invalid and is shown
    /// as-is.
    pub fn custom<F, V>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        self.custom = Some(CustomRule::new(f));
        self
    }

    /// Regex every character of the field must match.
    pub fn accept(mut self, pattern: impl Into<String>) -> Self {
        self.accept = Some(pattern.into());
        self
    }

    pub fn allow_unaccepted(mut self, allow: bool) -> Self {
        self.allow_unaccepted = Some(allow);
        self
    }

    /// Fixed pattern of literals and slot markers.
    pub fn mask(mut self, pattern: impl Into<String>) -> Self {
        self.mask = Some(pattern.into());
        self
    }

    /// Characters of the mask that mark fillable slots.
    pub fn slots(mut self, slots: impl Into<String>) -> Self {
        self.slots = Some(slots.into());
        self
    }

    pub fn unmask_on_read(mut self, unmask: bool) -> Self {
        self.unmask_on_read = Some(unmask);
        self
    }

    pub fn show_full_mask(mut self, show: bool) -> Self {
        self.show_full_mask = Some(show);
        self
    }

    pub fn hide_dot_slots(mut self, hide: bool) -> Self {
        self.hide_dot_slots = Some(hide);
        self
    }

    pub fn validate_on_input(mut self, validate: bool) -> Self {
        self.validate_on_input = Some(validate);
        self
    }

    pub fn validate_unmasked(mut self, validate: bool) -> Self {
        self.validate_unmasked = Some(validate);
        self
    }

    /// Replace the generated message for a failure kind.
    pub fn message(mut self, kind: FailureKind, msg: impl Into<String>) -> Self {
        self.messages.insert(kind, msg.into());
        self
    }
}
