use fieldmask::MaskedValue;
use serde::Serialize;

use crate::registry::FieldId;

/// Mutable per-field state kept by the engine.
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    /// The value as last written to the host.
    pub(crate) raw: String,
    /// The four mask views. Empty for unmasked fields.
    pub(crate) masked: MaskedValue,
    /// A required failure is on display.
    pub(crate) required_active: bool,
    /// A required failure has been reported since the last reset.
    pub(crate) failed_required_once: bool,
    /// An unaccepted-character or pattern failure is on display.
    pub(crate) pattern_active: bool,
    /// A too-long failure is on display.
    pub(crate) too_long_active: bool,
    /// The message this field last pushed to its target.
    pub(crate) reported: Option<String>,
    /// The last key press was a backspace.
    pub(crate) deleting: bool,
    /// Value at registration, restored by reset.
    pub(crate) initial: String,
}

impl FieldState {
    pub(crate) fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        Self {
            raw: initial.clone(),
            initial,
            ..Default::default()
        }
    }

    pub(crate) fn clear_flags(&mut self) {
        self.required_active = false;
        self.pattern_active = false;
        self.too_long_active = false;
        self.deleting = false;
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn masked(&self) -> &MaskedValue {
        &self.masked
    }

    pub fn reported(&self) -> Option<&str> {
        self.reported.as_deref()
    }
}

/// Serializable copy of a field's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    pub id: FieldId,
    pub name: Option<String>,
    pub value: String,
    pub raw: String,
    pub masked: String,
    pub unmasked: String,
    pub full_mask: String,
    pub partial_mask: String,
    pub valid: bool,
    pub message: Option<String>,
    pub required_active: bool,
    pub failed_required_once: bool,
    pub pattern_active: bool,
    pub too_long_active: bool,
}
