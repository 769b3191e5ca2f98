//! Events the host delivers to the engine.

use fieldmask::{Key, Modifiers};

/// Something that happened to a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// A key is about to be applied. Its default action can be suppressed.
    KeyPressed { key: Key, modifiers: Modifiers },
    /// The host changed the value and selection in response to an edit.
    ValueChanged,
    FocusGained,
    FocusLost,
    /// The field was clicked or tapped.
    PointerActivated,
}

/// What the host should do with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Allowed,
    /// Do not apply the key.
    Suppressed,
}

impl EventResult {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

/// What caused a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// An edit. Too-short failures wait silently, native checks are skipped.
    Input,
    /// Focus left the field.
    Blur,
    /// The form is being submitted.
    Submit,
}
