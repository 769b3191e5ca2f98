//! Headless field implementation.

use email_address::EmailAddress;
use fieldmask::{EditBuffer, EditResult, Key, Modifiers, Selection};

use super::handle::FieldHandle;

/// Host-side input type, deciding the native constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    /// Non-empty values must be a valid email address.
    Email,
    /// Non-empty values must parse as a number.
    Number,
    Tel,
}

/// A text field with no rendering attached.
///
/// Stands in for a real input widget in tests and headless hosts.
///
/// # Example
///
/// ```
/// use formguard::{InputKind, TextField};
///
/// let field = TextField::new("email")
///     .with_label("Email")
///     .with_kind(InputKind::Email)
///     .with_value("someone@example.com");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextField {
    name: Option<String>,
    label: Option<String>,
    kind: InputKind,
    buffer: EditBuffer,
    custom_validity: String,
    invalid: bool,
    shakes: usize,
}

impl TextField {
    /// Create an empty field with a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a field without a name.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.buffer.set_text(value);
        self
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Current text.
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// Whether invalid styling is applied.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Number of rejected key presses.
    pub fn shake_count(&self) -> usize {
        self.shakes
    }

    /// Apply an editing key to the buffer.
    pub fn apply_key(&mut self, key: Key, modifiers: Modifiers) -> EditResult {
        self.buffer.apply_key(key, modifiers)
    }

    /// Insert text at the cursor, replacing the selection.
    pub fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(text);
    }
}

impl FieldHandle for TextField {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn value(&self) -> String {
        self.buffer.text().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.buffer.set_text(value);
    }

    fn selection(&self) -> Selection {
        self.buffer.selection()
    }

    fn set_selection(&mut self, selection: Selection) {
        self.buffer.set_selection(selection);
    }

    fn custom_validity(&self) -> &str {
        &self.custom_validity
    }

    fn set_custom_validity(&mut self, message: &str) {
        self.custom_validity = message.to_string();
    }

    fn native_violation(&self) -> Option<String> {
        let value = self.buffer.text();
        if value.is_empty() {
            return None;
        }
        match self.kind {
            InputKind::Email if !EmailAddress::is_valid(value) => {
                Some(format!("Please enter a valid email address. '{}' is not one.", value))
            }
            InputKind::Number if value.trim().parse::<f64>().is_err() => {
                Some("Please enter a number.".to_string())
            }
            _ => None,
        }
    }

    fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    fn shake(&mut self) {
        self.shakes += 1;
    }
}
