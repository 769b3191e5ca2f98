//! Contract between the engine and the host's editable fields.

use fieldmask::Selection;

/// An editable text field owned by the host.
///
/// The engine reads and writes the value and selection through this trait
/// and reports failures through the custom validity slot. Offsets are in
/// characters.
pub trait FieldHandle {
    /// Field name, used to identify it in diagnostics and submit errors.
    fn name(&self) -> Option<&str>;

    /// Label text used in generated messages.
    fn label(&self) -> Option<&str> {
        None
    }

    fn value(&self) -> String;

    /// Write the value. Implementations must not route this back into the
    /// engine.
    fn set_value(&mut self, value: &str);

    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection);

    /// The message set by the engine, empty when valid.
    fn custom_validity(&self) -> &str;

    fn set_custom_validity(&mut self, message: &str);

    /// A failure of the host's own constraints, such as email syntax.
    ///
    /// Must not consider the custom validity.
    fn native_violation(&self) -> Option<String> {
        None
    }

    /// True when neither the engine nor the host's constraints object.
    fn check_validity(&self) -> bool {
        self.custom_validity().is_empty() && self.native_violation().is_none()
    }

    /// The message explaining why the field is invalid, empty when valid.
    fn validation_message(&self) -> String {
        let custom = self.custom_validity();
        if custom.is_empty() {
            self.native_violation().unwrap_or_default()
        } else {
            custom.to_string()
        }
    }

    /// Toggle invalid styling.
    fn set_invalid(&mut self, _invalid: bool) {}

    /// Visual feedback for a rejected key.
    fn shake(&mut self) {}
}
