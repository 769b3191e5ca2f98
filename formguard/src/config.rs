//! Engine-wide configuration.

use std::time::Duration;

/// Defaults applied to every field option left unset in a
/// [`FieldConfig`](crate::FieldConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefaults {
    /// Let rejected keys through instead of intercepting them.
    pub allow_unaccepted: bool,
    /// Read the unmasked value through [`Engine::value`](crate::Engine::value).
    pub unmask_on_read: bool,
    /// Show the whole mask pattern while typing.
    pub show_full_mask: bool,
    /// Strip `.` slot markers from the displayed value.
    pub hide_dot_slots: bool,
    /// Validate the slot contents rather than the displayed text.
    pub validate_unmasked: bool,
    /// Run the validation chain on every edit.
    pub validate_on_input: bool,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            allow_unaccepted: false,
            unmask_on_read: false,
            show_full_mask: false,
            hide_dot_slots: true,
            validate_unmasked: true,
            validate_on_input: true,
        }
    }
}

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Debounce window for the error target repaint pass.
    pub repaint_delay: Duration,

    /// Delay before the cursor is re-mapped after focus or a pointer press,
    /// so the host's own caret placement runs first.
    pub cursor_restore_delay: Duration,

    /// Delay before a form reset forgets earlier required failures.
    pub reset_delay: Duration,

    pub defaults: FieldDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            repaint_delay: Duration::from_millis(100),
            cursor_restore_delay: Duration::from_millis(100),
            reset_delay: Duration::ZERO,
            defaults: FieldDefaults::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repaint_delay(mut self, delay: Duration) -> Self {
        self.repaint_delay = delay;
        self
    }

    pub fn with_cursor_restore_delay(mut self, delay: Duration) -> Self {
        self.cursor_restore_delay = delay;
        self
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn with_defaults(mut self, defaults: FieldDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}
