//! Event handling: routes host events through masking and validation.

use fieldmask::{filter_key, EditResult, Key, KeyVerdict, Modifiers};

use crate::engine::{clear_skeleton, Engine};
use crate::error::EngineError;
use crate::events::{EventResult, FieldEvent, Trigger};
use crate::field::{FieldHandle, TextField};
use crate::registry::FieldId;
use crate::timer::Task;

impl<F: FieldHandle> Engine<F> {
    /// Process one event for a field.
    ///
    /// For [`FieldEvent::KeyPressed`] the result tells the host whether to
    /// apply the key. Every other event is always `Allowed`.
    pub fn handle(&mut self, id: FieldId, event: FieldEvent) -> Result<EventResult, EngineError> {
        match event {
            FieldEvent::KeyPressed { key, modifiers } => self.on_key(id, key, modifiers),
            FieldEvent::ValueChanged => {
                self.on_input(id)?;
                Ok(EventResult::Allowed)
            }
            FieldEvent::FocusGained | FieldEvent::PointerActivated => {
                self.on_focus(id)?;
                Ok(EventResult::Allowed)
            }
            FieldEvent::FocusLost => {
                self.on_blur(id)?;
                Ok(EventResult::Allowed)
            }
        }
    }

    fn on_key(&mut self, id: FieldId, key: Key, modifiers: Modifiers) -> Result<EventResult, EngineError> {
        let entry = self.registry.field_mut(id)?;
        if entry.config.is_masked() {
            entry.state.deleting = key == Key::Backspace;
        }
        if !entry.config.intercepts_keys() {
            return Ok(EventResult::Allowed);
        }

        match filter_key(key, modifiers, &entry.config.accept) {
            KeyVerdict::Pass => Ok(EventResult::Allowed),
            KeyVerdict::Reject => {
                log::debug!("[binder] {} rejected {:?}", id, key);
                entry.handle.shake();
                Ok(EventResult::Suppressed)
            }
        }
    }

    /// Reformat a masked field keeping the cursor in place, then validate.
    fn on_input(&mut self, id: FieldId) -> Result<(), EngineError> {
        let entry = self.registry.field_mut(id)?;
        if let Some(mask) = &entry.config.mask {
            let raw = entry.handle.value();
            let selection = mask.map_selection(
                &raw,
                entry.handle.selection(),
                &entry.config.accept,
                entry.state.deleting,
            );
            let formatted = mask.format(&raw, &entry.config.accept, entry.config.format_options());

            entry.handle.set_value(&formatted.masked);
            entry.handle.set_selection(selection);
            entry.state.raw = formatted.masked.clone();
            entry.state.masked = formatted;
            entry.state.deleting = false;
        }

        self.validate(id, Trigger::Input)?;
        Ok(())
    }

    /// Reformat now and re-map the cursor once the host placed its caret.
    fn on_focus(&mut self, id: FieldId) -> Result<(), EngineError> {
        let entry = self.registry.field_mut(id)?;
        let Some(mask) = &entry.config.mask else {
            return Ok(());
        };

        let formatted = mask.format(
            &entry.handle.value(),
            &entry.config.accept,
            entry.config.format_options(),
        );
        entry.handle.set_value(&formatted.masked);
        entry.state.raw = formatted.masked.clone();
        entry.state.masked = formatted;

        self.defer(Task::RestoreCursor(id));
        Ok(())
    }

    fn on_blur(&mut self, id: FieldId) -> Result<(), EngineError> {
        let entry = self.registry.field_mut(id)?;
        clear_skeleton(entry);
        self.validate(id, Trigger::Blur)?;
        Ok(())
    }
}

/// Editing helpers for engines driving headless fields.
impl Engine<TextField> {
    /// Deliver a key press, apply it to the field unless suppressed, and
    /// report the resulting edit.
    pub fn press_key(&mut self, id: FieldId, key: Key, modifiers: Modifiers) -> Result<EventResult, EngineError> {
        let result = self.handle(id, FieldEvent::KeyPressed { key, modifiers })?;
        if result.is_suppressed() {
            return Ok(result);
        }
        if self.field_mut(id)?.apply_key(key, modifiers) == EditResult::Changed {
            self.handle(id, FieldEvent::ValueChanged)?;
        }
        Ok(result)
    }

    /// Type `text` one character at a time. Returns how many keys were
    /// suppressed.
    pub fn type_text(&mut self, id: FieldId, text: &str) -> Result<usize, EngineError> {
        let mut suppressed = 0;
        for c in text.chars() {
            if self.press_key(id, Key::Char(c), Modifiers::NONE)?.is_suppressed() {
                suppressed += 1;
            }
        }
        Ok(suppressed)
    }

    /// Insert `text` at the cursor in one edit. Pastes are never filtered.
    pub fn paste(&mut self, id: FieldId, text: &str) -> Result<(), EngineError> {
        self.field_mut(id)?.insert_str(text);
        self.handle(id, FieldEvent::ValueChanged)?;
        Ok(())
    }

    pub fn focus(&mut self, id: FieldId) -> Result<(), EngineError> {
        self.handle(id, FieldEvent::FocusGained)?;
        Ok(())
    }

    pub fn blur(&mut self, id: FieldId) -> Result<(), EngineError> {
        self.handle(id, FieldEvent::FocusLost)?;
        Ok(())
    }
}
