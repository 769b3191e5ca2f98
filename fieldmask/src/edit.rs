use crate::cursor::Selection;
use crate::key::{Key, Modifiers};

/// Text content and cursor state for a single editable field.
///
/// All offsets are character offsets, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
    /// Anchor position for selection. When Some and != cursor, text is selected.
    anchor: Option<usize>,
}

impl EditBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            anchor: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the text, placing the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_len();
        self.anchor = None;
    }

    /// Get the selection range where start <= end. Without a selection this is
    /// a caret at the cursor.
    pub fn selection(&self) -> Selection {
        match self.anchor {
            Some(a) if a < self.cursor => Selection::new(a, self.cursor),
            Some(a) => Selection::new(self.cursor, a),
            None => Selection::caret(self.cursor),
        }
    }

    /// Check if there's an active selection.
    pub fn has_selection(&self) -> bool {
        !self.selection().is_caret()
    }

    /// Set the selection, clamped to the text.
    pub fn set_selection(&mut self, selection: Selection) {
        let len = self.char_len();
        let start = selection.start.min(len);
        let end = selection.end.min(len);
        self.cursor = end;
        self.anchor = (start != end).then_some(start);
    }

    /// Select all text.
    pub fn select_all(&mut self) {
        if !self.text.is_empty() {
            self.anchor = Some(0);
            self.cursor = self.char_len();
        }
    }

    /// Insert text at the cursor, replacing the selection if any.
    pub fn insert_str(&mut self, s: &str) {
        let Selection { start, end } = self.selection();
        let start_byte = char_to_byte_index(&self.text, start);
        let end_byte = char_to_byte_index(&self.text, end);
        self.text.replace_range(start_byte..end_byte, s);
        self.cursor = start + s.chars().count();
        self.anchor = None;
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Delete character before cursor or delete selection.
    /// Returns true if text changed.
    pub fn delete_back(&mut self) -> bool {
        if self.has_selection() {
            self.insert_str("");
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let from = char_to_byte_index(&self.text, self.cursor - 1);
        let to = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(from..to, "");
        self.cursor -= 1;
        true
    }

    /// Delete character after cursor or delete selection.
    /// Returns true if text changed.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            self.insert_str("");
            return true;
        }
        if self.cursor >= self.char_len() {
            return false;
        }
        let from = char_to_byte_index(&self.text, self.cursor);
        let to = char_to_byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(from..to, "");
        true
    }

    /// Move cursor by delta characters.
    pub fn move_cursor(&mut self, delta: isize, extend_selection: bool) {
        if extend_selection && self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        } else if !extend_selection {
            // If we have a selection and not extending, move to edge of selection
            if self.has_selection() {
                let Selection { start, end } = self.selection();
                self.cursor = if delta < 0 { start } else { end };
                self.anchor = None;
                return;
            }
            self.anchor = None;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(self.char_len());
    }

    /// Apply an editing key. Keys that do not edit or move return `Ignored`.
    pub fn apply_key(&mut self, key: Key, modifiers: Modifiers) -> EditResult {
        match key {
            Key::Char(c) if !modifiers.ctrl && !modifiers.alt && !modifiers.meta => {
                self.insert_char(c);
                EditResult::Changed
            }
            Key::Char('a') if modifiers.ctrl => {
                self.select_all();
                EditResult::Moved
            }
            Key::Backspace => changed_or_moved(self.delete_back()),
            Key::Delete => changed_or_moved(self.delete_forward()),
            Key::Left => {
                self.move_cursor(-1, modifiers.shift);
                EditResult::Moved
            }
            Key::Right => {
                self.move_cursor(1, modifiers.shift);
                EditResult::Moved
            }
            Key::Home => {
                self.move_cursor(-(self.cursor as isize), modifiers.shift);
                EditResult::Moved
            }
            Key::End => {
                let remaining = self.char_len().saturating_sub(self.cursor) as isize;
                self.move_cursor(remaining, modifiers.shift);
                EditResult::Moved
            }
            _ => EditResult::Ignored,
        }
    }
}

/// Result of applying an editing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    /// Text was modified.
    Changed,
    /// Cursor or selection moved, text unchanged.
    Moved,
    /// Key was not handled, should be passed through.
    Ignored,
}

fn changed_or_moved(changed: bool) -> EditResult {
    if changed {
        EditResult::Changed
    } else {
        EditResult::Moved
    }
}

/// Convert character index to byte index in a string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
