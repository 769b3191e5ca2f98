//! Cursor preservation across reformatting.
//!
//! Writing a reformatted value would otherwise move the caret to the end of
//! the field. Each selection offset of the raw value is mapped to the slot
//! position it semantically sits at in the formatted value.

use crate::accept::AcceptRule;
use crate::mask::Mask;

/// A selection range in character offsets. `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

impl Mask {
    /// Map one raw offset to a position in the formatted value.
    ///
    /// `deleting` is true when the edit came from a backspace; the caret then
    /// snaps one slot boundary back, never before the first slot.
    pub fn map_offset(&self, raw: &str, offset: usize, accept: &AcceptRule, deleting: bool) -> usize {
        let boundaries = self.boundaries();
        let first = self.first_slot().unwrap_or(0);
        let prefix: String = raw.chars().take(offset).collect();

        match self.fill(&prefix, accept).first_empty() {
            None => boundaries.last().copied().unwrap_or(0),
            Some(0) if deleting => first,
            Some(idx) if deleting => match boundaries[idx - 1] {
                0 => first,
                boundary => boundary,
            },
            Some(idx) => idx,
        }
    }

    /// Map both ends of a selection.
    pub fn map_selection(
        &self,
        raw: &str,
        selection: Selection,
        accept: &AcceptRule,
        deleting: bool,
    ) -> Selection {
        Selection::new(
            self.map_offset(raw, selection.start, accept, deleting),
            self.map_offset(raw, selection.end, accept, deleting),
        )
    }
}
