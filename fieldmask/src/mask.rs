//! Fixed-pattern masks.
//!
//! A mask is a sequence of literal characters and slot markers. Accepted
//! characters typed by the user fill the slots left to right; literals are
//! kept as-is.
//!
//! # Example
//!
//! ```
//! use fieldmask::{AcceptRule, FormatOptions, Mask};
//!
//! let mask = Mask::new("(___) ___-____", "_");
//! let accept = AcceptRule::new(r"\d").unwrap();
//!
//! let value = mask.format("555", &accept, FormatOptions::default());
//! assert_eq!(value.masked, "(555)");
//! assert_eq!(value.unmasked, "555");
//! ```

use crate::accept::AcceptRule;

/// One position of a filled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A literal pattern character.
    Literal(char),
    /// A slot nothing has been typed into yet (holds the slot marker).
    Empty(char),
    /// A slot holding an accepted token.
    Filled(String),
}

impl Cell {
    fn push_to(&self, out: &mut String) {
        match self {
            Cell::Literal(c) | Cell::Empty(c) => out.push(*c),
            Cell::Filled(token) => out.push_str(token),
        }
    }
}

/// Result of walking the pattern over an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filled {
    cells: Vec<Cell>,
    unmasked: String,
}

impl Filled {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Concatenation of the tokens consumed by slots.
    pub fn unmasked(&self) -> &str {
        &self.unmasked
    }

    /// Pattern index of the first slot still empty.
    pub fn first_empty(&self) -> Option<usize> {
        self.cells.iter().position(|c| matches!(c, Cell::Empty(_)))
    }

    fn render(cells: &[Cell]) -> String {
        let mut out = String::new();
        for cell in cells {
            cell.push_to(&mut out);
        }
        out
    }
}

/// Display options applied by [`Mask::format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Show the whole pattern, placeholders included, while typing.
    pub show_full_mask: bool,
    /// Strip `.` from the output when `.` is a slot marker.
    pub hide_dot_slots: bool,
}

/// The four views of a masked value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedValue {
    /// The value to display.
    pub masked: String,
    /// Slot contents only.
    pub unmasked: String,
    /// The whole pattern with the current input filled in.
    pub full: String,
    /// The pattern up to the first empty slot.
    pub partial: String,
}

/// A fixed pattern of literal characters and slot markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pattern: Vec<char>,
    slots: Vec<char>,
}

impl Mask {
    /// Create a mask; every character of `slots` marks a fillable position.
    pub fn new(pattern: impl AsRef<str>, slots: impl AsRef<str>) -> Self {
        let mut slot_chars: Vec<char> = Vec::new();
        for c in slots.as_ref().chars() {
            if !slot_chars.contains(&c) {
                slot_chars.push(c);
            }
        }
        Self {
            pattern: pattern.as_ref().chars().collect(),
            slots: slot_chars,
        }
    }

    pub fn pattern(&self) -> String {
        self.pattern.iter().collect()
    }

    pub fn slots(&self) -> String {
        self.slots.iter().collect()
    }

    pub fn is_slot(&self, c: char) -> bool {
        self.slots.contains(&c)
    }

    /// Number of slot positions.
    pub fn slot_count(&self) -> usize {
        self.pattern.iter().filter(|c| self.is_slot(**c)).count()
    }

    /// Pattern index of the first slot.
    pub fn first_slot(&self) -> Option<usize> {
        self.pattern.iter().position(|c| self.is_slot(*c))
    }

    /// Walk the pattern, consuming accepted tokens of `input`.
    ///
    /// A literal position also swallows a token identical to the literal, so
    /// re-filling an already formatted value is stable.
    pub fn fill(&self, input: &str, accept: &AcceptRule) -> Filled {
        let mut queue = accept.extract(input).into_iter().peekable();
        let mut cells = Vec::with_capacity(self.pattern.len());
        let mut unmasked = String::new();

        for &mask_char in &self.pattern {
            let head_is_literal = queue
                .peek()
                .is_some_and(|token| single_char(token) == Some(mask_char));

            if self.is_slot(mask_char) {
                match queue.next() {
                    Some(token) => {
                        unmasked.push_str(token);
                        cells.push(Cell::Filled(token.to_string()));
                    }
                    None => cells.push(Cell::Empty(mask_char)),
                }
            } else {
                if head_is_literal {
                    queue.next();
                }
                cells.push(Cell::Literal(mask_char));
            }
        }

        Filled { cells, unmasked }
    }

    /// Format `input` against the mask.
    pub fn format(&self, input: &str, accept: &AcceptRule, options: FormatOptions) -> MaskedValue {
        let filled = self.fill(input, accept);
        let first_empty = filled.first_empty();

        let full_cells = filled.cells();
        let partial_cells = match first_empty {
            Some(idx) => &full_cells[..idx],
            None => full_cells,
        };

        let hide_dots = options.hide_dot_slots && self.is_slot('.');
        let finish = |cells: &[Cell]| {
            let mut text = Filled::render(cells);
            if hide_dots {
                text.retain(|c| c != '.');
            }
            text.trim().to_string()
        };

        let full = finish(full_cells);
        let partial = finish(partial_cells);
        let masked = if options.show_full_mask || first_empty.is_none() {
            full.clone()
        } else {
            partial.clone()
        };

        MaskedValue {
            masked,
            unmasked: filled.unmasked,
            full,
            partial,
        }
    }

    /// True when `displayed` is a prefix of the bare pattern, meaning no slot
    /// holds user data.
    pub fn is_skeleton_prefix(&self, displayed: &str) -> bool {
        let mut pattern = self.pattern.iter();
        displayed.chars().all(|c| pattern.next() == Some(&c))
    }

    /// Slot-boundary table: for each pattern index, the index just after the
    /// last slot at or before it (0 when no slot precedes).
    pub(crate) fn boundaries(&self) -> Vec<usize> {
        let mut last = 0;
        self.pattern
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if self.is_slot(*c) {
                    last = i + 1;
                }
                last
            })
            .collect()
    }
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits() -> AcceptRule {
        AcceptRule::new(r"\d").unwrap()
    }

    #[test]
    fn test_boundaries() {
        let mask = Mask::new("(__) _", "_");
        assert_eq!(mask.boundaries(), vec![0, 2, 3, 3, 3, 6]);
    }

    #[test]
    fn test_literal_absorbs_identical_token() {
        let mask = Mask::new("1-__", "_");
        let filled = mask.fill("123", &digits());
        assert_eq!(filled.unmasked(), "23");
        assert_eq!(filled.first_empty(), None);
    }

    #[test]
    fn test_skeleton_prefix() {
        let mask = Mask::new("(___) ___-____", "_");
        assert!(mask.is_skeleton_prefix(""));
        assert!(mask.is_skeleton_prefix("(___) ___-____"));
        assert!(!mask.is_skeleton_prefix("(5"));
    }
}
