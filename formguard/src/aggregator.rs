//! Error display targets.
//!
//! Several fields may report to one target. Each target keeps a counted,
//! insertion-ordered set of messages so that one field clearing a message
//! does not hide the same message reported by another field. The rendered
//! text updates immediately; whether a target is open is only recomputed by
//! the engine's debounced repaint pass.

use serde::Serialize;

use crate::registry::TargetId;

/// Whether a target is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Open,
    #[default]
    Closed,
}

/// A region that displays the messages of one or more fields.
#[derive(Debug, Clone)]
pub struct ErrorTarget {
    id: TargetId,
    messages: Vec<(String, usize)>,
    text: String,
    visibility: Visibility,
    height: usize,
}

impl ErrorTarget {
    pub(crate) fn new(id: TargetId) -> Self {
        Self {
            id,
            messages: Vec::new(),
            text: String::new(),
            visibility: Visibility::Closed,
            height: 0,
        }
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Active messages, oldest first, duplicates collapsed.
    pub fn messages(&self) -> Vec<&str> {
        self.messages.iter().map(|(msg, _)| msg.as_str()).collect()
    }

    /// How many fields currently report `message`.
    pub fn count(&self, message: &str) -> usize {
        self.messages
            .iter()
            .find(|(msg, _)| msg == message)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Newline-joined messages.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Lines shown as of the last repaint; zero when closed.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Add one report of `message`. Returns true if the text changed.
    pub(crate) fn insert(&mut self, message: &str) -> bool {
        match self.messages.iter_mut().find(|(msg, _)| msg == message) {
            Some((_, count)) => {
                *count += 1;
                false
            }
            None => {
                self.messages.push((message.to_string(), 1));
                self.render();
                true
            }
        }
    }

    /// Withdraw one report of `message`. Returns true if the text changed.
    pub(crate) fn remove(&mut self, message: &str) -> bool {
        let Some(idx) = self.messages.iter().position(|(msg, _)| msg == message) else {
            return false;
        };
        let count = &mut self.messages[idx].1;
        *count -= 1;
        if *count > 0 {
            return false;
        }
        self.messages.remove(idx);
        self.render();
        true
    }

    /// Recompute visibility from the current messages.
    pub(crate) fn repaint(&mut self) {
        if self.messages.is_empty() {
            self.visibility = Visibility::Closed;
            self.height = 0;
        } else {
            self.visibility = Visibility::Open;
            self.height = self.text.lines().count();
        }
    }

    pub(crate) fn view(&self) -> TargetView {
        TargetView {
            id: self.id,
            visibility: self.visibility,
            height: self.height,
            text: self.text.clone(),
        }
    }

    fn render(&mut self) {
        self.text = self
            .messages
            .iter()
            .map(|(msg, _)| msg.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// State of one target after a repaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetView {
    pub id: TargetId,
    pub visibility: Visibility,
    pub height: usize,
    pub text: String,
}

/// One debounced repaint of every target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepaintPass {
    pub targets: Vec<TargetView>,
}

impl RepaintPass {
    pub fn target(&self, id: TargetId) -> Option<&TargetView> {
        self.targets.iter().find(|view| view.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_message_survives_one_clear() {
        let mut target = ErrorTarget::new(TargetId::next());
        assert!(target.insert("Zip is required."));
        assert!(!target.insert("Zip is required."));
        assert_eq!(target.count("Zip is required."), 2);

        assert!(!target.remove("Zip is required."));
        assert_eq!(target.messages(), vec!["Zip is required."]);

        assert!(target.remove("Zip is required."));
        assert!(target.is_empty());
        assert_eq!(target.text(), "");
    }

    #[test]
    fn test_text_keeps_insertion_order() {
        let mut target = ErrorTarget::new(TargetId::next());
        target.insert("b");
        target.insert("a");
        target.insert("c");
        target.remove("a");
        assert_eq!(target.text(), "b\nc");
    }

    #[test]
    fn test_visibility_waits_for_repaint() {
        let mut target = ErrorTarget::new(TargetId::next());
        target.insert("Name is required.");
        assert_eq!(target.visibility(), Visibility::Closed);

        target.repaint();
        assert_eq!(target.visibility(), Visibility::Open);
        assert_eq!(target.height(), 1);

        target.remove("Name is required.");
        target.repaint();
        assert_eq!(target.visibility(), Visibility::Closed);
        assert_eq!(target.height(), 0);
    }

    #[test]
    fn test_removing_unknown_message_is_noop() {
        let mut target = ErrorTarget::new(TargetId::next());
        assert!(!target.remove("nothing"));
    }
}
