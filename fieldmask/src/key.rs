use crate::accept::AcceptRule;

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl Key {
    /// Keys that always pass interception.
    pub fn is_navigation_or_edit(&self) -> bool {
        matches!(self, Key::Backspace | Key::Tab | Key::Left | Key::Right)
    }

    /// The printable character this key produces, if any.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn meta() -> Self {
        Self {
            meta: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Decision for an intercepted key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVerdict {
    /// Let the key through.
    Pass,
    /// Suppress the key's default action.
    Reject,
}

/// Decide whether a key press may reach the field.
///
/// Only printable characters are ever rejected, and only when no modifier is
/// held and the character fails `accept`.
pub fn filter_key(key: Key, modifiers: Modifiers, accept: &AcceptRule) -> KeyVerdict {
    if key.is_navigation_or_edit() || !modifiers.none() {
        return KeyVerdict::Pass;
    }
    match key.printable() {
        Some(c) if !accept.accepts_char(c) => {
            log::trace!("[key] rejecting {:?} against /{}/", c, accept.as_str());
            KeyVerdict::Reject
        }
        _ => KeyVerdict::Pass,
    }
}
