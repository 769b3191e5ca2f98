pub mod accept;
pub mod cursor;
pub mod edit;
pub mod key;
pub mod mask;

pub use accept::{AcceptRule, DEFAULT_ACCEPT, NUMERIC_PROBE};
pub use cursor::Selection;
pub use edit::{EditBuffer, EditResult};
pub use key::{filter_key, Key, KeyVerdict, Modifiers};
pub use mask::{Cell, Filled, FormatOptions, Mask, MaskedValue};
