//! Field validation.
//!
//! Every pass runs one fixed, short-circuiting chain of checks:
//!
//! 1. required
//! 2. empty passthrough (an empty optional field is valid)
//! 3. unaccepted characters
//! 4. too short
//! 5. too long
//! 6. pattern
//! 7. custom rule
//! 8. native host constraints (blur and submit only)
//!
//! The first failing check reports its message to the field's display target;
//! if everything passes, the field's previous message is withdrawn.

mod chain;
mod messages;
mod result;

pub(crate) use chain::Chain;
pub use chain::Outcome;
pub use result::{FieldError, ValidationResult, Validity};
