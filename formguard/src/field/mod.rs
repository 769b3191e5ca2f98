//! Per-field configuration, state and the host contract.

mod config;
mod handle;
mod resolved;
mod state;
mod text_field;

pub use config::{CustomRule, FailureKind, FieldConfig, Verdict};
pub use handle::FieldHandle;
pub use resolved::{MaskSettings, ResolvedField};
pub use state::{FieldSnapshot, FieldState};
pub use text_field::{InputKind, TextField};
