//! Field validation and input masking.
//!
//! Register text fields with an [`Engine`], feed it the host's events, and
//! it keeps masked fields formatted, validates on input, blur and submit,
//! and reports messages to shared display targets.

pub mod aggregator;
mod binder;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod engine;
pub mod error;
pub mod events;
pub mod field;
pub mod presets;
pub mod registry;
pub mod timer;
pub mod validation;

pub use aggregator::{ErrorTarget, RepaintPass, TargetView, Visibility};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, FieldDefaults};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use engine::{Engine, Registration};
pub use error::{DiagnosticsError, DriverError, EngineError};
pub use events::{EventResult, FieldEvent, Trigger};
pub use field::{
    FailureKind, FieldConfig, FieldHandle, FieldSnapshot, InputKind, MaskSettings, ResolvedField,
    TextField, Verdict,
};
pub use registry::{FieldId, FormId, TargetId};
pub use timer::TickReport;
pub use validation::{FieldError, Outcome, ValidationResult, Validity};

pub use fieldmask;

pub mod prelude {
    pub use crate::driver::{EngineHandle, TokioClock};
    pub use crate::{
        Engine, EngineConfig, EventResult, FailureKind, FieldConfig, FieldEvent, FieldHandle,
        FieldId, FormId, InputKind, TargetId, TextField, ValidationResult, Visibility,
    };
    pub use fieldmask::{Key, Modifiers, Selection};
}
