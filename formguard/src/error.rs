//! Error types for the engine and its driver.

use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::registry::{FieldId, FormId, TargetId};

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A field must belong to a form; submit and reset act on forms.
    #[error("form {0} does not exist, fields must be registered inside a form")]
    MissingForm(FormId),

    #[error("field {0} is not registered")]
    UnknownField(FieldId),

    #[error("form {0} is not registered")]
    UnknownForm(FormId),

    #[error("display target {0} is not registered")]
    UnknownTarget(TargetId),
}

/// Errors returned by [`EngineHandle`](crate::driver::EngineHandle).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The task owning the engine has stopped.
    #[error("engine task is no longer running")]
    Closed,

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Configuration problems escalated by a strict caller.
#[derive(Debug, Clone, Error)]
#[error("{} configuration problem(s), first: {}", .0.len(), first_problem(.0))]
pub struct DiagnosticsError(pub Diagnostics);

fn first_problem(diagnostics: &Diagnostics) -> String {
    diagnostics
        .iter()
        .next()
        .map(ToString::to_string)
        .unwrap_or_default()
}
