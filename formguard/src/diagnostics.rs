//! Configuration diagnostics.
//!
//! Registration never fails on a bad configuration. Each problem is recorded
//! as a [`Diagnostic`], logged, and returned so the caller can decide whether
//! to ignore it or escalate with [`Diagnostics::into_result`].

use serde::Serialize;
use thiserror::Error;

use crate::error::DiagnosticsError;
use crate::registry::TargetId;

/// How serious a configuration problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// Works, but produces poor behavior.
    Warning,
    /// Contradictory or broken; the engine substituted a fallback.
    Error,
}

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum DiagnosticKind {
    #[error("field has no name, give it one so it can be identified")]
    MissingName,

    #[error("display target {0} is not registered, a new target was created")]
    InvalidTarget(TargetId),

    #[error("cannot define a mask without slot characters, using '_'")]
    MaskWithoutSlots,

    #[error("cannot define both min_length and exact_length, pick one")]
    MinAndExactLength,

    #[error("cannot define both max_length and exact_length, pick one")]
    MaxAndExactLength,

    #[error(
        "pattern and custom rules need min_length, exact_length or validate_on_input(false), \
         otherwise errors show as soon as the user starts typing"
    )]
    RuleWithoutLengthGuard,

    #[error("mask contains characters accepted by /{accept}/, fix the mask or the accept rule")]
    MaskOverlapsAccept { accept: String },

    #[error("/{pattern}/ is not a valid accept rule ({reason}), using the default")]
    InvalidAcceptPattern { pattern: String, reason: String },

    #[error("/{pattern}/ is not a valid pattern ({reason}), pattern check disabled")]
    InvalidPattern { pattern: String, reason: String },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            Self::InvalidTarget(_) | Self::RuleWithoutLengthGuard | Self::MaskOverlapsAccept { .. } => {
                Severity::Warning
            }
            Self::MissingName
            | Self::MaskWithoutSlots
            | Self::MinAndExactLength
            | Self::MaxAndExactLength
            | Self::InvalidAcceptPattern { .. }
            | Self::InvalidPattern { .. } => Severity::Error,
        }
    }
}

/// A configuration problem found while registering a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the offending field, if it has one.
    pub field: Option<String>,
    pub kind: DiagnosticKind,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(field: Option<&str>, kind: DiagnosticKind) -> Self {
        Self {
            field: field.map(str::to_owned),
            severity: kind.severity(),
            kind,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.field.as_deref().unwrap_or("<unnamed>");
        write!(f, "{} - invalid config - {}", name, self.kind)
    }
}

/// All problems found for one registration or settings update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Option<&str>, kind: DiagnosticKind) {
        self.0.push(Diagnostic::new(field, kind));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Check if a problem of the given kind was recorded.
    pub fn contains(&self, kind: &DiagnosticKind) -> bool {
        self.0.iter().any(|d| &d.kind == kind)
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    /// Treat any recorded problem as a failure.
    pub fn into_result(self) -> Result<(), DiagnosticsError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DiagnosticsError(self))
        }
    }

    /// Emit every problem through the `log` facade.
    pub fn log(&self) {
        for diagnostic in &self.0 {
            match diagnostic.severity {
                Severity::Warning => log::warn!("{}", diagnostic),
                Severity::Error => log::error!("{}", diagnostic),
            }
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
