//! Generated failure messages.

use crate::field::{FailureKind, ResolvedField};

const FALLBACK_LABEL: &str = "This field";

fn label(config: &ResolvedField) -> &str {
    config
        .label
        .as_deref()
        .filter(|label| !label.trim().is_empty())
        .unwrap_or(FALLBACK_LABEL)
}

fn unit(config: &ResolvedField) -> &'static str {
    if config.is_numeric { "digits" } else { "characters" }
}

/// The override for `kind`, if configured.
pub(crate) fn custom(config: &ResolvedField, kind: FailureKind) -> Option<String> {
    config.messages.get(&kind).cloned()
}

pub(crate) fn required(config: &ResolvedField) -> String {
    custom(config, FailureKind::Required)
        .unwrap_or_else(|| format!("{} is required.", label(config)))
}

/// Message for any length mismatch under exact-length, and for too short.
pub(crate) fn not_long_enough(config: &ResolvedField) -> String {
    custom(config, FailureKind::TooShort).unwrap_or_else(|| {
        let exact = config.exact_length.is_some() || config.min_length == config.max_length;
        let bound = config.min_length.or(config.exact_length).unwrap_or(0);
        format!(
            "{} must be {} {} {} long.",
            label(config),
            if exact { "exactly" } else { "at least" },
            bound,
            unit(config)
        )
    })
}

pub(crate) fn too_long(config: &ResolvedField) -> String {
    if config.exact_length.is_some() {
        return not_long_enough(config);
    }
    custom(config, FailureKind::TooLong).unwrap_or_else(|| {
        format!(
            "{} must not be longer than {} {}.",
            label(config),
            config.max_length.unwrap_or(0),
            unit(config)
        )
    })
}

pub(crate) fn not_valid(config: &ResolvedField) -> String {
    custom(config, FailureKind::Invalid).unwrap_or_else(|| generic(config))
}

pub(crate) fn custom_rule(config: &ResolvedField) -> String {
    custom(config, FailureKind::Custom).unwrap_or_else(|| generic(config))
}

/// Override, else the host's own message, else the generic one.
pub(crate) fn native(config: &ResolvedField, platform: &str) -> String {
    custom(config, FailureKind::Native).unwrap_or_else(|| {
        if platform.is_empty() {
            generic(config)
        } else {
            platform.to_string()
        }
    })
}

fn generic(config: &ResolvedField) -> String {
    format!("{} is not valid.", label(config))
}
