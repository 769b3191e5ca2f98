//! Field configuration after defaults are merged and patterns compiled.

use std::collections::HashMap;

use fieldmask::{AcceptRule, FormatOptions, Mask};
use regex::Regex;

use crate::config::FieldDefaults;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

use super::config::{CustomRule, FailureKind, FieldConfig};

/// Slot marker used when a mask is configured without slots.
const FALLBACK_SLOTS: &str = "_";

/// The mutable subset of a field's configuration.
///
/// Changed through [`Engine::update_mask_settings`](crate::Engine::update_mask_settings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSettings {
    pub mask: Option<String>,
    pub slots: Option<String>,
    pub accept: Option<String>,
    pub unmask_on_read: bool,
    pub show_full_mask: bool,
    pub hide_dot_slots: bool,
}

/// Resolved, read-only view of a field's configuration.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub name: Option<String>,
    pub label: Option<String>,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub exact_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomRule>,
    pub accept: AcceptRule,
    pub allow_unaccepted: bool,
    pub mask: Option<Mask>,
    pub unmask_on_read: bool,
    pub show_full_mask: bool,
    pub hide_dot_slots: bool,
    pub validate_on_input: bool,
    pub validate_unmasked: bool,
    /// Whether generated length messages say "digits".
    pub is_numeric: bool,
    pub messages: HashMap<FailureKind, String>,
    // Sources of the mutable settings, kept for `mask_settings`.
    mask_source: Option<String>,
    slots_source: Option<String>,
    accept_source: Option<String>,
}

impl ResolvedField {
    /// Merge `config` over `defaults`, recording every problem found.
    pub(crate) fn resolve(
        config: &FieldConfig,
        defaults: &FieldDefaults,
        name: Option<&str>,
        label: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        if name.is_none_or(str::is_empty) {
            diagnostics.push(name, DiagnosticKind::MissingName);
        }
        if config.min_length.is_some() && config.exact_length.is_some() {
            diagnostics.push(name, DiagnosticKind::MinAndExactLength);
        }
        if config.max_length.is_some() && config.exact_length.is_some() {
            diagnostics.push(name, DiagnosticKind::MaxAndExactLength);
        }

        let validate_on_input = config.validate_on_input.unwrap_or(defaults.validate_on_input);
        let guarded =
            config.min_length.is_some() || config.exact_length.is_some() || !validate_on_input;
        if (config.pattern.is_some() || config.custom.is_some()) && !guarded {
            diagnostics.push(name, DiagnosticKind::RuleWithoutLengthGuard);
        }

        let pattern = config.pattern.as_deref().and_then(|source| {
            Regex::new(source)
                .map_err(|e| {
                    diagnostics.push(
                        name,
                        DiagnosticKind::InvalidPattern {
                            pattern: source.to_string(),
                            reason: e.to_string(),
                        },
                    );
                })
                .ok()
        });

        let mut resolved = Self {
            name: name.map(str::to_owned),
            label: label.map(str::to_owned),
            required: config.required,
            min_length: config.min_length,
            max_length: config.max_length,
            exact_length: config.exact_length,
            pattern,
            custom: config.custom.clone(),
            accept: AcceptRule::fallback(),
            allow_unaccepted: config.allow_unaccepted.unwrap_or(defaults.allow_unaccepted),
            mask: None,
            unmask_on_read: config.unmask_on_read.unwrap_or(defaults.unmask_on_read),
            show_full_mask: config.show_full_mask.unwrap_or(defaults.show_full_mask),
            hide_dot_slots: config.hide_dot_slots.unwrap_or(defaults.hide_dot_slots),
            validate_on_input,
            validate_unmasked: config.validate_unmasked.unwrap_or(defaults.validate_unmasked),
            is_numeric: false,
            messages: config.messages.clone(),
            mask_source: None,
            slots_source: None,
            accept_source: None,
        };

        resolved.apply_mask_settings(
            MaskSettings {
                mask: config.mask.clone(),
                slots: config.slots.clone(),
                accept: config.accept.clone(),
                unmask_on_read: resolved.unmask_on_read,
                show_full_mask: resolved.show_full_mask,
                hide_dot_slots: resolved.hide_dot_slots,
            },
            diagnostics,
        );

        resolved
    }

    /// Replace the mutable settings, recompiling the mask and accept rule.
    pub(crate) fn apply_mask_settings(&mut self, settings: MaskSettings, diagnostics: &mut Diagnostics) {
        let name = self.name.clone();
        let name = name.as_deref();

        self.accept = match settings.accept.as_deref() {
            Some(source) => AcceptRule::new(source).unwrap_or_else(|e| {
                diagnostics.push(
                    name,
                    DiagnosticKind::InvalidAcceptPattern {
                        pattern: source.to_string(),
                        reason: e.to_string(),
                    },
                );
                AcceptRule::fallback()
            }),
            None => AcceptRule::fallback(),
        };
        self.is_numeric = self.accept.is_numeric();

        self.mask = settings.mask.as_deref().map(|pattern| {
            let slots = match settings.slots.as_deref() {
                Some(slots) if !slots.is_empty() => slots,
                _ => {
                    diagnostics.push(name, DiagnosticKind::MaskWithoutSlots);
                    FALLBACK_SLOTS
                }
            };
            if self.accept.matches_any(pattern) {
                diagnostics.push(
                    name,
                    DiagnosticKind::MaskOverlapsAccept {
                        accept: self.accept.as_str().to_string(),
                    },
                );
            }
            Mask::new(pattern, slots)
        });

        self.unmask_on_read = settings.unmask_on_read;
        self.show_full_mask = settings.show_full_mask;
        self.hide_dot_slots = settings.hide_dot_slots;
        self.mask_source = settings.mask;
        self.slots_source = settings.slots;
        self.accept_source = settings.accept;
    }

    /// Current values of the mutable settings.
    pub fn mask_settings(&self) -> MaskSettings {
        MaskSettings {
            mask: self.mask_source.clone(),
            slots: self.slots_source.clone(),
            accept: self.accept_source.clone(),
            unmask_on_read: self.unmask_on_read,
            show_full_mask: self.show_full_mask,
            hide_dot_slots: self.hide_dot_slots,
        }
    }

    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    /// Whether key presses are filtered against the accept rule.
    pub fn intercepts_keys(&self) -> bool {
        !self.allow_unaccepted && (self.is_masked() || self.accept.is_explicit())
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            show_full_mask: self.show_full_mask,
            hide_dot_slots: self.hide_dot_slots,
        }
    }

    /// Upper length bound: max length, else exact length.
    pub(crate) fn max_bound(&self) -> Option<usize> {
        self.max_length.or(self.exact_length)
    }
}
