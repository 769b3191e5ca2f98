use crate::aggregator::ErrorTarget;
use crate::events::Trigger;
use crate::field::{FailureKind, FieldHandle, FieldState, ResolvedField, Verdict};

use super::messages;

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Input pass skipped: validation on input is off and the field is valid.
    Skipped,
    /// Every check passed; the previous message was withdrawn.
    Valid,
    /// Too short while typing. Nothing was reported or withdrawn.
    Pending,
    /// A check failed and its message was reported.
    Invalid(FailureKind),
}

/// One validation pass over one field.
pub(crate) struct Chain<'a, F> {
    config: &'a ResolvedField,
    state: &'a mut FieldState,
    handle: &'a mut F,
    target: &'a mut ErrorTarget,
    touched: bool,
}

impl<'a, F: FieldHandle> Chain<'a, F> {
    pub fn new(
        config: &'a ResolvedField,
        state: &'a mut FieldState,
        handle: &'a mut F,
        target: &'a mut ErrorTarget,
    ) -> Self {
        Self {
            config,
            state,
            handle,
            target,
            touched: false,
        }
    }

    /// Whether the target's text changed during the pass.
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn run(&mut self, trigger: Trigger) -> Outcome {
        let config = self.config;

        if !config.is_masked() {
            self.state.raw = self.handle.value();
        }

        if trigger == Trigger::Input && !config.validate_on_input && self.handle.check_validity() {
            return Outcome::Skipped;
        }

        let required_failed = match trigger {
            Trigger::Submit => self.is_missing(),
            Trigger::Input | Trigger::Blur => self.still_missing(),
        };
        if required_failed {
            return self.report_required();
        }

        let value = self.effective_value();
        if value.is_empty() {
            self.clear();
            return Outcome::Valid;
        }

        if self.has_unaccepted(&value) {
            return self.report_invalid();
        }

        let len = value.chars().count();

        if config.min_length.is_some() || config.exact_length.is_some() {
            if self.state.too_long_active && config.max_bound().is_some_and(|max| len <= max) {
                self.state.too_long_active = false;
                self.clear();
            }
            let too_short = config.min_length.is_some_and(|min| len < min)
                || config.exact_length.is_some_and(|exact| len < exact);
            if too_short {
                if trigger == Trigger::Input {
                    return Outcome::Pending;
                }
                return self.report(FailureKind::TooShort, messages::not_long_enough(config));
            }
        }

        if config.max_bound().is_some_and(|max| len > max) {
            self.state.too_long_active = true;
            let kind = if config.exact_length.is_some() {
                FailureKind::TooShort
            } else {
                FailureKind::TooLong
            };
            return self.report(kind, messages::too_long(config));
        }

        if let Some(pattern) = &config.pattern {
            if !pattern.is_match(&self.public_value()) {
                return self.report_invalid();
            }
        }

        if let Some(rule) = &config.custom {
            match rule.check(&value) {
                Verdict::Valid => {}
                Verdict::Invalid => {
                    return self.report(FailureKind::Custom, messages::custom_rule(config));
                }
                Verdict::InvalidWithMessage(msg) => return self.report(FailureKind::Custom, msg),
            }
        }

        if trigger != Trigger::Input {
            if let Some(violation) = self.handle.native_violation() {
                return self.report(FailureKind::Native, messages::native(config, &violation));
            }
        }

        self.clear();
        Outcome::Valid
    }

    /// Withdraw this field's message and mark it valid.
    pub fn clear(&mut self) {
        if let Some(previous) = self.state.reported.take() {
            log::debug!("[validation] {} cleared", self.field_name());
            self.touched |= self.target.remove(&previous);
        }
        self.handle.set_custom_validity("");
        self.handle.set_invalid(false);
    }

    // -------------------------------------------------------------------------
    // Values
    // -------------------------------------------------------------------------

    /// The value checked by the chain.
    fn effective_value(&self) -> String {
        if !self.config.is_masked() {
            return self.state.raw.clone();
        }
        if self.config.validate_unmasked {
            self.state.masked.unmasked.clone()
        } else {
            self.state.masked.masked.clone()
        }
    }

    /// The value the field exposes to readers.
    fn public_value(&self) -> String {
        if !self.config.is_masked() {
            return self.state.raw.clone();
        }
        if self.config.unmask_on_read {
            self.state.masked.unmasked.clone()
        } else {
            self.state.masked.masked.clone()
        }
    }

    /// The value the required check looks at: slot contents when masked.
    fn required_value(&self) -> &str {
        if self.config.is_masked() {
            &self.state.masked.unmasked
        } else {
            &self.state.raw
        }
    }

    // -------------------------------------------------------------------------
    // Detectors
    // -------------------------------------------------------------------------

    fn is_missing(&self) -> bool {
        self.config.required && self.required_value().trim().is_empty()
    }

    /// Keeps reporting a required failure while the field stays empty, and
    /// withdraws it as soon as something is typed.
    fn still_missing(&mut self) -> bool {
        if !self.state.failed_required_once {
            return false;
        }
        if self.required_value().is_empty() {
            return true;
        }
        if self.state.required_active {
            self.state.required_active = false;
            self.clear();
        }
        false
    }

    /// Only an explicit accept rule is checked.
    fn has_unaccepted(&mut self, value: &str) -> bool {
        if !self.config.accept.is_explicit() {
            return false;
        }
        if value.chars().any(|c| !self.config.accept.accepts_char(c)) {
            return true;
        }
        if self.state.pattern_active {
            self.clear();
        }
        self.state.pattern_active = false;
        false
    }

    // -------------------------------------------------------------------------
    // Reporters
    // -------------------------------------------------------------------------

    fn report_required(&mut self) -> Outcome {
        self.state.required_active = true;
        self.state.failed_required_once = true;
        self.report(FailureKind::Required, messages::required(self.config))
    }

    fn report_invalid(&mut self) -> Outcome {
        self.state.pattern_active = true;
        self.report(FailureKind::Invalid, messages::not_valid(self.config))
    }

    /// Replace this field's message with `message`.
    fn report(&mut self, kind: FailureKind, message: String) -> Outcome {
        if self.state.reported.as_deref() != Some(message.as_str()) {
            if let Some(previous) = self.state.reported.take() {
                self.touched |= self.target.remove(&previous);
            }
            log::debug!("[validation] {} {:?}: {}", self.field_name(), kind, message);
            self.touched |= self.target.insert(&message);
            self.state.reported = Some(message.clone());
        }
        self.handle.set_custom_validity(&message);
        self.handle.set_invalid(true);
        Outcome::Invalid(kind)
    }

    fn field_name(&self) -> &str {
        self.config.name.as_deref().unwrap_or("<unnamed>")
    }
}
