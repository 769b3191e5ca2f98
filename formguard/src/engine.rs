//! The validation and masking engine.

use std::sync::Arc;
use std::time::Instant;

use fieldmask::MaskedValue;

use crate::aggregator::{ErrorTarget, RepaintPass};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::EngineError;
use crate::events::{FieldEvent, Trigger};
use crate::field::{
    FieldConfig, FieldHandle, FieldSnapshot, FieldState, MaskSettings, ResolvedField, TextField,
};
use crate::registry::{FieldEntry, FieldId, FieldRegistry, FormId, TargetId};
use crate::timer::{Task, TickReport, Timers};
use crate::validation::{Chain, FieldError, Outcome, ValidationResult, Validity};

/// Result of registering a field.
#[derive(Debug, Clone)]
pub struct Registration {
    pub id: FieldId,
    /// The display target the field reports to.
    pub target: TargetId,
    /// Configuration problems found. Already logged.
    pub diagnostics: Diagnostics,
}

/// Owns every field, display target and form, plus the deferred work
/// between them.
///
/// All methods run synchronously. Deferred work (the debounced repaint,
/// cursor restoration, post-reset cleanup) runs when [`Engine::tick`] is
/// called after its deadline.
///
/// # Example
///
/// ```
/// use formguard::{Engine, EngineConfig, FieldConfig, TextField};
///
/// let mut engine = Engine::new(EngineConfig::default());
/// let form = engine.create_form();
/// let phone = engine
///     .register(form, TextField::new("phone"), FieldConfig::telephone())
///     .unwrap();
///
/// engine.type_text(phone.id, "555").unwrap();
/// assert_eq!(engine.value(phone.id).unwrap(), "(555) ___-____");
/// ```
#[derive(Debug)]
pub struct Engine<F = TextField> {
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    pub(crate) registry: FieldRegistry<F>,
    pub(crate) timers: Timers,
}

impl<F: FieldHandle> Engine<F> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an engine reading time from `clock`.
    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            registry: FieldRegistry::new(),
            timers: Timers::new(),
        }
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> Instant {
        self.clock.now()
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    pub fn create_form(&mut self) -> FormId {
        self.registry.insert_form()
    }

    pub fn create_target(&mut self) -> TargetId {
        self.registry.insert_target()
    }

    /// Register a field inside `form`.
    ///
    /// Fails only when the form does not exist. Configuration problems are
    /// logged and returned in [`Registration::diagnostics`]; the field is
    /// registered with fallbacks regardless. Masked fields have their
    /// initial value formatted and validated as if the field lost focus.
    pub fn register(
        &mut self,
        form: FormId,
        handle: F,
        config: FieldConfig,
    ) -> Result<Registration, EngineError> {
        if !self.registry.contains_form(form) {
            return Err(EngineError::MissingForm(form));
        }

        let mut diagnostics = Diagnostics::new();
        let resolved = ResolvedField::resolve(
            &config,
            &self.config.defaults,
            handle.name(),
            handle.label(),
            &mut diagnostics,
        );

        let target = match config.target {
            Some(target) if self.registry.contains_target(target) => target,
            Some(target) => {
                diagnostics.push(handle.name(), DiagnosticKind::InvalidTarget(target));
                self.registry.insert_target()
            }
            None => self.registry.insert_target(),
        };
        diagnostics.log();

        let id = FieldId::next();
        let initial = handle.value();
        let masked = resolved.is_masked();
        log::debug!(
            "[engine] registered {} as {} (target {})",
            resolved.name.as_deref().unwrap_or("<unnamed>"),
            id,
            target
        );

        self.registry.insert_field(
            id,
            FieldEntry {
                handle,
                form,
                target,
                config: resolved,
                state: FieldState::new(initial.clone()),
            },
        )?;

        if masked {
            self.set_value(id, &initial)?;
        }

        Ok(Registration {
            id,
            target,
            diagnostics,
        })
    }

    /// Drop a form with its fields, the targets nothing else reports to, and
    /// pending tasks of those fields.
    ///
    /// Shared targets lose the messages of the removed fields.
    pub fn remove_form(&mut self, form: FormId) -> Result<(), EngineError> {
        let (removed, touched) = self.registry.remove_form(form)?;
        self.timers.cancel_fields(&removed);
        if touched {
            self.schedule_repaint();
        }
        log::debug!("[engine] removed {} with {} field(s)", form, removed.len());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Form lifecycle
    // -------------------------------------------------------------------------

    /// Validate every field of `form` with all checks reporting.
    ///
    /// Submission should be blocked when the result is invalid.
    pub fn submit(&mut self, form: FormId) -> Result<ValidationResult, EngineError> {
        let fields = self.registry.form_fields(form)?.to_vec();
        let mut errors = Vec::new();

        for id in fields {
            self.validate(id, Trigger::Submit)?;
            let entry = self.registry.field(id)?;
            if !entry.handle.check_validity() {
                errors.push(FieldError {
                    field_name: entry
                        .config
                        .name
                        .clone()
                        .unwrap_or_else(|| id.to_string()),
                    field_id: id,
                    message: entry.handle.validation_message(),
                });
            }
        }

        if errors.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            log::debug!("[engine] submit of {} blocked by {} field(s)", form, errors.len());
            Ok(ValidationResult::Invalid(errors))
        }
    }

    /// Restore initial values and withdraw all messages of `form`.
    ///
    /// Earlier required failures are forgotten after
    /// [`EngineConfig::reset_delay`].
    pub fn reset(&mut self, form: FormId) -> Result<(), EngineError> {
        let fields = self.registry.form_fields(form)?.to_vec();
        let at = self.now() + self.config.reset_delay;
        let mut touched = false;

        for id in fields {
            let (entry, target) = self.registry.field_and_target_mut(id)?;
            let initial = entry.state.initial.clone();
            write_value(entry, &initial);
            clear_skeleton(entry);

            let mut chain = Chain::new(&entry.config, &mut entry.state, &mut entry.handle, target);
            chain.clear();
            touched |= chain.touched();
            entry.state.clear_flags();

            self.timers.defer(at, Task::ClearRequiredFailure(id));
        }

        if touched {
            self.schedule_repaint();
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Values
    // -------------------------------------------------------------------------

    /// Write a value from outside the field's own editing.
    ///
    /// Masked fields format the value first. Either way the field is then
    /// validated as if it lost focus.
    pub fn set_value(&mut self, id: FieldId, value: &str) -> Result<(), EngineError> {
        let entry = self.registry.field_mut(id)?;
        write_value(entry, value);
        self.handle(id, FieldEvent::FocusLost)?;
        Ok(())
    }

    /// Change a field's mask, slots, accept rule or display options.
    ///
    /// When the mask, slots or accept rule change, the field's content is
    /// re-formatted and re-validated.
    pub fn update_mask_settings<U>(&mut self, id: FieldId, update: U) -> Result<Diagnostics, EngineError>
    where
        U: FnOnce(&mut MaskSettings),
    {
        let entry = self.registry.field_mut(id)?;
        let before = entry.config.mask_settings();
        let mut settings = before.clone();
        update(&mut settings);

        let reformat = settings.mask != before.mask
            || settings.slots != before.slots
            || settings.accept != before.accept;

        let content = if entry.config.is_masked() {
            entry.state.masked.unmasked.clone()
        } else {
            entry.handle.value()
        };

        let mut diagnostics = Diagnostics::new();
        entry.config.apply_mask_settings(settings, &mut diagnostics);
        diagnostics.log();

        if reformat {
            if !entry.config.is_masked() {
                entry.state.masked = MaskedValue::default();
            }
            self.set_value(id, &content)?;
        }
        Ok(diagnostics)
    }

    /// The value the field exposes: unmasked when the field unmasks on read,
    /// else what is displayed.
    pub fn value(&self, id: FieldId) -> Result<String, EngineError> {
        let entry = self.registry.field(id)?;
        Ok(public_value(entry))
    }

    /// Displayed value.
    pub fn masked_value(&self, id: FieldId) -> Result<String, EngineError> {
        let entry = self.registry.field(id)?;
        if entry.config.is_masked() {
            Ok(entry.state.masked.masked.clone())
        } else {
            Ok(entry.handle.value())
        }
    }

    /// Slot contents only. Unmasked fields return their value.
    pub fn unmasked_value(&self, id: FieldId) -> Result<String, EngineError> {
        let entry = self.registry.field(id)?;
        if entry.config.is_masked() {
            Ok(entry.state.masked.unmasked.clone())
        } else {
            Ok(entry.handle.value())
        }
    }

    /// All four mask views. Empty for unmasked fields.
    pub fn mask_views(&self, id: FieldId) -> Result<&MaskedValue, EngineError> {
        Ok(&self.registry.field(id)?.state.masked)
    }

    /// Whether the field currently passes, and why not.
    ///
    /// A required field left empty is always invalid, even before anything
    /// was reported.
    pub fn validity(&self, id: FieldId) -> Result<Validity, EngineError> {
        let entry = self.registry.field(id)?;
        Ok(validity(entry))
    }

    pub fn snapshot(&self, id: FieldId) -> Result<FieldSnapshot, EngineError> {
        let entry = self.registry.field(id)?;
        let validity = validity(entry);
        let state = &entry.state;
        Ok(FieldSnapshot {
            id,
            name: entry.config.name.clone(),
            value: public_value(entry),
            raw: entry.handle.value(),
            masked: state.masked.masked.clone(),
            unmasked: state.masked.unmasked.clone(),
            full_mask: state.masked.full.clone(),
            partial_mask: state.masked.partial.clone(),
            valid: validity.valid,
            message: state.reported.clone(),
            required_active: state.required_active,
            failed_required_once: state.failed_required_once,
            pattern_active: state.pattern_active,
            too_long_active: state.too_long_active,
        })
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn config(&self, id: FieldId) -> Result<&ResolvedField, EngineError> {
        Ok(&self.registry.field(id)?.config)
    }

    pub fn state(&self, id: FieldId) -> Result<&FieldState, EngineError> {
        Ok(&self.registry.field(id)?.state)
    }

    pub fn field(&self, id: FieldId) -> Result<&F, EngineError> {
        Ok(&self.registry.field(id)?.handle)
    }

    /// Mutable access to the host field. Edits made here reach the engine
    /// only through a subsequent [`FieldEvent`].
    pub fn field_mut(&mut self, id: FieldId) -> Result<&mut F, EngineError> {
        Ok(&mut self.registry.field_mut(id)?.handle)
    }

    /// The display target a field reports to.
    pub fn target_of(&self, id: FieldId) -> Result<TargetId, EngineError> {
        Ok(self.registry.field(id)?.target)
    }

    pub fn form_of(&self, id: FieldId) -> Result<FormId, EngineError> {
        Ok(self.registry.field(id)?.form)
    }

    pub fn target(&self, id: TargetId) -> Result<&ErrorTarget, EngineError> {
        self.registry.target(id)
    }

    /// Active messages of a target, oldest first.
    pub fn messages(&self, id: TargetId) -> Result<Vec<String>, EngineError> {
        Ok(self
            .registry
            .target(id)?
            .messages()
            .into_iter()
            .map(str::to_owned)
            .collect())
    }

    pub fn form_fields(&self, form: FormId) -> Result<&[FieldId], EngineError> {
        self.registry.form_fields(form)
    }

    pub fn field_count(&self) -> usize {
        self.registry.field_count()
    }

    pub fn target_count(&self) -> usize {
        self.registry.target_count()
    }

    // -------------------------------------------------------------------------
    // Deferred work
    // -------------------------------------------------------------------------

    /// Run everything whose deadline has passed.
    pub fn tick(&mut self) -> TickReport {
        let (repaint_due, tasks) = self.timers.take_due(self.now());
        let tasks_run = tasks.len();
        for task in tasks {
            self.run_task(task);
        }

        let repaint = repaint_due.then(|| self.repaint());
        TickReport { repaint, tasks_run }
    }

    /// When [`Engine::tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn repaint_pending(&self) -> bool {
        self.timers.repaint_pending()
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::RestoreCursor(id) => {
                if let Ok(entry) = self.registry.field_mut(id) {
                    restore_cursor(entry);
                }
            }
            Task::ClearRequiredFailure(id) => {
                if let Ok(entry) = self.registry.field_mut(id) {
                    entry.state.failed_required_once = false;
                }
            }
        }
    }

    fn repaint(&mut self) -> RepaintPass {
        let targets = self
            .registry
            .targets_mut()
            .into_iter()
            .map(|target| {
                target.repaint();
                target.view()
            })
            .collect();
        log::trace!("[engine] repaint pass");
        RepaintPass { targets }
    }

    pub(crate) fn schedule_repaint(&mut self) {
        let at = self.now() + self.config.repaint_delay;
        self.timers.schedule_repaint(at);
    }

    pub(crate) fn defer(&mut self, task: Task) {
        let at = self.now() + self.config.cursor_restore_delay;
        self.timers.defer(at, task);
    }

    /// Run the chain and schedule a repaint if any target text changed.
    pub(crate) fn validate(&mut self, id: FieldId, trigger: Trigger) -> Result<Outcome, EngineError> {
        let (entry, target) = self.registry.field_and_target_mut(id)?;
        let mut chain = Chain::new(&entry.config, &mut entry.state, &mut entry.handle, target);
        let outcome = chain.run(trigger);
        if chain.touched() {
            self.schedule_repaint();
        }
        Ok(outcome)
    }
}

impl<F: FieldHandle> Default for Engine<F> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Write `value` to the host, formatted when the field is masked.
pub(crate) fn write_value<F: FieldHandle>(entry: &mut FieldEntry<F>, value: &str) {
    match &entry.config.mask {
        Some(mask) => {
            let formatted = mask.format(value, &entry.config.accept, entry.config.format_options());
            entry.handle.set_value(&formatted.masked);
            entry.state.raw = formatted.masked.clone();
            entry.state.masked = formatted;
        }
        None => {
            entry.handle.set_value(value);
            entry.state.raw = value.to_string();
        }
    }
}

/// Empty a masked field that shows nothing but mask literals.
pub(crate) fn clear_skeleton<F: FieldHandle>(entry: &mut FieldEntry<F>) {
    let Some(mask) = &entry.config.mask else {
        return;
    };
    let displayed = entry.handle.value();
    if !displayed.is_empty() && mask.is_skeleton_prefix(&displayed) {
        entry.handle.set_value("");
        entry.state.raw.clear();
        entry.state.masked = MaskedValue::default();
    }
}

/// Map the host's current selection onto slot positions.
pub(crate) fn restore_cursor<F: FieldHandle>(entry: &mut FieldEntry<F>) {
    let Some(mask) = &entry.config.mask else {
        return;
    };
    let raw = entry.handle.value();
    let selection = mask.map_selection(
        &raw,
        entry.handle.selection(),
        &entry.config.accept,
        entry.state.deleting,
    );
    entry.handle.set_selection(selection);
    entry.state.deleting = false;
}

fn public_value<F: FieldHandle>(entry: &FieldEntry<F>) -> String {
    match (&entry.config.mask, entry.config.unmask_on_read) {
        (Some(_), true) => entry.state.masked.unmasked.clone(),
        (Some(_), false) => entry.state.masked.masked.clone(),
        (None, _) => entry.handle.value(),
    }
}

fn validity<F: FieldHandle>(entry: &FieldEntry<F>) -> Validity {
    let required_value = if entry.config.is_masked() {
        entry.state.masked.unmasked.clone()
    } else {
        entry.handle.value()
    };
    let missing = entry.config.required && required_value.trim().is_empty();

    if entry.handle.check_validity() && !missing {
        return Validity::valid();
    }
    let message = entry.handle.validation_message();
    Validity {
        valid: false,
        messages: if message.is_empty() { Vec::new() } else { vec![message] },
    }
}
