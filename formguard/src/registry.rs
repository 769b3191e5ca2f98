//! Engine-owned storage for fields, display targets and forms.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::aggregator::ErrorTarget;
use crate::error::EngineError;
use crate::field::{FieldHandle, FieldState, ResolvedField};

macro_rules! registry_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn next() -> Self {
                static COUNTER: AtomicUsize = AtomicUsize::new(0);
                Self(COUNTER.fetch_add(1, Ordering::SeqCst))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

registry_id!(
    /// Unique identifier for a registered field.
    FieldId,
    "field#"
);
registry_id!(
    /// Unique identifier for an error display target.
    TargetId,
    "target#"
);
registry_id!(
    /// Unique identifier for a form (the submit/reset container).
    FormId,
    "form#"
);

/// Everything the engine keeps for one field.
#[derive(Debug)]
pub(crate) struct FieldEntry<F> {
    pub handle: F,
    pub form: FormId,
    pub target: TargetId,
    pub config: ResolvedField,
    pub state: FieldState,
}

/// Registry of all fields, targets and forms owned by one engine.
///
/// Lookups are keyed by id. Forms keep their fields in registration order so
/// submit reports errors top to bottom.
#[derive(Debug)]
pub(crate) struct FieldRegistry<F> {
    fields: HashMap<FieldId, FieldEntry<F>>,
    targets: HashMap<TargetId, ErrorTarget>,
    forms: HashMap<FormId, Vec<FieldId>>,
}

impl<F: FieldHandle> FieldRegistry<F> {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            targets: HashMap::new(),
            forms: HashMap::new(),
        }
    }

    pub fn insert_form(&mut self) -> FormId {
        let id = FormId::next();
        self.forms.insert(id, Vec::new());
        id
    }

    pub fn insert_target(&mut self) -> TargetId {
        let id = TargetId::next();
        self.targets.insert(id, ErrorTarget::new(id));
        id
    }

    pub fn contains_form(&self, id: FormId) -> bool {
        self.forms.contains_key(&id)
    }

    pub fn contains_target(&self, id: TargetId) -> bool {
        self.targets.contains_key(&id)
    }

    /// Store a field and append it to its form.
    pub fn insert_field(&mut self, id: FieldId, entry: FieldEntry<F>) -> Result<(), EngineError> {
        let form = self
            .forms
            .get_mut(&entry.form)
            .ok_or(EngineError::MissingForm(entry.form))?;
        form.push(id);
        self.fields.insert(id, entry);
        Ok(())
    }

    pub fn field(&self, id: FieldId) -> Result<&FieldEntry<F>, EngineError> {
        self.fields.get(&id).ok_or(EngineError::UnknownField(id))
    }

    pub fn field_mut(&mut self, id: FieldId) -> Result<&mut FieldEntry<F>, EngineError> {
        self.fields.get_mut(&id).ok_or(EngineError::UnknownField(id))
    }

    pub fn target(&self, id: TargetId) -> Result<&ErrorTarget, EngineError> {
        self.targets.get(&id).ok_or(EngineError::UnknownTarget(id))
    }

    /// Borrow a field together with its display target.
    pub fn field_and_target_mut(
        &mut self,
        id: FieldId,
    ) -> Result<(&mut FieldEntry<F>, &mut ErrorTarget), EngineError> {
        let entry = self.fields.get_mut(&id).ok_or(EngineError::UnknownField(id))?;
        let target = self
            .targets
            .get_mut(&entry.target)
            .ok_or(EngineError::UnknownTarget(entry.target))?;
        Ok((entry, target))
    }

    /// Fields of a form in registration order.
    pub fn form_fields(&self, id: FormId) -> Result<&[FieldId], EngineError> {
        self.forms
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(EngineError::UnknownForm(id))
    }

    /// All targets, ordered by id.
    pub fn targets_mut(&mut self) -> Vec<&mut ErrorTarget> {
        let mut targets: Vec<&mut ErrorTarget> = self.targets.values_mut().collect();
        targets.sort_by_key(|target| target.id());
        targets
    }

    /// Drop a form, its fields and every target no remaining field uses.
    ///
    /// Messages the removed fields still report are withdrawn from their
    /// targets. Returns the removed field ids and whether the text of a
    /// surviving target changed.
    pub fn remove_form(&mut self, id: FormId) -> Result<(Vec<FieldId>, bool), EngineError> {
        let removed = self.forms.remove(&id).ok_or(EngineError::UnknownForm(id))?;

        let mut orphaned = Vec::new();
        let mut withdrawn = Vec::new();
        for field in &removed {
            if let Some(entry) = self.fields.remove(field) {
                if let Some(message) = entry.state.reported {
                    withdrawn.push((entry.target, message));
                }
                orphaned.push(entry.target);
            }
        }

        orphaned.retain(|target| !self.fields.values().any(|entry| entry.target == *target));
        for target in &orphaned {
            self.targets.remove(target);
        }

        let mut touched = false;
        for (target, message) in withdrawn {
            if let Some(target) = self.targets.get_mut(&target) {
                touched |= target.remove(&message);
            }
        }

        Ok((removed, touched))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}
