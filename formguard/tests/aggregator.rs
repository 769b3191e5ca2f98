//! Shared display targets and the debounced repaint.

use std::sync::Arc;
use std::time::Duration;

use formguard::{
    Engine, EngineConfig, FieldConfig, FieldId, FormId, ManualClock, TargetId, TextField,
    Visibility,
};

fn setup() -> (Engine, FormId, ManualClock) {
    let clock = ManualClock::new();
    let mut engine: Engine = Engine::with_clock(EngineConfig::default(), Arc::new(clock.clone()));
    let form = engine.create_form();
    (engine, form, clock)
}

fn field_on(engine: &mut Engine, form: FormId, target: TargetId, name: &str, label: &str) -> FieldId {
    let registration = engine
        .register(
            form,
            TextField::new(name).with_label(label),
            FieldConfig::new().target(target).min_length(3),
        )
        .unwrap();
    assert!(registration.diagnostics.is_empty());
    assert_eq!(registration.target, target);
    registration.id
}

#[test]
fn test_burst_of_reports_repaints_once() {
    let (mut engine, form, clock) = setup();
    let target = engine.create_target();
    let fields: Vec<FieldId> = (0..10)
        .map(|i| field_on(&mut engine, form, target, &format!("field{i}"), &format!("Field {}", i % 5)))
        .collect();

    for id in &fields {
        engine.set_value(*id, "a").unwrap();
        clock.advance(Duration::from_millis(10));
        assert!(engine.tick().repaint.is_none());
    }

    // Five distinct messages, each reported twice
    let shown = engine.target(target).unwrap();
    assert_eq!(shown.messages().len(), 5);
    assert_eq!(shown.count("Field 0 must be at least 3 characters long."), 2);
    assert_eq!(shown.visibility(), Visibility::Closed);

    // The last text change happened at 40ms
    clock.advance(Duration::from_millis(39));
    assert!(engine.tick().repaint.is_none());
    clock.advance(Duration::from_millis(1));
    let pass = engine.tick().repaint.expect("repaint due");
    let view = pass.target(target).unwrap();
    assert_eq!(view.visibility, Visibility::Open);
    assert_eq!(view.height, 5);
    assert_eq!(view.text.lines().next(), Some("Field 0 must be at least 3 characters long."));

    assert!(!engine.repaint_pending());
    assert!(engine.tick().repaint.is_none());
}

#[test]
fn test_shared_message_stays_until_last_field_clears() {
    let (mut engine, form, _) = setup();
    let target = engine.create_target();
    let a = field_on(&mut engine, form, target, "a", "Code");
    let b = field_on(&mut engine, form, target, "b", "Code");
    let message = "Code must be at least 3 characters long.";

    engine.set_value(a, "x").unwrap();
    engine.set_value(b, "y").unwrap();
    assert_eq!(engine.target(target).unwrap().count(message), 2);

    engine.set_value(a, "xyz").unwrap();
    assert_eq!(engine.messages(target).unwrap(), vec![message]);

    engine.set_value(b, "xyz").unwrap();
    assert!(engine.target(target).unwrap().is_empty());
    assert_eq!(engine.target(target).unwrap().text(), "");
}

#[test]
fn test_target_closes_after_messages_withdrawn() {
    let (mut engine, form, clock) = setup();
    let target = engine.create_target();
    let id = field_on(&mut engine, form, target, "code", "Code");

    engine.set_value(id, "x").unwrap();
    clock.advance(Duration::from_millis(100));
    assert_eq!(engine.tick().repaint.unwrap().target(target).unwrap().visibility, Visibility::Open);

    engine.set_value(id, "xyz").unwrap();
    assert_eq!(engine.target(target).unwrap().visibility(), Visibility::Open);
    clock.advance(Duration::from_millis(100));
    let view = engine.tick().repaint.unwrap();
    let view = view.target(target).unwrap();
    assert_eq!(view.visibility, Visibility::Closed);
    assert_eq!(view.height, 0);
}

#[test]
fn test_unchanged_text_schedules_nothing() {
    let (mut engine, form, _) = setup();
    let target = engine.create_target();
    let id = field_on(&mut engine, form, target, "code", "Code");

    engine.set_value(id, "xyz").unwrap();
    assert!(!engine.repaint_pending());
    assert_eq!(engine.next_deadline(), None);

    engine.set_value(id, "x").unwrap();
    assert!(engine.repaint_pending());
}

#[test]
fn test_fields_without_target_get_their_own() {
    let (mut engine, form, _) = setup();
    let a = engine
        .register(form, TextField::new("a"), FieldConfig::new())
        .unwrap();
    let b = engine
        .register(form, TextField::new("b"), FieldConfig::new())
        .unwrap();

    assert_ne!(a.target, b.target);
    assert_eq!(engine.target_of(a.id).unwrap(), a.target);
    assert_eq!(engine.target_count(), 2);
}
