//! Validation chain behavior on input, blur and submit.

use std::sync::Arc;

use formguard::fieldmask::{Key, Modifiers};
use formguard::{
    Engine, EngineConfig, EventResult, FailureKind, FieldConfig, FieldId, FormId, InputKind,
    ManualClock, TextField,
};

fn setup() -> (Engine, FormId) {
    let mut engine = Engine::new(EngineConfig::default());
    let form = engine.create_form();
    (engine, form)
}

fn field(engine: &mut Engine, form: FormId, label: &str, config: FieldConfig) -> FieldId {
    let name = label.to_lowercase();
    engine
        .register(form, TextField::new(name).with_label(label), config)
        .unwrap()
        .id
}

fn messages(engine: &Engine, id: FieldId) -> Vec<String> {
    let target = engine.target_of(id).unwrap();
    engine.messages(target).unwrap()
}

fn backspace(engine: &mut Engine, id: FieldId) {
    engine.press_key(id, Key::Backspace, Modifiers::NONE).unwrap();
}

// ============================================================================
// Length
// ============================================================================

#[test]
fn test_exact_length_reports_not_long_enough_both_ways() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Code", FieldConfig::new().exact_length(4));

    engine.set_value(id, "123").unwrap();
    assert_eq!(messages(&engine, id), vec!["Code must be exactly 4 characters long."]);

    engine.set_value(id, "12345").unwrap();
    assert_eq!(messages(&engine, id), vec!["Code must be exactly 4 characters long."]);
    assert!(engine.state(id).unwrap().reported().is_some());

    engine.set_value(id, "1234").unwrap();
    assert!(messages(&engine, id).is_empty());
    assert!(engine.validity(id).unwrap().valid);
}

#[test]
fn test_too_short_waits_while_typing() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Name", FieldConfig::new().min_length(3));

    engine.type_text(id, "ab").unwrap();
    assert!(messages(&engine, id).is_empty());

    engine.blur(id).unwrap();
    assert_eq!(messages(&engine, id), vec!["Name must be at least 3 characters long."]);

    engine.type_text(id, "c").unwrap();
    assert!(messages(&engine, id).is_empty());
}

#[test]
fn test_too_long_reports_while_typing() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Nick", FieldConfig::new().max_length(5));

    engine.type_text(id, "abcdef").unwrap();
    assert_eq!(messages(&engine, id), vec!["Nick must not be longer than 5 characters."]);
    assert!(engine.snapshot(id).unwrap().too_long_active);

    backspace(&mut engine, id);
    assert!(messages(&engine, id).is_empty());
}

#[test]
fn test_too_long_flag_clears_back_under_bound() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Nick", FieldConfig::new().min_length(2).max_length(4));

    engine.type_text(id, "abcde").unwrap();
    assert_eq!(messages(&engine, id), vec!["Nick must not be longer than 4 characters."]);

    backspace(&mut engine, id);
    assert!(messages(&engine, id).is_empty());
    assert!(!engine.snapshot(id).unwrap().too_long_active);
}

#[test]
fn test_numeric_field_counts_digits() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Zip", FieldConfig::new().accept(r"\d").min_length(5));

    engine.set_value(id, "123").unwrap();
    assert_eq!(messages(&engine, id), vec!["Zip must be at least 5 digits long."]);
}

#[test]
fn test_empty_optional_field_passes() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Name", FieldConfig::new().min_length(3));

    engine.set_value(id, "").unwrap();
    assert!(messages(&engine, id).is_empty());
    assert!(engine.validity(id).unwrap().valid);
}

// ============================================================================
// Required
// ============================================================================

#[test]
fn test_required_empty_field_is_invalid_before_any_report() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Email", FieldConfig::new().required(true));

    let validity = engine.validity(id).unwrap();
    assert!(!validity.valid);
    assert!(validity.messages.is_empty());
}

#[test]
fn test_required_failure_is_sticky_until_typed() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Email", FieldConfig::new().required(true));

    let result = engine.submit(form).unwrap();
    assert!(result.is_invalid());
    assert_eq!(messages(&engine, id), vec!["Email is required."]);

    engine.type_text(id, "a").unwrap();
    assert!(messages(&engine, id).is_empty());
    assert!(!engine.snapshot(id).unwrap().required_active);

    backspace(&mut engine, id);
    assert_eq!(messages(&engine, id), vec!["Email is required."]);

    engine.blur(id).unwrap();
    assert_eq!(messages(&engine, id), vec!["Email is required."]);
}

#[test]
fn test_whitespace_only_is_missing_on_submit() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Name", FieldConfig::new().required(true));
    engine.set_value(id, "   ").unwrap();

    assert!(engine.submit(form).unwrap().is_invalid());
    assert_eq!(messages(&engine, id), vec!["Name is required."]);
}

#[test]
fn test_required_override_still_sticks() {
    let (mut engine, form) = setup();
    let id = field(
        &mut engine,
        form,
        "Email",
        FieldConfig::new()
            .required(true)
            .message(FailureKind::Required, "We need your email"),
    );

    engine.submit(form).unwrap();
    assert_eq!(messages(&engine, id), vec!["We need your email"]);
    assert!(engine.snapshot(id).unwrap().failed_required_once);
}

// ============================================================================
// Accept, pattern, custom
// ============================================================================

#[test]
fn test_unaccepted_key_suppressed_and_paste_reported() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Zip", FieldConfig::new().accept(r"\d"));

    let result = engine.press_key(id, Key::Char('x'), Modifiers::NONE).unwrap();
    assert_eq!(result, EventResult::Suppressed);
    assert_eq!(engine.value(id).unwrap(), "");

    engine.paste(id, "12ab").unwrap();
    assert_eq!(engine.value(id).unwrap(), "12ab");
    assert_eq!(messages(&engine, id), vec!["Zip is not valid."]);
    assert!(engine.snapshot(id).unwrap().pattern_active);

    engine.set_value(id, "12").unwrap();
    assert!(messages(&engine, id).is_empty());
    assert!(!engine.snapshot(id).unwrap().pattern_active);
}

#[test]
fn test_allow_unaccepted_lets_keys_through() {
    let (mut engine, form) = setup();
    let id = field(
        &mut engine,
        form,
        "Zip",
        FieldConfig::new().accept(r"\d").allow_unaccepted(true),
    );

    let result = engine.press_key(id, Key::Char('x'), Modifiers::NONE).unwrap();
    assert_eq!(result, EventResult::Allowed);
    assert_eq!(messages(&engine, id), vec!["Zip is not valid."]);
}

#[test]
fn test_pattern_mismatch() {
    let (mut engine, form) = setup();
    let id = field(
        &mut engine,
        form,
        "Slug",
        FieldConfig::new().pattern("^[a-z]+$").min_length(1),
    );

    engine.set_value(id, "Abc").unwrap();
    assert_eq!(messages(&engine, id), vec!["Slug is not valid."]);

    engine.set_value(id, "abc").unwrap();
    assert!(messages(&engine, id).is_empty());
}

#[test]
fn test_custom_rule_message_is_shown() {
    let (mut engine, form) = setup();
    let id = field(
        &mut engine,
        form,
        "Handle",
        FieldConfig::new().min_length(1).custom(|value: &str| {
            if value.contains(' ') {
                Err("No spaces allowed".to_string())
            } else {
                Ok(())
            }
        }),
    );

    engine.set_value(id, "a b").unwrap();
    assert_eq!(messages(&engine, id), vec!["No spaces allowed"]);

    engine.set_value(id, "ab").unwrap();
    assert!(messages(&engine, id).is_empty());
}

#[test]
fn test_custom_rule_without_message_uses_generic() {
    let (mut engine, form) = setup();
    let id = field(
        &mut engine,
        form,
        "Even",
        FieldConfig::new()
            .min_length(1)
            .custom(|value: &str| value.len() % 2 == 0),
    );

    engine.set_value(id, "abc").unwrap();
    assert_eq!(messages(&engine, id), vec!["Even is not valid."]);
}

// ============================================================================
// Native constraints
// ============================================================================

#[test]
fn test_native_check_runs_on_blur_only() {
    let (mut engine, form) = setup();
    let id = engine
        .register(
            form,
            TextField::new("email")
                .with_label("Email")
                .with_kind(InputKind::Email),
            FieldConfig::new(),
        )
        .unwrap()
        .id;

    engine.type_text(id, "someone").unwrap();
    assert!(messages(&engine, id).is_empty());

    engine.blur(id).unwrap();
    let shown = messages(&engine, id);
    assert_eq!(shown.len(), 1);
    assert!(shown[0].contains("valid email"));

    engine.type_text(id, "@example.com").unwrap();
    engine.blur(id).unwrap();
    assert!(messages(&engine, id).is_empty());
}

#[test]
fn test_native_override() {
    let (mut engine, form) = setup();
    let id = engine
        .register(
            form,
            TextField::new("qty").with_kind(InputKind::Number),
            FieldConfig::new().message(FailureKind::Native, "Numbers only"),
        )
        .unwrap()
        .id;

    engine.set_value(id, "many").unwrap();
    assert_eq!(messages(&engine, id), vec!["Numbers only"]);
}

// ============================================================================
// Validate on input off
// ============================================================================

#[test]
fn test_validate_on_input_off_waits_for_blur() {
    let (mut engine, form) = setup();
    let id = field(
        &mut engine,
        form,
        "Tag",
        FieldConfig::new().max_length(3).validate_on_input(false),
    );

    engine.type_text(id, "abcd").unwrap();
    assert!(messages(&engine, id).is_empty());

    engine.blur(id).unwrap();
    assert_eq!(messages(&engine, id), vec!["Tag must not be longer than 3 characters."]);

    // Invalid fields validate on input again
    backspace(&mut engine, id);
    assert!(messages(&engine, id).is_empty());
}

// ============================================================================
// Submit and reset
// ============================================================================

#[test]
fn test_submit_collects_every_invalid_field() {
    let (mut engine, form) = setup();
    let name = field(&mut engine, form, "Name", FieldConfig::new().required(true));
    let city = field(&mut engine, form, "City", FieldConfig::new().min_length(2));
    let zip = field(&mut engine, form, "Zip", FieldConfig::new().required(true));
    engine.set_value(city, "Oslo").unwrap();

    let result = engine.submit(form).unwrap();
    let errors = result.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].field_id, name);
    assert_eq!(errors[0].field_name, "name");
    assert_eq!(errors[0].message, "Name is required.");
    assert_eq!(errors[1].field_id, zip);
    assert_eq!(result.first_invalid_field(), Some(name));
}

#[test]
fn test_submit_valid_form() {
    let (mut engine, form) = setup();
    let id = field(&mut engine, form, "Name", FieldConfig::new().required(true));
    engine.set_value(id, "Ada").unwrap();

    assert!(engine.submit(form).unwrap().is_valid());
}

#[test]
fn test_reset_restores_and_forgets_required_failure() {
    let clock = ManualClock::new();
    let mut engine: Engine = Engine::with_clock(EngineConfig::default(), Arc::new(clock.clone()));
    let form = engine.create_form();
    let id = engine
        .register(
            form,
            TextField::new("name").with_label("Name").with_value("initial"),
            FieldConfig::new().required(true),
        )
        .unwrap()
        .id;

    engine.set_value(id, "").unwrap();
    engine.submit(form).unwrap();
    assert_eq!(messages(&engine, id), vec!["Name is required."]);

    engine.reset(form).unwrap();
    assert_eq!(engine.value(id).unwrap(), "initial");
    assert!(messages(&engine, id).is_empty());
    assert!(engine.snapshot(id).unwrap().failed_required_once);

    engine.tick();
    assert!(!engine.snapshot(id).unwrap().failed_required_once);

    // No longer sticky: clearing and leaving the field stays quiet
    engine.set_value(id, "").unwrap();
    assert!(messages(&engine, id).is_empty());
}

#[test]
fn test_unknown_ids_are_errors() {
    let (mut engine, _) = setup();
    let (mut other, other_form) = setup();
    let stray = other
        .register(other_form, TextField::new("stray"), FieldConfig::new())
        .unwrap()
        .id;

    assert!(engine.value(stray).is_err());
    assert!(engine.submit(other_form).is_err());
    assert!(engine.set_value(stray, "x").is_err());
}
