use fieldmask::{AcceptRule, FormatOptions, Mask};

fn digits() -> AcceptRule {
    AcceptRule::new(r"\d").unwrap()
}

fn credit_card() -> Mask {
    Mask::new(".... .... .... ....", ".")
}

fn telephone() -> Mask {
    Mask::new("(___) ___-____", "_")
}

const HIDE_DOTS: FormatOptions = FormatOptions {
    show_full_mask: false,
    hide_dot_slots: true,
};

const FULL_MASK: FormatOptions = FormatOptions {
    show_full_mask: true,
    hide_dot_slots: true,
};

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn test_credit_card_complete() {
    let value = credit_card().format("4111111111111111", &digits(), HIDE_DOTS);
    assert_eq!(value.masked, "4111 1111 1111 1111");
    assert_eq!(value.unmasked, "4111111111111111");
    assert_eq!(value.full, value.masked);
    assert_eq!(value.partial, value.masked);
}

#[test]
fn test_credit_card_partial_hides_dot_slots() {
    let value = credit_card().format("41111", &digits(), HIDE_DOTS);
    assert_eq!(value.masked, "4111 1");
    assert_eq!(value.partial, "4111 1");
    assert_eq!(value.full, "4111 1");
    assert_eq!(value.unmasked, "41111");
}

#[test]
fn test_dot_slots_kept_when_not_hidden() {
    let options = FormatOptions {
        show_full_mask: true,
        hide_dot_slots: false,
    };
    let value = credit_card().format("41", &digits(), options);
    assert_eq!(value.masked, "41.. .... .... ....");
}

#[test]
fn test_telephone_full_mask_while_typing() {
    let value = telephone().format("555", &digits(), FULL_MASK);
    assert_eq!(value.masked, "(555) ___-____");
    assert_eq!(value.partial, "(555)");
    assert_eq!(value.unmasked, "555");
}

#[test]
fn test_telephone_progressive_reveal() {
    let mask = telephone();
    let accept = digits();
    assert_eq!(mask.format("", &accept, HIDE_DOTS).masked, "(");
    assert_eq!(mask.format("5", &accept, HIDE_DOTS).masked, "(5");
    assert_eq!(mask.format("5551", &accept, HIDE_DOTS).masked, "(555) 1");
    assert_eq!(
        mask.format("5551234567", &accept, HIDE_DOTS).masked,
        "(555) 123-4567"
    );
}

#[test]
fn test_unaccepted_characters_are_dropped() {
    let value = telephone().format("5a5b5-12", &digits(), HIDE_DOTS);
    assert_eq!(value.unmasked, "55512");
    assert_eq!(value.masked, "(555) 12");
}

#[test]
fn test_unmasked_truncated_to_slot_count() {
    let mask = telephone();
    let value = mask.format("55512345678999", &digits(), HIDE_DOTS);
    assert_eq!(value.unmasked, "5551234567");
    assert_eq!(value.unmasked.len(), mask.slot_count());
}

#[test]
fn test_formatting_is_idempotent() {
    let accept = digits();
    let cases = [
        (credit_card(), "4111111111111111", HIDE_DOTS),
        (credit_card(), "4111 11", HIDE_DOTS),
        (telephone(), "5551234567", HIDE_DOTS),
        (telephone(), "55512", HIDE_DOTS),
        (telephone(), "555", FULL_MASK),
    ];
    for (mask, input, options) in cases {
        let once = mask.format(input, &accept, options);
        let twice = mask.format(&once.masked, &accept, options);
        assert_eq!(once, twice, "input {input:?}");
    }
}

#[test]
fn test_default_rule_accepts_word_characters() {
    let mask = Mask::new("___-___", "_");
    let value = mask.format("ab12cd", &AcceptRule::fallback(), HIDE_DOTS);
    assert_eq!(value.masked, "ab1-2cd");
    assert_eq!(value.unmasked, "ab12cd");
}

// ============================================================================
// Skeleton detection
// ============================================================================

#[test]
fn test_empty_render_is_skeleton() {
    let mask = telephone();
    let value = mask.format("", &digits(), FULL_MASK);
    assert_eq!(value.masked, "(___) ___-____");
    assert!(mask.is_skeleton_prefix(&value.masked));
    assert!(mask.is_skeleton_prefix("("));
    assert!(!mask.is_skeleton_prefix("(555) ___-____"));
}
