use fieldmask::{AcceptRule, Mask, Selection};

fn digits() -> AcceptRule {
    AcceptRule::new(r"\d").unwrap()
}

fn telephone() -> Mask {
    Mask::new("(___) ___-____", "_")
}

#[test]
fn test_typing_at_end_lands_after_new_digit() {
    // "(555" + "1", caret after the typed digit
    let pos = telephone().map_offset("(5551", 5, &digits(), false);
    assert_eq!(pos, 7);
}

#[test]
fn test_mid_string_insert_keeps_caret_next_to_digit() {
    let pos = telephone().map_offset("(9555) 123-4567", 2, &digits(), false);
    assert_eq!(pos, 2);
}

#[test]
fn test_offset_past_all_slots_snaps_to_last_boundary() {
    let pos = telephone().map_offset("(555) 123-4567", 14, &digits(), false);
    assert_eq!(pos, 14);
}

#[test]
fn test_backspace_snaps_to_previous_slot_boundary() {
    // "(555) 1" with the "1" deleted
    let pos = telephone().map_offset("(555) ", 6, &digits(), true);
    assert_eq!(pos, 4);
}

#[test]
fn test_backspace_clamps_to_first_slot() {
    let pos = telephone().map_offset("(", 1, &digits(), true);
    assert_eq!(pos, 1);
}

#[test]
fn test_map_selection_maps_both_ends() {
    let selection = telephone().map_selection(
        "(555) 123-4567",
        Selection::new(1, 14),
        &digits(),
        false,
    );
    assert_eq!(selection, Selection::new(1, 14));
}
