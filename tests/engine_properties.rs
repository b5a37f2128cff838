//! Property-based tests for the calculator engine
//!
//! Random key sequences drive the engine into arbitrary reachable states,
//! then the editing and snapshot invariants are checked from there.

use dfcalc::calculator::{AngleUnit, Engine, EngineState, Key, Operator, TrigFunction};
use proptest::prelude::*;

/// Generate any single key press
fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => (0u32..10).prop_map(|d| Key::Digit(char::from_digit(d, 10).unwrap())),
        1 => Just(Key::Dot),
        1 => prop_oneof![
            Just(Operator::Add),
            Just(Operator::Subtract),
            Just(Operator::Multiply),
            Just(Operator::Divide),
        ]
        .prop_map(Key::Operator),
        1 => Just(Key::Equals),
        1 => Just(Key::AllClear),
        1 => Just(Key::Delete),
        1 => Just(Key::ToggleSign),
        1 => prop_oneof![
            Just(TrigFunction::Sine),
            Just(TrigFunction::Cosine),
            Just(TrigFunction::Tangent),
        ]
        .prop_map(Key::Trig),
        1 => Just(Key::ToggleAngle),
    ]
}

/// Generate a sequence of key presses
fn arb_keys() -> impl Strategy<Value = Vec<Key>> {
    prop::collection::vec(arb_key(), 0..40)
}

/// Generate a starting angle unit
fn arb_angle_unit() -> impl Strategy<Value = AngleUnit> {
    prop_oneof![Just(AngleUnit::Degrees), Just(AngleUnit::Radians)]
}

/// Build an engine by pressing every key; rejected keys leave it unchanged.
fn engine_after(unit: AngleUnit, keys: &[Key]) -> Engine {
    let mut engine = Engine::new(unit);
    for key in keys {
        let _ = engine.press(*key);
    }
    engine
}

proptest! {
    /// Property: typed digits are deleted one per press, and delete on an
    /// empty buffer changes nothing
    #[test]
    fn deletes_empty_typed_digits(digits in "[1-9][0-9]{0,30}") {
        let mut engine = Engine::default();
        digits.chars().for_each(|c| engine.input_digit(c));
        prop_assert_eq!(engine.pending_input(), digits.as_str());

        for _ in 0..digits.len() {
            engine.delete_last();
        }
        prop_assert_eq!(engine.pending_input(), "");

        let before = engine.snapshot();
        engine.delete_last();
        prop_assert_eq!(engine.snapshot(), before);
    }

    /// Property: from any reachable state, deleting as many times as the
    /// buffer has characters empties it
    #[test]
    fn deletes_empty_any_buffer(unit in arb_angle_unit(), keys in arb_keys()) {
        let mut engine = engine_after(unit, &keys);
        let len = engine.pending_input().chars().count();

        for _ in 0..len {
            engine.delete_last();
        }
        prop_assert_eq!(engine.pending_input(), "");
        engine.delete_last();
        prop_assert_eq!(engine.pending_input(), "");
    }

    /// Property: toggling the sign twice restores a non-empty operand
    #[test]
    fn toggle_sign_is_involution(unit in arb_angle_unit(), keys in arb_keys()) {
        let mut engine = engine_after(unit, &keys);
        let original = engine.pending_input().to_string();
        // A lone "-" left by deleting digits toggles to empty
        prop_assume!(!original.is_empty() && original != "-");

        engine.toggle_sign();
        prop_assert_ne!(engine.pending_input(), original.as_str());
        engine.toggle_sign();
        prop_assert_eq!(engine.pending_input(), original.as_str());
    }

    /// Property: restoring a snapshot reproduces the display, and the copy
    /// keeps behaving like the original
    #[test]
    fn snapshot_restore_reproduces_state(
        unit in arb_angle_unit(),
        keys in arb_keys(),
        more in arb_keys(),
    ) {
        let mut engine = engine_after(unit, &keys);
        let mut restored = Engine::default();
        restored.restore(engine.snapshot());

        prop_assert_eq!(restored.expression(), engine.expression());
        prop_assert_eq!(restored.display_value(), engine.display_value());

        for key in more {
            prop_assert_eq!(engine.press(key), restored.press(key));
            prop_assert_eq!(restored.expression(), engine.expression());
            prop_assert_eq!(restored.display_value(), engine.display_value());
        }
    }

    /// Property: a snapshot written to JSON and read back restores the same
    /// display
    #[test]
    fn snapshot_survives_json(unit in arb_angle_unit(), keys in arb_keys()) {
        let engine = engine_after(unit, &keys);
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        let state: EngineState = serde_json::from_str(&json).unwrap();
        let restored = Engine::from(state);

        prop_assert_eq!(restored.expression(), engine.expression());
        prop_assert_eq!(restored.display_value(), engine.display_value());
        prop_assert_eq!(restored.angle_unit(), engine.angle_unit());
    }
}
