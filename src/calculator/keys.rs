//! Keypad input events and their textual names.
//!
//! The terminal front end reads lines such as `12 + 3 =` or `90 sin` and
//! turns them into the same key presses a button grid would produce.

use lazy_static::lazy_static;
use regex::Regex;

use super::engine::{Operator, TrigFunction};
use super::error::CalcError;

/// A single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Dot,
    Operator(Operator),
    Equals,
    AllClear,
    Delete,
    ToggleSign,
    Trig(TrigFunction),
    ToggleAngle,
}

lazy_static! {
    /// Splits a line into key tokens.
    /// Number runs, words, the `+/-` key, then any other single character.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"\+/-|[0-9.]+|[A-Za-z]+|\S"
    ).unwrap();
}

/// Parse a line of key tokens into key presses.
///
/// Runs of digits and dots expand into one key per character, so `12.5`
/// yields four presses. Whitespace between tokens is optional.
pub fn parse_keys(line: &str) -> Result<Vec<Key>, CalcError> {
    let mut keys = Vec::new();

    for token in KEY_TOKEN.find_iter(line).map(|m| m.as_str()) {
        if is_number_run(token) {
            keys.extend(token.chars().map(|c| match c {
                '.' => Key::Dot,
                digit => Key::Digit(digit),
            }));
        } else {
            keys.push(parse_key(token)?);
        }
    }

    Ok(keys)
}

/// Parse one named key token.
pub fn parse_key(token: &str) -> Result<Key, CalcError> {
    let key = match token.to_lowercase().as_str() {
        "." => Key::Dot,
        "+" => Key::Operator(Operator::Add),
        "-" | "−" => Key::Operator(Operator::Subtract),
        "*" | "x" | "×" => Key::Operator(Operator::Multiply),
        "/" | "÷" => Key::Operator(Operator::Divide),
        "=" => Key::Equals,
        "ac" | "c" => Key::AllClear,
        "del" | "back" => Key::Delete,
        "neg" | "+/-" | "±" => Key::ToggleSign,
        "sin" => Key::Trig(TrigFunction::Sine),
        "cos" => Key::Trig(TrigFunction::Cosine),
        "tan" => Key::Trig(TrigFunction::Tangent),
        "mode" | "deg" | "rad" => Key::ToggleAngle,
        single if single.len() == 1 && single.as_bytes()[0].is_ascii_digit() => {
            Key::Digit(single.as_bytes()[0] as char)
        }
        _ => return Err(CalcError::UnknownKey(token.to_string())),
    };
    Ok(key)
}

fn is_number_run(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}
