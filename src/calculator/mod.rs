//! Calculator engine and its supporting pieces.
//!
//! This module provides:
//! - The keypad-driven [`Engine`] state machine
//! - Number and operator formatting for its display
//! - Snapshots for saving and restoring engine state
//! - Key parsing for the terminal front end
//! - Copying results to the clipboard

mod clipboard;
mod engine;
mod error;
mod format;
mod keys;
mod state;

pub use clipboard::copy_to_clipboard;
pub use engine::{AngleUnit, Engine, Operator, TrigFunction};
pub use error::CalcError;
pub use format::{format_number, operator_symbol};
pub use keys::{Key, parse_key, parse_keys};
pub use state::EngineState;
