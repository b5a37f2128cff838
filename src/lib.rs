//! A keypad calculator: a left-to-right arithmetic engine with trig keys,
//! plus the history, theme and session plumbing of a small desktop app.

pub mod app;
pub mod calculator;
pub mod config;
pub mod error;
pub mod history;
pub mod prefs;
pub mod session;
mod storage;

pub use app::{Calculator, Feedback};
pub use config::Config;
pub use error::{Error, Result};
