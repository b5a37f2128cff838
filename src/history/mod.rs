//! Recent calculation history.
//!
//! Each successful equals press is recorded as an expression/result pair,
//! newest first, in a bounded JSON file.

mod store;

pub use store::{HistoryItem, HistoryStore};
