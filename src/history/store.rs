//! JSON-backed history store.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::error::Result;
use crate::storage::{read_optional, remove_if_exists, write_atomic};

const HISTORY_FILE: &str = "history.json";

/// One recorded calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// The expression line just before equals was pressed.
    #[serde(default)]
    pub expression: String,
    /// The display value right after equals.
    #[serde(default)]
    pub result: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default = "now_millis")]
    pub ts: u64,
}

impl HistoryItem {
    /// Create an item stamped with the current time.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            ts: now_millis(),
        }
    }

    /// Whether two items record the same calculation, ignoring when.
    fn same_calculation(&self, other: &Self) -> bool {
        self.expression == other.expression && self.result == other.result
    }
}

impl std::fmt::Display for HistoryItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Bounded, newest-first list of recent calculations kept in a JSON file.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    path: PathBuf,
    max_items: usize,
}

impl HistoryStore {
    /// Store at `<data_dir>/history.json` with the default limit.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HISTORY_FILE), DEFAULT_HISTORY_LIMIT)
    }

    /// Store at an explicit path keeping at most `max_items` entries.
    pub fn new(path: PathBuf, max_items: usize) -> Self {
        Self { path, max_items }
    }

    /// Change the number of entries kept. Takes effect on the next add.
    pub fn with_limit(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Location of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a calculation at the front of the list.
    ///
    /// Returns `false` without writing when the item repeats the newest
    /// entry. The oldest entries beyond the limit are dropped.
    pub fn add(&self, item: HistoryItem) -> Result<bool> {
        let mut items = self.get()?;

        if items.first().is_some_and(|first| first.same_calculation(&item)) {
            debug!(%item, "skipping duplicate history entry");
            return Ok(false);
        }

        items.insert(0, item);
        items.truncate(self.max_items);
        self.save(&items)?;
        Ok(true)
    }

    /// All entries, newest first.
    ///
    /// A missing file is an empty history. So is a corrupt one, which is
    /// logged and left for the next write to replace.
    pub fn get(&self) -> Result<Vec<HistoryItem>> {
        let Some(raw) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt history file");
                Ok(Vec::new())
            }
        }
    }

    /// Entry `index` (zero-based, newest first).
    pub fn nth(&self, index: usize) -> Result<Option<HistoryItem>> {
        Ok(self.get()?.into_iter().nth(index))
    }

    /// Delete all entries.
    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        info!(path = %self.path.display(), "history cleared");
        Ok(())
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        let json = serde_json::to_vec_pretty(items)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}
