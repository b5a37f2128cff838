//! Saved engine session.
//!
//! The terminal front end saves an [`EngineState`] when it exits and restores
//! it on the next start, so an unfinished calculation picks up where it was.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::calculator::EngineState;
use crate::error::Result;
use crate::storage::{read_optional, remove_if_exists, write_atomic};

const SESSION_FILE: &str = "session.json";

/// Engine snapshot kept as `session.json` in the data directory.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at `<data_dir>/session.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, replacing any earlier one.
    pub fn save(&self, state: &EngineState) -> Result<()> {
        let json = serde_json::to_vec_pretty(state)?;
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// The saved state, if there is a readable one.
    ///
    /// A corrupt session file is logged and ignored.
    pub fn load(&self) -> Result<Option<EngineState>> {
        let Some(raw) = read_optional(&self.path)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(state) => {
                info!(path = %self.path.display(), "session restored");
                Ok(Some(state))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    /// Forget the saved session.
    pub fn discard(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        Ok(())
    }
}
