//! Theme preference.
//!
//! A single dark/light switch stored as `prefs.toml` in the data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::storage::{read_optional, write_atomic};

const PREFS_FILE: &str = "prefs.toml";

/// Display theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Style the main display value for a terminal with this background.
    pub fn paint_result(self, text: &str) -> String {
        match self {
            Self::Dark => format!("\x1b[1;97m{}\x1b[0m", text),
            Self::Light => format!("\x1b[1;30m{}\x1b[0m", text),
        }
    }

    /// Style the secondary expression line.
    pub fn paint_expression(self, text: &str) -> String {
        match self {
            Self::Dark => format!("\x1b[37m{}\x1b[0m", text),
            Self::Light => format!("\x1b[90m{}\x1b[0m", text),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    dark_mode: bool,
}

/// Reads and writes the theme preference.
#[derive(Clone, Debug)]
pub struct ThemePrefs {
    path: PathBuf,
}

impl ThemePrefs {
    /// Preferences at `<data_dir>/prefs.toml`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PREFS_FILE),
        }
    }

    /// The saved theme. Missing or unreadable preferences mean light.
    pub fn theme(&self) -> Theme {
        match self.load() {
            Ok(prefs) if prefs.dark_mode => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable preferences");
                Theme::Light
            }
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme().is_dark()
    }

    /// Save the dark mode switch.
    pub fn set_dark(&self, dark: bool) -> Result<()> {
        let prefs = PrefsFile { dark_mode: dark };
        write_atomic(&self.path, toml::to_string(&prefs)?.as_bytes())?;
        info!(dark, "theme preference saved");
        Ok(())
    }

    /// Flip the saved theme and return the new one.
    pub fn toggle(&self) -> Result<Theme> {
        let theme = self.theme().toggled();
        self.set_dark(theme.is_dark())?;
        Ok(theme)
    }

    fn load(&self) -> Result<PrefsFile> {
        match read_optional(&self.path)? {
            Some(raw) => Ok(toml::from_str(&raw)?),
            None => Ok(PrefsFile::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_is_light() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = ThemePrefs::in_dir(dir.path());
        assert_eq!(prefs.theme(), Theme::Light);
        assert!(!prefs.is_dark());
    }

    #[test]
    fn test_set_and_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = ThemePrefs::in_dir(dir.path());

        prefs.set_dark(true).unwrap();
        assert!(ThemePrefs::in_dir(dir.path()).is_dark());

        assert_eq!(prefs.toggle().unwrap(), Theme::Light);
        assert_eq!(prefs.toggle().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_file_is_light() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PREFS_FILE), "dark_mode = maybe").unwrap();
        assert_eq!(ThemePrefs::in_dir(dir.path()).theme(), Theme::Light);
    }

    #[test]
    fn test_paint_wraps_text() {
        let painted = Theme::Dark.paint_result("42");
        assert!(painted.contains("42"));
        assert!(painted.ends_with("\x1b[0m"));
    }
}
