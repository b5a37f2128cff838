//! Copying results to the system clipboard.

use arboard::Clipboard;
use tracing::debug;

use crate::error::{Error, Result};

/// Put a result string on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| Error::Clipboard(format!("Failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(text.to_string())
        .map_err(|e| Error::Clipboard(format!("Failed to copy to clipboard: {}", e)))?;

    debug!(text, "copied to clipboard");
    Ok(())
}
