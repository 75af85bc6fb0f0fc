//! Clipboard integration.

use crate::error::Result;
use crate::plots::Figure;
use arboard::Clipboard;

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Copy the data behind a figure as tab-separated text.
pub fn copy_figure_data(figure: &Figure) -> Result<()> {
    let text = figure.to_tsv();
    tracing::debug!("Copying {} bytes of {} data", text.len(), figure.kind());
    copy_to_clipboard(&text)
}
