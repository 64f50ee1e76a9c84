use crate::error::{LocvizError, Result};

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LocvizError::Other(format!("clipboard: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| LocvizError::Other(format!("clipboard: {e}")))
}
