//! # Clipboard register
//!
//! The register always keeps its own copy of the last copied text. When the `clipboard` feature
//! is enabled and a system clipboard is available, copies are mirrored to it and pastes prefer
//! its contents.
use crate::errors::FilterResult;

#[cfg(feature = "clipboard")]
use crate::errors::FilterError;

/// Storage for text moved by copy, cut and paste.
#[derive(Default)]
pub struct ClipboardRegister {
    text: String,

    #[cfg(feature = "clipboard")]
    system: Option<arboard::Clipboard>,
}

impl ClipboardRegister {
    /// Create a register that only uses its internal storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a register backed by the system clipboard, when one is available.
    #[cfg(feature = "clipboard")]
    pub fn system() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!(error = %e, "system clipboard unavailable");
                None
            },
        };

        ClipboardRegister { text: String::new(), system }
    }

    /// Store `text` in the register.
    pub fn set(&mut self, text: &str) -> FilterResult<()> {
        self.text = text.to_string();

        #[cfg(feature = "clipboard")]
        if let Some(clipboard) = self.system.as_mut() {
            clipboard
                .set_text(text.to_string())
                .map_err(|e| FilterError::Clipboard(e.to_string()))?;
        }

        Ok(())
    }

    /// Fetch the register's contents.
    pub fn get(&mut self) -> FilterResult<String> {
        #[cfg(feature = "clipboard")]
        if let Some(clipboard) = self.system.as_mut() {
            return clipboard.get_text().map_err(|e| FilterError::Clipboard(e.to_string()));
        }

        Ok(self.text.clone())
    }
}

impl std::fmt::Debug for ClipboardRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardRegister").field("text", &self.text).finish_non_exhaustive()
    }
}
