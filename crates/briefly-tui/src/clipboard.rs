//! System clipboard access.
//!
//! The handle is opened lazily and kept for the life of the app: on X11 the
//! copied text is served by the owning process, so dropping the clipboard
//! right after `set_text` can lose it.

use anyhow::{Context, Result};
use arboard::Clipboard;

#[derive(Default)]
pub struct ClipboardHandle {
    inner: Option<Clipboard>,
    /// Stands in for the system clipboard in tests.
    #[cfg(test)]
    memory: Option<String>,
}

impl ClipboardHandle {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        Self {
            inner: None,
            memory: Some(String::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn contents(&self) -> Option<&str> {
        self.memory.as_deref()
    }

    fn clipboard(&mut self) -> Result<&mut Clipboard> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().context("Clipboard unavailable")?);
        }
        self.inner.as_mut().context("Clipboard unavailable")
    }

    pub fn copy(&mut self, text: &str) -> Result<()> {
        #[cfg(test)]
        if let Some(memory) = self.memory.as_mut() {
            *memory = text.to_owned();
            return Ok(());
        }
        self.clipboard()?
            .set_text(text.to_owned())
            .context("Failed to write clipboard")
    }

    pub fn paste(&mut self) -> Result<String> {
        #[cfg(test)]
        if let Some(memory) = &self.memory {
            return Ok(memory.clone());
        }
        self.clipboard()?
            .get_text()
            .context("Failed to read clipboard")
    }
}
