use crate::error::ClipboardError;

/// Single text blob shared with other programs.
pub trait Clipboard {
    fn read(&mut self) -> Result<String, ClipboardError>;
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. The handle is opened lazily and dropped after a
/// failure so a clipboard that shows up later still gets used.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => arboard::Clipboard::new()?,
        };
        Ok(self.handle.insert(handle))
    }
}

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        let result = self.handle()?.get_text();
        match result {
            Ok(text) if text.is_empty() => Err(ClipboardError::Empty),
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(err) => {
                self.handle = None;
                Err(err.into())
            }
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let result = self.handle()?.set_text(text);
        result.map_err(|err| {
            self.handle = None;
            err.into()
        })
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.handle.is_some())
            .finish()
    }
}

/// Clipboard kept in memory, for tests and for sessions without a desktop.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub text: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        self.text.clone().ok_or(ClipboardError::Empty)
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_owned());
        Ok(())
    }
}
