use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub const HIDE: &str = "\x1b[?25l";
pub const SHOW: &str = "\x1b[?25h";
pub const ERASE: &str = "\x1b[2K\r";

/// In-memory sink that stays readable while a spinner owns a clone of it.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Lines written after each erase-line sequence.
    pub fn frames(&self) -> Vec<String> {
        self.contents()
            .split(ERASE)
            .skip(1)
            .map(|chunk| {
                chunk
                    .split(['\n', '\x1b'])
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Formats a line the way the spinner does for the given label and detail.
pub fn line(label: &str, frame: &str, detail: &str) -> String {
    format!("{label:<15} {frame} {detail}")
}
