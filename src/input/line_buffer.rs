//! Buffer that turns raw stdin reads into complete lines

use log::trace;
use std::io::{self, Read};

/// Whether the input source can still produce data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    /// Drained for now, more may arrive later
    Open,
    /// End of input reached
    Closed,
}

/// Size of each read; at least std's stdin buffer so reads bypass it
const READ_CHUNK: usize = 8192;

/// Accumulates bytes from stdin until a newline arrives
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    /// Create a new empty line buffer
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append raw bytes read from stdin
    pub fn write(&mut self, bytes: &[u8]) {
        trace!("Line buffer received {} bytes", bytes.len());
        self.buffer.extend_from_slice(bytes);
    }

    /// Read everything `reader` has available right now
    ///
    /// Keeps reading until the reader reports `WouldBlock` (non-blocking
    /// source drained) or end of input. A readiness notification is only
    /// delivered once, so stopping earlier would strand buffered input.
    pub fn fill_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<InputStatus> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => return Ok(InputStatus::Closed),
                Ok(n) => self.write(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(InputStatus::Open),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Take the next complete line, without its line terminator
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn next_line(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Take whatever is left, used when stdin closes without a final newline
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Get buffer length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
