//! Accumulator for the response body of one call.

use std::io::{self, Write};

/// Growable byte buffer that collects body chunks in arrival order.
///
/// Lives for exactly one `Fetch::send_with` call. As a `Write` sink it always
/// consumes the whole chunk, so a transport never sees a short write.
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    bytes: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Write for ResponseBuffer {
    fn write(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(chunk);
        Ok(chunk.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_reports_full_chunk_length() {
        let mut buf = ResponseBuffer::new();
        assert_eq!(buf.write(b"{\"a\"").unwrap(), 4);
        assert_eq!(buf.write(b"").unwrap(), 0);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn chunks_are_kept_in_arrival_order() {
        let mut buf = ResponseBuffer::new();
        for chunk in [&b"[1,"[..], b"2,", b"3]"] {
            buf.write_all(chunk).unwrap();
        }
        assert_eq!(buf.as_bytes(), b"[1,2,3]");
    }

    #[test]
    fn starts_empty() {
        assert!(ResponseBuffer::new().is_empty());
    }
}
