//! Non-consuming access to an upload stream.
//!
//! The stream is shared by every validation step and later by the storage upload, so
//! each step must leave it at position zero whether it succeeds or not.

use std::io::{self, Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

/// Seeks the wrapped stream back to the start when dropped.
pub struct RewindGuard<'a, S: Seek> {
    inner: &'a mut S,
}

impl<'a, S: Seek> RewindGuard<'a, S> {
    pub fn new(inner: &'a mut S) -> Self {
        Self { inner }
    }
}

impl<S: Seek> Deref for RewindGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.inner
    }
}

impl<S: Seek> DerefMut for RewindGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.inner
    }
}

impl<S: Seek> Drop for RewindGuard<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.inner.seek(SeekFrom::Start(0)) {
            tracing::warn!(error = %e, "Failed to rewind upload stream");
        }
    }
}

/// Total length of the stream, found by seeking to the end. Reads no bytes.
pub fn measure_len<S: Seek>(stream: &mut S) -> io::Result<u64> {
    let mut guard = RewindGuard::new(stream);
    guard.seek(SeekFrom::End(0))
}

/// Read up to `window` bytes from the start of the stream.
pub fn read_header<S: Read + Seek>(stream: &mut S, window: usize) -> io::Result<Vec<u8>> {
    let mut guard = RewindGuard::new(stream);
    guard.seek(SeekFrom::Start(0))?;

    let mut header = Vec::with_capacity(window);
    guard.deref_mut().take(window as u64).read_to_end(&mut header)?;
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_measure_len_restores_position() {
        let mut cursor = Cursor::new(vec![7u8; 1000]);
        cursor.set_position(123);
        assert_eq!(measure_len(&mut cursor).unwrap(), 1000);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_header_window() {
        let data: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
        let mut cursor = Cursor::new(data.clone());
        let header = read_header(&mut cursor, 512).unwrap();
        assert_eq!(header, data[..512]);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_header_short_stream() {
        let mut cursor = Cursor::new(b"GIF89a".to_vec());
        cursor.set_position(4);
        let header = read_header(&mut cursor, 512).unwrap();
        assert_eq!(header, b"GIF89a");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_guard_rewinds_on_early_return() {
        fn consume_then_fail(cursor: &mut Cursor<Vec<u8>>) -> io::Result<()> {
            let mut guard = RewindGuard::new(cursor);
            let mut buf = [0u8; 8];
            guard.read_exact(&mut buf)?;
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad header"))
        }

        let mut cursor = Cursor::new(vec![1u8; 64]);
        assert!(consume_then_fail(&mut cursor).is_err());
        assert_eq!(cursor.position(), 0);
    }
}
