use std::fmt;

/// A byte accumulator with a hard capacity.
///
/// `capacity` counts the terminator a C-style consumer needs, so at most
/// `capacity - 1` bytes of text are kept. Writes past that are cut short
/// silently; `truncated()` records that it happened.
#[derive(Debug, Clone)]
pub struct Bounded {
    buf: Vec<u8>,
    limit: usize,
    truncated: bool,
}

impl Bounded {
    pub fn new(capacity: usize) -> Self {
        Bounded {
            buf: Vec::new(),
            limit: capacity.saturating_sub(1),
            truncated: false,
        }
    }

    /// Append as much of `bytes` as fits.
    pub fn push(&mut self, bytes: &[u8]) {
        let room = self.remaining();
        if bytes.len() > room {
            self.truncated = true;
        }
        let n = bytes.len().min(room);
        self.buf.extend_from_slice(&bytes[..n]);
    }

    pub fn push_str(&mut self, s: &str) {
        self.push(s.as_bytes());
    }

    pub fn push_byte(&mut self, b: u8) {
        self.push(&[b]);
    }

    /// Text bytes that can still be appended.
    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Copy the text into `dst` followed by a NUL terminator, cutting the
    /// text if `dst` is smaller. Returns the number of text bytes copied.
    /// An empty `dst` is left untouched.
    pub fn copy_to(&self, dst: &mut [u8]) -> usize {
        if dst.is_empty() {
            return 0;
        }
        let n = self.buf.len().min(dst.len() - 1);
        dst[..n].copy_from_slice(&self.buf[..n]);
        dst[n] = 0;
        n
    }
}

impl fmt::Write for Bounded {
    /// Never fails: overflow is truncation, not an error.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn keeps_room_for_terminator() {
        let mut out = Bounded::new(4);
        out.push_str("abcdef");
        assert_eq!(out.as_bytes(), b"abc");
        assert_eq!(out.len(), 3);
        assert!(out.truncated());
        assert_eq!(out.remaining(), 0);
    }

    #[test]
    fn zero_and_one_capacity_hold_nothing() {
        for cap in [0, 1] {
            let mut out = Bounded::new(cap);
            out.push_byte(b'x');
            assert!(out.is_empty());
            assert!(out.truncated());
        }
    }

    #[test]
    fn fits_exactly_without_truncation() {
        let mut out = Bounded::new(3);
        write!(out, "{}", 42).unwrap();
        assert_eq!(out.as_bytes(), b"42");
        assert!(!out.truncated());
        assert_eq!(out.into_bytes(), b"42".to_vec());
    }

    #[test]
    fn copy_to_terminates() {
        let mut out = Bounded::new(16);
        out.push_str("hello");
        let mut dst = [0xffu8; 8];
        assert_eq!(out.copy_to(&mut dst), 5);
        assert_eq!(&dst[..6], b"hello\0");

        let mut small = [0xffu8; 3];
        assert_eq!(out.copy_to(&mut small), 2);
        assert_eq!(&small, b"he\0");

        let mut empty: [u8; 0] = [];
        assert_eq!(out.copy_to(&mut empty), 0);
    }
}
