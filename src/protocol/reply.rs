// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-size transmit buffer for console replies.

use core::fmt;

/// The reply does not fit in the transmit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyOverflow;

/// Transmit buffer, cleared before each reply.
///
/// Writes are all-or-nothing: a write that does not fit leaves the buffer unchanged.
pub struct ReplyBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> ReplyBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop everything after the first `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), ReplyOverflow> {
        let end = self.len + bytes.len();
        if end > N {
            return Err(ReplyOverflow);
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    #[inline]
    pub fn push_str(&mut self, s: &str) -> Result<(), ReplyOverflow> {
        self.push_bytes(s.as_bytes())
    }

    /// Append a signed decimal integer.
    pub fn push_int(&mut self, n: i32) -> Result<(), ReplyOverflow> {
        let mut fmt = itoa::Buffer::new();
        self.push_str(fmt.format(n))
    }
}

impl<const N: usize> Default for ReplyBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for ReplyBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn accumulates_until_cleared() {
        let mut buf = ReplyBuffer::<16>::new();
        buf.push_str("Set OK").unwrap();
        buf.push_str("\n").unwrap();
        assert_eq!(buf.as_bytes(), b"Set OK\n");
        buf.clear();
        assert!(buf.is_empty());
        buf.push_str("OK\n").unwrap();
        assert_eq!(buf.as_bytes(), b"OK\n");
    }

    #[test]
    fn formats_signed_integers() {
        let mut buf = ReplyBuffer::<16>::new();
        buf.push_int(-1).unwrap();
        buf.push_str(",").unwrap();
        buf.push_int(1500).unwrap();
        assert_eq!(buf.as_bytes(), b"-1,1500");
    }

    #[test]
    fn overflow_leaves_contents_intact() {
        let mut buf = ReplyBuffer::<4>::new();
        buf.push_str("ab").unwrap();
        assert_eq!(buf.push_str("cde"), Err(ReplyOverflow));
        assert_eq!(buf.as_bytes(), b"ab");
        assert_eq!(buf.push_int(12345), Err(ReplyOverflow));
        buf.push_str("cd").unwrap();
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn truncate_only_shrinks() {
        let mut buf = ReplyBuffer::<8>::new();
        buf.push_str("abcdef").unwrap();
        buf.truncate(3);
        assert_eq!(buf.as_bytes(), b"abc");
        buf.truncate(10);
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn supports_write_macro() {
        let mut buf = ReplyBuffer::<16>::new();
        writeln!(buf, "{} : {}", 0, "TIM4_CH1").unwrap();
        assert_eq!(buf.as_bytes(), b"0 : TIM4_CH1\n");
    }
}
