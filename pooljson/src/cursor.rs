// SPDX-License-Identifier: Apache-2.0

/// Forward-only cursor over an in-memory JSON document.
///
/// The parser peeks one byte ahead and consumes explicitly; there is no
/// seek-back. Keyword matching therefore compares lookahead before
/// consuming anything.
#[derive(Debug)]
pub(crate) struct SliceCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset from the start of the document.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The next byte, without consuming it. `None` at end of input.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consumes the byte last returned by [`SliceCursor::peek`].
    pub fn bump(&mut self) {
        self.pos = self.pos.saturating_add(1);
    }

    /// Consumes and returns the next byte. `None` at end of input.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.bump();
        Some(byte)
    }

    /// Whether the unconsumed input begins with `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.data
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(prefix))
    }

    /// Consumes `count` bytes.
    pub fn advance(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count).min(self.data.len());
    }

    /// A sub-slice of the document, with bounds checking.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a [u8]> {
        self.data.get(start..end)
    }

    /// The whitespace set the token loops skip over.
    pub fn is_space(byte: u8) -> bool {
        matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0C | 0x08)
    }

    /// Skips whitespace; the cursor stops on the first non-space byte or at
    /// end of input.
    pub fn skip_space(&mut self) {
        while self.peek().is_some_and(Self::is_space) {
            self.bump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut cur = SliceCursor::new(b"ab");
        assert_eq!(cur.peek(), Some(b'a'));
        assert_eq!(cur.peek(), Some(b'a'));
        cur.bump();
        assert_eq!(cur.peek(), Some(b'b'));
        assert_eq!(cur.next_byte(), Some(b'b'));
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.next_byte(), None);
    }

    #[test]
    fn starts_with_checks_lookahead_only() {
        let mut cur = SliceCursor::new(b"null,");
        assert!(cur.starts_with(b"null"));
        assert!(!cur.starts_with(b"nulls"));
        cur.advance(4);
        assert_eq!(cur.peek(), Some(b','));
        assert!(!cur.starts_with(b"null"));
    }

    #[test]
    fn advance_clamps_at_end() {
        let mut cur = SliceCursor::new(b"xy");
        cur.advance(10);
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn skip_space_covers_the_whole_set() {
        let mut cur = SliceCursor::new(b" \t\n\r\x0c\x08z");
        cur.skip_space();
        assert_eq!(cur.peek(), Some(b'z'));
        // idempotent on non-space
        cur.skip_space();
        assert_eq!(cur.peek(), Some(b'z'));
    }

    #[test]
    fn slice_bounds_are_checked() {
        let cur = SliceCursor::new(b"0123");
        assert_eq!(cur.slice(1, 3), Some(&b"12"[..]));
        assert_eq!(cur.slice(2, 9), None);
    }
}
