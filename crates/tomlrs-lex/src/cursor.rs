//! Byte cursor for traversing TOML source.
//!
//! Adapted from `faxc_lex::cursor::Cursor`: same snapshot/restore and
//! line/column bookkeeping, but byte-oriented rather than `char`-oriented.
//! Spec §4.1 works over raw bytes throughout (control-byte checks, UTF-8
//! escape encoding, etc.), and spec §9 "Lookahead by rewind" calls for a
//! seekable byte stream rather than a `char` iterator, so the teacher's
//! UTF-8-decoding `char_at`/`advance` pair is replaced with byte-level
//! `current_byte`/`advance`. Column numbers are 1-based *byte* columns,
//! matching the teacher's own documented convention for `Lexer::column`.

/// A cursor over a byte slice that tracks line and column as it advances.
pub struct Cursor<'a> {
    source: &'a [u8],
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte at the cursor, or `None` at end of input.
    #[inline]
    pub fn current_byte(&self) -> Option<u8> {
        self.peek_byte(0)
    }

    /// Byte `offset` positions ahead of the cursor, or `None` past the end.
    #[inline]
    pub fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.get(self.position + offset).copied()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Advances past the current byte. No-op at end of input.
    #[inline]
    pub fn advance(&mut self) {
        let Some(b) = self.current_byte() else {
            return;
        };
        self.position += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    /// Consumes and returns `true` if the current byte equals `expected`.
    pub fn match_byte(&mut self, expected: u8) -> bool {
        if self.current_byte() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.source[start..self.position]
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.source[self.position..]
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Saves the cursor state so it can be restored after bounded
    /// lookahead — spec §9 "Lookahead by rewind".
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    pub position: usize,
    pub line: u32,
    pub column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_and_tracks_line_column() {
        let mut c = Cursor::new(b"ab\ncd");
        assert_eq!(c.current_byte(), Some(b'a'));
        c.advance();
        assert_eq!((c.line(), c.column()), (1, 2));
        c.advance(); // consume 'b'
        c.advance(); // consume '\n'
        assert_eq!((c.line(), c.column()), (2, 1));
        assert_eq!(c.current_byte(), Some(b'c'));
    }

    #[test]
    fn snapshot_restore_roundtrips() {
        let mut c = Cursor::new(b"hello world");
        let snap = c.snapshot();
        c.advance_n(6);
        assert_eq!(c.current_byte(), Some(b'w'));
        c.restore(snap);
        assert_eq!(c.current_byte(), Some(b'h'));
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn peek_past_end_is_none() {
        let c = Cursor::new(b"a");
        assert_eq!(c.peek_byte(5), None);
    }

    #[test]
    fn slice_from_and_remaining() {
        let mut c = Cursor::new(b"key = 1");
        let start = c.position();
        c.advance_n(3);
        assert_eq!(c.slice_from(start), b"key");
        assert_eq!(c.remaining(), b" = 1");
    }
}
