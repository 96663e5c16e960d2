//! BOM handling, trivia skipping, and comment lexing.
//!
//! Grounded on `faxc_lex::lexer::comment::skip_whitespace_and_comments`,
//! which checks a UTF-8 BOM once per lexer then loops skipping
//! whitespace/newlines/comments. Spec §4.1 "Preamble" additionally asks
//! for UTF-16 BOM tolerance (`0xFF 0xFE`), which the teacher's
//! `char`-oriented cursor has no use for since it never sees raw bytes.

use tomlrs_util::ErrorKind;

use crate::token::Token;

use super::core::Lexer;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_BOM: [u8; 2] = [0xFF, 0xFE];

impl<'a> Lexer<'a> {
    /// Consumes a recognised BOM at offset 0. If the leading bytes are not
    /// a recognised BOM, the cursor is left untouched (spec §4.1: "if the
    /// bytes present are not a recognised BOM, rewind to offset 0").
    pub(crate) fn consume_bom_once(&mut self) {
        if self.bom_checked {
            return;
        }
        self.bom_checked = true;
        if self.cursor.position() != 0 {
            return;
        }
        if self.cursor.starts_with(&UTF8_BOM) {
            self.cursor.advance_n(3);
        } else if self.cursor.starts_with(&UTF16_BOM) {
            self.cursor.advance_n(2);
        }
    }

    /// Skips spaces, tabs, and (if `allow_newline`) line breaks, plus any
    /// comments encountered along the way — unless `emit_comment_token` is
    /// set, in which case the first comment found is left for the caller
    /// to turn into a `Token::Comment`.
    pub(crate) fn skip_trivia(&mut self, allow_newline: bool) {
        loop {
            match self.cursor.current_byte() {
                Some(b' ') | Some(b'\t') => self.cursor.advance(),
                Some(b'\r') if allow_newline => self.cursor.advance(),
                Some(b'\n') if allow_newline => self.cursor.advance(),
                Some(b'#') => {
                    if self.config.emit_comment_token {
                        return;
                    }
                    self.skip_line_comment();
                }
                _ => return,
            }
        }
    }

    /// Like [`Self::skip_trivia`] but never crosses a newline — used
    /// inside headers, key paths, and inline tables, where a bare newline
    /// is a structural error the caller reports itself.
    pub(crate) fn skip_inline_trivia(&mut self) {
        loop {
            match self.cursor.current_byte() {
                Some(b' ') | Some(b'\t') => self.cursor.advance(),
                Some(b'#') => {
                    if self.config.emit_comment_token {
                        return;
                    }
                    self.skip_line_comment();
                }
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(b) = self.cursor.current_byte() {
            if b == b'\n' {
                break;
            }
            self.cursor.advance();
        }
    }

    /// Reads a single `#`-prefixed comment body up to (excluding) the next
    /// newline, returning a `Token::Comment` only when
    /// `emit_comment_token` is enabled; otherwise discards it and returns
    /// `None` so the caller loops to skip the rest of the trivia.
    pub(crate) fn read_comment(&mut self) -> Option<Token> {
        self.cursor.advance(); // consume '#'
        let start = self.cursor.position();
        let mut had_control_byte = false;
        while let Some(b) = self.cursor.current_byte() {
            if b == b'\n' {
                break;
            }
            if b < 0x20 && b != b'\t' {
                had_control_byte = true;
            }
            self.cursor.advance();
        }
        let body = self.cursor.slice_from(start);
        if had_control_byte {
            return Some(Token::Error(self.error_at(
                ErrorKind::Lexical,
                "forbidden control byte in comment",
            )));
        }
        if self.config.emit_comment_token {
            Some(Token::Comment(String::from_utf8_lossy(body).into_owned()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use tomlrs_util::{Config, Diagnostics};

    use crate::token::Token;

    use super::super::core::Lexer;

    #[test]
    fn skips_utf8_bom() {
        let mut diagnostics = Diagnostics::new(256);
        let mut source = vec![0xEF, 0xBB, 0xBF];
        source.extend_from_slice(b"a = 1\n");
        let mut lexer = Lexer::new(&source, &mut diagnostics, Config::default());
        assert_eq!(lexer.next_token().token, Token::Key("a".to_string()));
    }

    #[test]
    fn plain_comment_is_discarded_by_default() {
        let mut diagnostics = Diagnostics::new(256);
        let mut lexer = Lexer::new(b"# hi\na = 1\n", &mut diagnostics, Config::default());
        assert_eq!(lexer.next_token().token, Token::Key("a".to_string()));
    }

    #[test]
    fn emits_comment_token_when_configured() {
        let mut diagnostics = Diagnostics::new(256);
        let config = Config::default().with_emit_comment_token(true);
        let mut lexer = Lexer::new(b"# hi\na = 1\n", &mut diagnostics, config);
        assert_eq!(lexer.next_token().token, Token::Comment(" hi".to_string()));
        assert_eq!(lexer.next_token().token, Token::Key("a".to_string()));
    }
}
