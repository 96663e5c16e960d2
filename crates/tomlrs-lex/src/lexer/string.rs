//! Basic, literal, and multi-line string lexing (spec §4.1 "String
//! lexing").
//!
//! Adapted from `faxc_lex::lexer::string`'s escape table and
//! error-on-unterminated shape, generalized to TOML's four string forms:
//! the teacher only has one quoted-string kind (plus raw strings with a
//! different delimiter convention), so the multi-line leading-newline
//! trim, line-ending-backslash continuation, and 1-2 trailing-quote
//! inclusion rule are new.

use tomlrs_util::ParseError;

use crate::token::Token;

use super::core::Lexer;

const FORBIDDEN_CONTROL_MESSAGE: &str = "forbidden control byte in string";

fn is_forbidden_control(b: u8) -> bool {
    b < 0x20 && b != b'\t'
}

impl<'a> Lexer<'a> {
    pub(crate) fn lex_basic_or_multiline_string(&mut self) -> Result<Token, ParseError> {
        self.cursor.advance(); // opening '"'
        if self.cursor.current_byte() == Some(b'"') && self.cursor.peek_byte(1) == Some(b'"') {
            self.cursor.advance_n(2);
            self.trim_leading_newline();
            let content = self.lex_basic_string_body(true, "unterminated multi-line string")?;
            Ok(Token::MultiLineBasicString(content))
        } else {
            let content = self.lex_basic_string_body(false, "unterminated string literal")?;
            Ok(Token::BasicString(content))
        }
    }

    pub(crate) fn lex_literal_or_multiline_string(&mut self) -> Result<Token, ParseError> {
        self.cursor.advance(); // opening '\''
        if self.cursor.current_byte() == Some(b'\'') && self.cursor.peek_byte(1) == Some(b'\'') {
            self.cursor.advance_n(2);
            self.trim_leading_newline();
            let content = self.lex_literal_string_body(true, "unterminated multi-line string")?;
            Ok(Token::MultiLineLiteralString(content))
        } else {
            let content = self.lex_literal_string_body(false, "unterminated string literal")?;
            Ok(Token::LiteralString(content))
        }
    }

    fn trim_leading_newline(&mut self) {
        if self.cursor.current_byte() == Some(b'\r') && self.cursor.peek_byte(1) == Some(b'\n') {
            self.cursor.advance_n(2);
        } else if self.cursor.current_byte() == Some(b'\n') {
            self.cursor.advance();
        }
    }

    /// Body of a `"..."` or `"""..."""` string, opening delimiter already
    /// consumed. `unterminated_message` lets the key lexer ask for
    /// "Quoted keys can't be multi-line" instead of the generic message.
    pub(crate) fn lex_basic_string_body(
        &mut self,
        multiline: bool,
        unterminated_message: &str,
    ) -> Result<String, ParseError> {
        let mut content: Vec<u8> = Vec::new();
        loop {
            let Some(b) = self.cursor.current_byte() else {
                return Err(self.lexical_error(unterminated_message));
            };
            match b {
                b'"' => {
                    if multiline {
                        let run = self.count_consecutive(b'"');
                        if run >= 3 {
                            let extra = (run - 3).min(2);
                            for _ in 0..extra {
                                content.push(b'"');
                            }
                            self.cursor.advance_n(extra + 3);
                            return self.finish_string(content);
                        }
                        for _ in 0..run {
                            content.push(b'"');
                        }
                        self.cursor.advance_n(run);
                    } else {
                        self.cursor.advance();
                        return self.finish_string(content);
                    }
                }
                b'\n' if !multiline => return Err(self.lexical_error(unterminated_message)),
                b'\\' => {
                    self.cursor.advance();
                    if multiline && self.peek_is_line_ending_backslash() {
                        self.skip_line_ending_backslash()?;
                        continue;
                    }
                    let ch = self.parse_basic_escape()?;
                    let mut buf = [0u8; 4];
                    content.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
                b if is_forbidden_control(b) && !(multiline && (b == b'\n' || b == b'\r')) => {
                    return Err(self.lexical_error(FORBIDDEN_CONTROL_MESSAGE));
                }
                _ => {
                    content.push(b);
                    self.cursor.advance();
                }
            }
        }
    }

    fn finish_string(&self, bytes: Vec<u8>) -> Result<String, ParseError> {
        String::from_utf8(bytes).map_err(|_| self.lexical_error("string is not valid UTF-8"))
    }

    /// Body of a `'...'` or `'''...'''` string, opening delimiter already
    /// consumed. No escapes are processed.
    pub(crate) fn lex_literal_string_body(
        &mut self,
        multiline: bool,
        unterminated_message: &str,
    ) -> Result<String, ParseError> {
        let mut content: Vec<u8> = Vec::new();
        loop {
            let Some(b) = self.cursor.current_byte() else {
                return Err(self.lexical_error(unterminated_message));
            };
            match b {
                b'\'' => {
                    if multiline {
                        let run = self.count_consecutive(b'\'');
                        if run >= 3 {
                            let extra = (run - 3).min(2);
                            for _ in 0..extra {
                                content.push(b'\'');
                            }
                            self.cursor.advance_n(extra + 3);
                            return self.finish_string(content);
                        }
                        for _ in 0..run {
                            content.push(b'\'');
                        }
                        self.cursor.advance_n(run);
                    } else {
                        self.cursor.advance();
                        return self.finish_string(content);
                    }
                }
                b'\n' if !multiline => return Err(self.lexical_error(unterminated_message)),
                b if is_forbidden_control(b) && !(multiline && (b == b'\n' || b == b'\r')) => {
                    return Err(self.lexical_error(FORBIDDEN_CONTROL_MESSAGE));
                }
                _ => {
                    content.push(b);
                    self.cursor.advance();
                }
            }
        }
    }

    fn count_consecutive(&self, byte: u8) -> usize {
        let mut n = 0;
        while self.cursor.peek_byte(n) == Some(byte) {
            n += 1;
        }
        n
    }

    fn peek_is_line_ending_backslash(&self) -> bool {
        let mut offset = 0;
        loop {
            match self.cursor.peek_byte(offset) {
                Some(b' ') | Some(b'\t') => offset += 1,
                Some(b'\r') => return self.cursor.peek_byte(offset + 1) == Some(b'\n'),
                Some(b'\n') => return true,
                _ => return false,
            }
        }
    }

    fn skip_line_ending_backslash(&mut self) -> Result<(), ParseError> {
        let mut saw_newline = false;
        loop {
            match self.cursor.current_byte() {
                Some(b' ') | Some(b'\t') => self.cursor.advance(),
                Some(b'\r') if self.cursor.peek_byte(1) == Some(b'\n') => {
                    self.cursor.advance_n(2);
                    saw_newline = true;
                }
                Some(b'\n') => {
                    self.cursor.advance();
                    saw_newline = true;
                }
                _ => break,
            }
        }
        if saw_newline {
            Ok(())
        } else {
            Err(self.lexical_error("bad string escape"))
        }
    }

    fn parse_basic_escape(&mut self) -> Result<char, ParseError> {
        let Some(b) = self.cursor.current_byte() else {
            return Err(self.lexical_error("bad string escape"));
        };
        self.cursor.advance();
        match b {
            b'b' => Ok('\u{0008}'),
            b't' => Ok('\t'),
            b'n' => Ok('\n'),
            b'f' => Ok('\u{000C}'),
            b'r' => Ok('\r'),
            b'"' => Ok('"'),
            b'\\' => Ok('\\'),
            b'u' => self.parse_unicode_escape(4),
            b'U' => self.parse_unicode_escape(8),
            other => Err(self.lexical_error(format!("bad string escape: \\{}", other as char))),
        }
    }

    fn parse_unicode_escape(&mut self, digits: usize) -> Result<char, ParseError> {
        let start = self.cursor.position();
        for _ in 0..digits {
            match self.cursor.current_byte() {
                Some(b) if b.is_ascii_hexdigit() => self.cursor.advance(),
                _ => return Err(self.lexical_error("bad string escape: incomplete unicode escape")),
            }
        }
        let text = self.cursor.slice_from(start);
        let hex = std::str::from_utf8(text).expect("hex digits are ASCII");
        let codepoint = u32::from_str_radix(hex, 16).expect("validated hex digits");
        char::from_u32(codepoint)
            .ok_or_else(|| self.lexical_error("bad string escape: codepoint out of range or a surrogate"))
    }
}

#[cfg(test)]
mod tests {
    use tomlrs_util::{Config, Diagnostics};

    use super::super::core::Lexer;
    use crate::token::Token;

    fn lex_value(source: &[u8]) -> Token {
        let mut diagnostics = Diagnostics::new(256);
        let mut lexer = Lexer::new(source, &mut diagnostics, Config::default());
        if source[0] == b'"' {
            lexer.lex_basic_or_multiline_string().unwrap_or_else(Token::Error)
        } else {
            lexer.lex_literal_or_multiline_string().unwrap_or_else(Token::Error)
        }
    }

    #[test]
    fn basic_string_with_escapes() {
        assert_eq!(
            lex_value(b"\"a\\tb\\nc\""),
            Token::BasicString("a\tb\nc".to_string())
        );
    }

    #[test]
    fn basic_string_rejects_control_byte() {
        let mut raw = b"\"a".to_vec();
        raw.push(0x01);
        raw.extend_from_slice(b"b\"");
        assert!(matches!(lex_value(&raw), Token::Error(_)));
    }

    #[test]
    fn literal_string_has_no_escapes() {
        assert_eq!(
            lex_value(b"'a\\tb'"),
            Token::LiteralString("a\\tb".to_string())
        );
    }

    #[test]
    fn multiline_basic_trims_leading_newline() {
        assert_eq!(
            lex_value(b"\"\"\"\nhello\"\"\""),
            Token::MultiLineBasicString("hello".to_string())
        );
    }

    #[test]
    fn multiline_basic_line_ending_backslash_joins_lines() {
        assert_eq!(
            lex_value(b"\"\"\"a\\\n   b\"\"\""),
            Token::MultiLineBasicString("ab".to_string())
        );
    }

    #[test]
    fn multiline_basic_allows_two_trailing_quotes() {
        assert_eq!(
            lex_value(b"\"\"\"ab\"\"\"\"\""),
            Token::MultiLineBasicString("ab\"\"".to_string())
        );
    }

    #[test]
    fn basic_string_unicode_escape() {
        assert_eq!(lex_value(b"\"\\u00e9\""), Token::BasicString("\u{e9}".to_string()));
    }

    #[test]
    fn basic_string_rejects_surrogate_escape() {
        assert!(matches!(lex_value(b"\"\\ud800\""), Token::Error(_)));
    }
}
