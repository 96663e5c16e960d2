//! Bare and quoted key lexing (spec §4.1 "Key lexing").
//!
//! Adapted from `faxc_lex::lexer::identifier`'s maximal-munge style, but
//! the character class is TOML's `[A-Za-z0-9_-]` rather than a
//! Unicode-identifier grammar, and a key may also be a basic or literal
//! string confined to a single line.

use tomlrs_util::ParseError;

use crate::token::Token;

use super::core::Lexer;

fn is_bare_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl<'a> Lexer<'a> {
    /// Lexes one key: a bare key, or a single-quoted/double-quoted string
    /// confined to one line.
    pub(crate) fn lex_key(&mut self) -> Result<Token, ParseError> {
        match self.cursor.current_byte() {
            Some(b'"') => self.lex_quoted_key(b'"'),
            Some(b'\'') => self.lex_quoted_key(b'\''),
            Some(b) if is_bare_key_byte(b) => Ok(self.lex_bare_key()),
            Some(b) => Err(self.lexical_error(format!(
                "unexpected byte 0x{b:02x} where a key was expected"
            ))),
            None => Err(self.lexical_error("unexpected end of input where a key was expected")),
        }
    }

    fn lex_bare_key(&mut self) -> Token {
        let start = self.cursor.position();
        while matches!(self.cursor.current_byte(), Some(b) if is_bare_key_byte(b)) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        Token::Key(String::from_utf8_lossy(text).into_owned())
    }

    fn lex_quoted_key(&mut self, quote: u8) -> Result<Token, ParseError> {
        self.cursor.advance(); // opening quote
        let content = if quote == b'"' {
            self.lex_basic_string_body(false, "Quoted keys can't be multi-line")?
        } else {
            self.lex_literal_string_body(false, "Quoted keys can't be multi-line")?
        };
        Ok(Token::Key(content))
    }
}

#[cfg(test)]
mod tests {
    use tomlrs_util::{Config, Diagnostics};

    use super::super::core::Lexer;
    use crate::token::Token;

    fn lex_one_key(source: &[u8]) -> Token {
        let mut diagnostics = Diagnostics::new(256);
        let mut lexer = Lexer::new(source, &mut diagnostics, Config::default());
        lexer.lex_key().unwrap_or_else(Token::Error)
    }

    #[test]
    fn bare_key() {
        assert_eq!(lex_one_key(b"server-1 "), Token::Key("server-1".to_string()));
    }

    #[test]
    fn basic_quoted_key() {
        assert_eq!(lex_one_key(b"\"127.0.0.1\" "), Token::Key("127.0.0.1".to_string()));
    }

    #[test]
    fn literal_quoted_key() {
        assert_eq!(lex_one_key(b"'key with spaces' "), Token::Key("key with spaces".to_string()));
    }

    #[test]
    fn rejects_multiline_quoted_key() {
        let result = lex_one_key(b"\"a\nb\" ");
        assert!(matches!(result, Token::Error(_)));
    }
}
