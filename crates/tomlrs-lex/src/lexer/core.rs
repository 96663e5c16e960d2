//! Core lexer: the state stack, dispatch loop, and the structural
//! punctuation (`[`, `[[`, `]`, `]]`, `{`, `}`, `.`, `=`).
//!
//! Grounded on `faxc_lex::lexer::core::Lexer`: a cursor, an error sink, and
//! a `next_token` entry point that skips trivia before dispatching on the
//! current byte. The teacher's lexer has no state stack because the Fax
//! surface grammar is context-free at the token level; TOML is not — a
//! bare `true` means something different at a header path than at a value
//! position — so spec §4.1's "explicit stack of state functions" is made
//! concrete here as `Vec<LexState>`.

use tomlrs_util::{Config, Diagnostics, ParseError, Position};

use crate::cursor::Cursor;
use crate::token::{SpannedToken, Token};

/// A state the lexer may be "inside" at any point. States are pushed when
/// descending into a nested context (a header path, a value, an array, an
/// inline table) and popped when that context closes, mirroring spec
/// §4.1's "states form a stack so that nested contexts... can resume
/// their caller."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LexState {
    /// Top level: table headers and key-value statements.
    Root,
    /// Between `[`/`[[` and the matching `]`/`]]`.
    Header { array: bool },
    /// Reading a dotted key path that must be followed by `=`.
    KeyValue,
    /// Expecting exactly one value token.
    Value,
    /// Inside `[ ... ]` at value position.
    Array,
    /// Inside `{ ... }`.
    InlineTable,
}

/// Tokenises TOML source. See the module-level docs for the state-stack
/// design this implements.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) diagnostics: &'a mut Diagnostics,
    pub(crate) config: Config,
    pub(crate) stack: Vec<LexState>,
    pub(crate) scratch: String,
    pub(crate) bom_checked: bool,
    /// Set once an `Error` token has been emitted; every later call
    /// returns the same error without touching the cursor again (spec
    /// §4.1 "Error policy").
    pub(crate) halted: Option<ParseError>,
    pub(crate) token_start: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8], diagnostics: &'a mut Diagnostics, config: Config) -> Self {
        let scratch = String::with_capacity(config.lexer_buffer_size);
        Self {
            cursor: Cursor::new(source),
            diagnostics,
            config,
            stack: vec![LexState::Root],
            scratch,
            bom_checked: false,
            halted: None,
            token_start: Position::START,
        }
    }

    /// Returns the next token, paired with the position it started at.
    pub fn next_token(&mut self) -> SpannedToken {
        if let Some(err) = &self.halted {
            return SpannedToken {
                token: Token::Error(err.clone()),
                position: err.position,
            };
        }

        self.consume_bom_once();

        loop {
            let state = *self.stack.last().unwrap_or(&LexState::Root);
            match self.dispatch(state) {
                DispatchResult::Token(token) => {
                    let position = self.token_start;
                    if let Token::Error(ref err) = token {
                        self.diagnostics.report(err.clone());
                        self.halted = Some(err.clone());
                        self.stack.clear();
                    }
                    return SpannedToken { token, position };
                }
                DispatchResult::Continue => continue,
            }
        }
    }

    fn dispatch(&mut self, state: LexState) -> DispatchResult {
        self.trace_state(state);
        match state {
            LexState::Root => self.dispatch_root(),
            LexState::Header { array } => self.dispatch_header(array),
            LexState::KeyValue => self.dispatch_key_value(),
            LexState::Value => self.dispatch_value(),
            LexState::Array => self.dispatch_array(),
            LexState::InlineTable => self.dispatch_inline_table(),
        }
    }

    fn dispatch_root(&mut self) -> DispatchResult {
        self.skip_trivia(true);
        self.mark_token_start();

        if self.cursor.is_at_end() {
            return DispatchResult::Token(Token::EndOfStream);
        }

        match self.cursor.current_byte().unwrap() {
            b'[' => {
                self.cursor.advance();
                if self.cursor.match_byte(b'[') {
                    self.stack.push(LexState::Header { array: true });
                    DispatchResult::Token(Token::ArrayTableStart)
                } else {
                    self.stack.push(LexState::Header { array: false });
                    DispatchResult::Token(Token::TableStart)
                }
            }
            b'#' => {
                if let Some(comment) = self.read_comment() {
                    DispatchResult::Token(comment)
                } else {
                    DispatchResult::Continue
                }
            }
            _ => {
                self.stack.push(LexState::KeyValue);
                DispatchResult::Continue
            }
        }
    }

    fn dispatch_header(&mut self, array: bool) -> DispatchResult {
        self.skip_inline_trivia();
        self.mark_token_start();

        if self.cursor.current_byte() == Some(b'\n') || self.cursor.is_at_end() {
            self.stack.pop();
            return DispatchResult::Token(self.structural_error("unterminated table header"));
        }

        match self.cursor.current_byte().unwrap() {
            b'.' => {
                self.cursor.advance();
                DispatchResult::Token(Token::Dot)
            }
            b']' => {
                self.cursor.advance();
                if array {
                    if !self.cursor.match_byte(b']') {
                        self.stack.pop();
                        return DispatchResult::Token(
                            self.structural_error("expected ']]' to close array-of-tables header"),
                        );
                    }
                    self.stack.pop();
                    DispatchResult::Token(Token::ArrayTableEnd)
                } else {
                    self.stack.pop();
                    DispatchResult::Token(Token::TableEnd)
                }
            }
            _ => match self.lex_key() {
                Ok(token) => DispatchResult::Token(token),
                Err(err) => DispatchResult::Token(Token::Error(err)),
            },
        }
    }

    fn dispatch_key_value(&mut self) -> DispatchResult {
        self.skip_inline_trivia();
        self.mark_token_start();

        if self.cursor.current_byte() == Some(b'\n') || self.cursor.is_at_end() {
            self.stack.pop();
            return DispatchResult::Token(self.structural_error("missing '=' after key"));
        }

        match self.cursor.current_byte().unwrap() {
            b'.' => {
                self.cursor.advance();
                DispatchResult::Token(Token::Dot)
            }
            b'=' => {
                self.cursor.advance();
                self.stack.pop();
                self.stack.push(LexState::Value);
                DispatchResult::Continue
            }
            _ => match self.lex_key() {
                Ok(token) => DispatchResult::Token(token),
                Err(err) => DispatchResult::Token(Token::Error(err)),
            },
        }
    }

    fn dispatch_value(&mut self) -> DispatchResult {
        self.skip_inline_trivia();
        self.mark_token_start();

        if self.cursor.is_at_end() || self.cursor.current_byte() == Some(b'\n') {
            self.stack.pop();
            return DispatchResult::Token(self.structural_error("missing value after '='"));
        }

        let result = match self.cursor.current_byte().unwrap() {
            b'"' => self.lex_basic_or_multiline_string(),
            b'\'' => self.lex_literal_or_multiline_string(),
            b'[' => {
                self.cursor.advance();
                self.stack.pop();
                self.stack.push(LexState::Array);
                return DispatchResult::Token(Token::ArrayStart);
            }
            b'{' => {
                self.cursor.advance();
                self.stack.pop();
                self.stack.push(LexState::InlineTable);
                return DispatchResult::Token(Token::InlineTableStart);
            }
            _ => self.lex_value_candidate(),
        };

        self.stack.pop();
        match result {
            Ok(token) => DispatchResult::Token(token),
            Err(err) => DispatchResult::Token(Token::Error(err)),
        }
    }

    fn dispatch_array(&mut self) -> DispatchResult {
        self.skip_trivia(true);
        self.mark_token_start();

        if self.cursor.is_at_end() {
            self.stack.pop();
            return DispatchResult::Token(self.structural_error("unterminated array"));
        }

        match self.cursor.current_byte().unwrap() {
            b']' => {
                self.cursor.advance();
                self.stack.pop();
                DispatchResult::Token(Token::ArrayEnd)
            }
            b',' => {
                self.cursor.advance();
                DispatchResult::Continue
            }
            b'#' => {
                if let Some(comment) = self.read_comment() {
                    DispatchResult::Token(comment)
                } else {
                    DispatchResult::Continue
                }
            }
            _ => {
                self.stack.push(LexState::Value);
                DispatchResult::Continue
            }
        }
    }

    fn dispatch_inline_table(&mut self) -> DispatchResult {
        self.skip_inline_trivia();
        self.mark_token_start();

        if self.cursor.current_byte() == Some(b'\n') || self.cursor.is_at_end() {
            self.stack.pop();
            return DispatchResult::Token(self.structural_error("newline not allowed inside inline table"));
        }

        match self.cursor.current_byte().unwrap() {
            b'}' => {
                self.cursor.advance();
                self.stack.pop();
                DispatchResult::Token(Token::InlineTableEnd)
            }
            b',' => {
                self.cursor.advance();
                self.skip_inline_trivia();
                if self.cursor.current_byte() == Some(b'}') {
                    return DispatchResult::Token(
                        self.structural_error("trailing comma not allowed in inline table"),
                    );
                }
                DispatchResult::Continue
            }
            _ => {
                self.stack.push(LexState::KeyValue);
                DispatchResult::Continue
            }
        }
    }

    pub(crate) fn mark_token_start(&mut self) {
        self.token_start = Position::new(self.cursor.position(), self.cursor.line(), self.cursor.column());
    }

    pub(crate) fn error_at(&self, kind: tomlrs_util::ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(kind, message.into(), self.token_start)
    }

    pub(crate) fn lexical_error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(tomlrs_util::ErrorKind::Lexical, message)
    }

    fn structural_error(&self, message: impl Into<String>) -> Token {
        Token::Error(self.error_at(tomlrs_util::ErrorKind::Structural, message))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(feature = "log-lexer-state")]
    fn trace_state(&self, state: LexState) {
        if self.config.log_lexer_state {
            log::trace!(
                "lexer state {:?} at {}:{} (depth {})",
                state,
                self.cursor.line(),
                self.cursor.column(),
                self.stack.len()
            );
        }
    }

    #[cfg(not(feature = "log-lexer-state"))]
    fn trace_state(&self, _state: LexState) {}
}

pub(crate) enum DispatchResult {
    Token(Token),
    Continue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomlrs_util::Diagnostics;

    fn tokens(source: &str) -> Vec<Token> {
        let mut diagnostics = Diagnostics::new(256);
        let config = Config::default();
        let mut lexer = Lexer::new(source.as_bytes(), &mut diagnostics, config);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().token;
            let done = matches!(tok, Token::EndOfStream | Token::Error(_));
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_simple_key_value() {
        let toks = tokens("message = \"hi\"\n");
        assert_eq!(
            toks,
            vec![
                Token::Key("message".to_string()),
                Token::BasicString("hi".to_string()),
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn lexes_table_header_and_dotted_path() {
        let toks = tokens("[a.b]\n");
        assert_eq!(
            toks,
            vec![
                Token::TableStart,
                Token::Key("a".to_string()),
                Token::Dot,
                Token::Key("b".to_string()),
                Token::TableEnd,
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn lexes_array_table_header() {
        let toks = tokens("[[fruits]]\n");
        assert_eq!(
            toks,
            vec![
                Token::ArrayTableStart,
                Token::Key("fruits".to_string()),
                Token::ArrayTableEnd,
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn lexes_array_of_integers_with_trailing_comma() {
        let toks = tokens("a = [1, 2, 3,]\n");
        assert_eq!(
            toks,
            vec![
                Token::Key("a".to_string()),
                Token::ArrayStart,
                Token::Integer(1),
                Token::Integer(2),
                Token::Integer(3),
                Token::ArrayEnd,
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn lexes_inline_table() {
        let toks = tokens("p = { x = 1, y = 2 }\n");
        assert_eq!(
            toks,
            vec![
                Token::Key("p".to_string()),
                Token::InlineTableStart,
                Token::Key("x".to_string()),
                Token::Integer(1),
                Token::Key("y".to_string()),
                Token::Integer(2),
                Token::InlineTableEnd,
                Token::EndOfStream,
            ]
        );
    }

    #[test]
    fn rejects_trailing_comma_in_inline_table() {
        let toks = tokens("p = { x = 1, }\n");
        assert!(matches!(toks.last(), Some(Token::Error(_))));
    }

    #[test]
    fn halts_after_first_error() {
        let mut diagnostics = Diagnostics::new(256);
        let config = Config::default();
        let mut lexer = Lexer::new(b"a = $\n", &mut diagnostics, config);
        let first = lexer.next_token().token;
        assert!(matches!(first, Token::Key(_)));
        let second = lexer.next_token().token;
        assert!(matches!(second, Token::Error(_)));
        let third = lexer.next_token().token;
        assert_eq!(second, third);
    }
}
