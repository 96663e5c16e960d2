//! Token kinds produced by the lexer (spec §4.1).

use tomlrs_util::{ParseError, Position};

/// A lexical unit, paired with the position its first byte was lexed at.
#[derive(Clone, Debug, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: Position,
}

/// One token of TOML surface syntax.
///
/// `Equal` is deliberately absent: spec §4.1 lists it as "internal —
/// consumed and not surfaced", so the lexer swallows `=` while scanning a
/// key-value pair rather than emitting a token for it.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Key(String),
    BasicString(String),
    LiteralString(String),
    MultiLineBasicString(String),
    MultiLineLiteralString(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Raw candidate text; calendar/range validation happens in the
    /// parser via `tomlrs_util::datetime::parse` (spec §4.3).
    DateTime(String),
    Dot,
    TableStart,
    TableEnd,
    ArrayTableStart,
    ArrayTableEnd,
    ArrayStart,
    ArrayEnd,
    InlineTableStart,
    InlineTableEnd,
    Comment(String),
    /// Carries the diagnostic raised on the first lexical failure. Every
    /// subsequent `next_token` call returns the same error again (spec
    /// §4.1 "Error policy").
    Error(ParseError),
    EndOfStream,
}

impl Token {
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Key(_) => "key",
            Token::BasicString(_) => "basic string",
            Token::LiteralString(_) => "literal string",
            Token::MultiLineBasicString(_) => "multi-line basic string",
            Token::MultiLineLiteralString(_) => "multi-line literal string",
            Token::Integer(_) => "integer",
            Token::Float(_) => "float",
            Token::Boolean(_) => "boolean",
            Token::DateTime(_) => "date/time",
            Token::Dot => "'.'",
            Token::TableStart => "'['",
            Token::TableEnd => "']'",
            Token::ArrayTableStart => "'[['",
            Token::ArrayTableEnd => "']]'",
            Token::ArrayStart => "'['",
            Token::ArrayEnd => "']'",
            Token::InlineTableStart => "'{'",
            Token::InlineTableEnd => "'}'",
            Token::Comment(_) => "comment",
            Token::Error(_) => "error",
            Token::EndOfStream => "end of input",
        }
    }
}
