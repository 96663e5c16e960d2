//! Parser entry points: the per-call [`ParseSession`] worker and the
//! long-lived public [`Parser`] facade that owns the arena and the
//! diagnostic sink (spec §6 "External interfaces": `init`/`parse`/
//! `error-message`/`destroy`).
//!
//! Grounded on `faxc_par::Parser`'s shape (`tokens`/`position`/`handler`
//! fields, a `new` plus a `parse` entry point) but split in two: the
//! teacher's single struct both owns long-lived state and drives one
//! parse. Here, owning the arena and driving a parse can't be the same
//! borrow — the returned [`Document`] borrows the arena for as long as it
//! lives, so [`Parser::parse`] can't also hold `&mut self` for that long.
//! `ParseSession` is the per-call worker; `Parser` is what `init`/
//! `destroy` act on.

use tomlrs_lex::{Lexer, Token};
use tomlrs_util::{Arena, Config, Diagnostics, ParseError, Position};

use crate::parser::path::TableSets;
use crate::value::{Document, Table};

/// Owns the arena and the diagnostic sink across many `parse` calls (spec
/// §6 `init(allocator)` / `destroy()`, the latter via `Drop` on the owned
/// fields — there is nothing to release by hand).
pub struct Parser {
    arena: Arena,
    diagnostics: Diagnostics,
    config: Config,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Parser {
    pub fn new(config: Config) -> Self {
        Self {
            arena: Arena::new(),
            diagnostics: Diagnostics::new(config.error_stack_buffer_size),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parses `source` into a [`Document`] borrowing this parser's arena.
    ///
    /// Spec §5 "Resource discipline": the arena and diagnostic sink are
    /// reset at the start of every call, and spec §3 "Lifecycle": the
    /// returned tree is valid "until the next call to `parse` or
    /// `destroy`". Both are expressed here as borrow-checker facts rather
    /// than runtime checks: `Document<'_>` borrows `self` for the
    /// lifetime of this call, so the compiler itself refuses a second
    /// `parse()` while the first tree is still alive.
    pub fn parse<'a>(&'a mut self, source: &'a [u8]) -> Result<Document<'a>, ParseError> {
        self.arena.reset();
        self.diagnostics.reset();

        let lexer = Lexer::new(source, &mut self.diagnostics, self.config);
        let session = ParseSession {
            lexer,
            arena: &self.arena,
            config: self.config,
            sets: TableSets::default(),
            root: Table::new(),
            current_table_path: Vec::new(),
            value_depth: 0,
        };
        session.run()
    }

    /// Human-readable description of the last failure, or the empty
    /// string if the last `parse` succeeded (spec §6 `error-message()`).
    pub fn error_message(&self) -> &str {
        self.diagnostics.message()
    }
}

/// Per-call parsing state. Never constructed or held outside a single
/// [`Parser::parse`] invocation.
pub(crate) struct ParseSession<'a> {
    pub(crate) lexer: Lexer<'a>,
    pub(crate) arena: &'a Arena,
    pub(crate) config: Config,
    pub(crate) sets: TableSets<'a>,
    pub(crate) root: Table<'a>,
    /// Path established by the most recent `[header]`/`[[header]]`, empty
    /// until the first one is seen (spec §4.2 "Header handling").
    pub(crate) current_table_path: Vec<&'a str>,
    /// Dynamic nesting depth charged by arrays and inline tables, shared
    /// with path-length depth checks against `config.max_nesting`
    /// (`SPEC_FULL.md` §0.7).
    pub(crate) value_depth: u8,
}

impl<'a> ParseSession<'a> {
    pub(crate) fn intern(&self, s: &str) -> &'a str {
        self.arena.alloc_str(s)
    }

    /// Drives the top-level loop: table headers, array-of-tables headers,
    /// and root key-value statements, until end of stream (spec §4.2
    /// "Termination").
    pub(crate) fn run(mut self) -> Result<Document<'a>, ParseError> {
        loop {
            let spanned = self.lexer.next_token();
            match spanned.token {
                Token::EndOfStream => break,
                Token::Error(err) => return Err(err),
                Token::Comment(_) => continue,
                Token::TableStart | Token::ArrayTableStart => {
                    self.parse_header(spanned.position)?;
                }
                Token::Key(key) => {
                    self.parse_root_key_value(key, spanned.position)?;
                }
                other => {
                    return Err(ParseError::structural(
                        format!("unexpected {} at top level", other.describe()),
                        spanned.position,
                    ));
                }
            }
        }
        Ok(Document::new(self.root))
    }

    /// Reads the dotted path inside a `[...]`/`[[...]]` header, up to and
    /// including the closing token. Returns the path and whether it was
    /// an array-of-tables header.
    pub(crate) fn read_header_path(&mut self) -> Result<(Vec<&'a str>, bool), ParseError> {
        let mut path = Vec::with_capacity(self.config.initial_array_size.min(8));
        let mut expect_key = true;
        loop {
            let spanned = self.lexer.next_token();
            match spanned.token {
                Token::Key(k) if expect_key => {
                    path.push(self.intern(&k));
                    expect_key = false;
                }
                Token::Dot if !expect_key => {
                    expect_key = true;
                }
                Token::TableEnd if !expect_key => return Ok((path, false)),
                Token::ArrayTableEnd if !expect_key => return Ok((path, true)),
                Token::Error(err) => return Err(err),
                other => {
                    return Err(ParseError::structural(
                        format!("unexpected {} in table header", other.describe()),
                        spanned.position,
                    ));
                }
            }
        }
    }

    /// Reads the remainder of a (possibly dotted) key that started with
    /// `first_key`, stopping at the first non-`Dot` token, which is
    /// returned alongside the full key path (spec §4.2 "Key-value
    /// handling").
    pub(crate) fn read_dotted_keys(
        &mut self,
        first_key: &'a str,
    ) -> Result<(Vec<&'a str>, Token, Position), ParseError> {
        let mut path = vec![first_key];
        loop {
            let spanned = self.lexer.next_token();
            match spanned.token {
                Token::Dot => {
                    let next = self.lexer.next_token();
                    match next.token {
                        Token::Key(k) => path.push(self.intern(&k)),
                        Token::Error(err) => return Err(err),
                        other => {
                            return Err(ParseError::structural(
                                format!("expected key after '.', found {}", other.describe()),
                                next.position,
                            ));
                        }
                    }
                }
                Token::Error(err) => return Err(err),
                other => return Ok((path, other, spanned.position)),
            }
        }
    }
}
