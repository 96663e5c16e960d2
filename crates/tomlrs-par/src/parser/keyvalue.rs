//! Key-value handling and value construction (spec §4.2 "Key-value
//! handling" / "Value construction").
//!
//! The same [`ParseSession::parse_key_value_into`] helper backs both a
//! root-level statement and a key-value pair inside `{ ... }`: the only
//! difference between the two is which `Table` the result lands in and
//! what path prefix that table sits at, both passed in explicitly so the
//! helper never needs to know which case it's in.

use tomlrs_lex::Token;
use tomlrs_util::{ParseError, Position};

use crate::parser::core::ParseSession;
use crate::parser::path::{self, IntermediateKind};
use crate::value::{Table, Value};

impl<'a> ParseSession<'a> {
    /// Handles a bare `key = value` (or `a.b.c = value`) statement at the
    /// current table (spec §4.2 "Key-value handling"). `self.root` is
    /// temporarily taken out so that `self` can still be borrowed
    /// mutably by the helpers this delegates to — see `path.rs` for why
    /// the table-mutating logic lives in free functions instead of
    /// `&mut self` methods.
    pub(crate) fn parse_root_key_value(
        &mut self,
        first_key: String,
        pos: Position,
    ) -> Result<(), ParseError> {
        let first_key = self.intern(&first_key);
        let base_path = self.current_table_path.clone();

        let mut root = std::mem::take(&mut self.root);
        let mut prefix = Vec::new();
        let walked = path::walk_intermediate(
            &mut root,
            &mut prefix,
            &base_path,
            &mut self.sets,
            IntermediateKind::Implicit,
            pos,
        );
        let result = match walked {
            Ok(target) => self.parse_key_value_into(target, &base_path, first_key, pos),
            Err(err) => Err(err),
        };
        self.root = root;
        result
    }

    /// Reads the rest of a (possibly dotted) key and its value, then
    /// installs the value into `table`, a node already known to sit at
    /// `base_path` in the document.
    pub(crate) fn parse_key_value_into(
        &mut self,
        table: &mut Table<'a>,
        base_path: &[&'a str],
        first_key: &'a str,
        pos: Position,
    ) -> Result<(), ParseError> {
        let (dotted, value_tok, value_pos) = self.read_dotted_keys(first_key)?;

        let mut full_path = base_path.to_vec();
        full_path.extend_from_slice(&dotted);
        path::check_depth(full_path.len(), self.config.max_nesting, pos)?;

        let value = self.parse_value(value_tok, &full_path, value_pos)?;

        let final_key = *dotted.last().expect("read_dotted_keys always yields at least one key");
        let intermediate = &dotted[..dotted.len() - 1];
        let mut prefix = base_path.to_vec();
        let target = path::walk_intermediate(
            table,
            &mut prefix,
            intermediate,
            &mut self.sets,
            IntermediateKind::DottedKeyClosed,
            pos,
        )?;
        path::install_value(target, &mut prefix, final_key, value, &self.sets, pos)
    }

    /// Converts a value-position token into a [`Value`] (spec §4.2 "Value
    /// construction"). `full_path` is the path the value will live at,
    /// needed so a nested inline table can register itself in the
    /// inline-table set under its own address.
    pub(crate) fn parse_value(
        &mut self,
        tok: Token,
        full_path: &[&'a str],
        pos: Position,
    ) -> Result<Value<'a>, ParseError> {
        match tok {
            Token::BasicString(s)
            | Token::LiteralString(s)
            | Token::MultiLineBasicString(s)
            | Token::MultiLineLiteralString(s) => Ok(Value::String(self.intern(&s))),
            Token::Integer(n) => Ok(Value::Integer(n)),
            Token::Float(f) => Ok(Value::Float(f)),
            Token::Boolean(b) => Ok(Value::Boolean(b)),
            Token::DateTime(raw) => tomlrs_util::datetime::parse(raw.as_bytes())
                .map(Value::DateTime)
                .map_err(|message| ParseError::lexical(message, pos)),
            Token::ArrayStart => self.parse_array(full_path, pos),
            Token::InlineTableStart => self.parse_inline_table(full_path, pos),
            Token::Error(err) => Err(err),
            other => Err(ParseError::structural(
                format!("expected a value, found {}", other.describe()),
                pos,
            )),
        }
    }

    fn parse_array(&mut self, full_path: &[&'a str], pos: Position) -> Result<Value<'a>, ParseError> {
        self.value_depth += 1;
        let result = self.parse_array_inner(full_path, pos);
        self.value_depth -= 1;
        result
    }

    fn parse_array_inner(&mut self, full_path: &[&'a str], pos: Position) -> Result<Value<'a>, ParseError> {
        path::check_depth(full_path.len() + self.value_depth as usize, self.config.max_nesting, pos)?;

        let mut elements = bumpalo::collections::Vec::new_in(self.arena.bump());
        loop {
            let spanned = self.lexer.next_token();
            match spanned.token {
                Token::ArrayEnd => break,
                Token::Comment(_) => continue,
                Token::Error(err) => return Err(err),
                other => {
                    let value = self.parse_value(other, full_path, spanned.position)?;
                    elements.push(value);
                }
            }
        }
        Ok(Value::Array(elements.into_bump_slice()))
    }

    fn parse_inline_table(&mut self, full_path: &[&'a str], pos: Position) -> Result<Value<'a>, ParseError> {
        self.value_depth += 1;
        let result = self.parse_inline_table_inner(full_path, pos);
        self.value_depth -= 1;
        result
    }

    fn parse_inline_table_inner(&mut self, full_path: &[&'a str], pos: Position) -> Result<Value<'a>, ParseError> {
        path::check_depth(full_path.len() + self.value_depth as usize, self.config.max_nesting, pos)?;

        // Spec §9 "inline-table immutability": closed to further keys and
        // headers the moment it is declared, not just once fully parsed.
        self.sets.mark_inline(full_path.to_vec());

        let mut table = Table::new();
        loop {
            let spanned = self.lexer.next_token();
            match spanned.token {
                Token::InlineTableEnd => break,
                Token::Key(k) => {
                    let key = self.intern(&k);
                    self.parse_key_value_into(&mut table, full_path, key, spanned.position)?;
                }
                Token::Error(err) => return Err(err),
                other => {
                    return Err(ParseError::structural(
                        format!("unexpected {} in inline table", other.describe()),
                        spanned.position,
                    ));
                }
            }
        }
        Ok(Value::Table(table))
    }
}
