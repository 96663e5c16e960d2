//! Structural parser and document-tree value model for TOML v1.0.0.
//!
//! [`Parser`] drives [`tomlrs_lex::Lexer`] token by token, enforcing
//! spec §4.2's table-header, array-of-tables, and key-value rules, and
//! builds a [`Document`] whose [`Table`]/[`Value`]/[`TablesArray`] nodes
//! borrow their string and array payloads from the parser's arena. See
//! `DESIGN.md` at the workspace root for how this differs from
//! `faxc-par`, the crate this one started from.

mod parser;
mod value;

pub use parser::Parser;
pub use value::{Document, Table, TablesArray, Value};
