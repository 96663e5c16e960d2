//! Tokeniser for TOML v1.0.0 documents.
//!
//! The lexer is an explicit stack of states (spec §4.1): the top of
//! [`lexer::Lexer`]'s stack decides how the next bytes are read, and
//! nested contexts (table headers, dotted key paths, arrays, inline
//! tables) push a state and pop it back off on close. See
//! `lexer/core.rs` for the state machine itself and `DESIGN.md` at the
//! workspace root for what was kept from `faxc-lex` and what was
//! rebuilt.

mod cursor;
mod lexer;
mod token;

pub use cursor::{Cursor, CursorSnapshot};
pub use lexer::Lexer;
pub use token::{SpannedToken, Token};
