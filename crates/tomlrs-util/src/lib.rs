//! Shared primitives for the toml-rs lexer and parser: source positions,
//! the single-slot diagnostic sink, the backing arena, and the date/time
//! value model.
//!
//! Grounded on `faxc-util`'s split of these concerns into `span`,
//! `diagnostic`, and (for the string interner's storage) `bumpalo`; see
//! `DESIGN.md` at the workspace root for what was kept, adapted, or
//! dropped relative to that crate.

pub mod arena;
pub mod config;
pub mod datetime;
pub mod error;
pub mod span;

pub use arena::Arena;
pub use config::Config;
pub use datetime::{Date, DateTime, Time, TimeOffset};
pub use error::{Diagnostics, ErrorKind, ParseError};
pub use span::Position;
