//! Error taxonomy and the single-slot diagnostic sink.
//!
//! Grounded on `faxc_util::error` (thiserror-derived error enums) and
//! `faxc_util::diagnostic::Handler`, but reshaped for spec §2/§4.4/§7: the
//! TOML core reports *one* diagnostic and halts, where the teacher's
//! `Handler` accumulates a `Vec<Diagnostic>` across a whole compilation.

use std::fmt;

use thiserror::Error;

use crate::span::Position;

/// Semantic category of a parse failure (spec §7's taxonomy — categories,
/// not a type per bullet).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Forbidden control byte, unterminated string, bad escape, bad
    /// numeric literal, bad date/time, unexpected byte.
    Lexical,
    /// Missing `=`, missing value, key before `=`, unbalanced brackets.
    Structural,
    /// Duplicate key, table redefinition, inline-table mutation, dotted-key
    /// table clash, non-table path crossing, nesting exceeded, array-of-
    /// tables applied to a non-array key.
    Semantic,
    /// Allocation failure.
    Resource,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::Structural => "structural",
            ErrorKind::Semantic => "semantic",
            ErrorKind::Resource => "resource",
        };
        f.write_str(s)
    }
}

/// A single parse failure: category, message, and the position it was
/// raised at.
///
/// `Display` renders as `[line:L,col:C] message`, per spec §7
/// "User-visible behaviour".
#[derive(Clone, Debug, Error, PartialEq)]
#[error("[{position}] {message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    pub fn lexical(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Lexical, message, position)
    }

    pub fn structural(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Structural, message, position)
    }

    pub fn semantic(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Semantic, message, position)
    }

    pub fn resource(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Resource, message, position)
    }
}

/// Captures the first diagnostic raised during a parse and ignores the
/// rest.
///
/// Spec §2: "A single captured error with position (line, column) and
/// human-readable message; reported on first failure; parsing halts on
/// first error." Re-invoking [`Diagnostics::reset`] clears the slot the
/// same way the parser's arena is reset at the start of every `parse`
/// call (spec §5 "Resource discipline").
#[derive(Debug, Default)]
pub struct Diagnostics {
    first: Option<ParseError>,
    /// Small on-stack fallback buffer used when formatting an error
    /// message would itself require an allocation that fails (spec §4.4).
    /// Sized by `Config::error_stack_buffer_size`.
    fallback_capacity: usize,
}

impl Diagnostics {
    pub fn new(fallback_capacity: usize) -> Self {
        Self {
            first: None,
            fallback_capacity,
        }
    }

    /// Record `error` if no error has been recorded yet. Returns `true` if
    /// this call was the one that recorded it.
    pub fn report(&mut self, error: ParseError) -> bool {
        if self.first.is_some() {
            return false;
        }
        self.first = Some(self.clamp(error));
        true
    }

    fn clamp(&self, error: ParseError) -> ParseError {
        if error.message.len() <= self.fallback_capacity || self.fallback_capacity == 0 {
            return error;
        }
        // Formatting overflowed the on-stack fallback budget: fall back to
        // a short, kind-appropriate static message rather than truncating
        // mid-character and risking invalid UTF-8 (spec §4.4).
        let fallback = match error.kind {
            ErrorKind::Lexical => "lexical error (message truncated)",
            ErrorKind::Structural => "structural error (message truncated)",
            ErrorKind::Semantic => "semantic error (message truncated)",
            ErrorKind::Resource => "out of memory",
        };
        ParseError::new(error.kind, fallback, error.position)
    }

    pub fn has_error(&self) -> bool {
        self.first.is_some()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.first.as_ref()
    }

    pub fn take(&mut self) -> Option<ParseError> {
        self.first.take()
    }

    /// Borrowed, human-readable description of the captured failure, or
    /// the empty string if none (spec §6 `error-message()`).
    pub fn message(&self) -> &str {
        match &self.first {
            Some(e) => &e.message,
            None => "",
        }
    }

    pub fn reset(&mut self) {
        self.first = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_only_first_error() {
        let mut d = Diagnostics::new(256);
        assert!(d.report(ParseError::lexical("first", Position::START)));
        assert!(!d.report(ParseError::lexical("second", Position::START)));
        assert_eq!(d.message(), "first");
    }

    #[test]
    fn reset_clears_slot() {
        let mut d = Diagnostics::new(256);
        d.report(ParseError::lexical("boom", Position::START));
        assert!(d.has_error());
        d.reset();
        assert!(!d.has_error());
        assert_eq!(d.message(), "");
    }

    #[test]
    fn display_matches_line_col_prefix() {
        let err = ParseError::structural("missing value after '='", Position::new(12, 3, 7));
        assert_eq!(format!("{err}"), "[line:3,col:7] missing value after '='");
    }
}
