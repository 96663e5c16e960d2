//! Build-time tuning knobs (spec §6), modeled as a runtime `Config` rather
//! than compile-time constants: spec §6 calls these "build-time tuning"
//! but every one of them (besides `log-lexer-state`, which gates compiled
//! code and is a real Cargo feature — see the `log-lexer-state` feature on
//! `tomlrs-lex`/`tomlrs-par`) is a capacity hint or a depth limit that a
//! caller may reasonably want to vary per document, so it is exposed as a
//! constructible value shared by the lexer and the parser.

/// Tuning knobs shared by [`crate::Arena`]-backed lexing and parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum depth of table nesting (table headers, dotted keys, inline
    /// tables, and arrays all share this counter — spec §5 "Bounded
    /// depth", generalized per `SPEC_FULL.md` §0.7).
    pub max_nesting: u8,
    /// Trace each lexer state-stack transition via `log::trace!`. Has no
    /// effect unless the crate is built with the `log-lexer-state`
    /// feature.
    pub log_lexer_state: bool,
    /// Surface `Token::Comment` to the parser instead of discarding
    /// comments silently.
    pub emit_comment_token: bool,
    /// Initial capacity for the lexer's scratch buffer.
    pub lexer_buffer_size: usize,
    /// Initial capacity for arrays and key-path scratch vectors.
    pub initial_array_size: usize,
    /// Initial capacity for table maps.
    pub initial_hashmap_size: usize,
    /// Size of the diagnostic sink's on-stack fallback message buffer.
    pub error_stack_buffer_size: usize,
}

static_assertions::const_assert!(u8::MAX as usize >= 6);

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nesting: 6,
            log_lexer_state: false,
            emit_comment_token: false,
            lexer_buffer_size: 1024,
            initial_array_size: 16,
            initial_hashmap_size: 32,
            error_stack_buffer_size: 256,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nesting(mut self, max_nesting: u8) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub fn with_log_lexer_state(mut self, enabled: bool) -> Self {
        self.log_lexer_state = enabled;
        self
    }

    pub fn with_emit_comment_token(mut self, emit: bool) -> Self {
        self.emit_comment_token = emit;
        self
    }

    pub fn with_lexer_buffer_size(mut self, size: usize) -> Self {
        self.lexer_buffer_size = size;
        self
    }

    pub fn with_initial_array_size(mut self, size: usize) -> Self {
        self.initial_array_size = size;
        self
    }

    pub fn with_initial_hashmap_size(mut self, size: usize) -> Self {
        self.initial_hashmap_size = size;
        self
    }

    pub fn with_error_stack_buffer_size(mut self, size: usize) -> Self {
        self.error_stack_buffer_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let c = Config::default();
        assert_eq!(c.max_nesting, 6);
        assert!(!c.log_lexer_state);
        assert!(!c.emit_comment_token);
        assert_eq!(c.lexer_buffer_size, 1024);
        assert_eq!(c.initial_array_size, 16);
        assert_eq!(c.initial_hashmap_size, 32);
        assert_eq!(c.error_stack_buffer_size, 256);
    }

    #[test]
    fn builder_overrides_apply() {
        let c = Config::new().with_max_nesting(3).with_emit_comment_token(true);
        assert_eq!(c.max_nesting, 3);
        assert!(c.emit_comment_token);
    }
}
