//! Backing arena for key bytes, string payloads, and interior containers.
//!
//! Grounded on `faxc_util`'s `bumpalo` dependency (pulled in there for the
//! symbol interner's storage). Spec §3 "Lifecycle": "A single backing arena
//! owns all key bytes, string bytes, and interior tables/arrays... The
//! arena is reset at the start of every `parse` call." `bumpalo::Bump`
//! gives exactly that: `reset()` drops every allocation at once with no
//! per-node destructor bookkeeping.

use bumpalo::Bump;

/// Thin wrapper around [`Bump`] exposing only the allocation entry points
/// the lexer and parser need, so the rest of the crate never has to name
/// `bumpalo` directly.
#[derive(Default)]
pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Copies `s` into the arena and returns a reference with the arena's
    /// lifetime.
    pub fn alloc_str<'a>(&'a self, s: &str) -> &'a str {
        self.bump.alloc_str(s)
    }

    /// Releases every allocation made so far. Invalidates all previously
    /// returned references — callers must not retain them past a reset,
    /// which the borrow checker enforces via `&mut self` here.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Bytes currently allocated, exposed for diagnostics/tests only.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Escape hatch for callers building `bumpalo::collections` types
    /// (e.g. an arena-backed `Vec` for array values) directly against
    /// this arena's storage.
    pub fn bump(&self) -> &Bump {
        &self.bump
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_str_roundtrips() {
        let arena = Arena::new();
        let s = arena.alloc_str("hello");
        assert_eq!(s, "hello");
    }

    #[test]
    fn reset_allows_reuse() {
        let mut arena = Arena::new();
        let _ = arena.alloc_str("first parse's data");
        assert!(arena.allocated_bytes() > 0);
        arena.reset();
        let s = arena.alloc_str("second parse");
        assert_eq!(s, "second parse");
    }
}
