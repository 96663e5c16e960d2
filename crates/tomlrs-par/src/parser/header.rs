//! Table-header and array-of-tables-header handling (spec §4.2 "Header
//! handling" / "Array-of-tables handling").

use tomlrs_util::{ParseError, Position};

use crate::parser::core::ParseSession;
use crate::parser::path::{self, IntermediateKind};

impl<'a> ParseSession<'a> {
    /// Handles a `[a.b.c]` or `[[a.b.c]]` header starting right after the
    /// opening bracket(s) have already been consumed by the lexer.
    pub(crate) fn parse_header(&mut self, start_pos: Position) -> Result<(), ParseError> {
        let (path, is_array) = self.read_header_path()?;
        if path.is_empty() {
            return Err(ParseError::structural("empty table header", start_pos));
        }
        path::check_depth(path.len(), self.config.max_nesting, start_pos)?;

        let (intermediate, final_slice) = path.split_at(path.len() - 1);
        let final_key = final_slice[0];

        let mut root = std::mem::take(&mut self.root);
        let mut prefix = Vec::new();
        let walked = path::walk_intermediate(
            &mut root,
            &mut prefix,
            intermediate,
            &mut self.sets,
            IntermediateKind::Implicit,
            start_pos,
        );
        let result = match walked {
            Ok(target) if is_array => {
                path::resolve_array_table(target, &mut prefix, final_key, &self.sets, start_pos)
            }
            Ok(target) => {
                path::resolve_explicit_table(target, &mut prefix, final_key, &mut self.sets, start_pos)
            }
            Err(err) => Err(err),
        };
        self.root = root;
        result?;

        self.current_table_path = path;
        Ok(())
    }
}
