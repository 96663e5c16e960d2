//! Table-path resolution shared by header handling and dotted-key
//! handling (spec §4.2 "Header handling" / "Key-value handling").
//!
//! Grounded on `faxc_par`'s recursive-descent style, but where the
//! teacher's `Parser` walks a flat token buffer by index, a TOML table
//! path is walked by *re-resolving from the root on every install* rather
//! than by holding a long-lived `&mut Table` across lexer calls — spec
//! §9's "parser-state stack over recursion" replaces host-stack recursion
//! with an explicit stack; here it is replaced again, with path
//! re-resolution, to sidestep the aliasing a persistent raw pointer
//! (`current target`) would need in safe Rust.

use rustc_hash::FxHashSet;

use tomlrs_util::{ParseError, Position};

use crate::value::{Table, Value};

/// Whether a freshly created intermediate table should be recorded as
/// upgradeable-by-header (`[a.b]` implicitly creating `a`) or as
/// dotted-key-closed (`a.b = 1` implicitly creating `a` via a dotted key
/// — spec §4.2: such a table may still be extended by further dotted
/// keys, e.g. a following `a.c = 2`, but never by a later `[a]` or
/// `[a.b]` header).
#[derive(Clone, Copy)]
pub(crate) enum IntermediateKind {
    Implicit,
    DottedKeyClosed,
}

/// Whether [`resolve_explicit_table`]/[`resolve_array_table`] is
/// resolving the final segment of a `[header]` path rather than a
/// dotted key. Both must respect true inline-table immutability (spec §9
/// "inline-table immutability"), but only a header must also respect
/// dotted-key closure on its own final segment — continuing to extend a
/// dotted-key-created table with more dotted keys, or with a deeper
/// header beneath it, is legal; only re-opening that exact table with a
/// header naming it directly is not.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum WalkContext {
    Header,
    DottedKey,
}

/// The auxiliary membership sets from spec §3 ("implicit-table set",
/// "inline-table set"), plus a third tracking dotted-key closure — a
/// distinct concept from true inline-table immutability that spec §4.2
/// describes but doesn't name. All three are keyed by the full path from
/// the document root, so a membership check at any depth short-circuits a
/// later attempt to reopen that exact table.
#[derive(Default)]
pub(crate) struct TableSets<'a> {
    implicit: FxHashSet<Vec<&'a str>>,
    inline: FxHashSet<Vec<&'a str>>,
    dotted_closed: FxHashSet<Vec<&'a str>>,
}

impl<'a> TableSets<'a> {
    pub(crate) fn is_inline(&self, path: &[&'a str]) -> bool {
        self.inline.contains(path)
    }

    pub(crate) fn is_implicit(&self, path: &[&'a str]) -> bool {
        self.implicit.contains(path)
    }

    pub(crate) fn is_dotted_closed(&self, path: &[&'a str]) -> bool {
        self.dotted_closed.contains(path)
    }

    pub(crate) fn mark_implicit(&mut self, path: Vec<&'a str>) {
        self.implicit.insert(path);
    }

    /// Upgrades an implicit table to explicit. Returns whether it had in
    /// fact been implicit (spec §4.2: "if it exists in the implicit-table
    /// set, remove it from that set... and use it").
    pub(crate) fn upgrade_implicit(&mut self, path: &[&'a str]) -> bool {
        self.implicit.remove(path)
    }

    pub(crate) fn mark_inline(&mut self, path: Vec<&'a str>) {
        self.inline.insert(path);
    }

    pub(crate) fn mark_dotted_closed(&mut self, path: Vec<&'a str>) {
        self.dotted_closed.insert(path);
    }

    fn blocks(&self, path: &[&'a str], context: WalkContext) -> bool {
        self.is_inline(path) || (context == WalkContext::Header && self.is_dotted_closed(path))
    }
}

fn closed_error(position: Position) -> ParseError {
    ParseError::semantic("table is closed to further definition", position)
}

/// Walks every segment but the last, creating missing intermediate
/// Tables (or descending through an existing Table, or the last element
/// of an existing TablesArray) and returns the Table the final segment
/// should be resolved against.
///
/// Only true inline-table immutability blocks a walk through an
/// intermediate segment. Dotted-key closure does not: descending through
/// a table that dotted keys already closed off, in order to define
/// something new beneath it — `[fruit.apple.texture]` after `[fruit]` /
/// `apple.color = "red"` — is legal (spec §4.2's own canonical example,
/// "you can add sub-tables"). Only redefining that exact dotted-closed
/// table via its own header is forbidden, and that is already checked
/// against the final segment by `resolve_explicit_table` /
/// `resolve_array_table`.
pub(crate) fn walk_intermediate<'t, 'a>(
    mut table: &'t mut Table<'a>,
    full_prefix: &mut Vec<&'a str>,
    segments: &[&'a str],
    sets: &mut TableSets<'a>,
    kind: IntermediateKind,
    position: Position,
) -> Result<&'t mut Table<'a>, ParseError> {
    for &seg in segments {
        full_prefix.push(seg);
        if sets.is_inline(full_prefix) {
            return Err(closed_error(position));
        }

        if table.get(seg).is_none() {
            table.insert(seg, Value::Table(Table::new()));
            match kind {
                IntermediateKind::Implicit => sets.mark_implicit(full_prefix.clone()),
                IntermediateKind::DottedKeyClosed => sets.mark_dotted_closed(full_prefix.clone()),
            }
        }

        table = match table.get_mut(seg).expect("segment inserted above if absent") {
            Value::Table(t) => t,
            Value::TablesArray(arr) => arr.last_mut(),
            other => {
                return Err(ParseError::semantic(
                    format!(
                        "table path crosses a non-table value ({})",
                        other.type_name()
                    ),
                    position,
                ));
            }
        };
    }
    Ok(table)
}

/// Resolves the final segment of a `[table]` header: create, upgrade an
/// implicit table, or error on redefinition (spec §4.2 "Header
/// handling").
pub(crate) fn resolve_explicit_table<'a>(
    table: &mut Table<'a>,
    full_prefix: &mut Vec<&'a str>,
    final_key: &'a str,
    sets: &mut TableSets<'a>,
    position: Position,
) -> Result<(), ParseError> {
    full_prefix.push(final_key);
    if sets.blocks(full_prefix, WalkContext::Header) {
        return Err(closed_error(position));
    }

    match table.get(final_key) {
        None => {
            table.insert(final_key, Value::Table(Table::new()));
        }
        Some(Value::Table(_)) if sets.is_implicit(full_prefix) => {
            sets.upgrade_implicit(full_prefix);
        }
        Some(Value::Table(_)) => {
            return Err(ParseError::semantic("table redefined", position));
        }
        Some(other) => {
            return Err(ParseError::semantic(
                format!("table path crosses a non-table value ({})", other.type_name()),
                position,
            ));
        }
    }
    Ok(())
}

/// Resolves the final segment of an `[[array-of-tables]]` header: create
/// a one-element `TablesArray` or append to an existing one (spec §4.2
/// "Array-of-tables handling").
pub(crate) fn resolve_array_table<'a>(
    table: &mut Table<'a>,
    full_prefix: &mut Vec<&'a str>,
    final_key: &'a str,
    sets: &TableSets<'a>,
    position: Position,
) -> Result<(), ParseError> {
    full_prefix.push(final_key);
    if sets.blocks(full_prefix, WalkContext::Header) {
        return Err(closed_error(position));
    }

    match table.get_mut(final_key) {
        None => {
            table.insert(
                final_key,
                Value::TablesArray(crate::value::TablesArray::with_first(Table::new())),
            );
        }
        Some(Value::TablesArray(arr)) => {
            arr.push(Table::new());
        }
        Some(other) => {
            return Err(ParseError::semantic(
                format!(
                    "array-of-tables header applied to a non-array key ({})",
                    other.type_name()
                ),
                position,
            ));
        }
    }
    Ok(())
}

/// Installs a scalar/array/inline-table value at the end of a dotted-key
/// path (spec §4.2 "Key-value handling": "The final key must not already
/// exist in the target Table"). Only true inline-table closure applies
/// here — a dotted-key-closed table is exactly what legitimately receives
/// more keys this way.
pub(crate) fn install_value<'a>(
    table: &mut Table<'a>,
    full_prefix: &mut Vec<&'a str>,
    final_key: &'a str,
    value: Value<'a>,
    sets: &TableSets<'a>,
    position: Position,
) -> Result<(), ParseError> {
    full_prefix.push(final_key);
    if sets.is_inline(full_prefix) {
        return Err(closed_error(position));
    }
    if table.contains_key(final_key) {
        return Err(ParseError::semantic("redefinition of key", position));
    }
    table.insert(final_key, value);
    Ok(())
}

pub(crate) fn check_depth(len: usize, max_nesting: u8, position: Position) -> Result<(), ParseError> {
    if len > max_nesting as usize {
        return Err(ParseError::semantic("nesting-depth exceeded", position));
    }
    Ok(())
}
