//! Document tree value model (spec §3 "Data model").
//!
//! Grounded on `faxc_par::ast`'s `Item`/`Expr`/`Literal` tagged unions, but
//! flattened to TOML's eight value kinds and, per spec §3's "A single
//! backing arena owns all key bytes, string bytes, and interior tables/
//! arrays", leaf data (`Key`/`String` payloads, and arrays via
//! `into_bump_slice`) is allocated from [`tomlrs_util::Arena`]. The
//! `Table` map itself is an `IndexMap` rather than an arena-native
//! structure — see `DESIGN.md` for why the container is heap-allocated
//! while its contents borrow the arena.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use tomlrs_util::DateTime;

/// A TOML value. Lifetime `'a` ties every payload back to the arena owned
/// by the [`crate::Parser`] that produced it (spec §3 "Lifecycle").
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(&'a str),
    DateTime(DateTime),
    Array(&'a [Value<'a>]),
    Table(Table<'a>),
    TablesArray(TablesArray<'a>),
}

impl<'a> Value<'a> {
    /// Short tag for error messages ("table path crosses a non-table
    /// value" wants to say what it crossed).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
            Value::TablesArray(_) => "array of tables",
        }
    }

    pub fn as_table(&self) -> Option<&Table<'a>> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// A key-unique, insertion-ordered mapping (spec §3: "mapping from Key to
/// Value, key-unique, order-irrelevant"; insertion order is kept anyway,
/// as it costs nothing with `IndexMap` and matches every other TOML
/// implementation callers are likely to compare against).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table<'a> {
    entries: IndexMap<&'a str, Value<'a>, FxBuildHasher>,
}

impl<'a> Table<'a> {
    pub(crate) fn new() -> Self {
        Self {
            entries: IndexMap::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        self.entries.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value<'a>> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a key known not to be present yet. Callers are responsible
    /// for the "redefinition of key" check (spec §4.2) before calling
    /// this — it is not re-checked here so the one duplicate-key error
    /// message lives in a single place.
    pub(crate) fn insert(&mut self, key: &'a str, value: Value<'a>) {
        self.entries.insert(key, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<'a>)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A repeated `[[header]]` (spec glossary "Array of tables"). Never empty:
/// the syntactic `[[x]]` that creates one always appends its first Table
/// in the same step (spec §3 invariant "every TablesArray has length ≥
/// 1").
#[derive(Debug, Clone, PartialEq)]
pub struct TablesArray<'a> {
    tables: Vec<Table<'a>>,
}

impl<'a> TablesArray<'a> {
    pub(crate) fn with_first(table: Table<'a>) -> Self {
        Self {
            tables: vec![table],
        }
    }

    pub(crate) fn push(&mut self, table: Table<'a>) {
        self.tables.push(table);
    }

    /// Every `TablesArray` in the tree has at least one element by
    /// construction (see the type's doc comment), so this never panics.
    pub(crate) fn last_mut(&mut self) -> &mut Table<'a> {
        self.tables.last_mut().expect("TablesArray is never empty")
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Table<'a>> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

/// The result of a successful [`crate::Parser::parse`] call: the root
/// table plus the arena borrow that backs every payload inside it.
#[derive(Debug)]
pub struct Document<'a> {
    root: Table<'a>,
}

impl<'a> Document<'a> {
    pub(crate) fn new(root: Table<'a>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Table<'a> {
        &self.root
    }
}
