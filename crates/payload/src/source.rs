//! Debuggee-side view of the value being inspected.
//!
//! A [`SourceObject`] reports what it can do as a single [`Capability`]
//! variant. The encoder asks for it once and never type-checks afterwards.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::value::{SourceValue, ValueKind};

/// Column declaration of a tabular source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ValueKind,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Row/column access to a tabular value.
pub trait TabularSource {
    fn columns(&self) -> Vec<ColumnDef>;
    fn rows(&self) -> Box<dyn Iterator<Item = Vec<SourceValue>> + '_>;

    /// Called before `columns` with the number of rows the encoder will
    /// write. Sources that derive their columns from row data must derive
    /// them from those rows only. `rows` must still yield one row past the
    /// limit if there is one, so truncation can be detected.
    fn limit_rows(&mut self, _max_rows: usize) {}
}

/// What a source object can be visualized as.
pub enum Capability<'a> {
    Tabular(Box<dyn TabularSource + 'a>),
    Enumerable(Box<dyn Iterator<Item = SourceValue> + 'a>),
    Text(Cow<'a, str>),
    None,
}

impl Capability<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Tabular(_) => "tabular",
            Capability::Enumerable(_) => "enumerable",
            Capability::Text(_) => "text",
            Capability::None => "none",
        }
    }
}

/// Runtime type information reported alongside the capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub enumerable: bool,
    pub tabular: bool,
}

/// A live value in the debuggee. Only read, never mutated, while encoding.
pub trait SourceObject {
    fn type_name(&self) -> Cow<'_, str>;

    fn capability(&self) -> Capability<'_>;

    fn descriptor(&self) -> TypeDescriptor {
        let capability = self.capability();
        TypeDescriptor {
            name: self.type_name().into_owned(),
            enumerable: matches!(capability, Capability::Enumerable(_)),
            tabular: matches!(capability, Capability::Tabular(_)),
        }
    }
}

impl<T: Clone + Into<SourceValue>> SourceObject for Vec<T> {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Enumerable(Box::new(self.iter().cloned().map(Into::into)))
    }
}

impl SourceObject for str {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("str")
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Text(Cow::Borrowed(self))
    }
}

impl SourceObject for String {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("String")
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Text(Cow::Borrowed(self.as_str()))
    }
}

/// JSON arrays of objects are tables, other arrays are sequences, strings are
/// text. Any other JSON value has no visualizable capability.
impl SourceObject for Value {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(match self {
            Value::Null => "json null",
            Value::Bool(_) => "json boolean",
            Value::Number(_) => "json number",
            Value::String(_) => "json string",
            Value::Array(_) => "json array",
            Value::Object(_) => "json object",
        })
    }

    fn capability(&self) -> Capability<'_> {
        match self {
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                Capability::Tabular(Box::new(JsonRecords::new(items)))
            }
            Value::Array(items) => {
                Capability::Enumerable(Box::new(items.iter().map(SourceValue::from)))
            }
            Value::String(s) => Capability::Text(Cow::Borrowed(s.as_str())),
            _ => Capability::None,
        }
    }
}

/// In-memory table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<SourceValue>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<SourceValue>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn with_row<I, V>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SourceValue>,
    {
        self.push_row(cells);
        self
    }
}

impl TabularSource for Table {
    fn columns(&self) -> Vec<ColumnDef> {
        self.columns.clone()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<SourceValue>> + '_> {
        Box::new(self.rows.iter().cloned())
    }
}

impl SourceObject for Table {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Tabular(Box::new(self))
    }
}

impl<T: TabularSource + ?Sized> TabularSource for &T {
    fn columns(&self) -> Vec<ColumnDef> {
        (**self).columns()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<SourceValue>> + '_> {
        (**self).rows()
    }
}

/// A sequence produced on demand, possibly unbounded.
///
/// The generated iterator must own its state; each encode calls the
/// generator afresh.
///
/// ```
/// use enumviz_payload::{Capability, SequenceSource, SourceObject, SourceValue};
///
/// let naturals = SequenceSource::new("Naturals", || (0u64..).map(SourceValue::from));
/// assert!(matches!(naturals.capability(), Capability::Enumerable(_)));
/// ```
pub struct SequenceSource<F> {
    name: String,
    make_iter: F,
}

impl<F, I> SequenceSource<F>
where
    F: Fn() -> I,
    I: Iterator<Item = SourceValue>,
{
    pub fn new(name: impl Into<String>, make_iter: F) -> Self {
        Self {
            name: name.into(),
            make_iter,
        }
    }
}

impl<F, I> SourceObject for SequenceSource<F>
where
    F: Fn() -> I,
    I: Iterator<Item = SourceValue> + 'static,
{
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name.as_str())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::Enumerable(Box::new((self.make_iter)()))
    }
}

/// A value with no visualizable capability, e.g. a thread or a socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueObject {
    pub type_name: String,
}

impl OpaqueObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl SourceObject for OpaqueObject {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.type_name.as_str())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::None
    }
}

/// Table view over a JSON array of objects. Columns are the union of keys in
/// first-seen order; missing keys read as null.
///
/// Columns are derived lazily, and after [`TabularSource::limit_rows`] only
/// from the records that will be written.
pub struct JsonRecords<'a> {
    records: &'a [Value],
    column_rows: usize,
}

impl<'a> JsonRecords<'a> {
    pub fn new(records: &'a [Value]) -> Self {
        Self {
            records,
            column_rows: records.len(),
        }
    }
}

fn union_columns(records: &[Value]) -> Vec<ColumnDef> {
    let mut columns: Vec<ColumnDef> = Vec::new();
    for map in records.iter().filter_map(Value::as_object) {
        for (key, value) in map {
            let kind = SourceValue::from(value).kind();
            match columns.iter().position(|c| &c.name == key) {
                Some(i) if columns[i].kind == ValueKind::Null => columns[i].kind = kind,
                Some(_) => {}
                None => columns.push(ColumnDef::new(key.clone(), kind)),
            }
        }
    }
    columns
}

fn record_row(columns: &[ColumnDef], map: &Map<String, Value>) -> Vec<SourceValue> {
    columns
        .iter()
        .map(|c| map.get(&c.name).map_or(SourceValue::Null, SourceValue::from))
        .collect()
}

impl TabularSource for JsonRecords<'_> {
    fn columns(&self) -> Vec<ColumnDef> {
        union_columns(&self.records[..self.column_rows])
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Vec<SourceValue>> + '_> {
        let columns = self.columns();
        Box::new(
            self.records
                .iter()
                .filter_map(Value::as_object)
                .map(move |map| record_row(&columns, map)),
        )
    }

    fn limit_rows(&mut self, max_rows: usize) {
        let keep = max_rows.saturating_add(1).min(self.records.len());
        self.records = &self.records[..keep];
        self.column_rows = max_rows.min(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vec_is_enumerable() {
        let v = vec![1, 2, 3];
        let descriptor = v.descriptor();
        assert!(descriptor.enumerable);
        assert!(!descriptor.tabular);
        assert!(descriptor.name.contains("Vec"));
    }

    #[test]
    fn string_is_text() {
        let s = String::from("hello");
        assert!(matches!(s.capability(), Capability::Text(t) if t == "hello"));
    }

    #[test]
    fn opaque_has_no_capability() {
        let o = OpaqueObject::new("System.Threading.Thread");
        let descriptor = o.descriptor();
        assert!(!descriptor.enumerable && !descriptor.tabular);
        assert_eq!(o.capability().name(), "none");
    }

    #[test]
    fn json_records_union_columns_in_first_seen_order() {
        let value = json!([
            {"id": 1, "name": "Alice"},
            {"id": 2, "email": "bob@example.com", "name": null},
        ]);
        let Capability::Tabular(table) = value.capability() else {
            panic!("expected tabular");
        };
        let names: Vec<_> = table.columns().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["id", "name", "email"]);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0][2], SourceValue::Null);
        assert_eq!(rows[1][1], SourceValue::Null);
        assert_eq!(rows[1][2], SourceValue::Text("bob@example.com".into()));
    }

    #[test]
    fn json_column_kind_skips_leading_nulls() {
        let value = json!([{"score": null}, {"score": 1.5}]);
        let Capability::Tabular(table) = value.capability() else {
            panic!("expected tabular");
        };
        assert_eq!(table.columns()[0].kind, ValueKind::Float);
    }

    #[test]
    fn limited_records_ignore_keys_past_the_limit() {
        let records = vec![
            json!({"a": 0}),
            json!({"a": 1}),
            json!({"secret": "hunter2"}),
            json!({"other": true}),
        ];
        let mut table = JsonRecords::new(&records);
        table.limit_rows(2);
        let names: Vec<_> = table.columns().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["a"]);
        // one row past the limit is still visible for truncation detection
        assert_eq!(table.rows().count(), 3);
        assert!(table.rows().all(|row| row.len() == 1));
    }

    #[test]
    fn limit_past_the_end_keeps_every_record() {
        let records = vec![json!({"a": 0}), json!({"b": 1})];
        let mut table = JsonRecords::new(&records);
        table.limit_rows(10);
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.rows().count(), 2);
    }

    #[test]
    fn mixed_json_array_is_a_sequence() {
        let value = json!([1, {"a": 1}, "x"]);
        assert_eq!(value.capability().name(), "enumerable");
        assert_eq!(json!(5).capability().name(), "none");
        assert_eq!(json!([]).capability().name(), "enumerable");
    }
}
