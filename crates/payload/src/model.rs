//! Host-side reconstruction of a payload.

use crate::constants::Shape;
use crate::error::MalformedPayload;
use crate::value::ValueKind;

/// Column definition of a decoded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ValueKind,
}

/// A decoded element or cell: its kind tag plus canonical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: ValueKind,
    pub text: String,
}

impl Cell {
    pub fn new(kind: ValueKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == ValueKind::Placeholder
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.kind {
            ValueKind::Integer => self.text.parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Integer | ValueKind::Float => self.text.parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Boolean => self.text.parse().ok(),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<serde_json::Value> {
        match self.kind {
            ValueKind::Json => serde_json::from_str(&self.text).ok(),
            _ => None,
        }
    }
}

/// Columns plus rows; every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularModel {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    truncated: bool,
}

impl TabularModel {
    pub fn new(
        columns: Vec<Column>,
        rows: Vec<Vec<Cell>>,
        truncated: bool,
    ) -> Result<Self, MalformedPayload> {
        let expected = columns.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(MalformedPayload::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            columns,
            rows,
            truncated,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Whether rows past the encoder's bound were dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

/// An ordered run of items, not necessarily of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialModel {
    pub items: Vec<Cell>,
    pub truncated: bool,
}

/// A single block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextualModel {
    pub text: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedModel {
    Tabular(TabularModel),
    Sequential(SequentialModel),
    Textual(TextualModel),
}

impl DecodedModel {
    pub fn shape(&self) -> Shape {
        match self {
            DecodedModel::Tabular(_) => Shape::Tabular,
            DecodedModel::Sequential(_) => Shape::Sequential,
            DecodedModel::Textual(_) => Shape::Textual,
        }
    }

    /// Rows, items, or 1 for text.
    pub fn len(&self) -> usize {
        match self {
            DecodedModel::Tabular(t) => t.rows.len(),
            DecodedModel::Sequential(s) => s.items.len(),
            DecodedModel::Textual(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DecodedModel::Tabular(t) => t.rows.is_empty(),
            DecodedModel::Sequential(s) => s.items.is_empty(),
            DecodedModel::Textual(t) => t.text.is_empty(),
        }
    }

    pub fn truncated(&self) -> bool {
        match self {
            DecodedModel::Tabular(t) => t.truncated,
            DecodedModel::Sequential(s) => s.truncated,
            DecodedModel::Textual(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, kind: ValueKind) -> Column {
        Column {
            name: name.into(),
            kind,
        }
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let columns = vec![column("a", ValueKind::Integer), column("b", ValueKind::Text)];
        let rows = vec![
            vec![Cell::new(ValueKind::Integer, "1"), Cell::new(ValueKind::Text, "x")],
            vec![Cell::new(ValueKind::Integer, "2")],
        ];
        assert_eq!(
            TabularModel::new(columns, rows, false),
            Err(MalformedPayload::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn cell_accessors_respect_kind() {
        assert_eq!(Cell::new(ValueKind::Integer, "42").as_i64(), Some(42));
        assert_eq!(Cell::new(ValueKind::Text, "42").as_i64(), None);
        assert_eq!(Cell::new(ValueKind::Integer, "42").as_f64(), Some(42.0));
        assert_eq!(Cell::new(ValueKind::Boolean, "true").as_bool(), Some(true));
        assert_eq!(
            Cell::new(ValueKind::Json, r#"{"a":1}"#).as_json(),
            Some(serde_json::json!({"a": 1}))
        );
    }

    #[test]
    fn model_len_and_shape() {
        let model = DecodedModel::Sequential(SequentialModel {
            items: vec![Cell::new(ValueKind::Integer, "1")],
            truncated: true,
        });
        assert_eq!(model.shape(), Shape::Sequential);
        assert_eq!(model.len(), 1);
        assert!(model.truncated());
    }
}
