//! Host-side payload decoder and shape classifier.

use enumviz_buffers::Reader;
use tracing::debug;

use crate::constants::{Shape, MAGIC, MAX_DECODED_ENTRIES, VERSION};
use crate::error::MalformedPayload;
use crate::model::{Cell, Column, DecodedModel, SequentialModel, TabularModel, TextualModel};
use crate::value::ValueKind;

/// Smallest encoding of a cell: kind tag + empty string length.
const MIN_CELL_BYTES: usize = 1 + 4;
/// Smallest encoding of a column: empty name length + kind tag.
const MIN_COLUMN_BYTES: usize = 4 + 1;

/// Parses payload bytes back into a [`DecodedModel`].
///
/// Decoding is a single forward pass; the shape tag alone decides the model
/// variant. Any inconsistency (unknown tags, counts the remaining bytes cannot
/// satisfy, trailing bytes) is a [`MalformedPayload`] error, never a partial
/// model.
#[derive(Debug, Clone)]
pub struct PayloadDecoder {
    max_entries: usize,
}

impl Default for PayloadDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder {
    pub fn new() -> Self {
        Self {
            max_entries: MAX_DECODED_ENTRIES,
        }
    }

    /// Caps any declared count (items, rows, columns) at `max_entries`.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self { max_entries }
    }

    /// Reads only the header and returns the payload's shape.
    pub fn classify(&self, bytes: &[u8]) -> Result<Shape, MalformedPayload> {
        read_header(&mut Reader::new(bytes))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedModel, MalformedPayload> {
        let mut reader = Reader::new(bytes);
        let shape = read_header(&mut reader)?;
        let model = match shape {
            Shape::Tabular => DecodedModel::Tabular(self.read_tabular(&mut reader)?),
            Shape::Sequential => DecodedModel::Sequential(self.read_sequential(&mut reader)?),
            Shape::Textual => DecodedModel::Textual(read_textual(&mut reader)?),
        };
        if !reader.is_empty() {
            return Err(MalformedPayload::TrailingBytes {
                count: reader.size(),
            });
        }
        debug!(%shape, entries = model.len(), bytes = bytes.len(), "decoded payload");
        Ok(model)
    }

    fn read_tabular(&self, reader: &mut Reader<'_>) -> Result<TabularModel, MalformedPayload> {
        let ncols = self.read_count(reader, "column", MIN_COLUMN_BYTES)?;
        let mut columns = Vec::with_capacity(ncols);
        for _ in 0..ncols {
            let name = reader.str()?.to_owned();
            let kind = read_kind(reader)?;
            columns.push(Column { name, kind });
        }

        let nrows = self.read_count(reader, "row", ncols * MIN_CELL_BYTES)?;
        // Zero-column rows occupy no bytes, so the count alone is not backed.
        let mut rows = Vec::with_capacity(nrows.min(reader.size()));
        for _ in 0..nrows {
            let mut row = Vec::with_capacity(ncols);
            for _ in 0..ncols {
                row.push(read_cell(reader)?);
            }
            rows.push(row);
        }
        let truncated = read_flag(reader)?;
        TabularModel::new(columns, rows, truncated)
    }

    fn read_sequential(&self, reader: &mut Reader<'_>) -> Result<SequentialModel, MalformedPayload> {
        let count = self.read_count(reader, "item", MIN_CELL_BYTES)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(read_cell(reader)?);
        }
        let truncated = read_flag(reader)?;
        Ok(SequentialModel { items, truncated })
    }

    /// Reads a count and checks it against the limit and against the bytes
    /// left, given the minimum size of one entry.
    fn read_count(
        &self,
        reader: &mut Reader<'_>,
        what: &'static str,
        min_entry_bytes: usize,
    ) -> Result<usize, MalformedPayload> {
        let declared = reader.u32()? as usize;
        if declared > self.max_entries {
            return Err(MalformedPayload::LimitExceeded {
                what,
                declared,
                limit: self.max_entries,
            });
        }
        let remaining = reader.size();
        if declared.saturating_mul(min_entry_bytes) > remaining {
            return Err(MalformedPayload::CountMismatch {
                what,
                declared,
                remaining,
            });
        }
        Ok(declared)
    }
}

fn read_header(reader: &mut Reader<'_>) -> Result<Shape, MalformedPayload> {
    let magic = reader.buf(MAGIC.len()).map_err(|_| MalformedPayload::BadMagic)?;
    if magic != MAGIC {
        return Err(MalformedPayload::BadMagic);
    }
    let version = reader.u8()?;
    if version != VERSION {
        return Err(MalformedPayload::UnsupportedVersion(version));
    }
    let tag = reader.u8()?;
    Shape::from_tag(tag).ok_or(MalformedPayload::UnknownShape(tag))
}

fn read_textual(reader: &mut Reader<'_>) -> Result<TextualModel, MalformedPayload> {
    let language = if read_flag(reader)? {
        Some(reader.str()?.to_owned())
    } else {
        None
    };
    let text = reader.str()?.to_owned();
    Ok(TextualModel { text, language })
}

fn read_kind(reader: &mut Reader<'_>) -> Result<ValueKind, MalformedPayload> {
    let offset = reader.position();
    let tag = reader.u8()?;
    ValueKind::from_tag(tag).ok_or(MalformedPayload::UnknownKind { tag, offset })
}

fn read_cell(reader: &mut Reader<'_>) -> Result<Cell, MalformedPayload> {
    let kind = read_kind(reader)?;
    let text = reader.str()?.to_owned();
    Ok(Cell { kind, text })
}

fn read_flag(reader: &mut Reader<'_>) -> Result<bool, MalformedPayload> {
    let offset = reader.position();
    match reader.u8()? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(MalformedPayload::InvalidFlag { value, offset }),
    }
}
