//! Debuggee-side payload encoder.

use std::io::Write;

use enumviz_buffers::{Writer, MAX_STR_LEN};
use tracing::{debug, warn};

use crate::constants::{Shape, MAGIC, MAX_DECODED_ENTRIES, VERSION};
use crate::error::{EncodeError, SerializationError};
use crate::options::{EncoderOptions, ErrorPolicy};
use crate::source::{Capability, ColumnDef, SourceObject, TabularSource};
use crate::value::{SourceValue, ValueKind};

/// Self-contained encoded representation of an inspected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload(Vec<u8>);

impl EncodedPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for EncodedPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for EncodedPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Result of a successful encode.
#[derive(Debug, Clone)]
pub struct EncodeReport {
    pub payload: EncodedPayload,
    pub shape: Shape,
    /// Elements or rows written (1 for text).
    pub entries: usize,
    pub truncated: bool,
    /// Elements (or rows) replaced by placeholders, with the reason.
    pub degraded: Vec<(usize, SerializationError)>,
}

/// Turns a [`SourceObject`] into an [`EncodedPayload`].
///
/// Layout: `"EVZ"`, version byte, shape tag, then the shape body. All counts
/// are big-endian `u32`; strings are `u32` length + UTF-8.
pub struct PayloadEncoder {
    pub writer: Writer,
    options: EncoderOptions,
    degraded: Vec<(usize, SerializationError)>,
}

impl Default for PayloadEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadEncoder {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    /// `max_elements` is capped at [`MAX_DECODED_ENTRIES`] and
    /// `max_text_bytes` at the wire's string limit.
    pub fn with_options(mut options: EncoderOptions) -> Self {
        options.max_elements = options.max_elements.min(MAX_DECODED_ENTRIES);
        options.max_text_bytes = options.max_text_bytes.min(MAX_STR_LEN);
        Self {
            writer: Writer::new(),
            options,
            degraded: Vec::new(),
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encodes `source`, classifying it exactly once.
    pub fn encode<S: SourceObject + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<EncodeReport, EncodeError> {
        self.writer.reset();
        self.degraded.clear();

        let (shape, entries, truncated) = match source.capability() {
            Capability::Tabular(mut table) => {
                table.limit_rows(self.options.max_elements);
                self.write_header(Shape::Tabular);
                let (rows, truncated) = self.write_tabular(&*table)?;
                (Shape::Tabular, rows, truncated)
            }
            Capability::Enumerable(items) => {
                self.write_header(Shape::Sequential);
                let (count, truncated) = self.write_sequence(items)?;
                (Shape::Sequential, count, truncated)
            }
            Capability::Text(text) => {
                self.write_header(Shape::Textual);
                let hint = self.options.language_hint.clone();
                self.write_text(&text, hint.as_deref())?;
                (Shape::Textual, 1, false)
            }
            Capability::None => {
                let type_name = source.type_name().into_owned();
                warn!(%type_name, "value has no visualizable capability");
                return Err(EncodeError::UnsupportedType { type_name });
            }
        };

        let payload = EncodedPayload(self.writer.flush());
        debug!(
            %shape,
            entries,
            truncated,
            degraded = self.degraded.len(),
            bytes = payload.len(),
            "encoded payload"
        );
        Ok(EncodeReport {
            payload,
            shape,
            entries,
            truncated,
            degraded: std::mem::take(&mut self.degraded),
        })
    }

    /// Encodes `source` and writes the payload to `sink`.
    pub fn encode_to<S, W>(&mut self, source: &S, sink: &mut W) -> Result<EncodeReport, EncodeError>
    where
        S: SourceObject + ?Sized,
        W: Write,
    {
        let report = self.encode(source)?;
        sink.write_all(report.payload.as_bytes())?;
        sink.flush()?;
        Ok(report)
    }

    fn write_header(&mut self, shape: Shape) {
        self.writer.buf(&MAGIC);
        self.writer.u8(VERSION);
        self.writer.u8(shape.tag());
    }

    fn write_tabular(&mut self, table: &dyn TabularSource) -> Result<(usize, bool), EncodeError> {
        let columns = table.columns();
        for column in &columns {
            self.check_text("column name", &column.name)?;
        }
        let max_depth = self.options.max_depth;
        let max_rows = self.options.max_elements;

        let mut rows: Vec<Vec<(ValueKind, String)>> = Vec::new();
        let mut truncated = false;
        for (index, row) in table.rows().enumerate() {
            if index == max_rows {
                truncated = true;
                break;
            }
            rows.push(self.canonical_row(index, &columns, row, max_depth)?);
        }
        if truncated {
            warn!(max_rows, "table truncated");
        }

        self.writer.u32(columns.len() as u32);
        for column in &columns {
            self.writer.str(&column.name)?;
            self.writer.u8(column.kind.tag());
        }
        self.writer.u32(rows.len() as u32);
        for row in &rows {
            for (kind, text) in row {
                self.write_cell(*kind, text)?;
            }
        }
        self.writer.u8(truncated as u8);
        Ok((rows.len(), truncated))
    }

    fn canonical_row(
        &mut self,
        index: usize,
        columns: &[ColumnDef],
        row: Vec<SourceValue>,
        max_depth: usize,
    ) -> Result<Vec<(ValueKind, String)>, EncodeError> {
        let found = row.len();
        if found != columns.len() {
            let err = SerializationError::RowWidth {
                expected: columns.len(),
                found,
            };
            self.degrade(index, err)?;
        }
        let mut cells: Vec<(ValueKind, String)> = Vec::with_capacity(columns.len());
        for value in row.into_iter().take(columns.len()) {
            cells.push(self.canonical(index, &value, max_depth)?);
        }
        while cells.len() < columns.len() {
            let err = SerializationError::RowWidth {
                expected: columns.len(),
                found,
            };
            cells.push((ValueKind::Placeholder, placeholder_text(&err)));
        }
        Ok(cells)
    }

    fn write_sequence(
        &mut self,
        items: Box<dyn Iterator<Item = SourceValue> + '_>,
    ) -> Result<(usize, bool), EncodeError> {
        let max_depth = self.options.max_depth;
        let max_elements = self.options.max_elements;

        let mut cells: Vec<(ValueKind, String)> = Vec::new();
        let mut truncated = false;
        // Pull at most max_elements + 1 so infinite sequences terminate.
        for (index, value) in items.take(max_elements.saturating_add(1)).enumerate() {
            if index == max_elements {
                truncated = true;
                break;
            }
            cells.push(self.canonical(index, &value, max_depth)?);
        }
        if truncated {
            warn!(max_elements, "sequence truncated");
        }

        self.writer.u32(cells.len() as u32);
        for (kind, text) in &cells {
            self.write_cell(*kind, text)?;
        }
        self.writer.u8(truncated as u8);
        Ok((cells.len(), truncated))
    }

    fn write_text(&mut self, text: &str, language: Option<&str>) -> Result<(), EncodeError> {
        self.check_text("text", text)?;
        match language {
            Some(language) => {
                self.check_text("language hint", language)?;
                self.writer.u8(1);
                self.writer.str(language)?;
            }
            None => self.writer.u8(0),
        }
        self.writer.str(text)?;
        Ok(())
    }

    fn write_cell(&mut self, kind: ValueKind, text: &str) -> Result<(), EncodeError> {
        self.writer.u8(kind.tag());
        self.writer.str(text)?;
        Ok(())
    }

    fn check_text(&self, what: &'static str, text: &str) -> Result<(), EncodeError> {
        let max = self.options.max_text_bytes;
        if text.len() > max {
            return Err(EncodeError::TextTooLong {
                what,
                len: text.len(),
                max,
            });
        }
        Ok(())
    }

    fn canonical(
        &mut self,
        index: usize,
        value: &SourceValue,
        max_depth: usize,
    ) -> Result<(ValueKind, String), EncodeError> {
        let max = self.options.max_text_bytes;
        let canonical = value.to_canonical(max_depth).and_then(|text| {
            if text.len() > max {
                Err(SerializationError::TooLong {
                    len: text.len(),
                    max,
                })
            } else {
                Ok(text)
            }
        });
        match canonical {
            Ok(text) => Ok((value.kind(), text)),
            Err(err) => {
                let text = placeholder_text(&err);
                self.degrade(index, err)?;
                Ok((ValueKind::Placeholder, text))
            }
        }
    }

    fn degrade(&mut self, index: usize, err: SerializationError) -> Result<(), EncodeError> {
        match self.options.on_error {
            ErrorPolicy::Abort => Err(EncodeError::Serialization { index, source: err }),
            ErrorPolicy::Placeholder => {
                warn!(index, error = %err, "element replaced with placeholder");
                self.degraded.push((index, err));
                Ok(())
            }
        }
    }
}

fn placeholder_text(err: &SerializationError) -> String {
    format!("<unrepresentable: {err}>")
}
