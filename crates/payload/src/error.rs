//! Error types for encoding and decoding payloads.

use enumviz_buffers::{BufferError, MAX_STR_LEN};
use thiserror::Error;

/// A single element (or cell) that could not be turned into a transmissible
/// value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    #[error("resource handle `{0}` cannot leave the debuggee process")]
    ResourceHandle(String),
    #[error("value nests deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },
    #[error("non-finite number `{0}`")]
    NonFinite(String),
    #[error("row has {found} cells but the table declares {expected} columns")]
    RowWidth { expected: usize, found: usize },
    #[error("structured value failed to serialize: {0}")]
    Json(String),
    #[error("text of {len} bytes exceeds the {max} byte limit")]
    TooLong { len: usize, max: usize },
}

/// Failure of [`PayloadEncoder::encode`](crate::PayloadEncoder::encode).
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The source exposes neither a tabular, enumerable, nor text capability.
    #[error("cannot visualize a value of type `{type_name}`")]
    UnsupportedType { type_name: String },
    /// An element failed and the error policy is `Abort`. `index` is the
    /// element index for sequences and the row index for tables.
    #[error("element {index} cannot be serialized: {source}")]
    Serialization {
        index: usize,
        #[source]
        source: SerializationError,
    },
    /// A column name, language hint or text body exceeds the text limit.
    #[error("{what} of {len} bytes exceeds the {max} byte limit")]
    TextTooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("failed to write payload: {0}")]
    Io(#[from] std::io::Error),
}

/// The byte stream is not a well-formed payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedPayload {
    #[error("payload does not start with the EVZ magic")]
    BadMagic,
    #[error("unsupported payload version {0}")]
    UnsupportedVersion(u8),
    #[error("unknown shape tag {0}")]
    UnknownShape(u8),
    #[error("unknown value kind tag {tag} at offset {offset}")]
    UnknownKind { tag: u8, offset: usize },
    #[error("invalid flag byte {value} at offset {offset}")]
    InvalidFlag { value: u8, offset: usize },
    #[error("payload ends early: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("declared {what} count {declared} does not fit the {remaining} bytes remaining")]
    CountMismatch {
        what: &'static str,
        declared: usize,
        remaining: usize,
    },
    #[error("declared {what} count {declared} exceeds the limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        declared: usize,
        limit: usize,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{count} trailing bytes after the payload body")]
    TrailingBytes { count: usize },
}

impl From<BufferError> for MalformedPayload {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer {
                offset,
                needed,
                remaining,
            } => MalformedPayload::Truncated {
                offset,
                needed,
                remaining,
            },
            BufferError::InvalidUtf8 { offset } => MalformedPayload::InvalidUtf8 { offset },
            BufferError::StringTooLong { len } => MalformedPayload::LimitExceeded {
                what: "string byte",
                declared: len,
                limit: MAX_STR_LEN,
            },
        }
    }
}

/// Failure while receiving a payload from a byte source.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Malformed(#[from] MalformedPayload),
    #[error("failed to read payload: {0}")]
    Io(#[from] std::io::Error),
}
