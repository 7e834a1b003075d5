//! Byte buffer utilities for the enumviz payload codec.
//!
//! # Overview
//!
//! - [`Writer`] - Appends big-endian integers and length-prefixed strings
//! - [`Reader`] - Reads them back from a byte slice, failing instead of
//!   panicking when the input is short or not UTF-8
//!
//! # Example
//!
//! ```
//! use enumviz_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u32(0x0203_0405);
//! writer.str("hello").unwrap();
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u32().unwrap(), 0x0203_0405);
//! assert_eq!(reader.str().unwrap(), "hello");
//! assert!(reader.is_empty());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    EndOfBuffer {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    /// Invalid UTF-8 sequence.
    #[error("invalid UTF-8 sequence at offset {offset}")]
    InvalidUtf8 { offset: usize },
    /// String too long for its `u32` length prefix.
    #[error("string of {len} bytes exceeds the {MAX_STR_LEN} byte limit")]
    StringTooLong { len: usize },
}

/// Longest string [`Writer::str`] accepts.
pub const MAX_STR_LEN: usize = u32::MAX as usize;
