//! Wire constants shared by the encoder and decoder.

/// Every payload starts with these bytes.
pub const MAGIC: [u8; 3] = *b"EVZ";

/// Current payload layout version.
pub const VERSION: u8 = 1;

/// Default bound on the number of elements (or rows) walked by the encoder.
pub const DEFAULT_MAX_ELEMENTS: usize = 1000;

/// Default nesting bound for structured (JSON) element values.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Upper bound on any count the decoder will accept, independent of the
/// bytes that back it.
pub const MAX_DECODED_ENTRIES: usize = 1 << 20;

/// Shape tag written right after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Tabular = 1,
    Sequential = 2,
    Textual = 3,
}

impl Shape {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Shape::Tabular),
            2 => Some(Shape::Sequential),
            3 => Some(Shape::Textual),
            _ => None,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Shape::Tabular => "tabular",
            Shape::Sequential => "sequential",
            Shape::Textual => "textual",
        })
    }
}
