//! Payload codec for the enumerable visualizer.
//!
//! The debuggee side turns a live [`SourceObject`] into an
//! [`EncodedPayload`] with [`PayloadEncoder`]; the host side rebuilds a
//! [`DecodedModel`] with [`PayloadDecoder`]. The payload never references the
//! debuggee: numbers, dates and structured values all travel as canonical
//! text, tagged with their [`ValueKind`].
//!
//! ```
//! use enumviz_payload::{DecodedModel, PayloadDecoder, PayloadEncoder};
//!
//! let report = PayloadEncoder::new().encode(&vec![1, 2, 3]).unwrap();
//! let model = PayloadDecoder::new().decode(report.payload.as_bytes()).unwrap();
//! let DecodedModel::Sequential(seq) = model else { unreachable!() };
//! let texts: Vec<_> = seq.items.iter().map(|c| c.text.as_str()).collect();
//! assert_eq!(texts, ["1", "2", "3"]);
//! ```

mod constants;
mod decoder;
mod encoder;
mod error;
mod model;
mod options;
mod source;
mod value;

pub mod transport;

pub use constants::{
    Shape, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENTS, MAGIC, MAX_DECODED_ENTRIES, VERSION,
};
pub use decoder::PayloadDecoder;
pub use encoder::{EncodeReport, EncodedPayload, PayloadEncoder};
pub use error::{DecodeError, EncodeError, MalformedPayload, SerializationError};
pub use model::{Cell, Column, DecodedModel, SequentialModel, TabularModel, TextualModel};
pub use options::{EncoderOptions, ErrorPolicy};
pub use source::{
    Capability, ColumnDef, JsonRecords, OpaqueObject, SequenceSource, SourceObject, Table,
    TabularSource, TypeDescriptor,
};
pub use value::{SourceValue, ValueKind};
