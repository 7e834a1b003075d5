//! Byte-stream endpoints for the externally supplied transport.
//!
//! The debuggee writes a payload to an outbound sink; the host reads the
//! inbound source to exhaustion and decodes it in one pass.

use std::io::{Read, Write};

use crate::decoder::PayloadDecoder;
use crate::encoder::EncodedPayload;
use crate::error::DecodeError;
use crate::model::DecodedModel;

pub fn write_payload<W: Write>(payload: &EncodedPayload, sink: &mut W) -> std::io::Result<()> {
    sink.write_all(payload.as_bytes())?;
    sink.flush()
}

/// Reads `source` until EOF.
pub fn read_payload<R: Read>(mut source: R) -> std::io::Result<EncodedPayload> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    Ok(EncodedPayload::from(bytes))
}

/// Reads `source` until EOF and decodes the result.
pub fn receive<R: Read>(source: R) -> Result<DecodedModel, DecodeError> {
    let payload = read_payload(source)?;
    Ok(PayloadDecoder::new().decode(payload.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::PayloadEncoder;
    use crate::error::MalformedPayload;

    #[test]
    fn pipe_roundtrip() {
        let report = PayloadEncoder::new().encode(&vec!["a", "b"]).unwrap();
        let mut pipe = Vec::new();
        write_payload(&report.payload, &mut pipe).unwrap();
        let model = receive(pipe.as_slice()).unwrap();
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn empty_stream_is_malformed() {
        let err = receive(std::io::empty()).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(MalformedPayload::BadMagic)));
    }
}
