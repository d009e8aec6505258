//! Length-delimited record framing for the server list file.
//!
//! Every record is a varint byte length followed by the bincode body of an
//! [`EndpointRecord`]. There is no header, version marker or checksum, so an
//! empty buffer is a valid encoding of zero records.
//!
//! Records carry no field tags, so the file is not wire-compatible with a
//! protobuf length-delimited stream.

use bincode::Options;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
    #[error("Truncated record: expected {expected} bytes, {remaining} remaining")]
    Truncated { expected: usize, remaining: usize },
    #[error("Record length {0} does not fit in memory")]
    LengthOverflow(u64),
}

/// Wire form of one endpoint, address kept textual until it is parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub address: String,
    pub port: u32,
}

// Varint integers, little endian, trailing bytes rejected inside a record
fn options() -> impl Options {
    bincode::DefaultOptions::new()
}

pub fn encode(records: &[EndpointRecord]) -> Result<Vec<u8>, CodecError> {
    let mut buffer = Vec::new();
    for record in records {
        let body = options().serialize(record)?;
        options().serialize_into(&mut buffer, &(body.len() as u64))?;
        buffer.extend_from_slice(&body);
    }
    Ok(buffer)
}

/// Decodes records until the buffer is exhausted
pub fn decode(bytes: &[u8]) -> Result<Vec<EndpointRecord>, CodecError> {
    let mut records = Vec::new();
    let mut cursor = bytes;

    while !cursor.is_empty() {
        let len: u64 = options().deserialize_from(&mut cursor)?;
        let len = usize::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
        if len > cursor.len() {
            return Err(CodecError::Truncated {
                expected: len,
                remaining: cursor.len(),
            });
        }

        let (body, rest) = cursor.split_at(len);
        records.push(options().deserialize(body)?);
        cursor = rest;
    }

    Ok(records)
}
