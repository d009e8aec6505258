//! Endpoint values and their on-disk record encoding.

pub mod codec;
pub mod entry;

pub use codec::{CodecError, EndpointRecord};
pub use entry::{Endpoint, EndpointError};
