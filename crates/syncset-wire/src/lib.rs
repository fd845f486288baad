//! Syncset Wire - byte-stream primitives for replicated collections
//!
//! This crate is the encoder/decoder collaborator used by `syncset-core`:
//! - [`ByteWriter`] / [`ByteReader`] for LEB128 varints and length-prefixed data
//! - [`WireItem`], the per-item codec a replicated collection is generic over
//! - [`Json`], an adapter carrying any serde type as a JSON document
//!
//! # Contract
//!
//! Every [`WireItem`] implementation must be deterministic and symmetric:
//! for any value `v`, decoding the bytes produced by `v.encode(..)` yields a
//! value equal to `v` and consumes exactly those bytes.
//!
//! # Example
//!
//! ```rust
//! use syncset_wire::{ByteReader, ByteWriter, WireItem};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_varint(300);
//! "hello".to_string().encode(&mut writer).unwrap();
//!
//! let bytes = writer.into_bytes();
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_varint().unwrap(), 300);
//! assert_eq!(String::decode(&mut reader).unwrap(), "hello");
//! assert!(reader.is_empty());
//! ```

pub mod bytes;
pub mod error;
pub mod item;
pub mod json;

pub use bytes::{ByteReader, ByteWriter, DEFAULT_MAX_LEN, MAX_VARINT_LEN};
pub use error::{Result, WireError};
pub use item::WireItem;
pub use json::Json;
