//! Error types for byte-stream decoding.

use thiserror::Error;

/// Errors raised while writing or reading a byte stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Varint overflows 64 bits")]
    VarintOverflow,

    #[error("Varint is not minimally encoded")]
    NonMinimalVarint,

    #[error("Integer {value} out of range for {target}")]
    IntegerOverflow { value: u64, target: &'static str },

    #[error("Length {len} exceeds limit of {max}")]
    LengthLimit { len: u64, max: u64 },

    #[error("Invalid UTF-8 in string payload")]
    InvalidUtf8,

    #[error("Invalid tag byte {tag} for {context}")]
    InvalidTag { tag: u8, context: &'static str },

    #[error("Snapshot declared {declared} items but only {distinct} are distinct")]
    DuplicateItems { declared: usize, distinct: usize },

    #[error("Item codec error: {0}")]
    Item(String),
}

impl From<serde_json::Error> for WireError {
    fn from(err: serde_json::Error) -> Self {
        WireError::Item(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WireError>;
