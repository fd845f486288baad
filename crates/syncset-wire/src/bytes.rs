//! Growable writer and bounds-checked reader over raw bytes.
//!
//! Unsigned integers are LEB128 varints in the `unsigned-varint` encoding:
//! 7 bits per byte, least significant group first, high bit set on every
//! byte except the last. Only the minimal encoding of a value is accepted.
//! Byte strings are a varint length followed by the raw bytes.

use crate::error::{Result, WireError};
use unsigned_varint::{decode as varint_decode, encode as varint_encode};

/// Longest valid encoding of a u64 varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Default ceiling on a single length prefix (16 MiB).
pub const DEFAULT_MAX_LEN: u64 = 16 * 1024 * 1024;

/// Append-only output buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_varint(&mut self, value: u64) {
        let mut scratch = varint_encode::u64_buffer();
        self.buf
            .extend_from_slice(varint_encode::u64(value, &mut scratch));
    }

    /// Zigzag-encode a signed value so small magnitudes stay short.
    pub fn write_varint_signed(&mut self, value: i64) {
        self.write_varint(((value << 1) ^ (value >> 63)) as u64);
    }

    /// Length-prefixed byte string.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Raw bytes with no length prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discard everything written after the first `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
    max_len: u64,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_max_len(buf, DEFAULT_MAX_LEN)
    }

    /// Reader that rejects any length prefix above `max_len`.
    pub fn with_max_len(buf: &'a [u8], max_len: u64) -> Self {
        Self {
            buf,
            pos: 0,
            max_len,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn max_len(&self) -> u64 {
        self.max_len
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let byte = *self.buf.get(self.pos).ok_or(WireError::UnexpectedEof {
            needed: 1,
            remaining: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let input = &self.buf[self.pos..];
        let (value, rest) = varint_decode::u64(input).map_err(|err| match err {
            varint_decode::Error::Insufficient => WireError::UnexpectedEof {
                needed: input.len() + 1,
                remaining: input.len(),
            },
            varint_decode::Error::NotMinimal => WireError::NonMinimalVarint,
            _ => WireError::VarintOverflow,
        })?;
        let consumed = input.len() - rest.len();
        // The tenth byte may only carry the single remaining bit.
        if consumed == MAX_VARINT_LEN && input[MAX_VARINT_LEN - 1] > 1 {
            return Err(WireError::VarintOverflow);
        }
        self.pos += consumed;
        Ok(value)
    }

    pub fn read_varint_signed(&mut self) -> Result<i64> {
        let raw = self.read_varint()?;
        Ok(((raw >> 1) as i64) ^ -((raw & 1) as i64))
    }

    /// Read a varint that must also fit a `usize` and stay under `max`.
    pub fn read_len(&mut self, max: u64) -> Result<usize> {
        let len = self.read_varint()?;
        if len > max {
            return Err(WireError::LengthLimit { len, max });
        }
        usize::try_from(len).map_err(|_| WireError::IntegerOverflow {
            value: len,
            target: "usize",
        })
    }

    /// Exactly `n` raw bytes.
    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(WireError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Length-prefixed byte string, bounded by the reader's `max_len`.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let max = self.max_len;
        let len = self.read_len(max)?;
        self.read_raw(len)
    }

    pub fn read_str(&mut self) -> Result<&'a str> {
        let bytes = self.read_bytes()?;
        std::str::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_varint_known_encodings() {
        let cases: [(u64, &[u8]); 5] = [
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7f]),
            (128, &[0x80, 0x01]),
            (300, &[0xac, 0x02]),
        ];

        for (value, expected) in cases {
            let mut writer = ByteWriter::new();
            writer.write_varint(value);
            assert_eq!(writer.as_slice(), expected, "encoding of {}", value);
        }
    }

    #[test]
    fn test_varint_max_value() {
        let mut writer = ByteWriter::new();
        writer.write_varint(u64::MAX);
        assert_eq!(writer.len(), MAX_VARINT_LEN);

        let bytes = writer.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_varint().unwrap(), u64::MAX);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_varint_overflow_rejected() {
        // Nine full groups followed by a tenth byte carrying two bits.
        let mut bytes = vec![0xff; 9];
        bytes.push(0x02);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_varint(), Err(WireError::VarintOverflow));

        // Eleven bytes with continuation bits never terminates within the limit.
        let bytes = vec![0x80; 11];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_varint(), Err(WireError::VarintOverflow));
    }

    #[test]
    fn test_non_minimal_varint_rejected() {
        let mut reader = ByteReader::new(&[0x80, 0x80, 0x00]);
        assert_eq!(reader.read_varint(), Err(WireError::NonMinimalVarint));
        assert_eq!(reader.position(), 0);

        let mut reader = ByteReader::new(&[0x81, 0x00]);
        assert_eq!(reader.read_varint(), Err(WireError::NonMinimalVarint));

        // A lone zero byte is the minimal encoding of zero.
        let mut reader = ByteReader::new(&[0x00]);
        assert_eq!(reader.read_varint(), Ok(0));
    }

    #[test]
    fn test_truncated_varint() {
        let bytes = [0x80, 0x80];
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            reader.read_varint(),
            Err(WireError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_truncate_rolls_back_writes() {
        let mut writer = ByteWriter::new();
        writer.write_varint(300);
        let mark = writer.len();
        writer.write_str("partial");
        writer.truncate(mark);
        assert_eq!(writer.as_slice(), &[0xac, 0x02]);
    }

    #[test]
    fn test_signed_zigzag() {
        let mut writer = ByteWriter::new();
        writer.write_varint_signed(-1);
        writer.write_varint_signed(1);
        writer.write_varint_signed(i64::MIN);
        assert_eq!(&writer.as_slice()[..2], &[0x01, 0x02]);

        let bytes = writer.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_varint_signed().unwrap(), -1);
        assert_eq!(reader.read_varint_signed().unwrap(), 1);
        assert_eq!(reader.read_varint_signed().unwrap(), i64::MIN);
    }

    #[test]
    fn test_length_limit() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&[1, 2, 3, 4]);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::with_max_len(&bytes, 3);
        assert_eq!(
            reader.read_bytes(),
            Err(WireError::LengthLimit { len: 4, max: 3 })
        );
    }

    #[test]
    fn test_truncated_bytes() {
        let mut writer = ByteWriter::new();
        writer.write_varint(10);
        writer.write_raw(&[1, 2]);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            reader.read_bytes(),
            Err(WireError::UnexpectedEof {
                needed: 10,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&[0xff, 0xfe]);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_str(), Err(WireError::InvalidUtf8));
    }

    proptest! {
        #[test]
        fn varint_roundtrip(values in prop::collection::vec(any::<u64>(), 0..32)) {
            let mut writer = ByteWriter::new();
            for v in &values {
                writer.write_varint(*v);
            }
            let bytes = writer.into_bytes();
            let mut reader = ByteReader::new(&bytes);
            for v in &values {
                prop_assert_eq!(reader.read_varint().unwrap(), *v);
            }
            prop_assert!(reader.is_empty());
        }

        #[test]
        fn signed_varint_roundtrip(v in any::<i64>()) {
            let mut writer = ByteWriter::new();
            writer.write_varint_signed(v);
            let bytes = writer.into_bytes();
            let mut reader = ByteReader::new(&bytes);
            prop_assert_eq!(reader.read_varint_signed().unwrap(), v);
        }
    }
}
