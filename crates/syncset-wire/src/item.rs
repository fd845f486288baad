//! The per-item codec trait and implementations for common types.

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{Result, WireError};

/// A value that can be written to and read back from a byte stream.
///
/// Implementations must be deterministic (equal values produce equal bytes)
/// and symmetric (`decode` consumes exactly what `encode` wrote). A value
/// that cannot be represented must fail `encode` rather than write
/// something else in its place.
pub trait WireItem: Sized {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()>;

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self>;
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl WireItem for $ty {
                fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
                    writer.write_varint(*self as u64);
                    Ok(())
                }

                fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
                    let value = reader.read_varint()?;
                    <$ty>::try_from(value).map_err(|_| WireError::IntegerOverflow {
                        value,
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl WireItem for $ty {
                fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
                    writer.write_varint_signed(*self as i64);
                    Ok(())
                }

                fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
                    let value = reader.read_varint_signed()?;
                    <$ty>::try_from(value).map_err(|_| WireError::IntegerOverflow {
                        value: value as u64,
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

impl_unsigned!(u16, u32, u64, usize);
impl_signed!(i8, i16, i32, i64, isize);

// Single raw byte rather than a varint.
impl WireItem for u8 {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_u8(*self);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        reader.read_u8()
    }
}

impl WireItem for bool {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_u8(u8::from(*self));
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            tag => Err(WireError::InvalidTag {
                tag,
                context: "bool",
            }),
        }
    }
}

impl WireItem for char {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_varint(u64::from(u32::from(*self)));
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let raw = u32::decode(reader)?;
        char::from_u32(raw).ok_or(WireError::IntegerOverflow {
            value: u64::from(raw),
            target: "char",
        })
    }
}

impl WireItem for String {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_str(self);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        reader.read_str().map(str::to_owned)
    }
}

impl<T: WireItem> WireItem for Vec<T> {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_varint(self.len() as u64);
        for item in self {
            item.encode(writer)?;
        }
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let max = reader.max_len();
        let len = reader.read_len(max)?;
        // Every element occupies at least one byte.
        let mut out = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            out.push(T::decode(reader)?);
        }
        Ok(out)
    }
}

impl<T: WireItem> WireItem for Option<T> {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        match self {
            None => {
                writer.write_u8(0);
                Ok(())
            }
            Some(value) => {
                writer.write_u8(1);
                value.encode(writer)
            }
        }
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => T::decode(reader).map(Some),
            tag => Err(WireError::InvalidTag {
                tag,
                context: "Option",
            }),
        }
    }
}

impl<A: WireItem, B: WireItem> WireItem for (A, B) {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        self.0.encode(writer)?;
        self.1.encode(writer)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok((A::decode(reader)?, B::decode(reader)?))
    }
}

impl<A: WireItem, B: WireItem, C: WireItem> WireItem for (A, B, C) {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        self.0.encode(writer)?;
        self.1.encode(writer)?;
        self.2.encode(writer)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok((A::decode(reader)?, B::decode(reader)?, C::decode(reader)?))
    }
}
