//! Full-state and delta wire formats.
//!
//! ```text
//! snapshot := count:varint item{count}
//! delta    := op_count:varint entry{op_count}
//! entry    := 0x00 item      (Add)
//!           | 0x01 item      (Remove)
//!           | 0x02           (Clear)
//! ```

use crate::op::{OpKind, SetOp};
use crate::store::SetStore;
use syncset_wire::{ByteReader, ByteWriter, WireError, WireItem};

/// Write a full snapshot of `items`. `len` must equal the number of items
/// the iterator yields. Stops at the first item that fails to encode.
pub fn write_snapshot<'a, T, I>(writer: &mut ByteWriter, len: usize, items: I) -> Result<(), WireError>
where
    T: WireItem + 'a,
    I: IntoIterator<Item = &'a T>,
{
    writer.write_varint(len as u64);
    for item in items {
        item.encode(writer)?;
    }
    Ok(())
}

/// Decode a full snapshot into a fresh store. Nothing outside the returned
/// store is touched, so a failure leaves the caller's state intact.
///
/// The declared count must match the number of distinct items decoded.
pub fn read_snapshot<T, S>(reader: &mut ByteReader<'_>, max_items: u64) -> Result<S, WireError>
where
    T: WireItem,
    S: SetStore<T>,
{
    let declared = reader.read_len(max_items)?;
    let items: S = (0..declared).map(|_| T::decode(reader)).collect::<Result<_, _>>()?;
    if items.len() != declared {
        return Err(WireError::DuplicateItems {
            declared,
            distinct: items.len(),
        });
    }
    Ok(items)
}

pub fn write_op<T: WireItem>(writer: &mut ByteWriter, op: &SetOp<T>) -> Result<(), WireError> {
    writer.write_u8(op.kind().tag());
    match op.item() {
        Some(item) => item.encode(writer),
        None => Ok(()),
    }
}

/// Write a delta: the count followed by each entry in log order.
pub fn write_delta<'a, T, I>(writer: &mut ByteWriter, ops: I) -> Result<(), WireError>
where
    T: WireItem + 'a,
    I: IntoIterator<Item = &'a SetOp<T>>,
    I::IntoIter: ExactSizeIterator,
{
    let ops = ops.into_iter();
    writer.write_varint(ops.len() as u64);
    for op in ops {
        write_op(writer, op)?;
    }
    Ok(())
}

/// Read the entry count that prefixes a delta.
pub fn read_op_count(reader: &mut ByteReader<'_>, max_ops: u64) -> Result<usize, WireError> {
    reader.read_len(max_ops)
}

/// Read one delta entry.
pub fn read_op<T: WireItem>(reader: &mut ByteReader<'_>) -> Result<SetOp<T>, WireError> {
    let kind = OpKind::try_from(reader.read_u8()?)?;
    Ok(match kind {
        OpKind::Add => SetOp::Add(T::decode(reader)?),
        OpKind::Remove => SetOp::Remove(T::decode(reader)?),
        OpKind::Clear => SetOp::Clear,
    })
}
