//! Set operations as recorded in the change log and carried in deltas.

use serde::{Deserialize, Serialize};
use std::fmt;
use syncset_wire::WireError;

/// Discriminant of a [`SetOp`], also its one-byte wire tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    Add,
    Remove,
    Clear,
}

impl OpKind {
    pub const fn tag(self) -> u8 {
        match self {
            OpKind::Add => 0,
            OpKind::Remove => 1,
            OpKind::Clear => 2,
        }
    }
}

impl TryFrom<u8> for OpKind {
    type Error = WireError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(OpKind::Add),
            1 => Ok(OpKind::Remove),
            2 => Ok(OpKind::Clear),
            _ => Err(WireError::InvalidTag {
                tag,
                context: "set operation",
            }),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Add => write!(f, "add"),
            OpKind::Remove => write!(f, "remove"),
            OpKind::Clear => write!(f, "clear"),
        }
    }
}

/// A single mutation. Order is positional within the log; there is no
/// sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOp<T> {
    Add(T),
    Remove(T),
    Clear,
}

impl<T> SetOp<T> {
    pub fn kind(&self) -> OpKind {
        match self {
            SetOp::Add(_) => OpKind::Add,
            SetOp::Remove(_) => OpKind::Remove,
            SetOp::Clear => OpKind::Clear,
        }
    }

    /// The payload, absent for `Clear`.
    pub fn item(&self) -> Option<&T> {
        match self {
            SetOp::Add(item) | SetOp::Remove(item) => Some(item),
            SetOp::Clear => None,
        }
    }
}
