//! Append-only log of local operations awaiting transmission
//!
//! The writer side records every effective local mutation here. A delta is
//! the log serialized in order; the caller flushes it once the bytes have
//! been handed to the channel:
//!
//! ```text
//! On local mutation m:
//!   X = m(X)          // apply to state
//!   L.push(m)         // record for sending
//!
//! On send:
//!   send L            // delta
//!   L = []            // flush, caller-driven
//! ```

use crate::op::SetOp;

/// Ordered operations recorded since construction or the last flush.
#[derive(Debug, Clone)]
pub struct ChangeLog<T> {
    ops: Vec<SetOp<T>>,
    /// Operations ever recorded, across flushes
    recorded: u64,
}

impl<T> ChangeLog<T> {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            recorded: 0,
        }
    }

    /// Append an operation
    pub fn push(&mut self, op: SetOp<T>) {
        self.recorded += 1;
        self.ops.push(op);
    }

    pub fn as_slice(&self) -> &[SetOp<T>] {
        &self.ops
    }

    /// Number of pending operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Drop pending operations, returning how many were discarded
    pub fn flush(&mut self) -> usize {
        let flushed = self.ops.len();
        self.ops.clear();
        flushed
    }

    /// Total operations recorded over the log's lifetime
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    /// Back to construction state, including the lifetime counter
    pub fn reset(&mut self) {
        self.ops.clear();
        self.recorded = 0;
    }
}

impl<T> Default for ChangeLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_order() {
        let mut log = ChangeLog::new();
        log.push(SetOp::Add(1));
        log.push(SetOp::Remove(1));
        log.push(SetOp::Clear);

        assert_eq!(
            log.as_slice(),
            &[SetOp::Add(1), SetOp::Remove(1), SetOp::Clear]
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_flush_keeps_lifetime_count() {
        let mut log = ChangeLog::new();
        for i in 0..5 {
            log.push(SetOp::Add(i));
        }

        assert_eq!(log.flush(), 5);
        assert!(log.is_empty());
        assert_eq!(log.recorded(), 5);

        log.push(SetOp::Add(9));
        assert_eq!(log.recorded(), 6);

        log.reset();
        assert!(log.is_empty());
        assert_eq!(log.recorded(), 0);
    }
}
