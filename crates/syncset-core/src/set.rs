//! The replicated set engine.
//!
//! One host instance mutates locally and records each effective change in
//! its [`ChangeLog`]. Followers consume snapshots and deltas produced by the
//! host and become read-only as soon as they do.
//!
//! ```text
//! host                                  follower
//! ----                                  --------
//! add / remove / clear / set algebra
//! serialize_all  ── snapshot bytes ──▶  deserialize_all   (replace items)
//! serialize_delta ── delta bytes ────▶  deserialize_delta (replay, notify)
//! flush
//! ```

use crate::config::SyncSetConfig;
use crate::error::{Result, SyncError};
use crate::log::ChangeLog;
use crate::notifier::{ChangeNotifier, SubscriptionId};
use crate::op::{OpKind, SetOp};
use crate::store::SetStore;
use crate::wire;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use syncset_wire::{ByteReader, ByteWriter, WireItem};

/// Replicated set backed by a `HashSet`.
pub type SyncHashSet<T> = SyncSet<T, HashSet<T>>;

/// Replicated set backed by a `BTreeSet`; snapshots are written in order.
pub type SyncSortedSet<T> = SyncSet<T, BTreeSet<T>>;

/// A set kept consistent between one host and any number of followers.
pub struct SyncSet<T, S = HashSet<T>> {
    items: S,
    log: ChangeLog<T>,
    read_only: bool,
    notifier: ChangeNotifier<T>,
    config: SyncSetConfig,
}

impl<T, S> SyncSet<T, S>
where
    T: WireItem + Clone,
    S: SetStore<T>,
{
    pub fn new() -> Self {
        Self::with_config(SyncSetConfig::default())
    }

    pub fn with_config(config: SyncSetConfig) -> Self {
        Self {
            items: S::default(),
            log: ChangeLog::new(),
            read_only: false,
            notifier: ChangeNotifier::new(),
            config,
        }
    }

    pub fn config(&self) -> &SyncSetConfig {
        &self.config
    }

    fn ensure_writable(&self, operation: &'static str) -> Result<()> {
        if self.read_only {
            return Err(SyncError::ReadOnlyViolation { operation });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert `item`. Returns false (and records nothing) if already present.
    pub fn add(&mut self, item: T) -> Result<bool> {
        self.ensure_writable("add")?;
        Ok(self.insert_logged(item))
    }

    /// Remove `item`. Returns false (and records nothing) if absent.
    pub fn remove(&mut self, item: &T) -> Result<bool> {
        self.ensure_writable("remove")?;
        Ok(self.remove_logged(item))
    }

    /// Empty the set, recording a single `Clear` regardless of size.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_writable("clear")?;
        self.items.clear();
        self.log.push(SetOp::Clear);
        Ok(())
    }

    fn insert_logged(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.insert(item.clone());
        self.log.push(SetOp::Add(item));
        true
    }

    fn remove_logged(&mut self, item: &T) -> bool {
        if !self.items.remove(item) {
            return false;
        }
        self.log.push(SetOp::Remove(item.clone()));
        true
    }

    // ------------------------------------------------------------------
    // Set algebra
    //
    // `other` is owned, so it can never be a live view of `self`. To apply
    // an operation against the set's own contents pass `self.snapshot()`.
    // Only items whose membership changes are logged.
    // ------------------------------------------------------------------

    /// Add every item of `other` not already present.
    pub fn union_with<I>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.ensure_writable("union_with")?;
        for item in other {
            self.insert_logged(item);
        }
        Ok(())
    }

    /// Keep only items also present in `other`.
    pub fn intersect_with<I>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.ensure_writable("intersect_with")?;
        let other: S = other.into_iter().collect();
        let leaving: Vec<T> = self
            .items
            .iter()
            .filter(|item| !other.contains(item))
            .cloned()
            .collect();
        for item in &leaving {
            self.remove_logged(item);
        }
        Ok(())
    }

    /// Remove every item of `other` that is present.
    pub fn except_with<I>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.ensure_writable("except_with")?;
        for item in other {
            self.remove_logged(&item);
        }
        Ok(())
    }

    /// Keep items in exactly one of `self` and `other`.
    pub fn symmetric_except_with<I>(&mut self, other: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.ensure_writable("symmetric_except_with")?;
        // Deduplicate first: toggling on a repeated item would undo itself.
        let other: S = other.into_iter().collect();
        for item in other.iter() {
            if !self.remove_logged(item) {
                self.insert_logged(item.clone());
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> S::Iter<'_> {
        self.items.iter()
    }

    /// Owned copy of the current membership.
    pub fn snapshot(&self) -> S {
        self.items.clone()
    }

    pub fn is_dirty(&self) -> bool {
        !self.log.is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Operations recorded since the last flush, in order.
    pub fn pending_ops(&self) -> &[SetOp<T>] {
        self.log.as_slice()
    }

    /// Number of operations recorded since the last flush.
    pub fn change_count(&self) -> usize {
        self.log.len()
    }

    /// Operations recorded since construction or the last reset.
    pub fn total_changes(&self) -> u64 {
        self.log.recorded()
    }

    pub fn is_subset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let other: S = collect_store(other);
        self.items.iter().all(|item| other.contains(item))
    }

    pub fn is_superset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        other.into_iter().all(|item| self.items.contains(item))
    }

    pub fn is_proper_subset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let other: S = collect_store(other);
        other.len() > self.items.len() && self.items.iter().all(|item| other.contains(item))
    }

    pub fn is_proper_superset_of<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let other: S = collect_store(other);
        other.len() < self.items.len() && other.iter().all(|item| self.items.contains(item))
    }

    pub fn overlaps<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        other.into_iter().any(|item| self.items.contains(item))
    }

    pub fn set_equals<'a, I>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let other: S = collect_store(other);
        other.len() == self.items.len() && other.iter().all(|item| self.items.contains(item))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Forget pending operations after the delta has been handed off.
    /// Membership and read-only status are untouched.
    pub fn flush(&mut self) {
        let flushed = self.log.flush();
        if flushed > 0 {
            tracing::debug!(flushed, "change log flushed");
        }
    }

    /// Return to construction state so the instance can act as a host again.
    /// Observers stay registered.
    pub fn reset(&mut self) {
        self.items.clear();
        self.log.reset();
        self.read_only = false;
        tracing::debug!("sync set reset");
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    /// Observe operations applied by [`deserialize_delta`](Self::deserialize_delta).
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(OpKind, Option<&T>) + Send + 'static,
    {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Write every item. Order follows the backing store and carries no
    /// meaning for the receiver.
    ///
    /// If an item fails to encode, nothing is left in `writer`.
    pub fn serialize_all(&self, writer: &mut ByteWriter) -> Result<()> {
        let start = writer.len();
        wire::write_snapshot(writer, self.items.len(), self.items.iter()).map_err(|err| {
            writer.truncate(start);
            tracing::warn!(error = %err, "snapshot encode failed");
            SyncError::Decode(err)
        })
    }

    /// Write the pending operations. The log is not flushed; call
    /// [`flush`](Self::flush) once the bytes are safely handed off.
    ///
    /// If an item fails to encode, nothing is left in `writer`.
    pub fn serialize_delta(&self, writer: &mut ByteWriter) -> Result<()> {
        let start = writer.len();
        wire::write_delta(writer, self.log.as_slice()).map_err(|err| {
            writer.truncate(start);
            tracing::warn!(error = %err, "delta encode failed");
            SyncError::Decode(err)
        })
    }

    /// Replace the membership with a full snapshot and become read-only.
    ///
    /// On error the instance is left exactly as it was.
    pub fn deserialize_all(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        let items = wire::read_snapshot::<T, S>(reader, self.config.max_snapshot_items)
            .inspect_err(|err| tracing::warn!(error = %err, "snapshot decode failed"))?;
        tracing::debug!(items = items.len(), "applied full snapshot");
        self.items = items;
        self.read_only = true;
        Ok(())
    }

    /// Replay a delta in order, notifying observers once per entry, and
    /// become read-only.
    ///
    /// Not atomic: entries applied before a decode error stay applied.
    /// Callers needing all-or-nothing application should keep a
    /// [`snapshot`](Self::snapshot) and restore it on error.
    pub fn deserialize_delta(&mut self, reader: &mut ByteReader<'_>) -> Result<()> {
        let count = wire::read_op_count(reader, self.config.max_delta_ops)
            .inspect_err(|err| tracing::warn!(error = %err, "delta header decode failed"))?;
        self.read_only = true;

        for index in 0..count {
            let op: SetOp<T> = wire::read_op(reader).inspect_err(|err| {
                tracing::warn!(error = %err, index, count, "delta entry decode failed")
            })?;
            self.apply_remote(op);
        }

        tracing::debug!(ops = count, items = self.items.len(), "applied delta");
        Ok(())
    }

    fn apply_remote(&mut self, op: SetOp<T>) {
        tracing::trace!(kind = %op.kind(), "applying remote operation");
        match op {
            SetOp::Add(item) => {
                self.items.insert(item.clone());
                self.notifier.notify(OpKind::Add, Some(&item));
            }
            SetOp::Remove(item) => {
                self.items.remove(&item);
                self.notifier.notify(OpKind::Remove, Some(&item));
            }
            SetOp::Clear => {
                self.items.clear();
                self.notifier.notify(OpKind::Clear, None);
            }
        }
    }
}

fn collect_store<'a, T, S, I>(other: I) -> S
where
    T: Clone + 'a,
    S: SetStore<T>,
    I: IntoIterator<Item = &'a T>,
{
    other.into_iter().cloned().collect()
}

impl<T, S> Default for SyncSet<T, S>
where
    T: WireItem + Clone,
    S: SetStore<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: fmt::Debug> fmt::Debug for SyncSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSet")
            .field("items", &self.items)
            .field("pending_ops", &self.log.len())
            .field("read_only", &self.read_only)
            .field("observers", &self.notifier.len())
            .finish()
    }
}
