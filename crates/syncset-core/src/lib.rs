//! Syncset Core - host-authoritative replicated sets
//!
//! A [`SyncSet`] is kept consistent between one host, the only peer allowed
//! to mutate it, and any number of followers. The host ships either a full
//! snapshot or a delta of the operations recorded since its last flush;
//! followers replay what they receive and become read-only.
//!
//! ## Key Concepts
//!
//! - **Change log**: every effective local mutation, in call order
//! - **Snapshot**: the whole membership, for first contact or resync
//! - **Delta**: the change log, replayed entry by entry on the follower
//! - **Flush**: drop the change log once a delta has been handed off
//! - **Reset**: return to construction state, e.g. when a follower becomes host
//!
//! # Example
//!
//! ```rust
//! use syncset_core::{OpKind, SyncHashSet};
//! use syncset_wire::{ByteReader, ByteWriter};
//!
//! let mut host: SyncHashSet<String> = SyncHashSet::new();
//! host.add("Hello".to_string()).unwrap();
//! host.add("World".to_string()).unwrap();
//!
//! // First contact: full snapshot.
//! let mut writer = ByteWriter::new();
//! host.serialize_all(&mut writer).unwrap();
//! let mut follower: SyncHashSet<String> = SyncHashSet::new();
//! follower.deserialize_all(&mut ByteReader::new(writer.as_slice())).unwrap();
//! host.flush();
//!
//! // Later changes travel as deltas.
//! host.remove(&"World".to_string()).unwrap();
//! let mut writer = ByteWriter::new();
//! host.serialize_delta(&mut writer).unwrap();
//! follower.subscribe(|kind, item: Option<&String>| {
//!     assert_eq!(kind, OpKind::Remove);
//!     assert_eq!(item.map(String::as_str), Some("World"));
//! });
//! follower.deserialize_delta(&mut ByteReader::new(writer.as_slice())).unwrap();
//! host.flush();
//!
//! assert!(follower.contains(&"Hello".to_string()));
//! assert!(!follower.contains(&"World".to_string()));
//! assert!(follower.add("nope".to_string()).is_err());
//! ```

pub mod config;
pub mod error;
pub mod log;
pub mod notifier;
pub mod op;
pub mod set;
pub mod store;
pub mod wire;

pub use config::{SyncSetConfig, SyncSetConfigBuilder};
pub use error::{Result, SyncError};
pub use log::ChangeLog;
pub use notifier::{ChangeNotifier, SubscriptionId};
pub use op::{OpKind, SetOp};
pub use set::{SyncHashSet, SyncSet, SyncSortedSet};
pub use store::SetStore;
