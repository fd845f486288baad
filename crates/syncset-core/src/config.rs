//! Decode-side limits for a replicated set.

use serde::{Deserialize, Serialize};

/// Default ceiling on declared snapshot and delta counts.
pub const DEFAULT_MAX_COUNT: u64 = 1 << 20;

/// Configuration for a [`SyncSet`](crate::SyncSet).
///
/// Limits are checked against the declared count before any item is read,
/// so an oversized snapshot is rejected without touching the set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSetConfig {
    /// Largest item count accepted in a full snapshot.
    pub max_snapshot_items: u64,
    /// Largest operation count accepted in a single delta.
    pub max_delta_ops: u64,
}

impl Default for SyncSetConfig {
    fn default() -> Self {
        Self {
            max_snapshot_items: DEFAULT_MAX_COUNT,
            max_delta_ops: DEFAULT_MAX_COUNT,
        }
    }
}

impl SyncSetConfig {
    pub fn builder() -> SyncSetConfigBuilder {
        SyncSetConfigBuilder::new()
    }
}

/// Builder for [`SyncSetConfig`].
pub struct SyncSetConfigBuilder {
    config: SyncSetConfig,
}

impl SyncSetConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SyncSetConfig::default(),
        }
    }

    pub fn max_snapshot_items(mut self, max: u64) -> Self {
        self.config.max_snapshot_items = max;
        self
    }

    pub fn max_delta_ops(mut self, max: u64) -> Self {
        self.config.max_delta_ops = max;
        self
    }

    pub fn build(self) -> SyncSetConfig {
        self.config
    }
}

impl Default for SyncSetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = SyncSetConfig::builder().max_delta_ops(16).build();

        assert_eq!(config.max_delta_ops, 16);
        assert_eq!(config.max_snapshot_items, DEFAULT_MAX_COUNT);
    }
}
