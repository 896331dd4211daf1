//! Per-tile configuration.

use crate::{PedError, PedResult};

/// Default minimum gap between congestion recomputations.
pub const DEFAULT_RECOMPUTE_INTERVAL_MS: u64 = 500;

/// Settings shared by every tile record a map creates.
///
/// Typically loaded from the application's own config file and handed to
/// each `TileRecord` at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileConfig {
    /// Minimum milliseconds between two congestion recomputations.  Must be
    /// non-zero.  Default: 500.
    pub recompute_interval_ms: u64,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            recompute_interval_ms: DEFAULT_RECOMPUTE_INTERVAL_MS,
        }
    }
}

impl TileConfig {
    /// Reject settings a tile cannot run with.
    pub fn validate(&self) -> PedResult<()> {
        if self.recompute_interval_ms == 0 {
            return Err(PedError::Config(
                "recompute_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
