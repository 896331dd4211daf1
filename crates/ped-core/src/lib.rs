//! `ped-core` — foundational types shared by the pedestrian tile-state crates.
//!
//! This crate has no `ped-*` dependencies and minimal external ones (only
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`time`]        | `Millis`, `Clock`, `SystemClock`, `ManualClock`       |
//! | [`config`]      | `TileConfig`, `DEFAULT_RECOMPUTE_INTERVAL_MS`         |
//! | [`error`]       | `PedError`, `PedResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DEFAULT_RECOMPUTE_INTERVAL_MS, TileConfig};
pub use error::{PedError, PedResult};
pub use ids::AgentId;
pub use time::{Clock, ManualClock, Millis, SystemClock};
