//! `ped-tile` — the state record each grid tile keeps for pedestrian
//! pathfinding.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`gauge`]   | `CongestionGauge` — time-gated, smoothed congestion score         |
//! | [`record`]  | `TileRecord` — blocked flag + occupant set + gauge                |
//! | [`shared`]  | `SharedTileRecord` — `RwLock` wrapper for concurrent readers      |
//! | [`error`]   | `TileError`, `TileResult<T>`                                      |
//!
//! # Usage model
//!
//! The owning tile map creates one `TileRecord` per cell, flips
//! `set_blocked` while laying out static obstacles, and moves agents between
//! records with `register_occupant` / `unregister_occupant` each tick.  The
//! pathfinder reads `is_blocked` and `congestion(now)` as edge-cost inputs.
//!
//! Congestion is recomputed lazily, at most once per
//! `recompute_interval_ms`, so the pathfinder can query it on every edge
//! relaxation without the map refreshing every tile every tick.
//!
//! `TileRecord` assumes a single owner per tick (`&mut self` on every
//! mutation and on `congestion`).  When pathfinding workers run on other
//! threads, wrap each record in a [`SharedTileRecord`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                          |
//! |---------|-----------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` for `TileRecord` and `CongestionGauge`. |
//! |         | Deserializing validates ids, scores, and the interval.          |
//!
//! The checkpoint tests (the only users of the `serde_json` dev-dependency)
//! run with `cargo test -p ped-tile --features serde`.

pub mod error;
pub mod gauge;
pub mod record;
pub mod shared;


pub use error::{TileError, TileResult};
pub use gauge::{CongestionGauge, momentary_congestion};
pub use record::TileRecord;
pub use shared::SharedTileRecord;
