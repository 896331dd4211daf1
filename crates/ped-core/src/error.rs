//! Shared error type.
//!
//! `ped-tile` defines its own `TileError` and wraps `PedError` as one variant
//! via `From`, so `?` works across the crate boundary.

use thiserror::Error;

/// The base error type for `ped-core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PedError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ped-core`.
pub type PedResult<T> = Result<T, PedError>;
