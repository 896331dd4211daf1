//! Time model for tile-state queries.
//!
//! # Design
//!
//! Time is an absolute millisecond counter, `Millis`.  Nothing in the tile
//! crates reads the system clock directly: callers either pass `now` in or
//! hand over a [`Clock`].  That keeps tests deterministic and lets a
//! simulation run on a virtual or accelerated clock.
//!
//! Two clocks ship here:
//!
//! - [`SystemClock`] — wall-clock milliseconds since the Unix epoch.
//! - [`ManualClock`] — an atomic counter moved by hand.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// ── Millis ────────────────────────────────────────────────────────────────────

/// An absolute timestamp in milliseconds on some clock.
///
/// Which epoch applies depends on the clock that produced it; timestamps from
/// different clocks must not be mixed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Milliseconds elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Millis {
    type Output = Millis;
    /// Saturates at `u64::MAX` rather than wrapping.
    #[inline]
    fn add(self, rhs: u64) -> Millis {
        Millis(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Source of the current time.
///
/// Implementations must be `Send + Sync` so a single clock can be shared by
/// the simulation thread and any pathfinding workers.
pub trait Clock: Send + Sync {
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Millis {
        (**self).now()
    }
}

// ── SystemClock ───────────────────────────────────────────────────────────────

/// Wall-clock time as milliseconds since the Unix epoch.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        // A system clock set before 1970 reads as the epoch.
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Millis(ms)
    }
}

// ── ManualClock ───────────────────────────────────────────────────────────────

/// A clock that only moves when told to.
///
/// Interior mutability through an atomic lets tests advance time while a tile
/// holds `&ManualClock`.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self { now_ms: AtomicU64::new(start.0) }
    }

    /// Jump to an absolute time.  Moving backwards is allowed.
    pub fn set(&self, t: Millis) {
        self.now_ms.store(t.0, Ordering::Release);
    }

    /// Move forward by `ms` and return the new time.  Saturates at
    /// `u64::MAX`, matching `Millis + u64`.
    pub fn advance(&self, ms: u64) -> Millis {
        let step = |t: u64| Some(t.saturating_add(ms));
        let prev = match self.now_ms.fetch_update(Ordering::AcqRel, Ordering::Acquire, step) {
            Ok(prev) | Err(prev) => prev,
        };
        Millis(prev.saturating_add(ms))
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Millis {
        Millis(self.now_ms.load(Ordering::Acquire))
    }
}
