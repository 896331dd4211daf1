//! Time-gated congestion smoothing.

use log::trace;
use ped_core::Millis;

/// Instantaneous congestion for a tile holding `occupants` agents.
///
/// The `+1` keeps an empty tile's score above zero once it has been sampled,
/// so path costs never collapse to all-zero ties.
#[inline]
pub fn momentary_congestion(occupants: usize) -> f32 {
    (occupants * 2 + 1) as f32
}

/// Smoothed congestion score that recomputes at most once per interval.
///
/// Each recompute blends the previous *smoothed* value with the current
/// momentary reading at weight 0.5:
///
/// ```text
/// current = (last + momentary) / 2
/// ```
///
/// Between recomputes, [`sample`](Self::sample) returns the cached value
/// untouched.  Both stored values start at 0 and can only move toward a
/// momentary reading, which is never negative, so the score stays `>= 0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "checkpoint::GaugeCheckpoint")
)]
pub struct CongestionGauge {
    last:              f32,
    current:           f32,
    interval_ms:       u64,
    next_recompute_at: Millis,
}

impl CongestionGauge {
    /// A zeroed gauge whose first recompute is allowed at
    /// `created_at + interval_ms`.
    pub fn new(interval_ms: u64, created_at: Millis) -> Self {
        Self {
            last:              0.0,
            current:           0.0,
            interval_ms,
            next_recompute_at: created_at + interval_ms,
        }
    }

    /// Score at `now` for a tile currently holding `occupants` agents.
    ///
    /// Recomputes only when `now >= next_recompute_at`, then pushes the gate
    /// to `now + interval_ms`.
    pub fn sample(&mut self, now: Millis, occupants: usize) -> f32 {
        if now < self.next_recompute_at {
            return self.current;
        }

        let momentary = momentary_congestion(occupants);
        let smoothed = (self.last + momentary) / 2.0;
        self.last = smoothed;
        self.current = smoothed;
        self.next_recompute_at = now + self.interval_ms;

        trace!(
            "congestion recomputed at {now}: occupants={occupants} score={smoothed} next={}",
            self.next_recompute_at
        );
        smoothed
    }

    /// Score from the most recent recompute (0 before the first one).
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Baseline the next recompute will blend against.
    #[inline]
    pub fn last(&self) -> f32 {
        self.last
    }

    #[inline]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    #[inline]
    pub fn next_recompute_at(&self) -> Millis {
        self.next_recompute_at
    }

    /// `true` if a sample at `now` would recompute.
    #[inline]
    pub fn is_due(&self, now: Millis) -> bool {
        now >= self.next_recompute_at
    }
}

#[cfg(feature = "serde")]
pub(crate) mod checkpoint {
    use ped_core::{Millis, TileConfig};

    use super::CongestionGauge;
    use crate::{TileError, TileResult};

    /// Unchecked wire form of a [`CongestionGauge`].  Restoring goes through
    /// `TryFrom` so a checkpoint can't carry a zero interval or a negative
    /// score.
    #[derive(serde::Deserialize)]
    pub(crate) struct GaugeCheckpoint {
        last:              f32,
        current:           f32,
        interval_ms:       u64,
        next_recompute_at: Millis,
    }

    impl TryFrom<GaugeCheckpoint> for CongestionGauge {
        type Error = TileError;

        fn try_from(raw: GaugeCheckpoint) -> TileResult<Self> {
            TileConfig { recompute_interval_ms: raw.interval_ms }.validate()?;
            Ok(Self {
                last:              check_score(raw.last)?,
                current:           check_score(raw.current)?,
                interval_ms:       raw.interval_ms,
                next_recompute_at: raw.next_recompute_at,
            })
        }
    }

    fn check_score(score: f32) -> TileResult<f32> {
        if score.is_finite() && score >= 0.0 {
            Ok(score)
        } else {
            Err(TileError::InvalidCongestion(score))
        }
    }
}
