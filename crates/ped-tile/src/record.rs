//! The per-tile state record.

use log::{debug, warn};
use rustc_hash::FxHashSet;

use ped_core::{AgentId, Clock, Millis, TileConfig};

use crate::{CongestionGauge, TileError, TileResult};

/// State one grid tile keeps for the pathfinder: a static blocked flag, the
/// agents currently claiming to be inside, and a smoothed congestion score.
///
/// Created by the owning map with `blocked = false`, no occupants, and a
/// zeroed gauge whose first recompute is allowed one interval after
/// creation.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "checkpoint::TileCheckpoint")
)]
pub struct TileRecord {
    blocked:   bool,
    occupants: FxHashSet<AgentId>,
    gauge:     CongestionGauge,
}

impl TileRecord {
    /// A record created at `created_at` with the default 500 ms interval.
    pub fn new(created_at: Millis) -> Self {
        Self::build(&TileConfig::default(), created_at)
    }

    /// A record created at `created_at` with settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns `TileError::Core` if `config` fails validation.
    pub fn with_config(config: &TileConfig, created_at: Millis) -> TileResult<Self> {
        config.validate()?;
        Ok(Self::build(config, created_at))
    }

    /// A default-configured record stamped with `clock`'s current time.
    pub fn from_clock(clock: &impl Clock) -> Self {
        Self::new(clock.now())
    }

    fn build(config: &TileConfig, created_at: Millis) -> Self {
        Self {
            blocked:   false,
            occupants: FxHashSet::default(),
            gauge:     CongestionGauge::new(config.recompute_interval_ms, created_at),
        }
    }

    // ── Blocked flag ──────────────────────────────────────────────────────

    /// `true` if the tile is a static obstacle.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Mark the tile passable or impassable.  Occupants are unaffected.
    pub fn set_blocked(&mut self, blocked: bool) {
        if self.blocked != blocked {
            debug!("tile blocked flag {} -> {}", self.blocked, blocked);
        }
        self.blocked = blocked;
    }

    // ── Occupants ─────────────────────────────────────────────────────────

    /// Record `agent` as present.  Returns `true` if it was not already
    /// registered; registering twice is a no-op.
    ///
    /// # Errors
    ///
    /// `TileError::InvalidAgent` for [`AgentId::INVALID`]; the set is left
    /// unchanged.
    pub fn register_occupant(&mut self, agent: AgentId) -> TileResult<bool> {
        check_agent(agent)?;
        Ok(self.occupants.insert(agent))
    }

    /// Forget `agent`.  Returns `true` if it was registered; removing an
    /// absent agent is a no-op.
    ///
    /// # Errors
    ///
    /// `TileError::InvalidAgent` for [`AgentId::INVALID`].
    pub fn unregister_occupant(&mut self, agent: AgentId) -> TileResult<bool> {
        check_agent(agent)?;
        Ok(self.occupants.remove(&agent))
    }

    /// Owned copy of the current occupants, sorted by id.
    ///
    /// The returned `Vec` is independent of the record; callers may mutate it
    /// freely.
    pub fn occupants(&self) -> Vec<AgentId> {
        let mut out: Vec<AgentId> = self.occupants.iter().copied().collect();
        out.sort_unstable();
        out
    }

    /// Forget every occupant at once.
    pub fn clear_occupants(&mut self) {
        if !self.occupants.is_empty() {
            debug!("clearing {} occupants", self.occupants.len());
        }
        self.occupants.clear();
    }

    /// Number of agents currently registered.
    #[inline]
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// `true` if at least one agent is registered.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// `true` if `agent` is registered here.
    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.occupants.contains(&agent)
    }

    // ── Congestion ────────────────────────────────────────────────────────

    /// Smoothed congestion score at `now`, recomputing if the gate allows.
    ///
    /// See [`CongestionGauge::sample`] for the exact formula.
    #[inline]
    pub fn congestion(&mut self, now: Millis) -> f32 {
        self.gauge.sample(now, self.occupants.len())
    }

    /// [`congestion`](Self::congestion) with `now` read from `clock`.
    #[inline]
    pub fn congestion_at(&mut self, clock: &impl Clock) -> f32 {
        self.congestion(clock.now())
    }

    /// Last computed score, without touching the gate.
    #[inline]
    pub fn cached_congestion(&self) -> f32 {
        self.gauge.current()
    }

    /// Earliest time the next `congestion` call may recompute.
    #[inline]
    pub fn next_recompute_at(&self) -> Millis {
        self.gauge.next_recompute_at()
    }

    /// Minimum gap between two recomputes.
    #[inline]
    pub fn recompute_interval_ms(&self) -> u64 {
        self.gauge.interval_ms()
    }

    #[inline]
    pub(crate) fn congestion_due(&self, now: Millis) -> bool {
        self.gauge.is_due(now)
    }
}

fn check_agent(agent: AgentId) -> TileResult<()> {
    if agent.is_valid() {
        Ok(())
    } else {
        warn!("rejected occupant update for {agent}");
        Err(TileError::InvalidAgent(agent))
    }
}

#[cfg(feature = "serde")]
pub(crate) mod checkpoint {
    use ped_core::AgentId;
    use rustc_hash::FxHashSet;

    use super::{TileRecord, check_agent};
    use crate::{CongestionGauge, TileError};

    /// Unchecked wire form of a [`TileRecord`].  The gauge validates itself;
    /// occupants go through the same identity check as `register_occupant`.
    #[derive(serde::Deserialize)]
    pub(crate) struct TileCheckpoint {
        blocked:   bool,
        occupants: Vec<AgentId>,
        gauge:     CongestionGauge,
    }

    impl TryFrom<TileCheckpoint> for TileRecord {
        type Error = TileError;

        fn try_from(raw: TileCheckpoint) -> Result<Self, TileError> {
            let mut occupants = FxHashSet::default();
            for agent in raw.occupants {
                check_agent(agent)?;
                occupants.insert(agent);
            }
            Ok(Self {
                blocked: raw.blocked,
                occupants,
                gauge: raw.gauge,
            })
        }
    }
}
