//! `SharedTileRecord` — a `TileRecord` behind an `RwLock`.
//!
//! # Locking discipline
//!
//! Pathfinding workers read through `&SharedTileRecord` while the simulation
//! thread moves occupants.  Reads (`is_blocked`, `occupants`, cached
//! congestion) take the read lock.  Every mutation takes the write lock.
//!
//! `congestion(now)` first checks the gate under the read lock.  Only when a
//! recompute is due does it upgrade to the write lock, re-check the gate, and
//! recompute; whichever thread wins does the update and the rest see its
//! result.  The two smoothed floats are therefore never observed half-written.
//!
//! No operation panics while holding the lock, so a poisoned lock still
//! guards a consistent record and is recovered rather than propagated.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ped_core::{AgentId, Clock, Millis, TileConfig};

use crate::{TileRecord, TileResult};

#[derive(Debug)]
pub struct SharedTileRecord {
    inner: RwLock<TileRecord>,
}

impl SharedTileRecord {
    pub fn new(created_at: Millis) -> Self {
        Self::from_record(TileRecord::new(created_at))
    }

    pub fn with_config(config: &TileConfig, created_at: Millis) -> TileResult<Self> {
        TileRecord::with_config(config, created_at).map(Self::from_record)
    }

    pub fn from_record(record: TileRecord) -> Self {
        Self { inner: RwLock::new(record) }
    }

    pub fn into_inner(self) -> TileRecord {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone of the record as it stands now.
    pub fn snapshot(&self) -> TileRecord {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, TileRecord> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TileRecord> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn is_blocked(&self) -> bool {
        self.read().is_blocked()
    }

    pub fn occupants(&self) -> Vec<AgentId> {
        self.read().occupants()
    }

    pub fn occupant_count(&self) -> usize {
        self.read().occupant_count()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.read().contains(agent)
    }

    pub fn cached_congestion(&self) -> f32 {
        self.read().cached_congestion()
    }

    pub fn next_recompute_at(&self) -> Millis {
        self.read().next_recompute_at()
    }

    /// Smoothed congestion at `now`; see the module docs for locking.
    pub fn congestion(&self, now: Millis) -> f32 {
        {
            let guard = self.read();
            if !guard.congestion_due(now) {
                return guard.cached_congestion();
            }
        }
        // Another writer may have recomputed between the two locks; the gate
        // check inside `congestion` handles that.
        self.write().congestion(now)
    }

    pub fn congestion_at(&self, clock: &impl Clock) -> f32 {
        self.congestion(clock.now())
    }

    // ── Writes ────────────────────────────────────────────────────────────

    pub fn set_blocked(&self, blocked: bool) {
        self.write().set_blocked(blocked);
    }

    pub fn register_occupant(&self, agent: AgentId) -> TileResult<bool> {
        self.write().register_occupant(agent)
    }

    pub fn unregister_occupant(&self, agent: AgentId) -> TileResult<bool> {
        self.write().unregister_occupant(agent)
    }

    pub fn clear_occupants(&self) {
        self.write().clear_occupants();
    }
}

impl From<TileRecord> for SharedTileRecord {
    fn from(record: TileRecord) -> Self {
        Self::from_record(record)
    }
}
