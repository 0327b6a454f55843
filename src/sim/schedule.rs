//! Delayed effects keyed by simulation time
//!
//! Work that fires "N ms from now" (beacon restore, overlay expiry) is queued
//! here and applied at the start of the first tick whose clock has reached it.
//! Because the key is simulation time, pausing freezes every pending effect.

use serde::{Deserialize, Serialize};

/// Effect applied when its due time arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// End an auto-beacon pulse; the beam falls back to player input
    BeaconRestore,
    /// Hide the storm warning overlay
    StormOverlayEnd,
    /// Hide the milestone banner
    MilestoneBannerEnd,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Pending {
    due_ms: f64,
    seq: u64,
    effect: Effect,
}

/// Pending effects ordered by (due time, insertion order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Schedule {
    /// Queue `effect` to fire at `due_ms`
    pub fn schedule(&mut self, due_ms: f64, effect: Effect) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self
            .pending
            .partition_point(|p| (p.due_ms, p.seq) <= (due_ms, seq));
        self.pending.insert(at, Pending { due_ms, seq, effect });
    }

    /// Drop every pending instance of `effect`
    pub fn cancel(&mut self, effect: Effect) {
        self.pending.retain(|p| p.effect != effect);
    }

    /// Remove and return all effects due at or before `now_ms`, in firing order
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<Effect> {
        let due = self.pending.partition_point(|p| p.due_ms <= now_ms);
        self.pending.drain(..due).map(|p| p.effect).collect()
    }

    pub fn is_pending(&self, effect: Effect) -> bool {
        self.pending.iter().any(|p| p.effect == effect)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
