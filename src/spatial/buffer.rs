//! Generation buffers
//!
//! One buffer is a full simulation snapshot: the effect pool plus one
//! `LanePartition` per lane. Buffers are allocated once and reused forever;
//! a tick only rewrites their contents.

use std::marker::PhantomData;

use crate::domain::particle::{Effect, Particle, SlotId, MAX_EFFECTS};

use super::partition::{split_slot_domain, LanePartition};

pub struct GenerationBuffer {
    pool: Vec<Effect>,
    lanes: Vec<LanePartition>,
}

impl GenerationBuffer {
    pub fn new(lanes: usize) -> Self {
        GenerationBuffer {
            pool: vec![Effect::EMPTY; MAX_EFFECTS],
            lanes: split_slot_domain(MAX_EFFECTS, lanes)
                .into_iter()
                .map(LanePartition::new)
                .collect(),
        }
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    pub fn lane(&self, lane: usize) -> &LanePartition {
        &self.lanes[lane]
    }

    #[inline]
    pub fn lanes(&self) -> &[LanePartition] {
        &self.lanes
    }

    /// Occupied slot ids owned by `lane`
    #[inline]
    pub fn occupied_ids(&self, lane: usize) -> &[SlotId] {
        self.lanes[lane].occupied()
    }

    #[inline]
    pub fn effect(&self, id: SlotId) -> &Effect {
        &self.pool[id as usize]
    }

    /// Total occupied slots across lanes
    pub fn effect_count(&self) -> usize {
        self.lanes.iter().map(LanePartition::used).sum()
    }

    /// Occupied effects, lane by lane
    pub fn live_effects(&self) -> impl Iterator<Item = &Effect> + '_ {
        self.lanes
            .iter()
            .flat_map(|lane| lane.occupied().iter())
            .map(move |&id| self.effect(id))
    }

    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.live_effects().flat_map(Effect::particles)
    }

    pub fn particle_count(&self) -> usize {
        self.live_effects().map(Effect::alive).sum()
    }

    pub(crate) fn lanes_mut(&mut self) -> &mut [LanePartition] {
        &mut self.lanes
    }

    /// Split into a slot writer and the lane bookkeeping so every lane can
    /// borrow its own partition while writing into the shared pool.
    pub(crate) fn split_for_write(&mut self) -> (SlotWriter<'_>, &mut [LanePartition]) {
        let writer = SlotWriter {
            ptr: self.pool.as_mut_ptr(),
            len: self.pool.len(),
            _marker: PhantomData,
        };
        (writer, &mut self.lanes)
    }

    #[cfg(test)]
    pub(crate) fn effect_mut(&mut self, id: SlotId) -> &mut Effect {
        &mut self.pool[id as usize]
    }
}

/// Shared write handle onto a buffer's effect pool.
///
/// Lanes write concurrently through copies of the same `SlotWriter`. This is
/// sound because the lanes' id lists partition the slot domain: a lane only
/// ever asks for ids it currently owns, so no two lanes alias a slot.
#[derive(Clone, Copy)]
pub(crate) struct SlotWriter<'a> {
    ptr: *mut Effect,
    len: usize,
    _marker: PhantomData<&'a mut [Effect]>,
}

unsafe impl Send for SlotWriter<'_> {}
unsafe impl Sync for SlotWriter<'_> {}

impl<'a> SlotWriter<'a> {
    /// # Safety
    /// `id` must be owned by the calling lane, and the caller must not hold
    /// another reference to the same slot.
    #[inline]
    pub(crate) unsafe fn slot_mut(&self, id: SlotId) -> &'a mut Effect {
        let idx = id as usize;
        debug_assert!(idx < self.len, "slot id {idx} out of range");
        &mut *self.ptr.add(idx)
    }
}
