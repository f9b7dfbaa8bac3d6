// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity node pool.
//!
//! All node storage is preallocated when the pool is built; `hire_*` pops a
//! slot off the matching free list and `fire` pushes it back. Nothing here
//! allocates per node after construction, and exhaustion is an `Option`,
//! never growth.

use crate::node::{ContainerId, DictId, NodeId, NodeKind, ScalId, Scalar, VectId};

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, warn};

/// The three storage classes the pool preallocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// Scalar slots (null/int/real/bool/str).
    Scal,
    /// Object slots.
    Dict,
    /// Array slots.
    Vect,
}

/// Capacity configuration for [`Pool::new`] and [`Pool::reset`].
///
/// A capacity of zero yields an always-exhausted pool for that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of scalar slots.
    pub scals: u16,
    /// Number of object slots.
    pub dicts: u16,
    /// Number of array slots.
    pub vects: u16,
}

impl PoolConfig {
    /// Capacities in scalar, dict, vect order.
    pub const fn new(scals: u16, dicts: u16, vects: u16) -> Self {
        Self {
            scals,
            dicts,
            vects,
        }
    }
}

struct ScalSlot {
    gen: u16,
    value: Scalar,
    parent: Option<ContainerId>,
}

struct DictSlot {
    gen: u16,
    entries: BTreeMap<String, NodeId>,
    parent: Option<ContainerId>,
}

struct VectSlot {
    gen: u16,
    items: Vec<NodeId>,
    parent: Option<ContainerId>,
}

/// Fixed-capacity storage for every node in one or more JSON trees.
///
/// The pool is an owned value: hosts and tests may keep several independent
/// pools alive. All tree reads and mutations go through it, since nodes
/// reference each other by handle rather than by pointer.
pub struct Pool {
    scals: Vec<ScalSlot>,
    scals_for_hire: Vec<u16>,
    dicts: Vec<DictSlot>,
    dicts_for_hire: Vec<u16>,
    vects: Vec<VectSlot>,
    vects_for_hire: Vec<u16>,
}

impl Pool {
    /// Builds a pool with the given capacities, every slot on its free list.
    pub fn new(config: PoolConfig) -> Self {
        let mut pool = Pool {
            scals: Vec::new(),
            scals_for_hire: Vec::new(),
            dicts: Vec::new(),
            dicts_for_hire: Vec::new(),
            vects: Vec::new(),
            vects_for_hire: Vec::new(),
        };
        pool.rebuild(config, 0);
        pool
    }

    /// Discards every tree and rebuilds the backing stores and free lists.
    ///
    /// Handles hired before the reset must not be used afterwards; the slot
    /// generations advance past every previously issued handle, so stale
    /// handles are caught on dereference in debug builds and [`Pool::fire`]
    /// on them is a no-op.
    pub fn reset(&mut self, config: PoolConfig) {
        let mut top_gen = 0u16;
        for slot in &self.scals {
            top_gen = top_gen.max(slot.gen);
        }
        for slot in &self.dicts {
            top_gen = top_gen.max(slot.gen);
        }
        for slot in &self.vects {
            top_gen = top_gen.max(slot.gen);
        }
        self.rebuild(config, top_gen.wrapping_add(1));
    }

    fn rebuild(&mut self, config: PoolConfig, base_gen: u16) {
        self.scals.clear();
        self.scals_for_hire.clear();
        for idx in 0..config.scals {
            self.scals.push(ScalSlot {
                gen: base_gen,
                value: Scalar::Null,
                parent: None,
            });
            self.scals_for_hire.push(idx);
        }

        self.dicts.clear();
        self.dicts_for_hire.clear();
        for idx in 0..config.dicts {
            self.dicts.push(DictSlot {
                gen: base_gen,
                entries: BTreeMap::new(),
                parent: None,
            });
            self.dicts_for_hire.push(idx);
        }

        self.vects.clear();
        self.vects_for_hire.clear();
        for idx in 0..config.vects {
            self.vects.push(VectSlot {
                gen: base_gen,
                items: Vec::new(),
                parent: None,
            });
            self.vects_for_hire.push(idx);
        }

        debug!(
            "pool rebuilt: {} scal / {} dict / {} vect slots",
            config.scals, config.dicts, config.vects
        );
    }

    // ---- hire ----------------------------------------------------------

    /// Hires a scalar slot, payload `Null`. `None` when the pool is exhausted.
    pub fn hire_scal(&mut self) -> Option<ScalId> {
        let Some(idx) = self.scals_for_hire.pop() else {
            warn!("scalar pool exhausted (capacity {})", self.scals.len());
            return None;
        };
        let slot = self.scals.get(idx as usize)?;
        Some(ScalId { idx, gen: slot.gen })
    }

    /// Hires a scalar already holding the given integer.
    pub fn hire_int(&mut self, value: i32) -> Option<ScalId> {
        let id = self.hire_scal()?;
        self.set_int(id, value);
        Some(id)
    }

    /// Hires a scalar already holding the given real.
    pub fn hire_real(&mut self, value: f64) -> Option<ScalId> {
        let id = self.hire_scal()?;
        self.set_real(id, value);
        Some(id)
    }

    /// Hires a scalar already holding the given boolean.
    pub fn hire_bool(&mut self, value: bool) -> Option<ScalId> {
        let id = self.hire_scal()?;
        self.set_bool(id, value);
        Some(id)
    }

    /// Hires a scalar already holding the given string.
    pub fn hire_str(&mut self, value: impl Into<String>) -> Option<ScalId> {
        let id = self.hire_scal()?;
        self.set_str(id, value);
        Some(id)
    }

    /// Hires an empty object slot. `None` when the pool is exhausted.
    pub fn hire_dict(&mut self) -> Option<DictId> {
        let Some(idx) = self.dicts_for_hire.pop() else {
            warn!("dict pool exhausted (capacity {})", self.dicts.len());
            return None;
        };
        let slot = self.dicts.get(idx as usize)?;
        Some(DictId { idx, gen: slot.gen })
    }

    /// Hires an empty array slot. `None` when the pool is exhausted.
    pub fn hire_vect(&mut self) -> Option<VectId> {
        let Some(idx) = self.vects_for_hire.pop() else {
            warn!("vect pool exhausted (capacity {})", self.vects.len());
            return None;
        };
        let slot = self.vects.get(idx as usize)?;
        Some(VectId { idx, gen: slot.gen })
    }

    // ---- fire ----------------------------------------------------------

    /// Returns a node to the pool, recursively firing any children a
    /// container still holds.
    ///
    /// The node is detached from its parent container first, its payload is
    /// reset, and its slot generation is bumped before the slot rejoins the
    /// free list. Firing an already-fired handle is a no-op, so the free
    /// list can never collect duplicates.
    pub fn fire(&mut self, id: impl Into<NodeId>) {
        let id = id.into();
        if !self.is_live(id) {
            return;
        }
        self.detach(id);
        self.release(id);
    }

    /// Recursive release, without the detach step. Callers guarantee the
    /// node is no longer referenced by any live container.
    fn release(&mut self, id: NodeId) {
        match id {
            NodeId::Scal(id) => {
                let Some(slot) = self.scals.get_mut(id.idx as usize) else {
                    return;
                };
                if slot.gen != id.gen {
                    return;
                }
                slot.value = Scalar::Null;
                slot.parent = None;
                slot.gen = slot.gen.wrapping_add(1);
                self.scals_for_hire.push(id.idx);
            }
            NodeId::Dict(id) => {
                let entries = {
                    let Some(slot) = self.dicts.get_mut(id.idx as usize) else {
                        return;
                    };
                    if slot.gen != id.gen {
                        return;
                    }
                    slot.parent = None;
                    slot.gen = slot.gen.wrapping_add(1);
                    core::mem::take(&mut slot.entries)
                };
                self.dicts_for_hire.push(id.idx);
                for (_key, child) in entries {
                    self.release(child);
                }
            }
            NodeId::Vect(id) => {
                let items = {
                    let Some(slot) = self.vects.get_mut(id.idx as usize) else {
                        return;
                    };
                    if slot.gen != id.gen {
                        return;
                    }
                    slot.parent = None;
                    slot.gen = slot.gen.wrapping_add(1);
                    core::mem::take(&mut slot.items)
                };
                self.vects_for_hire.push(id.idx);
                for child in items {
                    self.release(child);
                }
            }
        }
    }

    // ---- accounting ----------------------------------------------------

    /// Scalar slots currently on the free list.
    pub fn free_scals(&self) -> usize {
        self.scals_for_hire.len()
    }

    /// Object slots currently on the free list.
    pub fn free_dicts(&self) -> usize {
        self.dicts_for_hire.len()
    }

    /// Array slots currently on the free list.
    pub fn free_vects(&self) -> usize {
        self.vects_for_hire.len()
    }

    /// Configured scalar capacity.
    pub fn scal_capacity(&self) -> usize {
        self.scals.len()
    }

    /// Configured object capacity.
    pub fn dict_capacity(&self) -> usize {
        self.dicts.len()
    }

    /// Configured array capacity.
    pub fn vect_capacity(&self) -> usize {
        self.vects.len()
    }

    // ---- tree mutation -------------------------------------------------

    /// Inserts or overwrites `key` in `dict`, taking ownership of `child`.
    ///
    /// The child is detached from any container it currently lives in. A
    /// previous value displaced from `key` is fired: last write to a key
    /// wins and destroys the loser. Callers that want to keep the previous
    /// value detach it with [`Pool::remove_child`] first.
    pub fn set_prop(&mut self, dict: DictId, key: impl Into<String>, child: impl Into<NodeId>) {
        let child = child.into();
        if self.dict_slot(dict).is_none() {
            return;
        }
        self.detach(child);
        let displaced = {
            let Some(slot) = self.dicts.get_mut(dict.idx as usize) else {
                return;
            };
            slot.entries.insert(key.into(), child)
        };
        if let Some(old) = displaced {
            self.clear_parent(old, ContainerId::Dict(dict));
            self.release(old);
        }
        self.set_parent(child, ContainerId::Dict(dict));
    }

    /// Appends `child` at the end of `vect`, detaching it from any current
    /// container first.
    pub fn push(&mut self, vect: VectId, child: impl Into<NodeId>) {
        let child = child.into();
        if self.vect_slot(vect).is_none() {
            return;
        }
        self.detach(child);
        if let Some(slot) = self.vects.get_mut(vect.idx as usize) {
            slot.items.push(child);
        }
        self.set_parent(child, ContainerId::Vect(vect));
    }

    /// Removes `child` from `container` by identity and clears its parent
    /// back-reference. Does nothing when the container does not hold it.
    pub fn remove_child(&mut self, container: ContainerId, child: impl Into<NodeId>) {
        let child = child.into();
        match container {
            ContainerId::Dict(id) => {
                let Some(slot) = self.dicts.get_mut(id.idx as usize) else {
                    return;
                };
                if slot.gen != id.gen {
                    return;
                }
                slot.entries.retain(|_, value| *value != child);
            }
            ContainerId::Vect(id) => {
                let Some(slot) = self.vects.get_mut(id.idx as usize) else {
                    return;
                };
                if slot.gen != id.gen {
                    return;
                }
                slot.items.retain(|value| *value != child);
            }
        }
        self.clear_parent(child, container);
    }

    /// Unlinks a node from its current container, if any.
    fn detach(&mut self, id: NodeId) {
        if let Some(container) = self.parent(id) {
            self.remove_child(container, id);
        }
    }

    fn set_parent(&mut self, id: NodeId, container: ContainerId) {
        match id {
            NodeId::Scal(id) => {
                if let Some(slot) = self.scal_slot_mut(id) {
                    slot.parent = Some(container);
                }
            }
            NodeId::Dict(id) => {
                if let Some(slot) = self.dict_slot_mut(id) {
                    slot.parent = Some(container);
                }
            }
            NodeId::Vect(id) => {
                if let Some(slot) = self.vect_slot_mut(id) {
                    slot.parent = Some(container);
                }
            }
        }
    }

    /// Clears the child's back-reference, but only when it still names the
    /// container it was just removed from.
    fn clear_parent(&mut self, id: NodeId, container: ContainerId) {
        let clear = |parent: &mut Option<ContainerId>| {
            if *parent == Some(container) {
                *parent = None;
            }
        };
        match id {
            NodeId::Scal(id) => {
                if let Some(slot) = self.scals.get_mut(id.idx as usize) {
                    if slot.gen == id.gen {
                        clear(&mut slot.parent);
                    }
                }
            }
            NodeId::Dict(id) => {
                if let Some(slot) = self.dicts.get_mut(id.idx as usize) {
                    if slot.gen == id.gen {
                        clear(&mut slot.parent);
                    }
                }
            }
            NodeId::Vect(id) => {
                if let Some(slot) = self.vects.get_mut(id.idx as usize) {
                    if slot.gen == id.gen {
                        clear(&mut slot.parent);
                    }
                }
            }
        }
    }

    // ---- access --------------------------------------------------------

    /// Whether the handle still refers to the hire it was issued for.
    pub fn is_live(&self, id: impl Into<NodeId>) -> bool {
        match id.into() {
            NodeId::Scal(id) => self
                .scals
                .get(id.idx as usize)
                .is_some_and(|slot| slot.gen == id.gen),
            NodeId::Dict(id) => self
                .dicts
                .get(id.idx as usize)
                .is_some_and(|slot| slot.gen == id.gen),
            NodeId::Vect(id) => self
                .vects
                .get(id.idx as usize)
                .is_some_and(|slot| slot.gen == id.gen),
        }
    }

    /// The node's kind tag.
    pub fn kind(&self, id: impl Into<NodeId>) -> NodeKind {
        match id.into() {
            NodeId::Scal(id) => self
                .scal_slot(id)
                .map(|slot| slot.value.kind())
                .unwrap_or(NodeKind::Null),
            NodeId::Dict(_) => NodeKind::Dict,
            NodeId::Vect(_) => NodeKind::Vect,
        }
    }

    /// The container currently holding this node, if any.
    pub fn parent(&self, id: impl Into<NodeId>) -> Option<ContainerId> {
        match id.into() {
            NodeId::Scal(id) => self.scal_slot(id)?.parent,
            NodeId::Dict(id) => self.dict_slot(id)?.parent,
            NodeId::Vect(id) => self.vect_slot(id)?.parent,
        }
    }

    /// The live scalar payload, `None` for a stale handle.
    pub fn scalar(&self, id: ScalId) -> Option<&Scalar> {
        self.scal_slot(id).map(|slot| &slot.value)
    }

    /// The integer payload, when the node currently holds one.
    pub fn as_int(&self, id: ScalId) -> Option<i32> {
        match self.scalar(id)? {
            Scalar::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The real payload, when the node currently holds one.
    pub fn as_real(&self, id: ScalId) -> Option<f64> {
        match self.scalar(id)? {
            Scalar::Real(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean payload, when the node currently holds one.
    pub fn as_bool(&self, id: ScalId) -> Option<bool> {
        match self.scalar(id)? {
            Scalar::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The string payload, when the node currently holds one.
    pub fn as_str(&self, id: ScalId) -> Option<&str> {
        match self.scalar(id)? {
            Scalar::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Re-types the scalar to `Null`.
    pub fn set_null(&mut self, id: ScalId) {
        if let Some(slot) = self.scal_slot_mut(id) {
            slot.value = Scalar::Null;
        }
    }

    /// Re-types the scalar to an integer.
    pub fn set_int(&mut self, id: ScalId, value: i32) {
        if let Some(slot) = self.scal_slot_mut(id) {
            slot.value = Scalar::Int(value);
        }
    }

    /// Re-types the scalar to a real.
    pub fn set_real(&mut self, id: ScalId, value: f64) {
        if let Some(slot) = self.scal_slot_mut(id) {
            slot.value = Scalar::Real(value);
        }
    }

    /// Re-types the scalar to a boolean.
    pub fn set_bool(&mut self, id: ScalId, value: bool) {
        if let Some(slot) = self.scal_slot_mut(id) {
            slot.value = Scalar::Bool(value);
        }
    }

    /// Re-types the scalar to a string.
    pub fn set_str(&mut self, id: ScalId, value: impl Into<String>) {
        if let Some(slot) = self.scal_slot_mut(id) {
            slot.value = Scalar::Str(value.into());
        }
    }

    /// Looks up a key in an object.
    pub fn get_prop(&self, dict: DictId, key: &str) -> Option<NodeId> {
        self.dict_slot(dict)?.entries.get(key).copied()
    }

    /// Number of entries in an object.
    pub fn dict_len(&self, dict: DictId) -> usize {
        self.dict_slot(dict).map_or(0, |slot| slot.entries.len())
    }

    /// Object entries in key order.
    pub fn dict_entries(&self, dict: DictId) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.dict_slot(dict)
            .into_iter()
            .flat_map(|slot| slot.entries.iter().map(|(key, id)| (key.as_str(), *id)))
    }

    /// Looks up an array element by position.
    pub fn get_item(&self, vect: VectId, index: usize) -> Option<NodeId> {
        self.vect_slot(vect)?.items.get(index).copied()
    }

    /// Number of elements in an array.
    pub fn vect_len(&self, vect: VectId) -> usize {
        self.vect_slot(vect).map_or(0, |slot| slot.items.len())
    }

    /// Array elements in insertion order.
    pub fn vect_items(&self, vect: VectId) -> impl Iterator<Item = NodeId> + '_ {
        self.vect_slot(vect)
            .into_iter()
            .flat_map(|slot| slot.items.iter().copied())
    }

    // ---- slot lookup ---------------------------------------------------

    fn scal_slot(&self, id: ScalId) -> Option<&ScalSlot> {
        let slot = self.scals.get(id.idx as usize)?;
        if slot.gen != id.gen {
            debug_assert!(false, "stale scalar handle dereferenced");
            return None;
        }
        Some(slot)
    }

    fn scal_slot_mut(&mut self, id: ScalId) -> Option<&mut ScalSlot> {
        let slot = self.scals.get_mut(id.idx as usize)?;
        if slot.gen != id.gen {
            debug_assert!(false, "stale scalar handle dereferenced");
            return None;
        }
        Some(slot)
    }

    fn dict_slot(&self, id: DictId) -> Option<&DictSlot> {
        let slot = self.dicts.get(id.idx as usize)?;
        if slot.gen != id.gen {
            debug_assert!(false, "stale dict handle dereferenced");
            return None;
        }
        Some(slot)
    }

    fn dict_slot_mut(&mut self, id: DictId) -> Option<&mut DictSlot> {
        let slot = self.dicts.get_mut(id.idx as usize)?;
        if slot.gen != id.gen {
            debug_assert!(false, "stale dict handle dereferenced");
            return None;
        }
        Some(slot)
    }

    fn vect_slot(&self, id: VectId) -> Option<&VectSlot> {
        let slot = self.vects.get(id.idx as usize)?;
        if slot.gen != id.gen {
            debug_assert!(false, "stale vect handle dereferenced");
            return None;
        }
        Some(slot)
    }

    fn vect_slot_mut(&mut self, id: VectId) -> Option<&mut VectSlot> {
        let slot = self.vects.get_mut(id.idx as usize)?;
        if slot.gen != id.gen {
            debug_assert!(false, "stale vect handle dereferenced");
            return None;
        }
        Some(slot)
    }
}
