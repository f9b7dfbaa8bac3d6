// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

/// The payload shapes a tree node can take.
///
/// `Null` through `Str` all live in the same scalar slot; an individual
/// scalar node moves between them freely when reassigned (re-typing).
/// `Dict` and `Vect` are the two container shapes, each with its own pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// No value.
    Null,
    /// 32-bit signed integer.
    Int,
    /// 64-bit floating point.
    Real,
    /// Boolean.
    Bool,
    /// Text string.
    Str,
    /// Object: ordered-by-key string-to-node mapping.
    Dict,
    /// Array: insertion-ordered node sequence.
    Vect,
}

/// Scalar payload. Exactly one variant is live at a time; re-typing a node
/// replaces the variant, dropping any previous string storage with it.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// No value.
    Null,
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit floating point.
    Real(f64),
    /// Boolean.
    Bool(bool),
    /// Text string.
    Str(String),
}

impl Scalar {
    /// The kind tag matching the live variant.
    pub fn kind(&self) -> NodeKind {
        match self {
            Scalar::Null => NodeKind::Null,
            Scalar::Int(_) => NodeKind::Int,
            Scalar::Real(_) => NodeKind::Real,
            Scalar::Bool(_) => NodeKind::Bool,
            Scalar::Str(_) => NodeKind::Str,
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Null
    }
}

/// Defines a generational handle to one kind of pooled slot.
///
/// A handle carries the slot index plus the generation the slot had when it
/// was hired. The pool bumps a slot's generation when the slot is fired, so
/// a retained handle goes stale instead of silently aliasing the slot's
/// next occupant.
macro_rules! define_handle {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub(crate) idx: u16,
            pub(crate) gen: u16,
        }
    };
}

define_handle!(ScalId, "Handle to a scalar node (null/int/real/bool/str).");
define_handle!(DictId, "Handle to an object node.");
define_handle!(VectId, "Handle to an array node.");

/// Handle to any node, as stored inside containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeId {
    /// A scalar node.
    Scal(ScalId),
    /// An object node.
    Dict(DictId),
    /// An array node.
    Vect(VectId),
}

impl NodeId {
    /// The scalar handle, if this refers to a scalar node.
    pub fn as_scal(self) -> Option<ScalId> {
        match self {
            NodeId::Scal(id) => Some(id),
            _ => None,
        }
    }

    /// The dict handle, if this refers to an object node.
    pub fn as_dict(self) -> Option<DictId> {
        match self {
            NodeId::Dict(id) => Some(id),
            _ => None,
        }
    }

    /// The vect handle, if this refers to an array node.
    pub fn as_vect(self) -> Option<VectId> {
        match self {
            NodeId::Vect(id) => Some(id),
            _ => None,
        }
    }
}

/// Parent back-reference: the two container shapes a node can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerId {
    /// Contained in an object, under some key.
    Dict(DictId),
    /// Contained in an array, at some index.
    Vect(VectId),
}

impl From<ScalId> for NodeId {
    fn from(id: ScalId) -> Self {
        NodeId::Scal(id)
    }
}

impl From<DictId> for NodeId {
    fn from(id: DictId) -> Self {
        NodeId::Dict(id)
    }
}

impl From<VectId> for NodeId {
    fn from(id: VectId) -> Self {
        NodeId::Vect(id)
    }
}

impl From<ContainerId> for NodeId {
    fn from(id: ContainerId) -> Self {
        match id {
            ContainerId::Dict(id) => NodeId::Dict(id),
            ContainerId::Vect(id) => NodeId::Vect(id),
        }
    }
}
