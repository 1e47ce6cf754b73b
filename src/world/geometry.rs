//! Static geometry: vertices, edges, plane sides, convex lumps and the BSP
//! tree over them (spec.md §3, §4.D).
//!
//! Every cross-reference here is a plain index into one of `World`'s flat
//! arrays. `-1`/`None` means "no such reference"; there are no owning
//! pointers, matching spec.md §9 ("flat arrays + integer indices... no
//! owning graph of heap objects is required").

use vek::Vec3;

use crate::config::L_DETAIL;

/// Index into `World::vertices`.
pub type VertexIndex = u32;
/// Index into `World::sides`.
pub type SideIndex = u32;
/// Index into `World::edges`.
pub type EdgeIndex = u32;
/// Index into `World::lumps`.
pub type LumpIndex = u32;
/// Index into `World::nodes`. `-1` means "no such child".
pub type NodeIndex = i32;

/// A single point in the index pool / vertex array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub p: Vec3<f32>,
}

/// A segment between two vertices.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub vi: VertexIndex,
    pub vj: VertexIndex,
}

/// A half-space `{x . n <= d}` bounding one face of a convex lump.
#[derive(Debug, Clone, Copy)]
pub struct Side {
    /// Unit normal.
    pub n: Vec3<f32>,
    pub d: f32,
}

/// A contiguous range into one of the index pools referenced by a [`Lump`].
#[derive(Debug, Clone, Copy)]
pub struct IndexRange {
    pub start: u32,
    pub count: u32,
}

impl IndexRange {
    pub fn iter(self) -> impl Iterator<Item = u32> {
        self.start..(self.start + self.count)
    }
}

/// A convex solid cell bounded by plane sides, with incident edges and
/// vertices enumerated for continuous collision against spheres.
#[derive(Debug, Clone, Copy)]
pub struct Lump {
    pub sides: IndexRange,
    pub edges: IndexRange,
    pub verts: IndexRange,
    pub flags: u32,
}

impl Lump {
    /// A lump marked `DETAIL` is non-solid and skipped by collision
    /// (spec.md §3, §4.D).
    pub fn is_detail(&self) -> bool {
        self.flags & L_DETAIL != 0
    }
}

/// A BSP node: an optional splitting plane, optional front/back children,
/// and an owned range of lumps tested at this level.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    /// Splitting side index, or `None` for a leaf.
    pub side: Option<SideIndex>,
    /// Front child, or `-1`.
    pub front: NodeIndex,
    /// Back child, or `-1`.
    pub back: NodeIndex,
    pub lumps: IndexRange,
}

/// Flat pool of indices that `Lump` ranges refer into — one for each of
/// sides, edges, and vertices, since the three are never mixed inside a
/// single `IndexRange`.
#[derive(Debug, Clone, Default)]
pub struct IndexPool {
    pub sides: Vec<SideIndex>,
    pub edges: Vec<EdgeIndex>,
    pub verts: Vec<VertexIndex>,
}
