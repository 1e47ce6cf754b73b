//! The single arena of flat arrays that owns every entity in the level
//! (spec.md §3). Assembled once by an external loader and thereafter
//! mutated only by this crate's `step`/predicate functions.

pub mod ball;
pub mod geometry;
pub mod path;
pub mod region;

use ball::Ball;
use geometry::{Edge, IndexPool, Lump, Node, Side, Vertex};
use path::{Body, Path};
use region::{Goal, Item, Jump, Switch};

use crate::error::CoreError;

/// The world: every array the core operates over, plus the index pool lumps
/// and nodes refer back into. No heap pointers escape this struct; every
/// cross-reference between arrays is a plain integer index.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub sides: Vec<Side>,
    pub lumps: Vec<Lump>,
    pub nodes: Vec<Node>,
    pub pool: IndexPool,

    pub bodies: Vec<Body>,
    pub paths: Vec<Path>,
    pub balls: Vec<Ball>,

    pub items: Vec<Item>,
    pub goals: Vec<Goal>,
    pub jumps: Vec<Jump>,
    pub switches: Vec<Switch>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defensive sanity checks for loader authors and tests. Never called
    /// from the per-frame hot path (spec.md §7: the core itself treats bad
    /// indices as a loader bug, not something it recovers from at runtime).
    pub fn validate(&self) -> Result<(), CoreError> {
        for (i, lump) in self.lumps.iter().enumerate() {
            if lump.sides.count == 0 {
                return Err(CoreError::EmptyLump { lump: i });
            }
            check_range(lump.sides.start, lump.sides.count, self.pool.sides.len(), i)?;
            check_range(lump.edges.start, lump.edges.count, self.pool.edges.len(), i)?;
            check_range(lump.verts.start, lump.verts.count, self.pool.verts.len(), i)?;
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(side) = node.side {
                if side as usize >= self.sides.len() {
                    return Err(CoreError::DanglingIndex {
                        what: "node.side",
                        index: side as i32,
                        len: self.sides.len(),
                    });
                }
            }
            if node.front >= 0 && node.front as usize >= self.nodes.len() {
                return Err(CoreError::DanglingIndex {
                    what: "node.front",
                    index: node.front,
                    len: self.nodes.len(),
                });
            }
            if node.back >= 0 && node.back as usize >= self.nodes.len() {
                return Err(CoreError::DanglingIndex {
                    what: "node.back",
                    index: node.back,
                    len: self.nodes.len(),
                });
            }
            let _ = i;
        }

        for (i, body) in self.bodies.iter().enumerate() {
            if body.ni >= 0 && body.ni as usize >= self.nodes.len() {
                return Err(CoreError::DanglingIndex {
                    what: "body.ni",
                    index: body.ni,
                    len: self.nodes.len(),
                });
            }
            if body.pi >= 0 {
                self.check_path_cycles(body.pi as usize)
                    .map_err(|_| CoreError::PathDoesNotCycle { start: i })?;
            }
        }

        for sw in &self.switches {
            if sw.pi >= 0 {
                self.check_path_cycles(sw.pi as usize)?;
            }
        }

        Ok(())
    }

    /// Returns `Ok(())` if following successors from `start` reaches a
    /// cycle within `paths.len() + 1` steps (spec.md §3 Path invariant).
    fn check_path_cycles(&self, start: usize) -> Result<(), CoreError> {
        let limit = self.paths.len() + 1;
        let mut cur = start;
        for _ in 0..limit {
            let Some(p) = self.paths.get(cur) else {
                return Err(CoreError::DanglingIndex {
                    what: "path.pi",
                    index: cur as i32,
                    len: self.paths.len(),
                });
            };
            if p.pi < 0 {
                return Err(CoreError::PathDoesNotCycle { start });
            }
            cur = p.pi as usize;
        }
        Ok(())
    }
}

fn check_range(start: u32, count: u32, pool_len: usize, lump: usize) -> Result<(), CoreError> {
    let end = start as usize + count as usize;
    if end > pool_len {
        return Err(CoreError::IndexRangeOutOfBounds {
            lump,
            start: start as usize,
            end,
            pool_len,
        });
    }
    Ok(())
}
