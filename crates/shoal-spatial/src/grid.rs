//! Uniform hash grid.
//!
//! Space is cut into cubic cells of side `cell_size`; each occupied cell maps
//! to the agents inside it.  A query visits every cell overlapping the cube
//! `[center - r, center + r]` and applies the exact predicate to the agents
//! found there.  With `cell_size ≈ radius` that is about 27 cells per query.
//!
//! The grid is unbounded: agents that drift arbitrarily far in Y simply land
//! in cells nobody else visits.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as CellMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as CellMap;

use glam::DVec3;

use shoal_core::AgentId;

use crate::index::coarse_reach;
use crate::{NeighborIndex, PositionLookup, SpatialError, SpatialResult, is_neighbor};

type Cell = [i64; 3];

/// Hash-grid neighborhood index.
#[derive(Clone, Debug)]
pub struct GridIndex {
    cell_size: f64,
    cells:     CellMap<Cell, Vec<AgentId>>,
    /// Current cell of each registered agent, indexed by `AgentId`.
    cell_of:   Vec<Option<Cell>>,
    count:     usize,
}

impl GridIndex {
    /// Create an empty grid.  `cell_size` must be finite and positive; the
    /// agent radius is a good choice.
    pub fn new(cell_size: f64) -> SpatialResult<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            cells:   CellMap::default(),
            cell_of: Vec::new(),
            count:   0,
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells holding at least one agent.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn cell(&self, p: DVec3) -> Cell {
        let c = (p / self.cell_size).floor();
        [c.x as i64, c.y as i64, c.z as i64]
    }

    fn detach(&mut self, id: AgentId, cell: Cell) {
        if let Some(bucket) = self.cells.get_mut(&cell) {
            if let Some(pos) = bucket.iter().position(|&a| a == id) {
                bucket.swap_remove(pos);
            }
            if bucket.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }
}

impl NeighborIndex for GridIndex {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn register(&mut self, id: AgentId, position: DVec3) {
        let cell = self.cell(position);
        if id.index() >= self.cell_of.len() {
            self.cell_of.resize(id.index() + 1, None);
        }
        match self.cell_of[id.index()].replace(cell) {
            // Re-registering moves the agent rather than duplicating it.
            Some(old) => self.detach(id, old),
            None => self.count += 1,
        }
        self.cells.entry(cell).or_default().push(id);
    }

    fn moved(&mut self, id: AgentId, _from: DVec3, to: DVec3) -> SpatialResult<()> {
        let old = self
            .cell_of
            .get(id.index())
            .copied()
            .flatten()
            .ok_or(SpatialError::UnknownAgent(id))?;
        let new = self.cell(to);
        if old != new {
            self.detach(id, old);
            self.cells.entry(new).or_default().push(id);
            self.cell_of[id.index()] = Some(new);
        }
        Ok(())
    }

    fn query<L: PositionLookup + ?Sized>(
        &self,
        lookup: &L,
        center: DVec3,
        radius: f64,
        out:    &mut Vec<AgentId>,
    ) {
        out.clear();
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }

        let reach = coarse_reach(radius);
        let lo = self.cell(center - DVec3::splat(reach));
        let hi = self.cell(center + DVec3::splat(reach));
        // `None` when the cell count itself overflows.
        let span = (0..3)
            .map(|axis| (i128::from(hi[axis]) - i128::from(lo[axis]) + 1) as u128)
            .try_fold(1u128, |acc, n| acc.checked_mul(n));

        let mut keep = |ids: &[AgentId]| {
            out.extend(
                ids.iter()
                    .copied()
                    .filter(|&id| is_neighbor(center, lookup.position_of(id), radius)),
            );
        };

        // A huge radius would visit more empty cells than there are occupied
        // ones; walk the occupied cells instead.
        if span.is_none_or(|cells| cells > self.cells.len() as u128) {
            for (cell, ids) in &self.cells {
                if (0..3).all(|axis| lo[axis] <= cell[axis] && cell[axis] <= hi[axis]) {
                    keep(ids);
                }
            }
        } else {
            for x in lo[0]..=hi[0] {
                for y in lo[1]..=hi[1] {
                    for z in lo[2]..=hi[2] {
                        if let Some(ids) = self.cells.get(&[x, y, z]) {
                            keep(ids);
                        }
                    }
                }
            }
        }

        out.sort_unstable();
    }

    fn len(&self) -> usize {
        self.count
    }
}
