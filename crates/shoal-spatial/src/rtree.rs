//! R*-tree neighborhood index backed by `rstar`.

use glam::DVec3;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use shoal_core::AgentId;

use crate::index::coarse_reach;
use crate::{NeighborIndex, PositionLookup, SpatialError, SpatialResult, is_neighbor};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D point with the owning agent's handle.
#[derive(Clone, Debug, PartialEq)]
struct AgentEntry {
    point: [f64; 3],
    id:    AgentId,
}

impl AgentEntry {
    fn new(id: AgentId, p: DVec3) -> Self {
        Self { point: p.to_array(), id }
    }
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// R-tree neighborhood index.
///
/// Moves are a remove + insert.  For a whole-flock rebuild,
/// [`RTreeIndex::bulk_load`] is O(N log N) and faster than N inserts.
pub struct RTreeIndex {
    tree: RTree<AgentEntry>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build a tree from `(id, position)` pairs in one pass.
    pub fn bulk_load(agents: impl IntoIterator<Item = (AgentId, DVec3)>) -> Self {
        let entries = agents
            .into_iter()
            .map(|(id, p)| AgentEntry::new(id, p))
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }
}

impl Default for RTreeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborIndex for RTreeIndex {
    fn name(&self) -> &'static str {
        "rtree"
    }

    fn register(&mut self, id: AgentId, position: DVec3) {
        self.tree.insert(AgentEntry::new(id, position));
    }

    fn moved(&mut self, id: AgentId, from: DVec3, to: DVec3) -> SpatialResult<()> {
        if from == to {
            return Ok(());
        }
        self.tree
            .remove(&AgentEntry::new(id, from))
            .ok_or(SpatialError::UnknownAgent(id))?;
        self.tree.insert(AgentEntry::new(id, to));
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
        out.extend(
            self.tree
                .locate_within_distance(center.to_array(), reach * reach)
                .map(|e| e.id)
                .filter(|&id| is_neighbor(center, lookup.position_of(id), radius)),
        );
        out.sort_unstable();
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}
