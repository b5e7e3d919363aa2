//! Reference neighborhood index: a full scan over every registered agent.

use glam::DVec3;

use shoal_core::AgentId;

use crate::{NeighborIndex, PositionLookup, SpatialResult, is_neighbor};

/// Linear-scan index.  O(N) per query, no bookkeeping on moves.
///
/// Results come back in registration order, which is ascending `AgentId`
/// order when agents are registered by id (as the simulation does).
#[derive(Clone, Debug, Default)]
pub struct LinearIndex {
    members: Vec<AgentId>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { members: Vec::with_capacity(n) }
    }

    /// Registered handles, in registration order.
    pub fn members(&self) -> &[AgentId] {
        &self.members
    }
}

impl NeighborIndex for LinearIndex {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn register(&mut self, id: AgentId, _position: DVec3) {
        self.members.push(id);
    }

    /// Positions are read live from the lookup, so there is nothing to update.
    fn moved(&mut self, _id: AgentId, _from: DVec3, _to: DVec3) -> SpatialResult<()> {
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
        out.extend(
            self.members
                .iter()
                .copied()
                .filter(|&id| is_neighbor(center, lookup.position_of(id), radius)),
        );
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}
