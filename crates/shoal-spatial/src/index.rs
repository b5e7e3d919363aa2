//! The `NeighborIndex` trait and the neighbor predicate all indexes share.

use glam::DVec3;

use shoal_core::AgentId;

use crate::SpatialResult;

/// Read access to the current position of every registered agent.
///
/// The index never owns agent state; it holds `AgentId` handles and asks
/// the owner for positions at query time.
pub trait PositionLookup {
    fn position_of(&self, id: AgentId) -> DVec3;
}

impl PositionLookup for [DVec3] {
    #[inline]
    fn position_of(&self, id: AgentId) -> DVec3 {
        self[id.index()]
    }
}

impl PositionLookup for Vec<DVec3> {
    #[inline]
    fn position_of(&self, id: AgentId) -> DVec3 {
        self[id.index()]
    }
}

/// `true` when `candidate` is a neighbor of a query at `center`:
/// `0 < distance < radius`.
///
/// The zero-distance exclusion is what keeps an agent out of its own
/// neighborhood (and also drops any agent sitting exactly on top of it).
#[inline]
pub fn is_neighbor(center: DVec3, candidate: DVec3, radius: f64) -> bool {
    let d = center.distance(candidate);
    d > 0.0 && d < radius
}

/// Search reach used by the partitioned indexes for their coarse candidate
/// pass.  Slightly larger than `radius` so rounding in the coarse pass can
/// never drop a point the exact predicate would keep.
#[inline]
pub(crate) fn coarse_reach(radius: f64) -> f64 {
    radius + radius.abs() * 1e-9 + f64::EPSILON
}

/// A lookup surface over agent positions.
///
/// # Contract
///
/// - [`register`](Self::register) is called once per agent at startup.
/// - [`moved`](Self::moved) is called every time a registered agent's
///   position changes, before the next query.
/// - [`query`](Self::query) clears `out`, then fills it with every
///   registered agent for which [`is_neighbor`] holds, in ascending
///   `AgentId` order.
pub trait NeighborIndex {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Add an agent at `position`.
    fn register(&mut self, id: AgentId, position: DVec3);

    /// Tell the index that `id` moved from `from` to `to`.
    fn moved(&mut self, id: AgentId, from: DVec3, to: DVec3) -> SpatialResult<()>;

    /// Collect neighbors of `center` within `radius` into `out`.
    fn query<L: PositionLookup + ?Sized>(
        &self,
        lookup: &L,
        center: DVec3,
        radius: f64,
        out:    &mut Vec<AgentId>,
    );

    /// Number of registered agents.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
