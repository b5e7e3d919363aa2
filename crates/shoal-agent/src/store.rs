//! Agent storage.

use glam::DVec3;

use shoal_core::AgentId;
use shoal_spatial::PositionLookup;
use shoal_steer::Neighbor;

use crate::{Boid, Steerable};

/// Every agent in the simulation, indexed by `AgentId`.
///
/// `boids[id.index()]` is agent `id`.  The set never grows or shrinks once
/// a simulation is built.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    pub boids: Vec<Boid>,
}

impl AgentStore {
    pub fn from_boids(boids: Vec<Boid>) -> Self {
        Self { boids }
    }

    /// Number of agents.
    pub fn count(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Boid> {
        self.boids.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Boid> {
        self.boids.get_mut(id.index())
    }

    /// All handles, ascending.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.boids.len() as u32).map(AgentId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Boid)> + '_ {
        self.boids
            .iter()
            .enumerate()
            .map(|(i, b)| (AgentId(i as u32), b))
    }

    /// Copy the neighbor views of `ids` into `out` (cleared first).
    pub fn neighbors_into(&self, ids: &[AgentId], out: &mut Vec<Neighbor>) {
        out.clear();
        out.extend(ids.iter().map(|id| self.boids[id.index()].as_neighbor()));
    }

    /// Mean position of the flock, or `None` for an empty store.
    pub fn centroid(&self) -> Option<DVec3> {
        if self.boids.is_empty() {
            return None;
        }
        let sum = self
            .boids
            .iter()
            .fold(DVec3::ZERO, |acc, b| acc + b.position());
        Some(sum / self.boids.len() as f64)
    }
}

impl PositionLookup for AgentStore {
    #[inline]
    fn position_of(&self, id: AgentId) -> DVec3 {
        self.boids[id.index()].position()
    }
}
