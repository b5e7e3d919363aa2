//! Random spawning of a flock.
//!
//! # Usage
//!
//! ```rust
//! use shoal_agent::AgentStoreBuilder;
//! use shoal_core::{FlockConfig, SimRng};
//!
//! let config = FlockConfig { agent_count: 250, ..FlockConfig::default() };
//! let store = AgentStoreBuilder::new(&config).spawn(&mut SimRng::new(config.seed));
//! assert_eq!(store.count(), 250);
//! ```

use glam::DVec3;
use log::debug;

use shoal_core::{AgentParams, FlockConfig, RandomSource};

use crate::{AgentStore, Boid};

/// Builds an [`AgentStore`] by spawning agents at random.
///
/// Per agent, draws are consumed in this order: appearance variant, then
/// position x, y, z uniform in `[-spawn_box_range, spawn_box_range)`, then
/// heading x and z uniform in `[-1, 1)` with y = 0.
pub struct AgentStoreBuilder {
    count:           usize,
    spawn_box_range: f64,
    mesh_variants:   u8,
    agent:           AgentParams,
}

impl AgentStoreBuilder {
    pub fn new(config: &FlockConfig) -> Self {
        Self {
            count:           config.agent_count,
            spawn_box_range: config.spawn_box_range,
            mesh_variants:   config.mesh_variants.max(1),
            agent:           config.agent,
        }
    }

    /// Override the number of agents to spawn.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Spawn every agent, drawing from `rng`.
    pub fn spawn<R: RandomSource + ?Sized>(self, rng: &mut R) -> AgentStore {
        let s = self.spawn_box_range;
        let boids: Vec<Boid> = (0..self.count)
            .map(|_| {
                let variant = self.draw_variant(rng);
                let position = DVec3::new(rng.range(-s, s), rng.range(-s, s), rng.range(-s, s));
                let direction = DVec3::new(rng.range(-1.0, 1.0), 0.0, rng.range(-1.0, 1.0));
                Boid::new(position, direction, &self.agent).with_variant(variant)
            })
            .collect();

        debug!(
            "spawned {} agents in ±{} box ({} variants)",
            boids.len(),
            s,
            self.mesh_variants
        );
        AgentStore::from_boids(boids)
    }

    fn draw_variant<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u8 {
        let n = self.mesh_variants;
        let pick = (rng.next_unit() * f64::from(n)).floor() as u8;
        pick.min(n - 1)
    }
}
