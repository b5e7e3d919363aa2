//! The `Sim` struct and its frame step.

use std::fmt;

use log::{debug, trace};

use shoal_agent::{AgentStore, Steerable};
use shoal_core::{AgentId, FlockConfig, Frame, FrameClock, RandomSource, SteeringParams};
use shoal_spatial::NeighborIndex;
use shoal_steer::{Neighbor, SteeringOutcome, steer, wander_delta};

use crate::{FlockObserver, FrameStats, SimError, SimResult};

// ── UpdateMode ────────────────────────────────────────────────────────────────

/// How agents within one frame see each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// In place, in `AgentId` order.  An agent's neighbors may already have
    /// moved this frame.
    #[default]
    Sequential,
    /// Every agent steers against the start-of-frame state; writes are
    /// deferred until all agents are computed.
    Snapshot,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Sequential => f.write_str("sequential"),
            UpdateMode::Snapshot => f.write_str("snapshot"),
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// Owns the flock, the neighborhood index over it, and the RNG.  The
/// presentation layer calls [`step`](Self::step) once per rendered frame
/// and reads transforms back through [`agents`](Self::agents) or an
/// observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: RandomSource, I: NeighborIndex> {
    /// Configuration the run was built with (validated).
    pub config: FlockConfig,

    /// Frame counter and accumulated simulated time.
    pub clock: FrameClock,

    /// Every agent, indexed by `AgentId`.
    pub agents: AgentStore,

    /// Neighborhood index over `agents`; kept in sync on every move.
    pub index: I,

    /// Source of every random draw after build.
    pub rng: R,

    pub mode: UpdateMode,

    /// Observer snapshot cadence in frames; 0 disables snapshots.
    pub snapshot_interval: u64,

    // Scratch buffers reused across agents in sequential mode.
    pub(crate) neighbor_ids:   Vec<AgentId>,
    pub(crate) neighbor_views: Vec<Neighbor>,
}

impl<R: RandomSource, I: NeighborIndex + Sync> Sim<R, I> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Read-only view of the flock.
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// The frame the next `step` will run.
    pub fn frame(&self) -> Frame {
        self.clock.current_frame
    }

    /// Advance the whole flock by one frame of `dt` seconds.
    ///
    /// `dt` must be finite and non-negative.  A rejected `dt` leaves the
    /// simulation untouched.
    pub fn step<O: FlockObserver>(&mut self, dt: f64, observer: &mut O) -> SimResult<FrameStats> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidDelta(dt));
        }

        let frame = self.clock.current_frame;
        observer.on_frame_start(frame);

        let neighbor_links = match self.mode {
            UpdateMode::Sequential => self.update_sequential(dt)?,
            UpdateMode::Snapshot => self.update_snapshot(dt)?,
        };
        let wrapped = self.check_bounds()?;

        let stats = FrameStats {
            frame,
            dt,
            updated: self.agents.count(),
            neighbor_links,
            wrapped,
        };
        debug!(
            "{frame}: dt={dt:.4} mean_neighbors={:.2} wrapped={wrapped}",
            stats.mean_neighbors()
        );

        observer.on_frame_end(frame, &stats);
        if frame.is_every(self.snapshot_interval) {
            observer.on_snapshot(frame, &self.agents);
        }

        self.clock.advance(dt);
        Ok(stats)
    }

    /// Run `n` frames of fixed `dt`, then call `on_run_end`.
    pub fn run_frames<O: FlockObserver>(
        &mut self,
        n:        u64,
        dt:       f64,
        observer: &mut O,
    ) -> SimResult<()> {
        for _ in 0..n {
            self.step(dt, observer)?;
        }
        observer.on_run_end(self.clock.current_frame);
        Ok(())
    }

    // ── Frame phases ──────────────────────────────────────────────────────

    /// Update every agent in place, in id order.  Returns the total number
    /// of neighbor links seen.
    fn update_sequential(&mut self, dt: f64) -> SimResult<usize> {
        let params = self.config.steering;
        let mut links = 0;

        for i in 0..self.agents.count() {
            let id = AgentId(i as u32);
            let (center, radius) = {
                let boid = &self.agents.boids[i];
                (boid.position(), boid.radius())
            };

            self.index.query(&self.agents, center, radius, &mut self.neighbor_ids);
            self.agents.neighbors_into(&self.neighbor_ids, &mut self.neighbor_views);
            links += self.neighbor_ids.len();

            let boid = &mut self.agents.boids[i];
            boid.update(dt, &self.neighbor_views, &params, &mut self.rng);
            self.index.moved(id, center, boid.position())?;
        }

        Ok(links)
    }

    /// Compute every agent against the start-of-frame state, then apply.
    fn update_snapshot(&mut self, dt: f64) -> SimResult<usize> {
        let params = self.config.steering;
        let n = self.agents.count();

        // One draw per agent, in id order, before any compute.
        let deltas: Vec<f64> = (0..n).map(|_| wander_delta(&mut self.rng, &params)).collect();

        let frozen = FrozenFrame { agents: &self.agents, index: &self.index, dt, params: &params };
        let outcomes = frozen.compute(&deltas);

        let mut links = 0;
        for (i, (outcome, seen)) in outcomes.iter().enumerate() {
            let boid = &mut self.agents.boids[i];
            let from = boid.position();
            boid.apply(outcome, dt);
            self.index.moved(AgentId(i as u32), from, boid.position())?;
            links += seen;
        }

        Ok(links)
    }

    /// Wrap every agent back into the world.  Returns how many moved.
    fn check_bounds(&mut self) -> SimResult<usize> {
        let bound = self.config.world_bound;
        let mut wrapped = 0;

        for i in 0..self.agents.count() {
            let boid = &mut self.agents.boids[i];
            let from = boid.position();
            if boid.check_bounds(bound) {
                let id = AgentId(i as u32);
                trace!("{id} wrapped {from} → {}", boid.position());
                self.index.moved(id, from, boid.position())?;
                wrapped += 1;
            }
        }

        Ok(wrapped)
    }
}

// ── Snapshot compute ──────────────────────────────────────────────────────────

/// The start-of-frame state every snapshot-mode agent steers against.
struct FrozenFrame<'a, I> {
    agents: &'a AgentStore,
    index:  &'a I,
    dt:     f64,
    params: &'a SteeringParams,
}

/// Per-worker neighbor buffers.
type Scratch = (Vec<AgentId>, Vec<Neighbor>);

impl<I: NeighborIndex + Sync> FrozenFrame<'_, I> {
    /// Steering outcome for agent `i`, plus how many neighbors it saw.
    fn outcome(&self, i: usize, delta: f64, scratch: &mut Scratch) -> (SteeringOutcome, usize) {
        let (ids, views) = scratch;
        let boid = &self.agents.boids[i];
        self.index.query(self.agents, boid.position(), boid.radius(), ids);
        self.agents.neighbors_into(ids, views);
        (steer(&boid.kinematics, views, delta, self.dt, self.params), ids.len())
    }

    #[cfg(not(feature = "parallel"))]
    fn compute(&self, deltas: &[f64]) -> Vec<(SteeringOutcome, usize)> {
        let mut scratch = Scratch::default();
        deltas
            .iter()
            .enumerate()
            .map(|(i, &delta)| self.outcome(i, delta, &mut scratch))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn compute(&self, deltas: &[f64]) -> Vec<(SteeringOutcome, usize)> {
        use rayon::prelude::*;

        deltas
            .par_iter()
            .enumerate()
            .map_init(Scratch::default, |scratch, (i, &delta)| self.outcome(i, delta, scratch))
            .collect()
    }
}
