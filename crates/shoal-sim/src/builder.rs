//! Fluent builder for constructing a [`Sim`].

use log::info;

use shoal_agent::{AgentStore, AgentStoreBuilder, Steerable};
use shoal_core::{FlockConfig, FrameClock, RandomSource};
use shoal_spatial::{LinearIndex, NeighborIndex};

use crate::{Sim, SimError, SimResult, UpdateMode};

/// Fluent builder for [`Sim<R, I>`].
///
/// # Required inputs
///
/// - [`FlockConfig`]: agent count, spawn box, world bound, constants
/// - `R: RandomSource`: owns every random draw of the run
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.agents(store)`         | `config.agent_count` agents spawned from `rng` |
/// | `.index(i)`              | [`LinearIndex`]                           |
/// | `.mode(m)`               | [`UpdateMode::Sequential`]                |
/// | `.snapshot_interval(n)`  | 1 (every frame); 0 disables snapshots     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, SimRng::new(seed))
///     .index(GridIndex::new(15.0)?)
///     .mode(UpdateMode::Snapshot)
///     .build()?;
/// sim.run_frames(600, 1.0 / 60.0, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: RandomSource, I: NeighborIndex = LinearIndex> {
    config:            FlockConfig,
    rng:               R,
    agents:            Option<AgentStore>,
    index:             I,
    mode:              UpdateMode,
    snapshot_interval: u64,
}

impl<R: RandomSource> SimBuilder<R, LinearIndex> {
    /// Create a builder with all required inputs.
    pub fn new(config: FlockConfig, rng: R) -> Self {
        let index = LinearIndex::with_capacity(config.agent_count);
        Self {
            config,
            rng,
            agents:            None,
            index,
            mode:              UpdateMode::default(),
            snapshot_interval: 1,
        }
    }
}

impl<R: RandomSource, I: NeighborIndex + Sync> SimBuilder<R, I> {
    /// Supply the initial flock instead of spawning one.
    ///
    /// Its length must equal `config.agent_count`.  No spawn draws are taken
    /// from the RNG in this case.
    pub fn agents(mut self, agents: AgentStore) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Use a different neighborhood index.  It must be empty; `build`
    /// registers every agent with it.
    pub fn index<J: NeighborIndex + Sync>(self, index: J) -> SimBuilder<R, J> {
        SimBuilder {
            config:            self.config,
            rng:               self.rng,
            agents:            self.agents,
            index,
            mode:              self.mode,
            snapshot_interval: self.snapshot_interval,
        }
    }

    pub fn mode(mut self, mode: UpdateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Call `FlockObserver::on_snapshot` every `n` frames (0 = never).
    pub fn snapshot_interval(mut self, n: u64) -> Self {
        self.snapshot_interval = n;
        self
    }

    /// Validate inputs, spawn (if needed) and register every agent, and
    /// return a ready-to-run [`Sim`].
    pub fn build(mut self) -> SimResult<Sim<R, I>> {
        self.config.validate()?;

        if !self.index.is_empty() {
            return Err(SimError::IndexNotEmpty(self.index.len()));
        }

        let agents = match self.agents {
            Some(store) => {
                if store.count() != self.config.agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: self.config.agent_count,
                        got:      store.count(),
                        what:     "initial agents",
                    });
                }
                store
            }
            None => AgentStoreBuilder::new(&self.config).spawn(&mut self.rng),
        };

        for (id, boid) in agents.iter() {
            self.index.register(id, boid.position());
        }

        info!(
            "flock ready: {} agents, {} update, {} index, world bound ±{}",
            agents.count(),
            self.mode,
            self.index.name(),
            self.config.world_bound,
        );

        Ok(Sim {
            config:            self.config,
            clock:             FrameClock::new(),
            agents,
            index:             self.index,
            rng:               self.rng,
            mode:              self.mode,
            snapshot_interval: self.snapshot_interval,
            neighbor_ids:      Vec::new(),
            neighbor_views:    Vec::new(),
        })
    }
}
