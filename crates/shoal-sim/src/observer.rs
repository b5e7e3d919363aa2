//! Frame observer trait: the presentation layer's hook into the loop.

use shoal_agent::AgentStore;
use shoal_core::Frame;

/// Summary of one completed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frame:          Frame,
    pub dt:             f64,
    /// Agents that ran a steering update.
    pub updated:        usize,
    /// Sum of every agent's neighborhood size this frame.
    pub neighbor_links: usize,
    /// Agents teleported by the bounds wrap.
    pub wrapped:        usize,
}

impl FrameStats {
    /// Average neighborhood size, or 0 for an empty flock.
    pub fn mean_neighbors(&self) -> f64 {
        if self.updated == 0 {
            0.0
        } else {
            self.neighbor_links as f64 / self.updated as f64
        }
    }
}

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] at key points in the
/// frame.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: renderer sync
///
/// ```rust,ignore
/// struct SceneSync<'a> { meshes: &'a mut [MeshHandle] }
///
/// impl FlockObserver for SceneSync<'_> {
///     fn on_snapshot(&mut self, _frame: Frame, agents: &AgentStore) {
///         for (id, boid) in agents.iter() {
///             self.meshes[id.index()].set_transform(boid.position(), boid.orientation());
///         }
///     }
/// }
/// ```
pub trait FlockObserver {
    /// Called at the very start of each frame, before any agent moves.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called after every agent has updated and been bounds-checked.
    fn on_frame_end(&mut self, _frame: Frame, _stats: &FrameStats) {}

    /// Called every `snapshot_interval` frames with read-only access to the
    /// whole flock, after `on_frame_end`.
    fn on_snapshot(&mut self, _frame: Frame, _agents: &AgentStore) {}

    /// Called once when [`Sim::run_frames`][crate::Sim::run_frames] finishes.
    fn on_run_end(&mut self, _final_frame: Frame) {}
}

/// A [`FlockObserver`] that does nothing.
pub struct NoopObserver;

impl FlockObserver for NoopObserver {}
