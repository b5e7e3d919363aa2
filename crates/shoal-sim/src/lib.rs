//! `shoal-sim`: the per-frame simulation step.
//!
//! # One frame
//!
//! ```text
//! step(dt):
//!   ① Update   : for every agent, in AgentId order:
//!                  locals = index.query(position, radius)
//!                  steer against locals, integrate position
//!                  index.moved(agent)
//!   ② Bounds   : for every agent: wrap X/Z past ±world_bound
//!   ③ Clock    : frame += 1, elapsed += dt
//! ```
//!
//! # Update modes
//!
//! | Mode         | Neighbor view                                            |
//! |--------------|----------------------------------------------------------|
//! | `Sequential` | Live: later agents see earlier agents' *new* positions.  |
//! | `Snapshot`   | Frozen at frame start; all writes applied after compute. |
//!
//! `Sequential` is the default and reproduces the classic in-place flock
//! frame for frame.  `Snapshot` makes each agent's update independent of
//! iteration order, which is what allows the `parallel` feature.  Both
//! consume the RNG identically (one wander draw per agent, in id order).
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the `Snapshot` compute phase on Rayon.            |
//! | `fx-hash`  | FxHash cell map in `GridIndex`.                        |
//! | `serde`    | Serde derives on `FlockConfig` and friends.            |
//!
//! # Quick-start
//!
//! ```rust
//! use shoal_core::{FlockConfig, SimRng};
//! use shoal_sim::{NoopObserver, SimBuilder};
//!
//! let config = FlockConfig { agent_count: 100, ..FlockConfig::default() };
//! let mut sim = SimBuilder::new(config.clone(), SimRng::new(config.seed)).build()?;
//! sim.run_frames(10, 1.0 / 60.0, &mut NoopObserver)?;
//! assert_eq!(sim.clock.current_frame.0, 10);
//! # Ok::<(), shoal_sim::SimError>(())
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{FlockObserver, FrameStats, NoopObserver};
pub use sim::{Sim, UpdateMode};
