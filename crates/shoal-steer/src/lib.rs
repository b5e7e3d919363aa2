//! `shoal-steer`: the steering engine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`kinematics`] | `Kinematics` (the state the engine reads/writes), `Neighbor` |
//! | [`forces`]     | The four force contributions                               |
//! | [`engine`]     | `steer`, combining forces into a new velocity and heading  |
//!
//! # Per-agent, per-frame pipeline
//!
//! ```text
//! wander     = normalize(lead·direction + (cos θ, cos θ, cos θ)) · W
//! separation = Σ normalize(self − other) · S · (r_sum / max(d − r_sum, gap))
//! alignment  = normalize(Σ other.direction) · A
//! cohesion   = normalize(mean(other.position) − self) · C
//!
//! total      = (wander + separation + alignment + cohesion) · (accel · dt)
//! total      = normalize(total ⊙ (1, damping, 1)) · max_steering_force
//! velocity   = normalize(velocity + total) · max_speed
//! direction  = normalize(velocity)
//! ```
//!
//! `θ` is a random walk: every frame it moves by `wander_step · U[-2π, 2π)`.
//! All three wander components use the *same* `cos θ`, so the wander target
//! only ever slides along the `(1, 1, 1)` diagonal.  That is how the flock
//! has always moved and it is kept as is.
//!
//! The engine is pure: the single random input (the wander step) is drawn by
//! the caller, so the same function serves in-place sequential updates and
//! parallel snapshot updates.

pub mod engine;
pub mod forces;
pub mod kinematics;


pub use engine::{Forces, SteeringOutcome, steer, wander_delta};
pub use kinematics::{Kinematics, Neighbor};
