//! `shoal-core`: foundational types for the `shoal` flocking simulation.
//!
//! This crate is a dependency of every other `shoal-*` crate.  It has no
//! `shoal-*` dependencies and only a handful of external ones (`glam`,
//! `rand`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`math`]        | Guarded normalize, look-at orientation, axis wrap     |
//! | [`rng`]         | `RandomSource` trait, `SimRng`, `ReplayRng`           |
//! | [`config`]      | `FlockConfig`, `AgentParams`, `SteeringParams`        |
//! | [`time`]        | `Frame`, `FrameClock`                                 |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and id types.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AgentParams, FlockConfig, SteeringParams};
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use math::{look_rotation, safe_normalize, wrap_axis};
pub use rng::{RandomSource, ReplayRng, SimRng};
pub use time::{Frame, FrameClock};

/// Re-export of the vector types used across the workspace.
pub use glam::{DQuat, DVec3};
