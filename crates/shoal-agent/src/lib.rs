//! `shoal-agent`: flock members and their storage.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`steerable`] | `Steerable` trait, the contract every agent satisfies     |
//! | [`boid`]      | `Boid`, the concrete agent                                |
//! | [`store`]     | `AgentStore`, dense `AgentId → Boid` storage              |
//! | [`builder`]   | `AgentStoreBuilder`, random spawn from a `FlockConfig`    |
//!
//! The store is the single owner of agent state.  Neighborhood indexes hold
//! `AgentId` handles and read positions through the store's
//! [`PositionLookup`](shoal_spatial::PositionLookup) impl; renderers read
//! each agent's transform the same way.

pub mod boid;
pub mod builder;
pub mod steerable;
pub mod store;


pub use boid::Boid;
pub use builder::AgentStoreBuilder;
pub use steerable::Steerable;
pub use store::AgentStore;
