//! `shoal-spatial`: the neighborhood index.
//!
//! Answers one question every frame, once per agent: *which other agents
//! lie strictly within `radius` of this point?*
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`index`]  | `NeighborIndex` and `PositionLookup` traits, the distance predicate |
//! | [`linear`] | `LinearIndex`, full scan in registration order               |
//! | [`grid`]   | `GridIndex`, uniform hash grid of cubic cells                |
//! | [`rtree`]  | `RTreeIndex`, `rstar` R*-tree over 3-D points                |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Equivalence
//!
//! All three indexes return the same neighbor set for the same query, in
//! ascending `AgentId` order, so swapping one for another never changes a
//! trajectory.  The partitioned indexes exist only for throughput.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | Use `rustc_hash::FxHashMap` for the grid's cell map.      |

pub mod error;
pub mod grid;
pub mod index;
pub mod linear;
pub mod rtree;


pub use error::{SpatialError, SpatialResult};
pub use grid::GridIndex;
pub use index::{NeighborIndex, PositionLookup, is_neighbor};
pub use linear::LinearIndex;
pub use rtree::RTreeIndex;
