//! The `Steerable` trait.

use glam::{DQuat, DVec3};

use shoal_core::{RandomSource, SteeringParams};
use shoal_steer::{Neighbor, SteeringOutcome};

/// An agent the simulation can steer, integrate and wrap.
///
/// The accessors are what renderers and other agents' steering read; the
/// two mutators are what the simulation step calls, `update` for every
/// agent first, then `check_bounds` for every agent.
pub trait Steerable {
    fn position(&self) -> DVec3;

    /// Unit heading (zero only for a fully degenerate state).
    fn direction(&self) -> DVec3;

    fn velocity(&self) -> DVec3;

    fn radius(&self) -> f64;

    /// World orientation derived from the heading, for drawing.
    fn orientation(&self) -> DQuat;

    /// Advance by `dt` seconds: steer against `locals`, integrate position,
    /// refresh orientation.  Draws exactly one value from `rng`.
    fn update<R: RandomSource + ?Sized>(
        &mut self,
        dt:     f64,
        locals: &[Neighbor],
        params: &SteeringParams,
        rng:    &mut R,
    ) -> SteeringOutcome;

    /// Wrap X and Z into `[-max_dist, max_dist]` by teleporting to the
    /// opposite edge.  Y is never touched.  Returns `true` if the agent
    /// moved.
    fn check_bounds(&mut self, max_dist: f64) -> bool;
}
