//! The concrete flock member.

use glam::{DQuat, DVec3};

use shoal_core::{AgentParams, RandomSource, SteeringParams, look_rotation, wrap_axis};
use shoal_steer::{Kinematics, Neighbor, SteeringOutcome, steer, wander_delta};

use crate::Steerable;

/// One boid: steering state plus what a renderer needs to draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct Boid {
    pub kinematics:  Kinematics,
    pub orientation: DQuat,
    /// Appearance variant chosen at spawn; never read by the simulation.
    pub variant:     u8,
}

impl Boid {
    /// A boid at `position` heading along `direction` (not normalized; the
    /// first steering pass does that).
    pub fn new(position: DVec3, direction: DVec3, params: &AgentParams) -> Self {
        Self {
            kinematics:  Kinematics::new(position, direction, params),
            orientation: look_rotation(direction),
            variant:     0,
        }
    }

    pub fn with_variant(mut self, variant: u8) -> Self {
        self.variant = variant;
        self
    }

    pub fn wander_angle(&self) -> f64 {
        self.kinematics.wander_angle
    }

    /// What this boid looks like to its neighbors.
    #[inline]
    pub fn as_neighbor(&self) -> Neighbor {
        self.kinematics.as_neighbor()
    }

    /// Commit a steering outcome computed elsewhere (e.g. against a frame
    /// snapshot): take the new velocity and heading, move by `velocity · dt`,
    /// and re-derive the orientation.
    pub fn apply(&mut self, outcome: &SteeringOutcome, dt: f64) {
        outcome.apply_to(&mut self.kinematics);
        self.kinematics.position += self.kinematics.velocity * dt;
        self.orientation = look_rotation(self.kinematics.direction);
    }
}

impl Steerable for Boid {
    #[inline]
    fn position(&self) -> DVec3 {
        self.kinematics.position
    }

    #[inline]
    fn direction(&self) -> DVec3 {
        self.kinematics.direction
    }

    #[inline]
    fn velocity(&self) -> DVec3 {
        self.kinematics.velocity
    }

    #[inline]
    fn radius(&self) -> f64 {
        self.kinematics.radius
    }

    #[inline]
    fn orientation(&self) -> DQuat {
        self.orientation
    }

    fn update<R: RandomSource + ?Sized>(
        &mut self,
        dt:     f64,
        locals: &[Neighbor],
        params: &SteeringParams,
        rng:    &mut R,
    ) -> SteeringOutcome {
        let delta = wander_delta(rng, params);
        let outcome = steer(&self.kinematics, locals, delta, dt, params);
        self.apply(&outcome, dt);
        outcome
    }

    fn check_bounds(&mut self, max_dist: f64) -> bool {
        let p = &mut self.kinematics.position;
        let before = *p;
        p.x = wrap_axis(p.x, max_dist);
        p.z = wrap_axis(p.z, max_dist);
        *p != before
    }
}
