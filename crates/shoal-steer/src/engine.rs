//! Force combination and velocity integration.

use std::f64::consts::TAU;

use glam::DVec3;

use shoal_core::{RandomSource, SteeringParams, safe_normalize};

use crate::{Kinematics, Neighbor, forces};

/// The individual contributions that went into one steering pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Forces {
    pub wander:     DVec3,
    pub separation: DVec3,
    pub alignment:  DVec3,
    pub cohesion:   DVec3,
}

impl Forces {
    /// Unscaled sum, in the order the engine adds them.
    #[inline]
    pub fn total(&self) -> DVec3 {
        self.wander + self.separation + self.alignment + self.cohesion
    }
}

/// New velocity, heading and wander phase for one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringOutcome {
    pub velocity:     DVec3,
    pub direction:    DVec3,
    pub wander_angle: f64,
    pub forces:       Forces,
}

impl SteeringOutcome {
    /// Write the outcome back into `kin`.  Position is left alone.
    #[inline]
    pub fn apply_to(&self, kin: &mut Kinematics) {
        kin.velocity = self.velocity;
        kin.direction = self.direction;
        kin.wander_angle = self.wander_angle;
    }
}

/// One frame's change of wander phase: `wander_step · U[-2π, 2π)`.
///
/// Consumes exactly one draw from `rng`.
#[inline]
pub fn wander_delta<R: RandomSource + ?Sized>(rng: &mut R, params: &SteeringParams) -> f64 {
    params.wander_step * rng.range(-TAU, TAU)
}

/// Run one steering pass for `kin` against its neighborhood.
///
/// `wander_delta` comes from [`wander_delta`].  The result always has
/// `|velocity| == max_speed` unless the velocity and the steering
/// adjustment cancel exactly, in which case both stay zero.
pub fn steer(
    kin:          &Kinematics,
    locals:       &[Neighbor],
    wander_delta: f64,
    dt:           f64,
    params:       &SteeringParams,
) -> SteeringOutcome {
    let wander_angle = kin.wander_angle + wander_delta;
    let forces = Forces {
        wander:     forces::wander(kin.direction, wander_angle, params),
        separation: forces::separation(kin.position, kin.radius, locals, params),
        alignment:  forces::alignment(locals, params),
        cohesion:   forces::cohesion(kin.position, locals, params),
    };

    let mut steering = forces.total() * (kin.acceleration * dt);
    steering *= DVec3::new(1.0, params.vertical_damping, 1.0);
    steering = safe_normalize(steering) * kin.max_steering_force;

    let velocity = safe_normalize(kin.velocity + steering) * kin.max_speed;
    let direction = safe_normalize(velocity);

    SteeringOutcome { velocity, direction, wander_angle, forces }
}
