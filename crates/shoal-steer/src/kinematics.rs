//! Kinematic state shared between the engine and the agents.

use glam::DVec3;

use shoal_core::AgentParams;

/// Everything the steering engine reads from, and writes back to, one agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub position:           DVec3,
    /// Heading.  Unit length after the first steering pass.
    pub direction:          DVec3,
    pub velocity:           DVec3,
    /// Wander phase.  Random walk, never reset.
    pub wander_angle:       f64,
    pub radius:             f64,
    pub acceleration:       f64,
    pub max_steering_force: f64,
    pub max_speed:          f64,
}

impl Kinematics {
    /// A stationary agent at `position` heading along `direction`, with the
    /// per-agent constants from `params`.  Velocity starts equal to
    /// `direction`.
    pub fn new(position: DVec3, direction: DVec3, params: &AgentParams) -> Self {
        Self {
            position,
            direction,
            velocity:           direction,
            wander_angle:       0.0,
            radius:             params.radius,
            acceleration:       params.acceleration,
            max_steering_force: params.max_steering_force,
            max_speed:          params.max_speed,
        }
    }

    /// The view of this agent that its neighbors' steering reads.
    #[inline]
    pub fn as_neighbor(&self) -> Neighbor {
        Neighbor {
            position:  self.position,
            direction: self.direction,
            radius:    self.radius,
        }
    }
}

/// The part of another agent's state that steering reads.
///
/// Copied out of the agent store before steering so the agent being updated
/// can be borrowed mutably while its neighbors are read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub position:  DVec3,
    pub direction: DVec3,
    pub radius:    f64,
}
