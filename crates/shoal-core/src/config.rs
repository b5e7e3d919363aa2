//! Simulation configuration.
//!
//! Typically built from `Default` and overridden by the application (CLI
//! flags, or a JSON file with the `serde` feature), then handed to the
//! simulation builder which calls [`FlockConfig::validate`].

use crate::{CoreError, CoreResult};

// ── AgentParams ───────────────────────────────────────────────────────────────

/// Per-agent kinematic constants.  Uniform across the flock by default.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentParams {
    /// Collision-avoidance and perception radius.  Default: 15.
    pub radius: f64,
    /// Scale applied to the summed steering force.  Default: 1.
    pub acceleration: f64,
    /// Magnitude of the steering adjustment added to velocity.  Default: 0.1.
    pub max_steering_force: f64,
    /// Speed every agent is saturated to after steering.  Default: 10.
    pub max_speed: f64,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            radius:             15.0,
            acceleration:       1.0,
            max_steering_force: 0.1,
            max_speed:          10.0,
        }
    }
}

// ── SteeringParams ────────────────────────────────────────────────────────────

/// Force weights and shaping constants for the steering engine.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringParams {
    /// Magnitude of the wander force.  Default: 5.
    pub wander_force: f64,
    /// Per-neighbor separation weight.  Default: 0.0001.
    pub separation_force: f64,
    /// Magnitude of the alignment force.  Default: 5.
    pub alignment_force: f64,
    /// Magnitude of the cohesion force.  Default: 4.
    pub cohesion_force: f64,
    /// Scale of the per-frame wander phase step, applied to a draw in
    /// `[-2π, 2π)`.  Default: 0.1.
    pub wander_step: f64,
    /// How far ahead along the heading the wander target sits.  Default: 2.
    pub wander_lead: f64,
    /// Multiplier on the Y component of the combined steering force.
    /// Default: 0.1 (mostly horizontal flocking).
    pub vertical_damping: f64,
    /// Floor for the separation gap, so overlapping agents don't divide by
    /// zero.  Default: 0.001.
    pub min_gap: f64,
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            wander_force:     5.0,
            separation_force: 0.0001,
            alignment_force:  5.0,
            cohesion_force:   4.0,
            wander_step:      0.1,
            wander_lead:      2.0,
            vertical_damping: 0.1,
            min_gap:          0.001,
        }
    }
}

// ── FlockConfig ───────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockConfig {
    /// Number of agents spawned at build time.  Default: 1000.
    pub agent_count: usize,

    /// Half-width of the spawn cube centred on the origin.  Default: 150.
    pub spawn_box_range: f64,

    /// X/Z coordinate beyond which agents wrap to the opposite side.
    /// Default: 300.
    pub world_bound: f64,

    /// Master RNG seed used when the application builds a `SimRng` from the
    /// config.  The same seed always produces identical runs.
    pub seed: u64,

    /// Number of appearance variants an agent may be assigned at spawn.
    /// The simulation never reads the variant; renderers map it to a mesh.
    /// Default: 3.
    pub mesh_variants: u8,

    pub agent: AgentParams,

    pub steering: SteeringParams,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            agent_count:     1000,
            spawn_box_range: 150.0,
            world_bound:     300.0,
            seed:            42,
            mesh_variants:   3,
            agent:           AgentParams::default(),
            steering:        SteeringParams::default(),
        }
    }
}

impl FlockConfig {
    /// Check every numeric field for values the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        non_negative("spawn_box_range", self.spawn_box_range)?;
        positive("world_bound", self.world_bound)?;
        if self.mesh_variants == 0 {
            return Err(CoreError::config("mesh_variants", 0, "must be at least 1"));
        }

        let a = &self.agent;
        positive("agent.radius", a.radius)?;
        non_negative("agent.acceleration", a.acceleration)?;
        non_negative("agent.max_steering_force", a.max_steering_force)?;
        positive("agent.max_speed", a.max_speed)?;

        let s = &self.steering;
        finite("steering.wander_force", s.wander_force)?;
        finite("steering.separation_force", s.separation_force)?;
        finite("steering.alignment_force", s.alignment_force)?;
        finite("steering.cohesion_force", s.cohesion_force)?;
        finite("steering.wander_step", s.wander_step)?;
        finite("steering.wander_lead", s.wander_lead)?;
        finite("steering.vertical_damping", s.vertical_damping)?;
        positive("steering.min_gap", s.min_gap)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::config(field, value, "must be finite"))
    }
}

fn non_negative(field: &'static str, value: f64) -> CoreResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(CoreError::config(field, value, "must not be negative"));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> CoreResult<()> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(CoreError::config(field, value, "must be greater than zero"));
    }
    Ok(())
}
