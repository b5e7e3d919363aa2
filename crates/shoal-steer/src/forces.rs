//! The four steering contributions.
//!
//! Each function returns a force vector; the social forces return
//! `DVec3::ZERO` for an empty neighborhood.

use glam::DVec3;

use shoal_core::{SteeringParams, safe_normalize};

use crate::Neighbor;

/// Wander force for a heading and an (already advanced) wander phase.
pub fn wander(direction: DVec3, wander_angle: f64, params: &SteeringParams) -> DVec3 {
    let c = wander_angle.cos();
    let target = direction * params.wander_lead + DVec3::new(c, c, c);
    safe_normalize(target) * params.wander_force
}

/// Push away from every neighbor, harder the smaller the gap between the
/// two agents' radii.
pub fn separation(
    position: DVec3,
    radius:   f64,
    locals:   &[Neighbor],
    params:   &SteeringParams,
) -> DVec3 {
    let mut force = DVec3::ZERO;
    for other in locals {
        let reach = radius + other.radius;
        let gap = (other.position.distance(position) - reach).max(params.min_gap);
        let away = safe_normalize(position - other.position);
        force += away * (params.separation_force * (reach / gap));
    }
    force
}

/// Steer along the neighbors' summed heading.
pub fn alignment(locals: &[Neighbor], params: &SteeringParams) -> DVec3 {
    if locals.is_empty() {
        return DVec3::ZERO;
    }
    let heading = locals
        .iter()
        .fold(DVec3::ZERO, |acc, other| acc + other.direction);
    safe_normalize(heading) * params.alignment_force
}

/// Steer towards the neighbors' mean position.
pub fn cohesion(position: DVec3, locals: &[Neighbor], params: &SteeringParams) -> DVec3 {
    if locals.is_empty() {
        return DVec3::ZERO;
    }
    let sum = locals
        .iter()
        .fold(DVec3::ZERO, |acc, other| acc + other.position);
    let centre = sum * (1.0 / locals.len() as f64);
    safe_normalize(centre - position) * params.cohesion_force
}
