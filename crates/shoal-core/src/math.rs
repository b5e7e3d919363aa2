//! Small vector helpers shared by the steering engine and the agents.
//!
//! Every normalization in the simulation goes through [`safe_normalize`] so a
//! zero-length (or non-finite) vector contributes nothing instead of turning
//! the whole state into NaN.

use glam::{DMat3, DQuat, DVec3};

/// World up axis used for agent orientation.
pub const UP: DVec3 = DVec3::Y;

/// Unit vector in the direction of `v`, or `DVec3::ZERO` when `v` has zero
/// length or is not finite.
#[inline]
pub fn safe_normalize(v: DVec3) -> DVec3 {
    v.try_normalize().unwrap_or(DVec3::ZERO)
}

/// Rotation that points an object's forward axis along `direction`.
///
/// Mirrors a look-at from the origin towards `direction` with the `up`
/// vector [`UP`]: the local `-Z` axis ends up on `direction`.  A zero
/// direction falls back to the identity basis, and a direction parallel to
/// `up` is nudged by `1e-4` so the cross product stays well defined.
pub fn look_rotation(direction: DVec3) -> DQuat {
    let mut z = -direction;
    if z.length_squared() == 0.0 {
        z.z = 1.0;
    }
    z = z.normalize();

    let mut x = UP.cross(z);
    if x.length_squared() == 0.0 {
        if UP.z.abs() == 1.0 {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }
        z = z.normalize();
        x = UP.cross(z);
    }
    x = x.normalize();
    let y = z.cross(x);

    DQuat::from_mat3(&DMat3::from_cols(x, y, z))
}

/// Teleport wrap of one coordinate: anything above `bound` lands on
/// `-bound`, anything below `-bound` lands on `bound`.
#[inline]
pub fn wrap_axis(value: f64, bound: f64) -> f64 {
    if value > bound {
        -bound
    } else if value < -bound {
        bound
    } else {
        value
    }
}
