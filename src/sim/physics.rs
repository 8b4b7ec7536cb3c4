pub const G: f32 = 9.81;
pub const HZ: f32 = 60.0;
pub const DT: f32 = 1.0 / HZ;
pub const EPSILON: f32 = 1.192_093e-7;
/// A bead this close to a sample is treated as sitting on it.
pub const SNAP_DISTANCE: f32 = 1e-5;
/// Below this second-difference magnitude the track is treated as straight.
pub const CURVATURE_EPSILON: f32 = 1e-6;

/// Added to `v²` in free fall so the bead never stalls on the crest.
pub const FREE_FALL_FLOOR: f32 = 2.0;
/// Added to `v²` when capturing the deceleration reference velocity.
pub const DECELERATION_FLOOR: f32 = 1.0;

/// Energy-conservation speed after dropping `drop` below the crest.
///
/// `v = sqrt(2·g·drop + FREE_FALL_FLOOR)`.
pub fn free_fall_velocity(gravity: f32, drop: f32) -> f32 {
    (2.0 * gravity * drop + FREE_FALL_FLOOR).max(0.0).sqrt()
}

/// Reference velocity captured when braking begins.
pub fn deceleration_reference_velocity(gravity: f32, drop: f32) -> f32 {
    (2.0 * gravity * drop + DECELERATION_FLOOR).max(0.0).sqrt()
}

/// Linear ramp-down proportional to the remaining distance.
///
/// Without a usable reference distance (nothing captured yet) the bead coasts
/// at the reference velocity.
pub fn decelerating_velocity(
    reference_velocity: f32,
    remaining: f32,
    reference_distance: f32,
) -> f32 {
    if reference_distance < EPSILON {
        return reference_velocity;
    }
    reference_velocity * remaining / reference_distance
}
