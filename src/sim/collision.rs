//! Light cone collision
//!
//! The beam is a symmetric cone opening upward from the lighthouse apex. A
//! point is lit when it is level with or above the apex, within range, and
//! within the half aperture of vertical.

use glam::Vec2;

use super::state::{Lighthouse, Ship};

/// Check whether `point` lies inside the beam cone
///
/// Screen coordinates: y grows downward, so "above the apex" means a smaller y.
/// A point exactly level with the apex (dy == 0) passes the height check and
/// is then rejected or accepted by the angle test.
pub fn in_light_cone(point: Vec2, apex: Vec2, half_angle: f32, range: f32) -> bool {
    let dx = point.x - apex.x;
    let dy = apex.y - point.y;

    if dy < 0.0 {
        return false;
    }

    let distance = (dx * dx + dy * dy).sqrt();
    if distance > range {
        return false;
    }

    let angle = dx.abs().atan2(dy);
    angle < half_angle
}

/// Check whether a ship's center is lit by the lighthouse
pub fn ship_illuminated(ship: &Ship, lighthouse: &Lighthouse, range_multiplier: f32) -> bool {
    in_light_cone(
        ship.center(),
        lighthouse.apex,
        lighthouse.half_angle(),
        lighthouse.base_range * range_multiplier,
    )
}
