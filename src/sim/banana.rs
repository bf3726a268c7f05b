//! Banana flight
//!
//! Explicit Euler integration at the fixed timestep. Velocities are in
//! physics space (y up), positions in screen space (y down), one metre per
//! pixel.

use glam::Vec2;

use super::state::Banana;
use crate::consts::*;
use crate::wrap_degrees;

/// Advance one banana by `dt` seconds
///
/// Wind shifts the horizontal displacement but is never stored in the
/// velocity. The spin is a fixed step per tick, independent of speed.
pub fn step_banana(banana: &mut Banana, wind: f32, gravity: f32, dt: f32) {
    banana.pos.x += (banana.vel.x + wind) * dt;
    banana.pos.y -= banana.vel.y * dt;
    banana.vel.y -= gravity * dt;
    banana.rotation_deg = wrap_degrees(banana.rotation_deg - BANANA_SPIN_DEG);
}

/// Create a banana thrown by the gorilla anchored at `anchor`
///
/// The left gorilla (actor 0) throws rightward and the right one leftward,
/// so the same angle aims both at their opponent. The banana starts just
/// above the thrower's head, clear of its own hitbox.
pub fn launch_banana(id: u32, thrower: usize, anchor: Vec2, speed: f32, angle_deg: f32) -> Banana {
    let direction = if thrower == 0 { 1.0 } else { -1.0 };
    let angle = angle_deg.to_radians();

    Banana {
        id,
        pos: Vec2::new(anchor.x, anchor.y - BANANA_OUTER_RADIUS - 1.0),
        vel: Vec2::new(direction * speed * angle.cos(), speed * angle.sin()),
        rotation_deg: 0.0,
        outer_radius: BANANA_OUTER_RADIUS,
        inner_radius: BANANA_INNER_RADIUS,
        color: BANANA_COLOR,
        thrower,
    }
}
