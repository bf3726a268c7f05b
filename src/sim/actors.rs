//! Gorilla and sun placement

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{Actor, Building, Gorilla, Sun};
use crate::consts::*;
use crate::error::SimError;

/// Put one gorilla near each end of the city
///
/// The left gorilla gets the 2nd or 3rd building, the right one a building
/// among the last three (never the very last), so there is always at least
/// one building between them.
pub fn place_gorillas<R: Rng>(rng: &mut R, buildings: &[Building]) -> Result<[Actor; 2], SimError> {
    let n = buildings.len();
    if n < MIN_BUILDINGS {
        return Err(SimError::CityTooSmall { buildings: n });
    }

    let left = rng.random_range(1..=2);
    let right = n - 1 - rng.random_range(1..=2);
    log::debug!("Gorillas on buildings {} and {} of {}", left, right, n);

    Ok([
        actor_on(&buildings[left], left),
        actor_on(&buildings[right], right),
    ])
}

/// Stand a gorilla on the roof of `building`
pub fn actor_on(building: &Building, index: usize) -> Actor {
    let anchor = Vec2::new(building.center_x(), building.pos.y - GORILLA_SPRITE_HEIGHT);
    Actor {
        model: Gorilla::new(anchor),
        hitbox: gorilla_hitbox(anchor),
        building: index,
    }
}

/// Collision box for a gorilla anchored at `anchor`
///
/// Centered under the anchor and one pixel shorter than the sprite, so it
/// never touches the roof it stands on.
pub fn gorilla_hitbox(anchor: Vec2) -> Rect {
    Rect::new(
        anchor.x - GORILLA_HITBOX_WIDTH / 2.0,
        anchor.y,
        GORILLA_HITBOX_WIDTH,
        GORILLA_HITBOX_HEIGHT,
    )
}

/// The sun hangs over the middle of the city
pub fn place_sun(canvas_width: f32) -> Sun {
    Sun {
        pos: Vec2::new(canvas_width / 2.0, SUN_TOP_OFFSET),
        surprised: false,
        color: SUN_COLOR,
    }
}
