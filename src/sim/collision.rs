//! Banana collision resolution
//!
//! Every banana is boxed by its bounding square and tested against gorilla
//! hitboxes first, then building bounds. The first hit consumes the banana
//! and leaves an explosion behind.

use super::rect::Rect;
use super::state::{Actor, Banana, Building, Explosion, GameEvent};
use crate::consts::ESCAPE_MARGIN;

/// What a collision pass produced
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    pub explosions: Vec<Explosion>,
    pub events: Vec<GameEvent>,
}

/// What a single banana ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Gorilla(usize),
    Building(usize),
}

/// Find the first target a banana overlaps, gorillas before buildings
pub fn first_hit(bounds: &Rect, actors: &[Actor], buildings: &[Building]) -> Option<Hit> {
    if let Some(i) = actors.iter().position(|a| bounds.overlaps(&a.hitbox)) {
        return Some(Hit::Gorilla(i));
    }
    buildings
        .iter()
        .position(|b| bounds.overlaps(&b.bounds()))
        .map(Hit::Building)
}

/// Remove every banana that hits something and spawn its explosion
///
/// Iterates in reverse so removal does not disturb the indices still to be
/// visited. Explosions come out in that same reverse order.
pub fn detect_collisions(
    bananas: &mut Vec<Banana>,
    actors: &[Actor],
    buildings: &[Building],
    explosion_ttl: u32,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for i in (0..bananas.len()).rev() {
        let Some(hit) = first_hit(&bananas[i].bounds(), actors, buildings) else {
            continue;
        };

        let banana = bananas.remove(i);
        let event = match hit {
            Hit::Gorilla(actor) => {
                // No win condition yet: the hit is only reported
                log::debug!("Banana {} hit gorilla {}", banana.id, actor);
                GameEvent::BananaHitGorilla {
                    banana: banana.id,
                    actor,
                }
            }
            Hit::Building(building) => {
                log::debug!("Banana {} hit building {}", banana.id, building);
                GameEvent::BananaHitBuilding {
                    banana: banana.id,
                    building,
                }
            }
        };

        outcome.explosions.push(Explosion::new(banana.pos, explosion_ttl));
        outcome.events.push(event);
    }

    outcome
}

/// Drop bananas that left the playfield through a side or the bottom
///
/// Bananas above the top edge stay in play since gravity can bring them back.
pub fn cull_escaped(bananas: &mut Vec<Banana>, canvas_width: f32, canvas_height: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    bananas.retain(|b| {
        let escaped = b.pos.x < -ESCAPE_MARGIN
            || b.pos.x > canvas_width + ESCAPE_MARGIN
            || b.pos.y > canvas_height + ESCAPE_MARGIN;
        if escaped {
            log::debug!("Banana {} left the playfield at {:?}", b.id, b.pos);
            events.push(GameEvent::BananaEscaped { banana: b.id });
        }
        !escaped
    });
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actors::actor_on;
    use crate::sim::banana::launch_banana;
    use glam::Vec2;

    fn building(x: f32, y: f32, w: f32, h: f32) -> Building {
        Building {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color: 0,
            windows: Vec::new(),
        }
    }

    fn banana(id: u32, pos: Vec2) -> Banana {
        Banana {
            pos,
            ..launch_banana(id, 0, Vec2::ZERO, 0.0, 0.0)
        }
    }

    #[test]
    fn test_miss_leaves_banana() {
        let buildings = vec![building(0.0, 100.0, 50.0, 100.0)];
        let mut bananas = vec![banana(1, Vec2::new(25.0, 50.0))];

        let outcome = detect_collisions(&mut bananas, &[], &buildings, 10);
        assert_eq!(bananas.len(), 1);
        assert!(outcome.explosions.is_empty());
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let buildings = vec![building(0.0, 100.0, 50.0, 100.0)];
        // Bounding square bottom edge (95 + 5) lies exactly on the roof
        let mut bananas = vec![banana(1, Vec2::new(25.0, 95.0))];
        detect_collisions(&mut bananas, &[], &buildings, 10);
        assert_eq!(bananas.len(), 1);

        // Left edge (55 - 5) exactly on the wall's right side
        let mut bananas = vec![banana(1, Vec2::new(55.0, 150.0))];
        detect_collisions(&mut bananas, &[], &buildings, 10);
        assert_eq!(bananas.len(), 1);

        // Exactly on a gorilla hitbox edge
        let actor = actor_on(&buildings[0], 0);
        let edge = actor.hitbox.right() + 5.0;
        let mut bananas = vec![banana(1, Vec2::new(edge, actor.hitbox.center().y))];
        detect_collisions(&mut bananas, std::slice::from_ref(&actor), &buildings, 10);
        assert_eq!(bananas.len(), 1);

        // A hair further in and it hits
        let mut bananas = vec![banana(1, Vec2::new(25.0, 95.5))];
        detect_collisions(&mut bananas, &[], &buildings, 10);
        assert!(bananas.is_empty());
    }

    #[test]
    fn test_building_hit_spawns_explosion() {
        let buildings = vec![
            building(0.0, 100.0, 50.0, 100.0),
            building(52.0, 120.0, 50.0, 80.0),
        ];
        let mut bananas = vec![banana(7, Vec2::new(70.0, 130.0))];

        let outcome = detect_collisions(&mut bananas, &[], &buildings, 10);
        assert!(bananas.is_empty());
        assert_eq!(outcome.explosions.len(), 1);
        assert_eq!(outcome.explosions[0].pos, Vec2::new(70.0, 130.0));
        assert_eq!(outcome.explosions[0].ttl_ticks, 10);
        assert_eq!(
            outcome.events,
            vec![GameEvent::BananaHitBuilding { banana: 7, building: 1 }]
        );
    }

    #[test]
    fn test_gorilla_takes_precedence() {
        let buildings = vec![building(0.0, 100.0, 50.0, 100.0)];
        let actor = actor_on(&buildings[0], 0);
        // Straddles the bottom of the hitbox and the roof below it
        let pos = Vec2::new(actor.model.pos.x, 100.0);
        let b = banana(3, pos);
        assert!(b.bounds().overlaps(&actor.hitbox));
        assert!(b.bounds().overlaps(&buildings[0].bounds()));

        let mut bananas = vec![b];
        let outcome = detect_collisions(&mut bananas, &[actor], &buildings, 10);
        assert!(bananas.is_empty());
        assert_eq!(outcome.explosions.len(), 1);
        // Gorilla hits get no further reaction than the event
        assert_eq!(
            outcome.events,
            vec![GameEvent::BananaHitGorilla { banana: 3, actor: 0 }]
        );
    }

    #[test]
    fn test_only_hitting_bananas_removed() {
        let buildings = vec![building(0.0, 100.0, 50.0, 100.0)];
        let mut bananas = vec![
            banana(1, Vec2::new(10.0, 150.0)),
            banana(2, Vec2::new(200.0, 20.0)),
            banana(3, Vec2::new(40.0, 150.0)),
            banana(4, Vec2::new(300.0, 20.0)),
        ];

        let outcome = detect_collisions(&mut bananas, &[], &buildings, 5);
        let left: Vec<_> = bananas.iter().map(|b| b.id).collect();
        assert_eq!(left, vec![2, 4]);
        assert_eq!(outcome.explosions.len(), 2);
        // Reverse iteration order
        assert_eq!(
            outcome.events,
            vec![
                GameEvent::BananaHitBuilding { banana: 3, building: 0 },
                GameEvent::BananaHitBuilding { banana: 1, building: 0 },
            ]
        );
    }

    #[test]
    fn test_cull_escaped() {
        let mut bananas = vec![
            banana(1, Vec2::new(-60.0, 100.0)),
            banana(2, Vec2::new(320.0, -500.0)),
            banana(3, Vec2::new(700.0, 100.0)),
            banana(4, Vec2::new(320.0, 401.0)),
            banana(5, Vec2::new(320.0, 100.0)),
        ];
        let events = cull_escaped(&mut bananas, 640.0, 350.0);
        let left: Vec<_> = bananas.iter().map(|b| b.id).collect();
        assert_eq!(left, vec![2, 5]);
        assert_eq!(
            events,
            vec![
                GameEvent::BananaEscaped { banana: 1 },
                GameEvent::BananaEscaped { banana: 3 },
                GameEvent::BananaEscaped { banana: 4 },
            ]
        );
    }
}
