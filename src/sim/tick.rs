//! Fixed timestep simulation tick
//!
//! One tick is: input, collisions against the previous positions, banana
//! movement, then explosion aging. The caller renders afterwards.

use super::banana::step_banana;
use super::collision::{cull_escaped, detect_collisions};
use super::state::GameState;

/// A throw requested by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throw {
    /// Index of the throwing gorilla (0 = left, 1 = right)
    pub actor: usize,
    /// m/s
    pub speed: f32,
    /// Degrees above the horizontal, toward the opponent
    pub angle_deg: f32,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub throw: Option<Throw>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.events.clear();

    // Explosions from earlier ticks fade out; fresh ones below get a full lifetime
    for explosion in &mut state.explosions {
        explosion.ttl_ticks = explosion.ttl_ticks.saturating_sub(1);
    }
    state.explosions.retain(|e| e.ttl_ticks > 0);

    process_input(state, input);

    let outcome = detect_collisions(
        &mut state.bananas,
        &state.actors,
        &state.buildings,
        state.explosion_ttl_ticks,
    );
    state.explosions.extend(outcome.explosions);
    state.events.extend(outcome.events);

    let env = state.environment;
    for banana in &mut state.bananas {
        step_banana(banana, env.wind, env.gravity, dt);
    }

    let escaped = cull_escaped(&mut state.bananas, state.canvas_size.x, state.canvas_size.y);
    state.events.extend(escaped);
}

fn process_input(state: &mut GameState, input: &TickInput) {
    if let Some(throw) = input.throw {
        if let Some(id) = state.launch(throw.actor, throw.speed, throw.angle_deg) {
            log::info!(
                "Gorilla {} throws banana {} at {} m/s, {}°",
                throw.actor,
                id,
                throw.speed,
                throw.angle_deg
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Building, Explosion, GameEvent};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quiet_state(bananas: u32) -> GameState {
        let settings = Settings {
            bananas,
            gravity: 0.0,
            wind: 0.0,
            launch_speed: 50.0,
            launch_angle_deg: 0.0,
            fps: 10,
            ..Default::default()
        };
        let mut state = GameState::generate(&settings, &mut Pcg32::seed_from_u64(11)).unwrap();
        state.buildings.clear();
        state
    }

    #[test]
    fn test_tick_counts_and_moves() {
        let mut state = quiet_state(1);
        let start = state.bananas[0].pos;

        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.time_ticks, 1);
        assert!((state.bananas[0].pos.x - (start.x + 5.0)).abs() < 1e-4);
        assert_eq!(state.bananas[0].pos.y, start.y);
        assert_eq!(state.bananas[0].rotation_deg, 315.0);
    }

    #[test]
    fn test_collision_uses_previous_positions() {
        let mut state = quiet_state(1);
        let pos = state.bananas[0].pos;
        // Wall starting just right of the banana's current bounding square:
        // not touched now, entered during this tick's movement
        state.buildings.push(Building {
            pos: Vec2::new(pos.x + 5.0, 0.0),
            size: Vec2::new(50.0, 400.0),
            color: 0,
            windows: Vec::new(),
        });

        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.bananas.len(), 1, "collision runs before movement");
        assert!(state.explosions.is_empty());

        tick(&mut state, &TickInput::default(), 0.1);
        assert!(state.bananas.is_empty());
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.events.len(), 1);
        assert!(matches!(state.events[0], GameEvent::BananaHitBuilding { .. }));
    }

    #[test]
    fn test_explosions_expire() {
        let mut state = quiet_state(0);
        state.explosions.push(Explosion::new(Vec2::new(10.0, 10.0), 2));

        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].ttl_ticks, 1);

        tick(&mut state, &TickInput::default(), 0.1);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_events_last_one_tick() {
        let mut state = quiet_state(1);
        state.bananas[0].pos = Vec2::new(-100.0, 50.0);

        tick(&mut state, &TickInput::default(), 0.1);
        assert!(state.bananas.is_empty());
        assert_eq!(state.events.len(), 1);

        tick(&mut state, &TickInput::default(), 0.1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_throw_input() {
        let mut state = quiet_state(0);
        let input = TickInput {
            throw: Some(Throw {
                actor: 1,
                speed: 30.0,
                angle_deg: 0.0,
            }),
        };
        tick(&mut state, &input, 0.1);

        assert_eq!(state.bananas.len(), 1);
        let banana = &state.bananas[0];
        assert_eq!(banana.thrower, 1);
        // Launched and moved once, leftward
        assert!((banana.pos.x - (state.actors[1].model.pos.x - 3.0)).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            bananas: 2,
            wind: 3.0,
            ..Default::default()
        };
        let mut state1 = GameState::generate(&settings, &mut Pcg32::seed_from_u64(99999)).unwrap();
        let mut state2 = GameState::generate(&settings, &mut Pcg32::seed_from_u64(99999)).unwrap();

        for _ in 0..40 {
            tick(&mut state1, &TickInput::default(), settings.dt());
            tick(&mut state2, &TickInput::default(), settings.dt());
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.bananas.len(), state2.bananas.len());
        assert_eq!(state1.explosions.len(), state2.explosions.len());
        for (a, b) in state1.bananas.iter().zip(&state2.bananas) {
            assert_eq!(a.pos, b.pos);
        }
    }
}
