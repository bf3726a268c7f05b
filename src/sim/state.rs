//! Game state and core simulation types
//!
//! Everything a run owns lives in `GameState`. The render layer only ever
//! sees it through `Snapshot`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actors::{place_gorillas, place_sun};
use super::banana::launch_banana;
use super::city::generate_city;
use super::rect::Rect;
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// A lit or dark window on a building face
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

/// One building of the skyline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
    /// Window grid, row by row from the top
    pub windows: Vec<Window>,
}

impl Building {
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Horizontal center of the roof
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Gorilla sprite model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gorilla {
    /// Anchor at the top-center of the sprite
    pub pos: Vec2,
    pub left_arm_up: bool,
    pub right_arm_up: bool,
    pub body_color: u32,
    pub line_color: u32,
}

impl Gorilla {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            left_arm_up: false,
            right_arm_up: false,
            body_color: GORILLA_BODY_COLOR,
            line_color: GORILLA_LINE_COLOR,
        }
    }
}

/// A gorilla standing on a building, with the box used for collisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub model: Gorilla,
    pub hitbox: Rect,
    /// Index of the building it stands on
    pub building: usize,
}

/// A banana in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banana {
    pub id: u32,
    /// Center, screen space
    pub pos: Vec2,
    /// m/s, physics space (positive y is up)
    pub vel: Vec2,
    /// Visual spin in degrees, 0 at three o'clock, clockwise
    pub rotation_deg: f32,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub color: u32,
    /// Index of the actor that threw it
    pub thrower: usize,
}

impl Banana {
    /// Bounding square used for collisions
    pub fn bounds(&self) -> Rect {
        Rect::centered_square(self.pos, self.outer_radius)
    }
}

/// A short-lived blast where a banana hit something
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    /// Ticks left on screen
    pub ttl_ticks: u32,
}

impl Explosion {
    pub fn new(pos: Vec2, ttl_ticks: u32) -> Self {
        Self {
            pos,
            radius: EXPLOSION_RADIUS,
            color: EXPLOSION_COLOR,
            ttl_ticks,
        }
    }
}

/// Decorative sun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sun {
    pub pos: Vec2,
    pub surprised: bool,
    pub color: u32,
}

/// Wind and gravity, fixed for a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Environment {
    /// m/s, positive blows right
    pub wind: f32,
    /// m/s², positive pulls down
    pub gravity: f32,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BananaHitGorilla { banana: u32, actor: usize },
    BananaHitBuilding { banana: u32, building: usize },
    /// Flew off the side or bottom of the playfield
    BananaEscaped { banana: u32 },
}

/// Complete state of one run (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Playfield size in pixels
    pub canvas_size: Vec2,
    pub environment: Environment,
    /// Lifetime given to new explosions
    pub explosion_ttl_ticks: u32,
    /// Skyline, left to right
    pub buildings: Vec<Building>,
    /// Left gorilla first, then right
    pub actors: Vec<Actor>,
    /// Active bananas (in launch order)
    pub bananas: Vec<Banana>,
    pub explosions: Vec<Explosion>,
    pub sun: Sun,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a fresh run: city, gorillas, sun and the configured bananas
    pub fn generate<R: Rng>(settings: &Settings, rng: &mut R) -> Result<Self, SimError> {
        let buildings = generate_city(rng, settings.canvas_width, settings.canvas_height);
        let actors = place_gorillas(rng, &buildings)?;

        let mut state = Self {
            time_ticks: 0,
            canvas_size: Vec2::new(settings.canvas_width, settings.canvas_height),
            environment: Environment {
                wind: settings.wind,
                gravity: settings.gravity,
            },
            explosion_ttl_ticks: settings.explosion_ttl_ticks(),
            buildings,
            actors: actors.into(),
            bananas: Vec::new(),
            explosions: Vec::new(),
            sun: place_sun(settings.canvas_width),
            events: Vec::new(),
            next_id: 1,
        };

        for i in 0..settings.bananas as usize {
            state.launch(i % 2, settings.launch_speed, settings.launch_angle_deg);
        }

        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Throw a banana from `actor`; returns its ID
    pub fn launch(&mut self, actor: usize, speed: f32, angle_deg: f32) -> Option<u32> {
        let Some(thrower) = self.actors.get(actor) else {
            log::warn!("No gorilla {} to throw from", actor);
            return None;
        };
        let pos = thrower.model.pos;
        let id = self.next_entity_id();
        self.bananas
            .push(launch_banana(id, actor, pos, speed, angle_deg));
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_generate_populates_run() {
        let settings = Settings {
            bananas: 3,
            wind: 2.0,
            gravity: 4.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(42);
        let state = GameState::generate(&settings, &mut rng).unwrap();

        assert!(state.buildings.len() >= MIN_BUILDINGS);
        assert_eq!(state.actors.len(), 2);
        assert_eq!(state.bananas.len(), 3);
        assert!(state.explosions.is_empty());
        assert_eq!(state.environment, Environment { wind: 2.0, gravity: 4.0 });
        assert_eq!(state.time_ticks, 0);

        // Throwers alternate, left first
        let throwers: Vec<_> = state.bananas.iter().map(|b| b.thrower).collect();
        assert_eq!(throwers, vec![0, 1, 0]);

        // IDs are unique and increasing
        let ids: Vec<_> = state.bananas.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_same_seed_same_city() {
        let settings = Settings::default();
        let a = GameState::generate(&settings, &mut Pcg32::seed_from_u64(7)).unwrap();
        let b = GameState::generate(&settings, &mut Pcg32::seed_from_u64(7)).unwrap();

        assert_eq!(a.buildings.len(), b.buildings.len());
        for (x, y) in a.buildings.iter().zip(&b.buildings) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.size, y.size);
            assert_eq!(x.color, y.color);
            assert_eq!(x.windows.len(), y.windows.len());
        }
        assert_eq!(a.actors[0].building, b.actors[0].building);
        assert_eq!(a.actors[1].building, b.actors[1].building);
    }

    #[test]
    fn test_launch_from_missing_actor() {
        let settings = Settings {
            bananas: 0,
            ..Default::default()
        };
        let mut state = GameState::generate(&settings, &mut Pcg32::seed_from_u64(1)).unwrap();
        assert_eq!(state.launch(5, 10.0, 45.0), None);
        assert!(state.bananas.is_empty());
        assert!(state.launch(1, 10.0, 45.0).is_some());
        assert_eq!(state.bananas.len(), 1);
    }

    #[test]
    fn test_state_serializes() {
        let state =
            GameState::generate(&Settings::default(), &mut Pcg32::seed_from_u64(3)).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.buildings.len(), state.buildings.len());
        assert_eq!(back.bananas.len(), state.bananas.len());
    }
}
