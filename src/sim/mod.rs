//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only, passed in explicitly
//! - No rendering or platform dependencies

pub mod actors;
pub mod banana;
pub mod city;
pub mod clock;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use actors::{gorilla_hitbox, place_gorillas, place_sun};
pub use banana::{launch_banana, step_banana};
pub use city::{
    SkylineProfile, generate_city, generate_city_with_profile, generate_windows, max_building_height,
};
pub use clock::{ClockState, ManualTimer, Simulation, Timer};
pub use collision::{CollisionOutcome, cull_escaped, detect_collisions};
pub use rect::Rect;
pub use state::{
    Actor, Banana, Building, Environment, Explosion, GameEvent, GameState, Gorilla, Sun, Window,
};
pub use tick::{Throw, TickInput, tick};
