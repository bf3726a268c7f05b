//! Gorillas - an artillery duel on a procedural skyline
//!
//! Core modules:
//! - `sim`: Deterministic simulation (city generation, projectiles, collisions, clock)
//! - `render`: Read-only snapshot handed to the render collaborator
//! - `settings`: Run configuration
//! - `error`: Error type shared by the simulation and the host glue

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use render::{Renderer, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default tick rate (ticks per second)
    pub const DEFAULT_FPS: u32 = 10;

    /// City layout
    pub const CITY_START_X: f32 = 2.0;
    pub const BUILDING_GAP: f32 = 2.0;
    /// Space left between the bottom of every building and the canvas edge
    pub const BUILDING_BOTTOM_MARGIN: f32 = 10.0;
    pub const BUILDING_MIN_WIDTH: u32 = 38;
    pub const BUILDING_MAX_WIDTH: u32 = 74;
    /// Smallest building height, also the per-building slope increment
    pub const HEIGHT_STEP: f32 = 10.0;
    pub const HEIGHT_JITTER_MAX: u32 = 120;
    /// Base height for skylines that start low (rising, peak)
    pub const LOW_START_HEIGHT: f32 = 15.0;
    /// Base height for skylines that start high (falling, valley)
    pub const HIGH_START_HEIGHT: f32 = 130.0;
    /// Tallest building is `canvas_height - SKYLINE_TOP_MARGIN + GORILLA_CLEARANCE`
    pub const SKYLINE_TOP_MARGIN: f32 = 100.0;
    pub const GORILLA_CLEARANCE: f32 = 25.0;

    /// Window grid
    pub const WINDOW_WIDTH: f32 = 3.0;
    pub const WINDOW_HEIGHT: f32 = 6.0;
    pub const WINDOW_PITCH_X: f32 = 6.0;
    pub const WINDOW_PITCH_Y: f32 = 10.0;
    pub const WINDOW_MARGIN_SIDE: f32 = 3.0;
    pub const WINDOW_MARGIN_TOP: f32 = 2.0;
    pub const WINDOW_MARGIN_BOTTOM: f32 = 6.0;

    /// Gorilla sprite and hitbox
    pub const GORILLA_SPRITE_HEIGHT: f32 = 33.0;
    pub const GORILLA_HITBOX_WIDTH: f32 = 18.0;
    pub const GORILLA_HITBOX_HEIGHT: f32 = GORILLA_SPRITE_HEIGHT - 1.0;
    /// Smallest city that still fits two non-adjacent gorilla buildings
    pub const MIN_BUILDINGS: usize = 7;

    /// Banana defaults
    pub const BANANA_OUTER_RADIUS: f32 = 5.0;
    pub const BANANA_INNER_RADIUS: f32 = 3.0;
    /// Visual spin per tick (degrees, clockwise)
    pub const BANANA_SPIN_DEG: f32 = 45.0;
    /// How far past the left/right/bottom edge a banana may fly before it is dropped
    pub const ESCAPE_MARGIN: f32 = 50.0;

    /// Explosion defaults
    pub const EXPLOSION_RADIUS: f32 = 10.0;

    /// Sun
    pub const SUN_TOP_OFFSET: f32 = 25.0;

    /// Palette
    pub const SKY_COLOR: u32 = 0x000da3;
    pub const BUILDING_COLORS: [u32; 3] = [0xa8a8a8, 0x00a8a8, 0xa80000];
    pub const WINDOW_LIT_COLOR: u32 = 0xfcfc54;
    pub const WINDOW_DARK_COLOR: u32 = 0x545454;
    pub const GORILLA_BODY_COLOR: u32 = 0xffaa52;
    pub const GORILLA_LINE_COLOR: u32 = 0x0000aa;
    pub const BANANA_COLOR: u32 = 0xffff00;
    pub const EXPLOSION_COLOR: u32 = 0xff2222;
    pub const SUN_COLOR: u32 = 0xfffe55;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Format a `0xRRGGBB` color as a CSS hex string
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0x00ff_ffff)
}
