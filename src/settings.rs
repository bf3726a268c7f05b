//! Run configuration
//!
//! Read once per reset. The web host fills it from the page form, the native
//! host from an optional JSON file.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FPS;
use crate::error::SimError;

/// Smallest canvas width that always yields enough buildings for two gorillas
pub const MIN_CANVAS_WIDTH: f32 = 460.0;
/// Smallest canvas height that keeps the tallest gorilla on screen
pub const MIN_CANVAS_HEIGHT: f32 = 200.0;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield size in pixels
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Ticks per second
    pub fps: u32,

    // === Projectiles ===
    /// Bananas launched at every reset (alternating throwers, left first)
    pub bananas: u32,
    /// Launch speed in m/s
    pub launch_speed: f32,
    /// Launch angle in degrees above the horizontal, toward the opponent
    pub launch_angle_deg: f32,

    // === Environment ===
    /// Wind speed in m/s (positive blows right)
    pub wind: f32,
    /// Gravity in m/s²
    pub gravity: f32,

    /// How long an explosion stays on screen
    pub explosion_ttl_secs: f32,

    /// Fixed seed for reproducible cities (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 640.0,
            canvas_height: 350.0,
            fps: DEFAULT_FPS,

            bananas: 1,
            launch_speed: 50.0,
            launch_angle_deg: 45.0,

            wind: 0.0,
            gravity: 9.8,

            explosion_ttl_secs: 1.0,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SimError> {
        let floats = [
            self.canvas_width,
            self.canvas_height,
            self.launch_speed,
            self.launch_angle_deg,
            self.wind,
            self.gravity,
            self.explosion_ttl_secs,
        ];
        if floats.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidSettings("all numeric values must be finite"));
        }
        if self.fps == 0 {
            return Err(SimError::InvalidSettings("fps must be at least 1"));
        }
        if self.canvas_width < MIN_CANVAS_WIDTH {
            return Err(SimError::InvalidSettings("canvas is too narrow for a city"));
        }
        if self.canvas_height < MIN_CANVAS_HEIGHT {
            return Err(SimError::InvalidSettings("canvas is too short for a city"));
        }
        if self.gravity < 0.0 {
            return Err(SimError::InvalidSettings("gravity must not be negative"));
        }
        if self.launch_speed < 0.0 {
            return Err(SimError::InvalidSettings("launch speed must not be negative"));
        }
        if self.explosion_ttl_secs < 0.0 {
            return Err(SimError::InvalidSettings("explosion duration must not be negative"));
        }
        Ok(())
    }

    /// Fixed timestep in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Timer interval in milliseconds
    pub fn interval_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Explosion lifetime in ticks (at least one, so every explosion is seen)
    pub fn explosion_ttl_ticks(&self) -> u32 {
        ((self.explosion_ttl_secs * self.fps as f32).ceil() as u32).max(1)
    }

    /// Read the configuration form on the page (WASM only)
    ///
    /// Fields that are missing or do not parse keep their default value.
    #[cfg(target_arch = "wasm32")]
    pub fn from_form(document: &web_sys::Document) -> Self {
        use wasm_bindgen::JsCast;

        let read = |id: &str| -> Option<String> {
            document
                .get_element_by_id(id)?
                .dyn_into::<web_sys::HtmlInputElement>()
                .ok()
                .map(|input| input.value())
        };

        let mut settings = Self::default();
        if let Some(v) = read("number_bananas").and_then(|s| s.parse().ok()) {
            settings.bananas = v;
        }
        if let Some(v) = read("wind_speed").and_then(|s| s.parse().ok()) {
            settings.wind = v;
        }
        if let Some(v) = read("gravity").and_then(|s| s.parse().ok()) {
            settings.gravity = v;
        }
        if let Some(v) = read("velocity").and_then(|s| s.parse().ok()) {
            settings.launch_speed = v;
        }
        if let Some(v) = read("angle").and_then(|s| s.parse().ok()) {
            settings.launch_angle_deg = v;
        }
        if let Some(v) = read("fps").and_then(|s| s.parse().ok()) {
            settings.fps = v;
        }
        settings
    }
}
