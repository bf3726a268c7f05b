//! Procedural skyline generation
//!
//! A city is a single row of buildings laid out left to right with a fixed
//! gap. Heights follow one of six randomly chosen slope slots, with jitter,
//! and every building gets a grid of randomly lit windows.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Building, Window};
use crate::consts::*;

/// Height progression across the skyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkylineProfile {
    /// Steadily climbs to the right
    Rising,
    /// Steadily drops to the right
    Falling,
    /// Climbs to the middle, then drops
    Peak,
    /// Drops to the middle, then climbs
    Valley,
}

impl SkylineProfile {
    /// The six equally likely slots. Peaks take three of them.
    pub const SLOTS: [SkylineProfile; 6] = [
        SkylineProfile::Rising,
        SkylineProfile::Falling,
        SkylineProfile::Peak,
        SkylineProfile::Peak,
        SkylineProfile::Peak,
        SkylineProfile::Valley,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::SLOTS[rng.random_range(0..Self::SLOTS.len())]
    }

    /// Base height before the first building
    pub fn start_height(self) -> f32 {
        match self {
            SkylineProfile::Rising | SkylineProfile::Peak => LOW_START_HEIGHT,
            SkylineProfile::Falling | SkylineProfile::Valley => HIGH_START_HEIGHT,
        }
    }

    /// Base height for the building starting at `x`
    pub fn next_base(self, base: f32, x: f32, canvas_width: f32) -> f32 {
        let past_middle = x > canvas_width / 2.0;
        match self {
            SkylineProfile::Rising => base + HEIGHT_STEP,
            SkylineProfile::Falling => base - HEIGHT_STEP,
            SkylineProfile::Peak if past_middle => base - 2.0 * HEIGHT_STEP,
            SkylineProfile::Peak => base + 2.0 * HEIGHT_STEP,
            SkylineProfile::Valley if past_middle => base + 2.0 * HEIGHT_STEP,
            SkylineProfile::Valley => base - 2.0 * HEIGHT_STEP,
        }
    }
}

/// Tallest building allowed on a canvas of this height
#[inline]
pub fn max_building_height(canvas_height: f32) -> f32 {
    canvas_height - SKYLINE_TOP_MARGIN + GORILLA_CLEARANCE
}

/// Generate a skyline with a randomly chosen profile
pub fn generate_city<R: Rng>(rng: &mut R, canvas_width: f32, canvas_height: f32) -> Vec<Building> {
    let profile = SkylineProfile::random(rng);
    generate_city_with_profile(rng, profile, canvas_width, canvas_height)
}

/// Generate a skyline following `profile`
pub fn generate_city_with_profile<R: Rng>(
    rng: &mut R,
    profile: SkylineProfile,
    canvas_width: f32,
    canvas_height: f32,
) -> Vec<Building> {
    let max_height = max_building_height(canvas_height);
    let mut base = profile.start_height();
    let mut x = CITY_START_X;
    let mut buildings = Vec::new();

    while x < canvas_width {
        base = profile.next_base(base, x, canvas_width);

        let mut width = rng.random_range(BUILDING_MIN_WIDTH..=BUILDING_MAX_WIDTH) as f32;
        if x + width > canvas_width {
            // Last building fills the remaining space exactly
            width = canvas_width - x;
        }

        // Floor first, then ceiling
        let jitter = rng.random_range(1..=HEIGHT_JITTER_MAX) as f32;
        let height = (base + jitter).max(HEIGHT_STEP).min(max_height);

        let pos = Vec2::new(x, canvas_height - height - BUILDING_BOTTOM_MARGIN);
        let size = Vec2::new(width, height);
        let color = BUILDING_COLORS[rng.random_range(0..BUILDING_COLORS.len())];
        let windows = generate_windows(rng, pos, size);

        buildings.push(Building {
            pos,
            size,
            color,
            windows,
        });

        x += width + BUILDING_GAP;
    }

    log::info!(
        "Generated {:?} skyline: {} buildings on {}x{}",
        profile,
        buildings.len(),
        canvas_width,
        canvas_height
    );

    buildings
}

/// Fill a building face with a grid of lit and dark windows
pub fn generate_windows<R: Rng>(rng: &mut R, pos: Vec2, size: Vec2) -> Vec<Window> {
    let right_limit = pos.x + size.x - WINDOW_MARGIN_SIDE;
    let bottom_limit = pos.y + size.y - WINDOW_MARGIN_BOTTOM;
    let window_size = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    let mut windows = Vec::new();
    let mut wy = pos.y + WINDOW_MARGIN_TOP;
    while wy + WINDOW_HEIGHT <= bottom_limit {
        let mut wx = pos.x + WINDOW_MARGIN_SIDE;
        while wx + WINDOW_WIDTH <= right_limit {
            let color = if rng.random_bool(0.5) {
                WINDOW_LIT_COLOR
            } else {
                WINDOW_DARK_COLOR
            };
            windows.push(Window {
                pos: Vec2::new(wx, wy),
                size: window_size,
                color,
            });
            wx += WINDOW_PITCH_X;
        }
        wy += WINDOW_PITCH_Y;
    }
    windows
}
