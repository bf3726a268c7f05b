//! Render collaborator seam
//!
//! The simulation never draws. After every tick it hands a borrowed
//! `Snapshot` to whatever `Renderer` the host plugged in.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

use crate::sim::state::{Actor, Banana, Building, Environment, Explosion, GameEvent, GameState, Sun};

/// Read-only view of one fully updated tick
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub time_ticks: u64,
    pub canvas_size: Vec2,
    pub environment: Environment,
    pub buildings: &'a [Building],
    pub actors: &'a [Actor],
    pub bananas: &'a [Banana],
    pub explosions: &'a [Explosion],
    pub sun: &'a Sun,
    pub events: &'a [GameEvent],
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            time_ticks: self.time_ticks,
            canvas_size: self.canvas_size,
            environment: self.environment,
            buildings: &self.buildings,
            actors: &self.actors,
            bananas: &self.bananas,
            explosions: &self.explosions,
            sun: &self.sun,
            events: &self.events,
        }
    }
}

/// Consumes snapshots and produces output (pixels, logs, ...)
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Renderer that only logs what it would draw
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        log::debug!(
            "tick {}: {} bananas, {} explosions",
            snapshot.time_ticks,
            snapshot.bananas.len(),
            snapshot.explosions.len()
        );
        for event in snapshot.events {
            log::info!("tick {}: {:?}", snapshot.time_ticks, event);
        }
    }
}
