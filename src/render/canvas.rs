//! Canvas 2D renderer for the browser host
//!
//! Plain shapes only: rectangles for buildings and windows, a blocky gorilla,
//! a crescent banana and filled circles for explosions and the sun.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Renderer, Snapshot};
use crate::consts::SKY_COLOR;
use crate::css_color;
use crate::sim::state::{Banana, Building, Explosion, Gorilla, Sun};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        })
    }

    fn fill_rect(&self, color: u32, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&self, color: u32, x: f32, y: f32, r: f32) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        self.ctx.arc(x as f64, y as f64, r as f64, 0.0, 2.0 * PI)?;
        self.ctx.fill();
        Ok(())
    }

    fn draw_building(&self, building: &Building) {
        self.fill_rect(
            building.color,
            building.pos.x,
            building.pos.y,
            building.size.x,
            building.size.y,
        );
        for window in &building.windows {
            self.fill_rect(window.color, window.pos.x, window.pos.y, window.size.x, window.size.y);
        }
    }

    fn draw_gorilla(&self, gorilla: &Gorilla) {
        let (x, y) = (gorilla.pos.x, gorilla.pos.y);

        // Head, neck, body
        self.fill_rect(gorilla.body_color, x - 4.0, y + 1.0, 7.0, 7.0);
        self.fill_rect(gorilla.body_color, x - 5.0, y + 3.0, 9.0, 3.0);
        self.fill_rect(gorilla.body_color, x - 3.0, y + 8.0, 5.0, 1.0);
        self.fill_rect(gorilla.body_color, x - 9.0, y + 9.0, 17.0, 8.0);
        self.fill_rect(gorilla.body_color, x - 7.0, y + 15.0, 13.0, 6.0);

        // Arms raise when the pose flag says so
        let left_arm_y = if gorilla.left_arm_up { y + 3.0 } else { y + 11.0 };
        let right_arm_y = if gorilla.right_arm_up { y + 3.0 } else { y + 11.0 };
        self.fill_rect(gorilla.body_color, x - 12.0, left_arm_y, 3.0, 10.0);
        self.fill_rect(gorilla.body_color, x + 8.0, right_arm_y, 3.0, 10.0);

        // Legs
        self.fill_rect(gorilla.body_color, x - 7.0, y + 21.0, 5.0, 11.0);
        self.fill_rect(gorilla.body_color, x + 1.0, y + 21.0, 5.0, 11.0);

        // Brow and eyes
        self.fill_rect(gorilla.line_color, x - 3.0, y + 2.0, 5.0, 1.0);
        self.fill_rect(gorilla.line_color, x - 3.0, y + 4.0, 2.0, 1.0);
        self.fill_rect(gorilla.line_color, x, y + 4.0, 2.0, 1.0);
    }

    fn draw_banana(&self, banana: &Banana) -> Result<(), JsValue> {
        let rotation = (banana.rotation_deg as f64).to_radians();
        let (x, y) = (banana.pos.x as f64, banana.pos.y as f64);

        self.ctx.set_fill_style_str(&css_color(banana.color));
        self.ctx.begin_path();
        self.ctx
            .arc(x, y, banana.outer_radius as f64, rotation, rotation + PI)?;
        self.ctx.arc_with_anticlockwise(
            x,
            y,
            banana.inner_radius as f64,
            rotation + PI,
            rotation,
            true,
        )?;
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }

    fn draw_explosion(&self, explosion: &Explosion) -> Result<(), JsValue> {
        self.fill_circle(explosion.color, explosion.pos.x, explosion.pos.y, explosion.radius)
    }

    fn draw_sun(&self, sun: &Sun) -> Result<(), JsValue> {
        self.fill_circle(sun.color, sun.pos.x, sun.pos.y, 12.0)?;
        // Mouth: an "o" when surprised, a smile otherwise
        self.ctx.set_stroke_style_str(&css_color(SKY_COLOR));
        self.ctx.begin_path();
        if sun.surprised {
            self.ctx
                .arc(sun.pos.x as f64, sun.pos.y as f64 + 4.0, 3.0, 0.0, 2.0 * PI)?;
        } else {
            self.ctx
                .arc(sun.pos.x as f64, sun.pos.y as f64, 7.0, PI * 0.2, PI * 0.8)?;
        }
        self.ctx.stroke();
        Ok(())
    }

    fn draw(&self, snapshot: &Snapshot<'_>) -> Result<(), JsValue> {
        self.fill_rect(SKY_COLOR, 0.0, 0.0, self.width, self.height);
        self.draw_sun(snapshot.sun)?;
        for building in snapshot.buildings {
            self.draw_building(building);
        }
        for actor in snapshot.actors {
            self.draw_gorilla(&actor.model);
        }
        for banana in snapshot.bananas {
            self.draw_banana(banana)?;
        }
        for explosion in snapshot.explosions {
            self.draw_explosion(explosion)?;
        }
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        if let Err(e) = self.draw(snapshot) {
            log::warn!("Render error: {:?}", e);
        }
    }
}
