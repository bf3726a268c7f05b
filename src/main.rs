//! Gorillas entry point
//!
//! In the browser: binds the canvas, reads the settings form and drives the
//! simulation from `setInterval`. Natively: runs headless for a fixed number
//! of ticks and prints the final state as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use gorillas::render::CanvasRenderer;
    use gorillas::sim::{Simulation, Timer};
    use gorillas::{Settings, SimError};

    /// `setInterval` wrapper calling one shared tick callback
    struct IntervalTimer {
        callback: Option<js_sys::Function>,
    }

    impl Timer for IntervalTimer {
        type Handle = i32;

        fn arm(&mut self, interval_ms: f64) -> Result<i32, SimError> {
            let window = web_sys::window().ok_or_else(|| SimError::Timer("no window".into()))?;
            let callback = self
                .callback
                .as_ref()
                .ok_or_else(|| SimError::Timer("tick callback not installed".into()))?;
            window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    callback,
                    interval_ms.round() as i32,
                )
                .map_err(|e| SimError::Timer(format!("{:?}", e)))
        }

        fn cancel(&mut self, handle: i32) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    /// Simulation plus the canvas it draws on
    struct Game {
        sim: Simulation<IntervalTimer>,
        renderer: CanvasRenderer,
        canvas_size: (f32, f32),
    }

    impl Game {
        fn tick(&mut self) {
            self.sim.on_timer(&mut self.renderer);
        }

        /// Re-read the form and start a new run
        fn reset(&mut self) -> Result<(), SimError> {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let settings = settings_from_page(&document, self.canvas_size);
                if let Err(e) = self.sim.set_settings(settings) {
                    log::warn!("Keeping previous settings: {}", e);
                }
            }
            self.sim.reset()
        }
    }

    fn settings_from_page(document: &Document, canvas_size: (f32, f32)) -> Settings {
        let mut settings = Settings::from_form(document);
        settings.canvas_width = canvas_size.0;
        settings.canvas_height = canvas_size.1;
        settings.seed = Some(js_sys::Date::now() as u64);
        settings
    }

    fn to_js(e: SimError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Gorillas starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("simulation-canvas")
            .ok_or_else(|| JsValue::from_str("no simulation-canvas element"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("simulation-canvas is not a canvas"))?;
        let canvas_size = (canvas.width() as f32, canvas.height() as f32);

        let settings = settings_from_page(&document, canvas_size);
        let sim = Simulation::new(settings, IntervalTimer { callback: None }).map_err(to_js)?;
        let renderer = CanvasRenderer::new(&canvas)?;
        let game = Rc::new(RefCell::new(Game {
            sim,
            renderer,
            canvas_size,
        }));

        // One callback serves every interval the timer arms
        {
            let game_for_tick = game.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                // A button handler holding the borrow means this tick is skipped
                if let Ok(mut g) = game_for_tick.try_borrow_mut() {
                    g.tick();
                }
            });
            game.borrow_mut().sim.timer_mut().callback =
                Some(closure.as_ref().unchecked_ref::<js_sys::Function>().clone());
            closure.forget();
        }

        setup_button(&document, "stop-btn", game.clone(), |g| g.sim.stop());
        setup_button(&document, "resume-btn", game.clone(), |g| g.sim.resume());
        setup_button(&document, "reset-btn", game.clone(), Game::reset);
        setup_button(&document, "finish-btn", game.clone(), |g| g.sim.finish());

        game.borrow_mut().sim.start().map_err(to_js)?;
        Ok(())
    }

    fn setup_button(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        action: fn(&mut Game) -> Result<(), SimError>,
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::debug!("No #{} button on the page", id);
            return;
        };
        let name = id.to_string();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            if let Err(e) = action(&mut *g) {
                log::warn!("{}: {}", name, e);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use gorillas::render::LogRenderer;
    use gorillas::sim::{ManualTimer, Simulation};
    use gorillas::{Settings, SimError};

    /// Run the simulation headless and print the final state as JSON
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Settings file (JSON); missing fields use the defaults
        #[arg(value_name = "SETTINGS")]
        pub settings: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(value_name = "TICKS", default_value_t = 100)]
        pub ticks: u64,

        /// City seed, overriding the one in the settings file
        #[arg(long)]
        pub seed: Option<u64>,
    }

    pub fn run(args: Args) -> Result<(), SimError> {
        let mut settings = match &args.settings {
            Some(path) => {
                log::info!("Loading settings from {}", path.display());
                Settings::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Settings::default(),
        };
        if args.seed.is_some() {
            settings.seed = args.seed;
        }

        let mut sim = Simulation::new(settings, ManualTimer::default())?;
        sim.start()?;

        let mut renderer = LogRenderer;
        for _ in 0..args.ticks {
            sim.on_timer(&mut renderer);
        }
        sim.finish()?;

        if let Some(state) = sim.state() {
            println!("{}", serde_json::to_string_pretty(state)?);
        }
        if let Some(seed) = sim.seed() {
            log::info!("Seed {} (pass it back with --seed to replay this city)", seed);
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gorillas (native, headless) starting...");

    let args = <headless::Args as clap::Parser>::parse();
    if let Err(e) = headless::run(args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
