//! Simulation clock and lifecycle
//!
//! `Simulation` owns the game state, the RNG and the periodic timer. The
//! host wires the timer's callback to `Simulation::on_timer`; everything else
//! is plain method calls (`start`, `stop`, `resume`, `reset`, `finish`).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use super::tick::{Throw, TickInput, tick};
use crate::error::SimError;
use crate::render::Renderer;
use crate::settings::Settings;

/// A periodic timer provided by the host
pub trait Timer {
    type Handle;

    /// Start calling the tick callback every `interval_ms`
    fn arm(&mut self, interval_ms: f64) -> Result<Self::Handle, SimError>;

    /// Stop the timer identified by `handle`
    fn cancel(&mut self, handle: Self::Handle);
}

/// Timer driven by hand, for headless runs and tests
///
/// Counts how often it was armed and cancelled and remembers the interval.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_handle: u32,
    pub armed: u32,
    pub cancelled: u32,
    pub interval_ms: Option<f64>,
}

impl ManualTimer {
    /// Number of timers currently armed
    pub fn active(&self) -> u32 {
        self.armed - self.cancelled
    }
}

impl Timer for ManualTimer {
    type Handle = u32;

    fn arm(&mut self, interval_ms: f64) -> Result<u32, SimError> {
        self.next_handle += 1;
        self.armed += 1;
        self.interval_ms = Some(interval_ms);
        Ok(self.next_handle)
    }

    fn cancel(&mut self, _handle: u32) {
        self.cancelled += 1;
    }
}

/// Lifecycle of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    /// `start` has not been called
    Uninitialized,
    /// Timer armed, ticking
    Running,
    /// Paused; state kept, can resume
    Stopped,
    /// Ended; only `reset` starts a new run
    Finished,
}

/// The simulation owner: state, RNG, timer and clock
pub struct Simulation<T: Timer> {
    /// Applied at the next `start`/`reset`
    settings: Settings,
    /// In effect for the current run
    run: Settings,
    seed: Option<u64>,
    timer: T,
    handle: Option<T::Handle>,
    clock: ClockState,
    state: Option<GameState>,
    pending: TickInput,
}

impl<T: Timer> Simulation<T> {
    /// Create an idle simulation; nothing is generated until `start`
    pub fn new(settings: Settings, timer: T) -> Result<Self, SimError> {
        settings.validate()?;
        Ok(Self {
            run: settings.clone(),
            settings,
            seed: None,
            timer,
            handle: None,
            clock: ClockState::Uninitialized,
            state: None,
            pending: TickInput::default(),
        })
    }

    pub fn clock(&self) -> ClockState {
        self.clock
    }

    /// Seed the current run's city was built from
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Settings the next `reset` will use
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings of the current run
    pub fn run_settings(&self) -> &Settings {
        &self.run
    }

    /// Current run, once started
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Mutable access to the current run (for hosts that edit the playfield)
    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Replace the settings used by the next `reset`
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), SimError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Queue a throw for the next tick (replaces any queued throw)
    pub fn queue_throw(&mut self, throw: Throw) {
        self.pending.throw = Some(throw);
    }

    /// First entry: generate the first run and start ticking
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.clock != ClockState::Uninitialized {
            log::warn!("start ignored: simulation already started");
            return Err(SimError::AlreadyStarted);
        }
        log::info!("Starting simulation");
        self.regenerate()
    }

    /// Pause ticking, keeping all state
    pub fn stop(&mut self) -> Result<(), SimError> {
        self.require_started("stop")?;
        self.disarm();
        if self.clock == ClockState::Running {
            self.clock = ClockState::Stopped;
            log::info!("Simulation stopped");
        }
        Ok(())
    }

    /// Resume ticking after `stop`
    pub fn resume(&mut self) -> Result<(), SimError> {
        self.require_started("resume")?;
        match self.clock {
            ClockState::Running => Ok(()),
            ClockState::Finished => {
                log::warn!("resume ignored: simulation finished");
                Err(SimError::Finished)
            }
            _ => {
                self.arm()?;
                self.clock = ClockState::Running;
                log::info!("Simulation resumed");
                Ok(())
            }
        }
    }

    /// Throw away the current run and start a new one from the settings
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.require_started("reset")?;
        log::info!("Resetting simulation");
        self.regenerate()
    }

    /// Stop for good; only `reset` leaves this state
    pub fn finish(&mut self) -> Result<(), SimError> {
        self.require_started("finish")?;
        self.disarm();
        self.clock = ClockState::Finished;
        log::info!("Simulation finished after {} ticks", self.ticks());
        Ok(())
    }

    /// Timer callback: run one tick and hand the result to the renderer
    ///
    /// Returns false (and does nothing) unless the clock is running, so a
    /// late callback from a cancelled timer is harmless.
    pub fn on_timer<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        if self.clock != ClockState::Running {
            return false;
        }
        let Some(state) = self.state.as_mut() else {
            return false;
        };

        let input = std::mem::take(&mut self.pending);
        tick(state, &input, self.run.dt());
        renderer.render(&state.snapshot());
        true
    }

    fn ticks(&self) -> u64 {
        self.state.as_ref().map_or(0, |s| s.time_ticks)
    }

    fn require_started(&self, op: &str) -> Result<(), SimError> {
        if self.clock == ClockState::Uninitialized {
            log::warn!("{} ignored: simulation not started", op);
            return Err(SimError::NotStarted);
        }
        Ok(())
    }

    /// New city, gorillas and bananas from the pending settings; re-arm the timer
    fn regenerate(&mut self) -> Result<(), SimError> {
        self.disarm();
        // Without a timer the clock is not running, even if generation fails below
        if self.clock == ClockState::Running {
            self.clock = ClockState::Stopped;
        }
        let seed = self.settings.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::generate(&self.settings, &mut rng)?;
        log::info!("New run with seed {}", seed);
        self.run = self.settings.clone();
        self.seed = Some(seed);
        self.state = Some(state);
        self.pending = TickInput::default();
        self.arm()?;
        self.clock = ClockState::Running;
        Ok(())
    }

    /// Arm a fresh timer, releasing any previous one first
    fn arm(&mut self) -> Result<(), SimError> {
        self.disarm();
        let handle = self.timer.arm(self.run.interval_ms())?;
        self.handle = Some(handle);
        Ok(())
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.timer.cancel(handle);
        }
    }
}

impl<T: Timer> Drop for Simulation<T> {
    fn drop(&mut self) {
        self.disarm();
    }
}
