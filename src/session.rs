//! Play session: binds a scene to a frame source and touch input
//!
//! The session owns its scene exclusively. Touch handling and ticks run on the
//! same thread and never interleave, and a tick either runs a whole step or
//! does nothing.

use glam::Vec2;

use crate::platform::{FixedClock, ManualTicker, Ticker};
use crate::sim::{Outcome, Scene, Sling, SlingVisuals, Trace, Viewport, step};
use crate::tuning::Tuning;

/// Whether a run is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before launch, or after a run finished
    Idle,
    /// Integrating
    Launched,
}

pub struct Session<T: Ticker> {
    tuning: Tuning,
    ticker: T,
    scene: Option<Scene>,
    viewport: Viewport,
    phase: Phase,
    sling: Sling,
    trace: Trace,
    /// Timestamp of the previous tick (seconds)
    last_timestamp: Option<f64>,
    /// Host surface is visible and ticks may be requested
    running: bool,
    /// Accept touch input (false for previews)
    play_mode: bool,
    last_outcome: Option<Outcome>,
}

impl<T: Ticker> Session<T> {
    pub fn new(tuning: Tuning, ticker: T) -> Self {
        let cursor_length = tuning.cursor_length();
        Self {
            tuning,
            ticker,
            scene: None,
            viewport: Viewport::new(0.0, 0.0),
            phase: Phase::Idle,
            sling: Sling::new(Vec2::ZERO, cursor_length),
            trace: Trace::default(),
            last_timestamp: None,
            running: false,
            play_mode: true,
            last_outcome: None,
        }
    }

    /// Install a scene laid out against `viewport`
    pub fn set_scene(&mut self, mut scene: Scene, viewport: Viewport) {
        scene.init(&viewport, &self.tuning);
        log::info!(
            "Scene loaded: {} attractors, {} portals, {} chords ({}x{})",
            scene.attractors.len(),
            scene.portals.len(),
            scene.chords.len(),
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.trace
            .set_max_length(self.tuning.trace_fraction * viewport.height);
        self.sling = Sling::new(scene.point.origin, self.tuning.cursor_length());
        self.scene = Some(scene);
        self.finish();
    }

    /// Re-layout after the viewport changed; any run in flight is dropped
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(scene) = self.scene.take() {
            self.set_scene(scene, viewport);
        } else {
            self.viewport = viewport;
        }
    }

    /// Give the scene back, leaving the session empty
    pub fn take_scene(&mut self) -> Option<Scene> {
        self.phase = Phase::Idle;
        self.scene.take()
    }

    /// Resume ticking (surface shown). Idempotent.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        if self.phase == Phase::Launched {
            self.ticker.request_tick();
        }
    }

    /// Stop ticking (surface hidden). Idempotent; `start` resumes the run.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.ticker.cancel();
        }
        self.last_timestamp = None;
    }

    /// Frame callback. The first tick after a launch or resume only records
    /// its timestamp.
    pub fn on_tick(&mut self, timestamp: f64) -> Option<Outcome> {
        if !self.running {
            return None;
        }
        let previous = self.last_timestamp.replace(timestamp);
        if self.phase != Phase::Launched {
            return None;
        }
        let Some(scene) = self.scene.as_mut() else {
            return None;
        };

        let mut outcome = None;
        if let Some(previous) = previous {
            let dt = (timestamp - previous) as f32;
            let report = step(scene, &self.tuning, dt);
            match report.outcome {
                Some(o) => outcome = Some(o),
                None if report.ported => self.trace.restart(scene.point.pos()),
                None => self.trace.push(scene.point.pos()),
            }
        }

        match outcome {
            Some(o) => {
                log::info!("Run finished: {:?}", o);
                self.last_outcome = Some(o);
                self.finish();
            }
            None => self.ticker.request_tick(),
        }
        outcome
    }

    /// Start a run with the given point velocity (pixels/s)
    pub fn launch(&mut self, velocity: Vec2) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        scene.point.vel = velocity;
        self.trace.restart(scene.point.pos());
        self.phase = Phase::Launched;
        self.last_timestamp = None;
        log::debug!("Launched with velocity ({:.1}, {:.1})", velocity.x, velocity.y);
        if self.running {
            self.ticker.request_tick();
        }
        true
    }

    /// End any run in flight and put every body back
    fn finish(&mut self) {
        self.phase = Phase::Idle;
        self.sling.cancel();
        if let Some(scene) = self.scene.as_mut() {
            scene.reset();
            self.trace.restart(scene.point.origin);
        }
    }

    fn accepts_touch(&self) -> bool {
        self.play_mode && self.scene.is_some()
    }

    /// Finger down: cancels the current run and starts aiming
    pub fn touch_down(&mut self, pos: Vec2) -> bool {
        if !self.accepts_touch() {
            return false;
        }
        self.finish();
        self.sling.press(pos);
        true
    }

    pub fn touch_move(&mut self, pos: Vec2) -> bool {
        if !self.accepts_touch() {
            return false;
        }
        self.sling.drag(pos)
    }

    /// Finger up: fire opposite the drag
    pub fn touch_up(&mut self, pos: Vec2) -> bool {
        if !self.accepts_touch() {
            return false;
        }
        match self.sling.release(pos) {
            Some(velocity) => self.launch(velocity),
            None => false,
        }
    }

    // === Render feed ===

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Sling line and cursor, only while aiming
    pub fn sling_visuals(&self) -> Option<SlingVisuals> {
        match self.phase {
            Phase::Idle => self.sling.visuals(),
            Phase::Launched => None,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_play_mode(&mut self, play_mode: bool) {
        self.play_mode = play_mode;
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}

impl Session<ManualTicker> {
    /// Drive the session from a fixed-rate clock until the run ends, the
    /// session stops asking for ticks, or `max_secs` of game time pass
    pub fn run_headless(&mut self, fps: f64, max_secs: f64) -> Option<Outcome> {
        let mut clock = FixedClock::new(fps);
        self.start();
        while clock.now() < max_secs {
            if !self.ticker.take_pending() {
                break;
            }
            if let Some(outcome) = self.on_tick(clock.advance()) {
                return Some(outcome);
            }
        }
        None
    }
}
