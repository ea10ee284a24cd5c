//! Fixed-rate game loop
//!
//! Each tick: poll input, advance the simulation, play sound cues, render
//! dirty rectangles, then wait out the rest of the tick budget. The loop
//! runs while the player is alive and ends on quit, player death or an
//! optional tick limit.

use std::time::{Duration, Instant};

use crate::assets::Atlas;
use crate::audio::AudioManager;
use crate::platform::{InputEvent, InputSource, Presentation};
use crate::renderer::DirtyRenderer;
use crate::settings::Settings;
use crate::sim::{self, GameState};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Running,
    /// Music fading and grace period pending
    Ending,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    PlayerDestroyed,
    /// Window closed or escape pressed
    Quit,
    TickLimit,
}

/// Holds each tick to a fixed wall-clock interval
#[derive(Debug)]
pub struct FrameLimiter {
    interval: Duration,
    capped: bool,
    tick_start: Instant,
}

impl FrameLimiter {
    pub fn new(interval: Duration, capped: bool) -> Self {
        Self {
            interval,
            capped,
            tick_start: Instant::now(),
        }
    }

    /// Mark the start of a tick
    pub fn begin(&mut self) {
        self.tick_start = Instant::now();
    }

    /// Sleep until the interval since `begin` has elapsed
    ///
    /// Returns how long it slept. Overlong ticks are not made up.
    pub fn finish(&mut self) -> Duration {
        if !self.capped {
            return Duration::ZERO;
        }
        let elapsed = self.tick_start.elapsed();
        if elapsed >= self.interval {
            return Duration::ZERO;
        }
        let remaining = self.interval - elapsed;
        std::thread::sleep(remaining);
        remaining
    }
}

/// One play session and everything it drives
pub struct Game {
    state: GameState,
    renderer: DirtyRenderer,
    atlas: Atlas,
    audio: AudioManager,
    input: Box<dyn InputSource>,
    display: Box<dyn Presentation>,
    settings: Settings,
    limiter: FrameLimiter,
    phase: LoopPhase,
    end_reason: Option<EndReason>,
    autopilot: bool,
    max_ticks: Option<u64>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("end_reason", &self.end_reason)
            .finish()
    }
}

impl Game {
    pub fn new(
        state: GameState,
        atlas: Atlas,
        audio: AudioManager,
        input: Box<dyn InputSource>,
        display: Box<dyn Presentation>,
        settings: Settings,
    ) -> Self {
        let limiter = FrameLimiter::new(settings.tick_interval(), settings.frame_cap);
        Self {
            renderer: DirtyRenderer::new(state.bounds),
            state,
            atlas,
            audio,
            input,
            display,
            settings,
            limiter,
            phase: LoopPhase::Running,
            end_reason: None,
            autopilot: false,
            max_ticks: None,
        }
    }

    /// Let the game steer and shoot by itself
    pub fn with_autopilot(mut self, autopilot: bool) -> Self {
        self.autopilot = autopilot;
        self
    }

    /// End the session after this many ticks
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn display(&self) -> &dyn Presentation {
        self.display.as_ref()
    }

    /// Paint the opening frame and start the music
    pub fn start(&mut self) {
        if self.settings.start_fullscreen && !self.display.is_fullscreen() {
            self.display.set_fullscreen(true);
        }
        let frame = self.renderer.render(&self.state.registry);
        self.display.present(&frame, &self.atlas);
        self.audio.start_music();
        log::info!("session started");
    }

    /// Run one tick of the loop body, without the frame-cap wait
    pub fn step(&mut self) -> LoopPhase {
        if self.phase != LoopPhase::Running {
            return self.phase;
        }

        let tick = self.state.time_ticks + 1;
        for event in self.input.poll(tick) {
            if event.ends_session() {
                log::info!("{:?} at tick {}", event, tick);
                return self.end(EndReason::Quit);
            }
            if event == InputEvent::ToggleFullscreen {
                let fullscreen = !self.display.is_fullscreen();
                self.display.set_fullscreen(fullscreen);
            }
        }

        let mut input = self.input.keys().tick_input();
        input.autopilot = self.autopilot;
        sim::tick(&mut self.state, &input);

        let events = self.state.drain_events();
        self.audio.handle_events(&events);

        let frame = self.renderer.render(&self.state.registry);
        self.display.present(&frame, &self.atlas);

        if !self.state.player_alive() {
            return self.end(EndReason::PlayerDestroyed);
        }
        if self.max_ticks.is_some_and(|max| self.state.time_ticks >= max) {
            return self.end(EndReason::TickLimit);
        }
        self.phase
    }

    fn end(&mut self, reason: EndReason) -> LoopPhase {
        self.end_reason = Some(reason);
        self.phase = LoopPhase::Ending;
        self.phase
    }

    /// Fade the music and hold for the grace period
    pub fn finish(&mut self) -> LoopPhase {
        if self.phase != LoopPhase::Ending {
            return self.phase;
        }
        self.audio.fade_out_music(self.settings.music_fadeout_ms);
        if self.settings.end_grace_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.settings.end_grace_ms));
        }
        self.audio.advance(self.settings.end_grace_ms);
        self.phase = LoopPhase::Terminated;
        log::info!(
            "session over ({:?}) after {} ticks, score {}",
            self.end_reason,
            self.state.time_ticks,
            self.state.score
        );
        self.phase
    }

    /// Play the whole session; returns the final score
    pub fn run(&mut self) -> u64 {
        self.start();
        while self.phase == LoopPhase::Running {
            self.limiter.begin();
            self.step();
            if self.phase == LoopPhase::Running {
                self.limiter.finish();
            }
        }
        self.finish();
        self.state.score
    }
}
