//! Platform abstraction layer
//!
//! The game talks to the outside world through two seams:
//! - `InputSource`: discrete window/key events and the held-key snapshot
//! - `Presentation`: executes draw commands and flushes dirty rectangles
//!
//! Headless implementations of both live here; they drive the binary and
//! the tests.

use std::collections::HashMap;

use crate::assets::Atlas;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::{self, Frame, Framebuffer, Pixel};
use crate::sim::TickInput;

/// Discrete events observed at the top of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    Escape,
    ToggleFullscreen,
}

impl InputEvent {
    /// True if this event ends the session
    pub fn ends_session(&self) -> bool {
        matches!(self, InputEvent::Quit | InputEvent::Escape)
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl KeyState {
    pub fn tick_input(&self) -> TickInput {
        TickInput::from_keys(self.left, self.right, self.fire)
    }
}

pub trait InputSource {
    /// Events queued for `tick`, draining them
    fn poll(&mut self, tick: u64) -> Vec<InputEvent>;
    /// Held-key snapshot after the last poll
    fn keys(&self) -> KeyState;
}

/// Frame-indexed scripted input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: HashMap<u64, Vec<InputEvent>>,
    key_changes: HashMap<u64, KeyState>,
    held: KeyState,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` at `tick`
    pub fn at(mut self, tick: u64, event: InputEvent) -> Self {
        self.events.entry(tick).or_default().push(event);
        self
    }

    /// Close the window at `tick`
    pub fn quit_at(self, tick: u64) -> Self {
        self.at(tick, InputEvent::Quit)
    }

    /// Hold `keys` from `tick` on, until the next change
    pub fn hold(mut self, tick: u64, keys: KeyState) -> Self {
        self.key_changes.insert(tick, keys);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent> {
        if let Some(keys) = self.key_changes.remove(&tick) {
            self.held = keys;
        }
        self.events.remove(&tick).unwrap_or_default()
    }

    fn keys(&self) -> KeyState {
        self.held
    }
}

/// Screen output
pub trait Presentation {
    /// Execute the frame's commands and flush its dirty rectangles
    fn present(&mut self, frame: &Frame, atlas: &Atlas);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn is_fullscreen(&self) -> bool;
    /// Current screen contents, if the display keeps them
    fn screen(&self) -> Option<&Framebuffer> {
        None
    }
}

/// Flush counters for a display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub frames: u64,
    /// Frames that flushed nothing
    pub idle_frames: u64,
    pub rects: u64,
    pub pixels: u64,
}

/// In-memory display backed by a framebuffer
#[derive(Debug)]
pub struct SoftwareDisplay {
    screen: Framebuffer,
    fullscreen: bool,
    stats: FlushStats,
}

impl SoftwareDisplay {
    pub fn new(fullscreen: bool) -> Self {
        log::info!(
            "display {}x{} ({})",
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            if fullscreen { "fullscreen" } else { "windowed" }
        );
        Self {
            screen: Framebuffer::filled(SCREEN_WIDTH, SCREEN_HEIGHT, Pixel::BLACK),
            fullscreen,
            stats: FlushStats::default(),
        }
    }

    pub fn stats(&self) -> FlushStats {
        self.stats
    }
}

impl Presentation for SoftwareDisplay {
    fn present(&mut self, frame: &Frame, atlas: &Atlas) {
        renderer::compose(&mut self.screen, &frame.commands, atlas);
        self.stats.frames += 1;
        if frame.dirty.is_empty() {
            self.stats.idle_frames += 1;
        }
        self.stats.rects += frame.dirty.len() as u64;
        self.stats.pixels += frame.dirty.iter().map(|r| r.area() as u64).sum::<u64>();
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        // The new mode gets a fresh surface holding the old contents
        let backup = self.screen.clone();
        self.screen = Framebuffer::filled(SCREEN_WIDTH, SCREEN_HEIGHT, Pixel::BLACK);
        self.screen.copy_region(&backup, &backup.rect());
        self.fullscreen = fullscreen;
        log::info!(
            "switched to {} mode",
            if fullscreen { "fullscreen" } else { "windowed" }
        );
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn screen(&self) -> Option<&Framebuffer> {
        Some(&self.screen)
    }
}
