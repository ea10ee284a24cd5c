//! Strikers - a fixed-rate arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, spawning, collisions, game state)
//! - `renderer`: Dirty-rectangle renderer and software framebuffer
//! - `platform`: Input source and presentation boundaries
//! - `assets`: Sprite and sound loading
//! - `audio`: Sound cues and background music
//! - `game`: Fixed-rate game loop

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::AssetError;
pub use game::{Game, LoopPhase};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play-field size in pixels
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 480;

    /// Ticks per second (25 ms budget per tick)
    pub const TICK_RATE: u32 = 40;

    /// Most player shots alive at once
    pub const MAX_SHOTS: usize = 2;
    /// Enemy spawns with probability 1 / ENEMY_ODDS per eligible tick
    pub const ENEMY_ODDS: u32 = 22;
    /// Enemy bullet fires with probability 1 / BULLET_ODDS per tick
    pub const BULLET_ODDS: u32 = 60;
    /// Ticks between enemy spawn attempts after a spawn
    pub const ENEMY_RELOAD: u32 = 12;

    pub const PLAYER_SPEED: i32 = 10;
    /// Horizontal distance per hover wobble phase
    pub const PLAYER_BOUNCE: i32 = 24;
    pub const PLAYER_GUN_OFFSET: i32 = -11;
    pub const PLAYER_ANIM_CYCLE: u32 = 12;

    pub const ENEMY_SPEED: i32 = 5;
    pub const ENEMY_ANIM_CYCLE: u32 = 12;

    pub const EXPLOSION_LIFE: i32 = 12;
    pub const EXPLOSION_ANIM_CYCLE: i32 = 3;

    pub const SHOT_SPEED: i32 = -11;
    pub const ENEMY_BULLET_SPEED: i32 = 9;
    /// Enemy bullets leave from this far below the enemy's bottom edge
    pub const ENEMY_BULLET_DROP: i32 = 5;

    /// Top-left of the score text
    pub const SCORE_POS: (i32, i32) = (10, 450);

    /// Background music fade-out when the session ends
    pub const MUSIC_FADEOUT_MS: u64 = 1000;
    /// Hold after the session ends before terminating
    pub const END_GRACE_MS: u64 = 1000;
}

/// The play-field rectangle
#[inline]
pub fn screen_rect() -> sim::Rect {
    sim::Rect::new(0, 0, consts::SCREEN_WIDTH, consts::SCREEN_HEIGHT)
}

/// Format the score line shown in the corner
#[inline]
pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}
