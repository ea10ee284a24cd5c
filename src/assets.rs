//! Sprite and sound loading
//!
//! Assets are addressed by logical name through an [`AssetProvider`]. The
//! built-in provider generates every image and clip procedurally, so the game
//! runs without any files on disk.

use std::collections::HashSet;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::AssetError;
use crate::renderer::framebuffer::{Framebuffer, Pixel};
use crate::sim::{Rect, SpriteId, SpriteSizes};

/// Sprite images are plain framebuffers with transparent pixels
pub type Image = Framebuffer;

/// Logical asset names
pub mod names {
    pub const PLAYER: [&str; 3] = ["player1", "player2", "player3"];
    pub const ENEMY: &str = "enemy";
    pub const EXPLOSION: &str = "explosion";
    pub const SHOT: &str = "shot";
    pub const ENEMY_BULLET: &str = "enemy_bullet";
    /// Background tile
    pub const BACKGROUND: &str = "water";
    pub const BOOM: &str = "boom";
    pub const SHOT_SOUND: &str = "car_door";
    pub const MUSIC: &str = "in_the_name_of_strikers";
}

/// Decoded mono sound clip
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl Clip {
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }
}

/// Source of images and sounds by logical name
pub trait AssetProvider {
    fn load_image(&self, name: &str) -> Result<Image, AssetError>;
    fn load_sound(&self, name: &str) -> Result<Clip, AssetError>;
}

const SAMPLE_RATE: u32 = 22_050;

/// Procedurally generated assets
#[derive(Debug, Clone, Default)]
pub struct BuiltinAssets {
    withheld: HashSet<String>,
    music: bool,
}

impl BuiltinAssets {
    /// All sprites and effects; no music track
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `name` is missing
    pub fn without(mut self, name: &str) -> Self {
        self.withheld.insert(name.to_string());
        self
    }

    /// Also provide a generated background track
    pub fn with_music(mut self) -> Self {
        self.music = true;
        self
    }

    fn check(&self, name: &str) -> bool {
        !self.withheld.contains(name)
    }
}

impl AssetProvider for BuiltinAssets {
    fn load_image(&self, name: &str) -> Result<Image, AssetError> {
        let missing = || AssetError::MissingImage {
            name: name.to_string(),
        };
        if !self.check(name) {
            return Err(missing());
        }
        let image = match name {
            "player1" => ship(-1),
            "player2" => ship(1),
            "player3" => ship(0),
            names::ENEMY => saucer(),
            names::EXPLOSION => burst(),
            names::SHOT => Framebuffer::filled(4, 12, Pixel::rgb(255, 240, 120)),
            names::ENEMY_BULLET => bullet(),
            names::BACKGROUND => water_tile(),
            _ => return Err(missing()),
        };
        Ok(image)
    }

    fn load_sound(&self, name: &str) -> Result<Clip, AssetError> {
        let missing = || AssetError::MissingSound {
            name: name.to_string(),
        };
        if !self.check(name) {
            return Err(missing());
        }
        let samples = match name {
            names::BOOM => noise_burst(500, 0xB00),
            names::SHOT_SOUND => thump(150),
            names::MUSIC if self.music => arpeggio(2000),
            _ => return Err(missing()),
        };
        Ok(Clip {
            name: name.to_string(),
            sample_rate: SAMPLE_RATE,
            samples,
        })
    }
}

/// Every image the game draws, loaded once at startup
#[derive(Debug, Clone)]
pub struct Atlas {
    player: Vec<Image>,
    enemy: Vec<Image>,
    explosion: Vec<Image>,
    shot: Image,
    enemy_bullet: Image,
    background: Image,
}

impl Atlas {
    /// Load all sprites; any missing or empty image is fatal
    pub fn load(provider: &dyn AssetProvider) -> Result<Self, AssetError> {
        let player = names::PLAYER
            .iter()
            .map(|name| load_sized(provider, name))
            .collect::<Result<Vec<_>, _>>()?;
        let enemy = vec![load_sized(provider, names::ENEMY)?];
        let blast = load_sized(provider, names::EXPLOSION)?;
        let explosion = vec![blast.clone(), blast.flipped(true, true)];
        let shot = load_sized(provider, names::SHOT)?;
        let enemy_bullet = load_sized(provider, names::ENEMY_BULLET)?;
        let tile = load_sized(provider, names::BACKGROUND)?;
        let background = Framebuffer::tiled(&tile, SCREEN_WIDTH, SCREEN_HEIGHT);

        log::info!(
            "loaded {} sprite images",
            player.len() + enemy.len() + explosion.len() + 3
        );
        Ok(Self {
            player,
            enemy,
            explosion,
            shot,
            enemy_bullet,
            background,
        })
    }

    /// Full-screen background
    pub fn background(&self) -> &Image {
        &self.background
    }

    /// Image for a sprite; score text is rendered separately
    pub fn image(&self, sprite: SpriteId) -> Option<&Image> {
        match sprite {
            SpriteId::Player(i) => self.player.get(i),
            SpriteId::Enemy(i) => self.enemy.get(i),
            SpriteId::Explosion(i) => self.explosion.get(i),
            SpriteId::Shot => Some(&self.shot),
            SpriteId::EnemyBullet => Some(&self.enemy_bullet),
            SpriteId::Score(_) => None,
        }
    }

    /// Frame dimensions for the simulation
    pub fn sizes(&self) -> SpriteSizes {
        SpriteSizes {
            player: self.player.iter().map(Framebuffer::size).collect(),
            enemy: self.enemy.iter().map(Framebuffer::size).collect(),
            explosion: self.explosion.iter().map(Framebuffer::size).collect(),
            shot: self.shot.size(),
            enemy_bullet: self.enemy_bullet.size(),
        }
    }
}

fn load_sized(provider: &dyn AssetProvider, name: &str) -> Result<Image, AssetError> {
    let image = provider.load_image(name)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(AssetError::InvalidImage {
            name: name.to_string(),
            reason: format!("empty size {}x{}", image.width(), image.height()),
        });
    }
    Ok(image)
}

// === Image generators ===

/// Fighter seen from above; `tilt` leans the wings
fn ship(tilt: i32) -> Image {
    let mut img = Framebuffer::new(42, 30);
    let hull = Pixel::rgb(200, 200, 210);
    let wing = Pixel::rgb(90, 140, 220);
    img.fill_rect(&Rect::new(18, 0, 6, 30), hull);
    img.fill_rect(&Rect::new(0, 14 + tilt * 3, 42, 6), wing);
    img.fill_rect(&Rect::new(12, 24, 18, 4), wing);
    img.set(20, 2, Pixel::rgb(255, 80, 80));
    img.set(21, 2, Pixel::rgb(255, 80, 80));
    img
}

fn saucer() -> Image {
    let mut img = Framebuffer::new(40, 32);
    let center = IVec2::new(20, 16);
    for y in 0..32 {
        for x in 0..40 {
            let d = IVec2::new(x, y) - center;
            // Ellipse body with a dome on top
            if d.x * d.x * 4 + d.y * d.y * 25 <= 1600 {
                img.set(x, y, Pixel::rgb(80, 200, 90));
            } else if d.y < 0 && d.x * d.x + d.y * d.y * 2 <= 120 {
                img.set(x, y, Pixel::rgb(180, 255, 200));
            }
        }
    }
    img
}

/// Lopsided starburst so the flipped frame looks different
fn burst() -> Image {
    let mut img = Framebuffer::new(48, 48);
    for y in 0..48 {
        for x in 0..48 {
            let d = IVec2::new(x - 20, y - 20);
            let r2 = d.length_squared();
            let pixel = match r2 {
                0..=40 => Pixel::rgb(255, 255, 200),
                41..=200 => Pixel::rgb(255, 190, 40),
                201..=500 if (x + y) % 3 != 0 => Pixel::rgb(220, 60, 20),
                _ => continue,
            };
            img.set(x, y, pixel);
        }
    }
    img
}

fn bullet() -> Image {
    let mut img = Framebuffer::new(6, 10);
    img.fill_rect(&Rect::new(1, 0, 4, 10), Pixel::rgb(255, 60, 60));
    img.fill_rect(&Rect::new(0, 3, 6, 4), Pixel::rgb(255, 150, 150));
    img
}

fn water_tile() -> Image {
    let mut img = Framebuffer::filled(32, 32, Pixel::rgb(20, 50, 110));
    for y in (4..32).step_by(8) {
        for x in 0..32 {
            if (x / 4 + y / 8) % 2 == 0 {
                img.set(x, y, Pixel::rgb(60, 100, 170));
            }
        }
    }
    img
}

// === Sound generators ===

fn sample_count(duration_ms: u32) -> usize {
    (SAMPLE_RATE as u64 * duration_ms as u64 / 1000) as usize
}

/// Noise with a linear decay envelope
fn noise_burst(duration_ms: u32, seed: u64) -> Vec<f32> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let n = sample_count(duration_ms);
    (0..n)
        .map(|i| {
            let envelope = 1.0 - i as f32 / n as f32;
            rng.random_range(-1.0f32..1.0) * envelope
        })
        .collect()
}

/// Low square pulse with a fast decay
fn thump(duration_ms: u32) -> Vec<f32> {
    let n = sample_count(duration_ms);
    let period = (SAMPLE_RATE / 90) as usize;
    (0..n)
        .map(|i| {
            let square = if (i / (period / 2).max(1)) % 2 == 0 { 1.0 } else { -1.0 };
            let envelope = (1.0 - i as f32 / n as f32).powi(3);
            square * envelope * 0.6
        })
        .collect()
}

/// Looping sine arpeggio
fn arpeggio(duration_ms: u32) -> Vec<f32> {
    const NOTES: [f32; 4] = [220.0, 277.18, 329.63, 440.0];
    let n = sample_count(duration_ms);
    let note_len = n / NOTES.len() / 2;
    (0..n)
        .map(|i| {
            let freq = NOTES[(i / note_len.max(1)) % NOTES.len()];
            let t = i as f32 / SAMPLE_RATE as f32;
            (t * freq * std::f32::consts::TAU).sin() * 0.3
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_atlas_matches_default_sizes() {
        let atlas = Atlas::load(&BuiltinAssets::new()).unwrap();
        assert_eq!(atlas.sizes(), SpriteSizes::default());
        assert_eq!(atlas.background().size(), IVec2::new(640, 480));
    }

    #[test]
    fn test_explosion_frames_are_mirror_images() {
        let atlas = Atlas::load(&BuiltinAssets::new()).unwrap();
        let a = atlas.image(SpriteId::Explosion(0)).unwrap();
        let b = atlas.image(SpriteId::Explosion(1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(&a.flipped(true, true), b);
    }

    #[test]
    fn test_missing_image_is_fatal() {
        let provider = BuiltinAssets::new().without(names::SHOT);
        let err = Atlas::load(&provider).unwrap_err();
        assert_eq!(
            err,
            AssetError::MissingImage {
                name: "shot".to_string()
            }
        );
    }

    #[test]
    fn test_music_absent_unless_requested() {
        let provider = BuiltinAssets::new();
        assert!(matches!(
            provider.load_sound(names::MUSIC),
            Err(AssetError::MissingSound { .. })
        ));
        let clip = BuiltinAssets::new()
            .with_music()
            .load_sound(names::MUSIC)
            .unwrap();
        assert_eq!(clip.duration_ms(), 2000);
    }

    #[test]
    fn test_effects_are_generated() {
        let provider = BuiltinAssets::new();
        let boom = provider.load_sound(names::BOOM).unwrap();
        assert_eq!(boom.duration_ms(), 500);
        assert!(boom.samples.iter().all(|s| s.abs() <= 1.0));
        assert!(provider.load_sound(names::SHOT_SOUND).is_ok());
    }

    struct EmptyImages;

    impl AssetProvider for EmptyImages {
        fn load_image(&self, _name: &str) -> Result<Image, AssetError> {
            Ok(Framebuffer::new(0, 0))
        }
        fn load_sound(&self, name: &str) -> Result<Clip, AssetError> {
            Err(AssetError::MissingSound {
                name: name.to_string(),
            })
        }
    }

    #[test]
    fn test_empty_image_is_invalid() {
        let err = Atlas::load(&EmptyImages).unwrap_err();
        assert!(matches!(err, AssetError::InvalidImage { .. }));
        assert_eq!(err.asset_name(), "player1");
    }
}
