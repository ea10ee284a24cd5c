//! Sprite identifiers and frame dimensions
//!
//! The simulation only needs image sizes; pixel data lives in the asset atlas.

use glam::IVec2;

use crate::renderer::font;

/// One displayable image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    /// Player frame: 0 = left, 1 = right, 2 = level
    Player(usize),
    Enemy(usize),
    /// Explosion frame: 0 = plain, 1 = flipped
    Explosion(usize),
    Shot,
    EnemyBullet,
    /// Rendered score text for the given value
    Score(u64),
}

/// Frame sizes for every sprite sequence
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSizes {
    pub player: Vec<IVec2>,
    pub enemy: Vec<IVec2>,
    pub explosion: Vec<IVec2>,
    pub shot: IVec2,
    pub enemy_bullet: IVec2,
}

impl Default for SpriteSizes {
    /// Dimensions of the built-in artwork
    fn default() -> Self {
        Self {
            player: vec![IVec2::new(42, 30); 3],
            enemy: vec![IVec2::new(40, 32)],
            explosion: vec![IVec2::new(48, 48); 2],
            shot: IVec2::new(4, 12),
            enemy_bullet: IVec2::new(6, 10),
        }
    }
}

impl SpriteSizes {
    pub fn size_of(&self, sprite: SpriteId) -> IVec2 {
        match sprite {
            SpriteId::Player(i) => frame_size(&self.player, i),
            SpriteId::Enemy(i) => frame_size(&self.enemy, i),
            SpriteId::Explosion(i) => frame_size(&self.explosion, i),
            SpriteId::Shot => self.shot,
            SpriteId::EnemyBullet => self.enemy_bullet,
            SpriteId::Score(score) => font::text_size(&crate::score_text(score)),
        }
    }

    pub fn player_frames(&self) -> usize {
        self.player.len()
    }

    pub fn enemy_frames(&self) -> usize {
        self.enemy.len()
    }

    pub fn explosion_frames(&self) -> usize {
        self.explosion.len()
    }
}

/// Size of frame `index`, wrapping; an empty sequence has zero size
fn frame_size(frames: &[IVec2], index: usize) -> IVec2 {
    frames
        .get(index % frames.len().max(1))
        .copied()
        .unwrap_or(IVec2::ZERO)
}
