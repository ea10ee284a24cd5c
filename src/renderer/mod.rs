//! Software rendering module
//!
//! The dirty-rectangle renderer decides what to paint; `compose` executes
//! those commands into a framebuffer using the loaded sprite atlas.

pub mod dirty;
pub mod font;
pub mod framebuffer;

pub use dirty::{DirtyRenderer, DrawCommand, DrawSource, Frame};
pub use framebuffer::{Framebuffer, Pixel};

use glam::IVec2;

use crate::assets::Atlas;
use crate::sim::SpriteId;

/// Score text color
pub const SCORE_INK: Pixel = Pixel::WHITE;

/// Paint `commands` into `target` in order
pub fn compose(target: &mut Framebuffer, commands: &[DrawCommand], atlas: &Atlas) {
    for command in commands {
        let at = IVec2::new(command.dest.x, command.dest.y);
        match command.source {
            DrawSource::Background => target.copy_region(atlas.background(), &command.dest),
            DrawSource::Sprite(SpriteId::Score(score)) => {
                let text = font::render(&crate::score_text(score), SCORE_INK);
                target.blit(&text, at);
            }
            DrawSource::Sprite(sprite) => {
                if let Some(image) = atlas.image(sprite) {
                    target.blit(image, at);
                } else {
                    log::warn!("no image for {:?}", sprite);
                }
            }
        }
    }
}
