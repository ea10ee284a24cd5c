//! Actors: every live game object
//!
//! An actor is a rectangle, the sprite it currently shows, and a per-kind
//! body holding the mutable fields that kind needs. Per-tick behavior is a
//! match on the body rather than a type per kind.

use glam::IVec2;

use super::rect::Rect;
use super::registry::Group;
use super::sprite::{SpriteId, SpriteSizes};
use crate::consts::*;

/// Actor kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Player,
    Enemy,
    Shot,
    EnemyBullet,
    Explosion,
    ScoreDisplay,
}

impl ActorKind {
    /// Groups a freshly created actor of this kind joins
    pub fn groups(&self) -> &'static [Group] {
        match self {
            ActorKind::Player => &[Group::All],
            ActorKind::Enemy => &[Group::Enemies, Group::All, Group::LastEnemy],
            ActorKind::Shot => &[Group::Shots, Group::All],
            ActorKind::EnemyBullet => &[Group::EnemyBullets, Group::All],
            ActorKind::Explosion => &[Group::All],
            ActorKind::ScoreDisplay => &[Group::All],
        }
    }
}

/// Player-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// -1 facing left, +1 facing right
    pub facing: i32,
    /// Fire input as seen last tick (edge detection)
    pub reloading: bool,
    pub frame: u32,
    /// Top edge before the hover wobble is applied
    pub orig_top: i32,
}

/// Kind-specific payload
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Player(PlayerState),
    Enemy { speed: i32, frame: u32 },
    Shot { speed: i32 },
    EnemyBullet { speed: i32 },
    Explosion { life: i32 },
    ScoreDisplay { shown: u64 },
}

/// Outcome of a per-tick update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Dead,
}

/// Read-only context handed to every actor update
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    pub bounds: Rect,
    pub sizes: &'a SpriteSizes,
    pub score: u64,
}

/// A live game object
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub rect: Rect,
    pub sprite: SpriteId,
    pub body: Body,
}

impl Actor {
    /// Player at the bottom center of `bounds`
    pub fn player(bounds: &Rect, sizes: &SpriteSizes) -> Self {
        let sprite = SpriteId::Player(0);
        let rect = Rect::from_midbottom(bounds.midbottom(), sizes.size_of(sprite));
        Self {
            rect,
            sprite,
            body: Body::Player(PlayerState {
                facing: -1,
                reloading: false,
                frame: 0,
                orig_top: rect.top(),
            }),
        }
    }

    /// Enemy just above the top edge at horizontal offset `x`
    pub fn enemy(x: i32, sizes: &SpriteSizes) -> Self {
        let sprite = SpriteId::Enemy(0);
        let size = sizes.size_of(sprite);
        Self {
            rect: Rect::new(x, -size.y, size.x, size.y),
            sprite,
            body: Body::Enemy {
                speed: ENEMY_SPEED,
                frame: 0,
            },
        }
    }

    /// Shot whose mid-bottom sits at the gun position
    pub fn shot(gun: IVec2, sizes: &SpriteSizes) -> Self {
        Self {
            rect: Rect::from_midbottom(gun, sizes.shot),
            sprite: SpriteId::Shot,
            body: Body::Shot { speed: SHOT_SPEED },
        }
    }

    /// Bullet dropped from just below `enemy`
    pub fn enemy_bullet(enemy: &Rect, sizes: &SpriteSizes) -> Self {
        let anchor = enemy.moved(IVec2::new(0, ENEMY_BULLET_DROP)).midbottom();
        Self {
            rect: Rect::from_midbottom(anchor, sizes.enemy_bullet),
            sprite: SpriteId::EnemyBullet,
            body: Body::EnemyBullet {
                speed: ENEMY_BULLET_SPEED,
            },
        }
    }

    /// Explosion centered on `site`
    pub fn explosion(site: &Rect, sizes: &SpriteSizes) -> Self {
        let sprite = SpriteId::Explosion(0);
        Self {
            rect: Rect::from_center(site.center(), sizes.size_of(sprite)),
            sprite,
            body: Body::Explosion {
                life: EXPLOSION_LIFE,
            },
        }
    }

    /// Score text in the lower-left corner
    pub fn score_display(score: u64, sizes: &SpriteSizes) -> Self {
        let sprite = SpriteId::Score(score);
        let size = sizes.size_of(sprite);
        Self {
            rect: Rect::new(SCORE_POS.0, SCORE_POS.1, size.x, size.y),
            sprite,
            body: Body::ScoreDisplay { shown: score },
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self.body {
            Body::Player(_) => ActorKind::Player,
            Body::Enemy { .. } => ActorKind::Enemy,
            Body::Shot { .. } => ActorKind::Shot,
            Body::EnemyBullet { .. } => ActorKind::EnemyBullet,
            Body::Explosion { .. } => ActorKind::Explosion,
            Body::ScoreDisplay { .. } => ActorKind::ScoreDisplay,
        }
    }

    /// Show a new sprite; the rectangle takes its size, keeping the top-left
    pub fn set_sprite(&mut self, sprite: SpriteId, sizes: &SpriteSizes) {
        self.sprite = sprite;
        self.rect.resize(sizes.size_of(sprite));
    }

    /// Advance one tick: translate, animate, and report boundary death
    pub fn update(&mut self, ctx: &UpdateContext<'_>) -> Fate {
        let bounds = ctx.bounds;
        match &mut self.body {
            Body::Player(player) => {
                player.frame += 1;
                let index = animation_index(player.frame, PLAYER_ANIM_CYCLE, ctx.sizes.player_frames());
                self.set_sprite(SpriteId::Player(index), ctx.sizes);
                Fate::Alive
            }
            Body::Enemy { speed, frame } => {
                self.rect.move_by(IVec2::new(0, *speed));
                if self.rect.top() >= bounds.bottom() {
                    return Fate::Dead;
                }
                *frame += 1;
                let index = animation_index(*frame, ENEMY_ANIM_CYCLE, ctx.sizes.enemy_frames());
                self.set_sprite(SpriteId::Enemy(index), ctx.sizes);
                Fate::Alive
            }
            Body::Shot { speed } => {
                self.rect.move_by(IVec2::new(0, *speed));
                if self.rect.top() <= bounds.top() - self.rect.h {
                    Fate::Dead
                } else {
                    Fate::Alive
                }
            }
            Body::EnemyBullet { speed } => {
                self.rect.move_by(IVec2::new(0, *speed));
                if self.rect.bottom() >= bounds.bottom() {
                    Fate::Dead
                } else {
                    Fate::Alive
                }
            }
            Body::Explosion { life } => {
                *life -= 1;
                let frames = ctx.sizes.explosion_frames().max(1) as i32;
                let index = (*life).div_euclid(EXPLOSION_ANIM_CYCLE).rem_euclid(frames);
                let alive = *life > 0;
                self.set_sprite(SpriteId::Explosion(index as usize), ctx.sizes);
                if alive { Fate::Alive } else { Fate::Dead }
            }
            Body::ScoreDisplay { shown } => {
                if *shown != ctx.score {
                    *shown = ctx.score;
                    self.set_sprite(SpriteId::Score(ctx.score), ctx.sizes);
                }
                Fate::Alive
            }
        }
    }
}

/// Image index for a frame counter: `(frame / cadence) mod frame_count`
pub fn animation_index(frame: u32, cadence: u32, frame_count: usize) -> usize {
    (frame / cadence) as usize % frame_count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen_rect;

    fn ctx(sizes: &SpriteSizes) -> UpdateContext<'_> {
        UpdateContext {
            bounds: screen_rect(),
            sizes,
            score: 0,
        }
    }

    #[test]
    fn test_player_starts_bottom_center() {
        let sizes = SpriteSizes::default();
        let player = Actor::player(&screen_rect(), &sizes);
        assert_eq!(player.rect.midbottom(), IVec2::new(320, 480));
        let Body::Player(state) = &player.body else {
            panic!("not a player");
        };
        assert_eq!(state.facing, -1);
        assert_eq!(state.orig_top, 480 - 30);
    }

    #[test]
    fn test_animation_cycles_through_frames() {
        assert_eq!(animation_index(0, 12, 3), 0);
        assert_eq!(animation_index(11, 12, 3), 0);
        assert_eq!(animation_index(12, 12, 3), 1);
        assert_eq!(animation_index(24, 12, 3), 2);
        assert_eq!(animation_index(36, 12, 3), 0);
    }

    #[test]
    fn test_enemy_falls_then_dies_below_field() {
        let sizes = SpriteSizes::default();
        let ctx = ctx(&sizes);
        let mut enemy = Actor::enemy(100, &sizes);
        assert_eq!(enemy.rect.top(), -32);
        assert_eq!(enemy.update(&ctx), Fate::Alive);
        assert_eq!(enemy.rect.top(), -27);

        enemy.rect.y = 475;
        assert_eq!(enemy.update(&ctx), Fate::Dead);
    }

    #[test]
    fn test_shot_dies_once_fully_above_top() {
        let sizes = SpriteSizes::default();
        let ctx = ctx(&sizes);
        let mut shot = Actor::shot(IVec2::new(50, 10), &sizes);
        assert_eq!(shot.rect, Rect::new(48, -2, 4, 12));
        // -2 - 11 = -13 <= -12
        assert_eq!(shot.update(&ctx), Fate::Dead);

        let mut shot = Actor::shot(IVec2::new(50, 30), &sizes);
        assert_eq!(shot.update(&ctx), Fate::Alive);
    }

    #[test]
    fn test_enemy_bullet_dies_at_bottom() {
        let sizes = SpriteSizes::default();
        let ctx = ctx(&sizes);
        let enemy = Rect::new(100, 100, 40, 32);
        let mut bullet = Actor::enemy_bullet(&enemy, &sizes);
        assert_eq!(bullet.rect.midbottom(), IVec2::new(120, 137));
        assert_eq!(bullet.update(&ctx), Fate::Alive);

        bullet.rect.y = 480 - 10 - 9;
        assert_eq!(bullet.update(&ctx), Fate::Dead);
    }

    #[test]
    fn test_explosion_lifetime_strictly_decreases() {
        let sizes = SpriteSizes::default();
        let ctx = ctx(&sizes);
        let mut explosion = Actor::explosion(&Rect::new(0, 0, 10, 10), &sizes);
        let mut ticks = 0;
        let mut last = EXPLOSION_LIFE;
        loop {
            ticks += 1;
            let fate = explosion.update(&ctx);
            let Body::Explosion { life } = explosion.body else {
                unreachable!()
            };
            assert!(life < last);
            last = life;
            if fate == Fate::Dead {
                break;
            }
        }
        assert_eq!(ticks, EXPLOSION_LIFE);
        assert_eq!(last, 0);
    }

    #[test]
    fn test_explosion_alternates_frames() {
        let sizes = SpriteSizes::default();
        let ctx = ctx(&sizes);
        let mut explosion = Actor::explosion(&Rect::new(0, 0, 10, 10), &sizes);
        explosion.update(&ctx); // life 11
        assert_eq!(explosion.sprite, SpriteId::Explosion(1));
        explosion.update(&ctx); // life 10
        explosion.update(&ctx); // life 9
        assert_eq!(explosion.sprite, SpriteId::Explosion(1));
        explosion.update(&ctx); // life 8
        assert_eq!(explosion.sprite, SpriteId::Explosion(0));
    }

    #[test]
    fn test_empty_frame_sequences_still_update() {
        let sizes = SpriteSizes {
            player: Vec::new(),
            enemy: Vec::new(),
            explosion: Vec::new(),
            ..SpriteSizes::default()
        };
        let ctx = ctx(&sizes);
        let mut actors = vec![
            Actor::player(&screen_rect(), &sizes),
            Actor::enemy(100, &sizes),
            Actor::explosion(&Rect::new(0, 0, 10, 10), &sizes),
        ];
        for actor in &mut actors {
            actor.update(&ctx);
        }
        assert_eq!(actors[1].sprite, SpriteId::Enemy(0));
        assert_eq!(actors[2].sprite, SpriteId::Explosion(0));
    }

    #[test]
    fn test_score_display_changes_only_on_new_score() {
        let sizes = SpriteSizes::default();
        let mut display = Actor::score_display(0, &sizes);
        let before = display.clone();
        display.update(&ctx(&sizes));
        assert_eq!(display, before);

        let ctx = UpdateContext {
            bounds: screen_rect(),
            sizes: &sizes,
            score: 12,
        };
        display.update(&ctx);
        assert_eq!(display.sprite, SpriteId::Score(12));
        assert_eq!(display.rect.size(), sizes.size_of(SpriteId::Score(12)));
        assert_eq!(display.rect.x, SCORE_POS.0);
    }
}
