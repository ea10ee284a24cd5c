//! Player controller
//!
//! Turns the held-key snapshot into movement, facing and shots.

use glam::IVec2;

use super::actor::{Actor, Body};
use super::rect::Rect;
use super::registry::{ActorId, Group};
use super::sprite::{SpriteId, SpriteSizes};
use super::state::{GameEvent, GameState};
use crate::consts::{MAX_SHOTS, PLAYER_BOUNCE, PLAYER_GUN_OFFSET, PLAYER_SPEED};

/// Move the player horizontally by `direction * PLAYER_SPEED`
///
/// `direction` is -1, 0 or 1. Facing and the left/right sprite only change
/// on a nonzero direction. The rectangle is clamped to `bounds`, then lifted
/// by the hover wobble `(left / PLAYER_BOUNCE) mod 2`.
pub fn move_player(actor: &mut Actor, direction: i32, bounds: &Rect, sizes: &SpriteSizes) {
    let direction = direction.signum();
    let Body::Player(player) = &mut actor.body else {
        return;
    };
    if direction != 0 {
        player.facing = direction;
    }
    let orig_top = player.orig_top;

    actor.rect.move_by(IVec2::new(direction * PLAYER_SPEED, 0));
    actor.rect = actor.rect.clamped(bounds);
    if direction < 0 {
        actor.set_sprite(SpriteId::Player(0), sizes);
    } else if direction > 0 {
        actor.set_sprite(SpriteId::Player(1), sizes);
    }
    actor.rect.y = orig_top - hover_offset(actor.rect.left());
}

/// Hover wobble for a horizontal position: 0 or 1
pub fn hover_offset(left: i32) -> i32 {
    left.div_euclid(PLAYER_BOUNCE).rem_euclid(2)
}

/// Muzzle position: offset from center toward the facing side, at the top
pub fn gun_position(actor: &Actor) -> IVec2 {
    let facing = match &actor.body {
        Body::Player(player) => player.facing,
        _ => 1,
    };
    IVec2::new(facing * PLAYER_GUN_OFFSET + actor.rect.centerx(), actor.rect.top())
}

/// Fire if the trigger was just pressed and fewer than MAX_SHOTS are alive
///
/// The reload lock is set to the current trigger state every tick, so holding
/// fire produces a single shot per press.
pub fn fire(state: &mut GameState, firing: bool) -> Option<ActorId> {
    let shots_alive = state.registry.count(Group::Shots);
    let player = state.registry.get_mut(state.player)?;
    let Body::Player(controls) = &mut player.body else {
        return None;
    };
    let can_fire = !controls.reloading && firing && shots_alive < MAX_SHOTS;
    controls.reloading = firing;
    if !can_fire {
        return None;
    }

    let gun = gun_position(player);
    let id = state.registry.spawn(Actor::shot(gun, &state.sizes));
    state.push_event(GameEvent::ShotFired);
    log::debug!("shot {:?} fired from {:?}", id, gun);
    Some(id)
}
