//! Fixed-rate simulation tick
//!
//! One tick runs spawn, actor update, player control and collision in that
//! order. Each step reads what the previous one wrote, so the order is part
//! of the game's behavior.

use super::actor::{Fate, UpdateContext};
use super::collision::{self, CollisionReport};
use super::player;
use super::registry::{ActorId, Group};
use super::spawner::{self, SpawnReport};
use super::state::GameState;
use crate::consts::PLAYER_SPEED;

/// Held-key snapshot for one tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// -1 left, 0 none, 1 right
    pub direction: i32,
    /// Fire key held
    pub fire: bool,
    /// Demo mode - steer and shoot automatically
    pub autopilot: bool,
}

impl TickInput {
    pub fn from_keys(left: bool, right: bool, fire: bool) -> Self {
        Self {
            direction: right as i32 - left as i32,
            fire,
            autopilot: false,
        }
    }
}

/// Everything that happened in one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: SpawnReport,
    /// Actors that left the play-field or expired during update
    pub expired: Vec<ActorId>,
    pub shot: Option<ActorId>,
    pub collisions: CollisionReport,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    state.time_ticks += 1;
    let mut report = TickReport {
        spawned: spawner::spawn_step(state),
        ..Default::default()
    };

    report.expired = update_actors(state);

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        *input
    };
    if state.player_alive() {
        if let Some(actor) = state.registry.get_mut(state.player) {
            player::move_player(actor, input.direction, &state.bounds, &state.sizes);
        }
        report.shot = player::fire(state, input.fire);
    }

    report.collisions = collision::resolve(state);
    report
}

/// Update every renderable actor in creation order, removing the ones that die
fn update_actors(state: &mut GameState) -> Vec<ActorId> {
    let ctx = UpdateContext {
        bounds: state.bounds,
        sizes: &state.sizes,
        score: state.score,
    };
    let mut expired = Vec::new();
    for id in state.registry.ids(Group::All) {
        let Some(actor) = state.registry.get_mut(id) else {
            continue;
        };
        if actor.update(&ctx) == Fate::Dead {
            expired.push(id);
        }
    }
    for &id in &expired {
        state.registry.kill(id);
    }
    expired
}

/// Steer under the lowest enemy and tap fire when lined up
fn autopilot_input(state: &GameState) -> TickInput {
    let Some(player) = state.player_actor() else {
        return TickInput::default();
    };
    let target = state
        .registry
        .iter(Group::Enemies)
        .max_by_key(|(id, enemy)| (enemy.rect.bottom(), *id))
        .map(|(_, enemy)| enemy.rect.centerx());

    let Some(target) = target else {
        return TickInput::default();
    };
    let offset = target - player.rect.centerx();
    let aligned = offset.abs() <= PLAYER_SPEED;
    TickInput {
        direction: if aligned { 0 } else { offset.signum() },
        // Release every other tick so the trigger edge repeats
        fire: aligned && state.time_ticks % 2 == 0,
        autopilot: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{Actor, ActorKind};
    use crate::sim::rect::Rect;
    use crate::sim::rng::ScriptedSampler;
    use crate::sim::sprite::SpriteSizes;

    fn quiet_state() -> GameState {
        GameState::bare(Box::new(ScriptedSampler::never()), SpriteSizes::default())
    }

    #[test]
    fn test_fire_held_makes_one_shot() {
        let mut state = quiet_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let first = tick(&mut state, &fire);
        assert!(first.shot.is_some());
        assert_eq!(state.registry.count(Group::Shots), 1);

        // Still held, shot still alive: nothing new
        let second = tick(&mut state, &fire);
        assert!(second.shot.is_none());
        assert_eq!(state.registry.count(Group::Shots), 1);
    }

    #[test]
    fn test_spawned_actors_move_on_their_first_tick() {
        // Enemy draw hits, enemy x = 0.25 * 640, bullet draw hits
        let sampler = ScriptedSampler::new([0.0, 0.25, 0.0], 0.999);
        let mut state = GameState::bare(Box::new(sampler), SpriteSizes::default());
        state.spawner.enemy_reload = 0;

        let report = tick(&mut state, &TickInput::default());
        let enemy = report.spawned.enemy.expect("enemy spawned");
        let bullet = report.spawned.enemy_bullet.expect("bullet spawned");

        // Spawned at top = -32, then one 5 px step in the same tick
        let enemy_rect = state.registry.get(enemy).unwrap().rect;
        assert_eq!(enemy_rect, Rect::new(160, -27, 40, 32));
        // Dropped with mid-bottom (180, 5), then one 9 px step
        let bullet_rect = state.registry.get(bullet).unwrap().rect;
        assert_eq!(bullet_rect, Rect::new(177, 4, 6, 10));
        assert_eq!(state.spawner.enemy_reload, crate::consts::ENEMY_RELOAD);
    }

    #[test]
    fn test_enemy_descends_onto_resting_player() {
        let mut state = quiet_state();
        let player_rect = state.player_actor().unwrap().rect;
        let mut enemy = Actor::enemy(player_rect.x, &state.sizes);
        // Just above the player; one step of 5 px brings it into contact
        enemy.rect.y = player_rect.top() - enemy.rect.h - 2;
        let enemy = state.registry.spawn(enemy);

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.collisions.rammed, vec![enemy]);
        assert!(!state.player_alive());
        assert!(!state.registry.is_alive(enemy));
        assert_eq!(state.score, 1);

        let blasts: Vec<Rect> = state
            .registry
            .of_kind(ActorKind::Explosion)
            .map(|(_, a)| a.rect)
            .collect();
        assert_eq!(blasts.len(), 2);
        assert_eq!(blasts[1].center(), player_rect.center());
    }

    #[test]
    fn test_enemy_bullet_expires_at_bottom() {
        let mut state = quiet_state();
        let mut bullet = Actor::enemy_bullet(&Rect::new(0, 0, 1, 1), &state.sizes);
        // Far from the player, about to reach the bottom edge
        bullet.rect.x = 20;
        bullet.rect.y = 480 - bullet.rect.h - 4;
        let bullet = state.registry.spawn(bullet);

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.expired, vec![bullet]);
        assert_eq!(state.score, 0);
        assert_eq!(state.registry.of_kind(ActorKind::Explosion).count(), 0);
        assert!(state.player_alive());
    }

    #[test]
    fn test_player_stays_in_bounds() {
        let mut state = quiet_state();
        for step in 0..200 {
            let input = TickInput {
                direction: if step < 100 { -1 } else { 1 },
                ..Default::default()
            };
            tick(&mut state, &input);
            let rect = state.player_actor().unwrap().rect;
            assert!(rect.left() >= 0 && rect.right() <= 640);
        }
    }

    #[test]
    fn test_destroyed_actors_never_return() {
        let mut state = GameState::new(77, SpriteSizes::default());
        let mut dead = std::collections::HashSet::new();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut last_score = 0;
        for _ in 0..2000 {
            if !state.player_alive() {
                break;
            }
            let report = tick(&mut state, &input);
            dead.extend(report.expired.iter().copied());
            dead.extend(report.collisions.rammed.iter().copied());
            dead.extend(report.collisions.shot_down.iter().copied());
            for id in &dead {
                assert!(!state.registry.is_alive(*id));
            }
            assert!(state.score >= last_score);
            assert_eq!(state.score - last_score, report.collisions.points());
            last_score = state.score;
        }
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::new(99999, SpriteSizes::default());
            let input = TickInput {
                autopilot: true,
                ..Default::default()
            };
            let mut trace = Vec::new();
            for _ in 0..500 {
                if !state.player_alive() {
                    break;
                }
                tick(&mut state, &input);
                let rects: Vec<Rect> = state.registry.iter(Group::All).map(|(_, a)| a.rect).collect();
                trace.push((state.score, rects));
            }
            trace
        };
        assert_eq!(run(), run());
    }
}
