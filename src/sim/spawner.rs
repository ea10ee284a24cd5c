//! Enemy and enemy-bullet spawning
//!
//! Two independent draws per tick:
//! - Enemies: a reload countdown ticks down; once it is zero every tick draws
//!   a sample and spawns with probability 1 / ENEMY_ODDS, restarting the
//!   countdown on a spawn.
//! - Enemy bullets: while the most recent live enemy exists, every tick draws
//!   a sample and fires from it with probability 1 / BULLET_ODDS.

use super::actor::Actor;
use super::registry::{ActorId, Group};
use super::rng::one_in;
use super::state::GameState;
use crate::consts::{BULLET_ODDS, ENEMY_ODDS, ENEMY_RELOAD};

/// What the spawner created this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub enemy: Option<ActorId>,
    pub enemy_bullet: Option<ActorId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawner {
    /// Ticks left before enemy spawn draws resume
    pub enemy_reload: u32,
    pub enemy_odds: u32,
    pub bullet_odds: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            enemy_reload: ENEMY_RELOAD,
            enemy_odds: ENEMY_ODDS,
            bullet_odds: BULLET_ODDS,
        }
    }
}

/// Run both spawn processes once
pub fn spawn_step(state: &mut GameState) -> SpawnReport {
    SpawnReport {
        enemy: spawn_enemy_step(state),
        enemy_bullet: spawn_bullet_step(state),
    }
}

fn spawn_enemy_step(state: &mut GameState) -> Option<ActorId> {
    if state.spawner.enemy_reload > 0 {
        state.spawner.enemy_reload -= 1;
        return None;
    }
    let odds = state.spawner.enemy_odds;
    if !one_in(state.sampler(), odds) {
        return None;
    }
    let id = state.spawn_enemy();
    state.spawner.enemy_reload = ENEMY_RELOAD;
    Some(id)
}

fn spawn_bullet_step(state: &mut GameState) -> Option<ActorId> {
    let source = state.registry.single(Group::LastEnemy)?;
    let odds = state.spawner.bullet_odds;
    if !one_in(state.sampler(), odds) {
        return None;
    }
    let enemy_rect = state.registry.get(source)?.rect;
    let id = state
        .registry
        .spawn(Actor::enemy_bullet(&enemy_rect, &state.sizes));
    log::debug!("enemy {:?} fired bullet {:?}", source, id);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedSampler, seeded};
    use crate::sim::sprite::SpriteSizes;

    fn bare(samples: Vec<f64>) -> GameState {
        GameState::bare(
            Box::new(ScriptedSampler::new(samples, 0.999)),
            SpriteSizes::default(),
        )
    }

    #[test]
    fn test_no_enemy_draw_while_reloading() {
        let mut state = bare(vec![0.0; 64]);
        for _ in 0..ENEMY_RELOAD {
            let report = spawn_step(&mut state);
            assert_eq!(report.enemy, None);
            assert_eq!(report.enemy_bullet, None);
        }
        assert_eq!(state.spawner.enemy_reload, 0);
        // First eligible tick with a zero sample spawns and restarts the countdown
        let report = spawn_step(&mut state);
        assert!(report.enemy.is_some());
        assert_eq!(state.spawner.enemy_reload, ENEMY_RELOAD);
    }

    #[test]
    fn test_failed_draw_keeps_countdown_at_zero() {
        let mut state = bare(vec![]);
        state.spawner.enemy_reload = 0;
        assert_eq!(spawn_step(&mut state).enemy, None);
        assert_eq!(state.spawner.enemy_reload, 0);
        assert_eq!(state.registry.count(Group::Enemies), 0);
    }

    #[test]
    fn test_bullet_needs_a_live_enemy() {
        // Reloading, so the only possible draw is the bullet draw
        let mut state = bare(vec![0.0, 0.0]);
        assert_eq!(spawn_step(&mut state).enemy_bullet, None);

        let enemy = state.spawn_enemy(); // consumes the first sample
        let report = spawn_step(&mut state);
        let bullet = report.enemy_bullet.expect("bullet fired");
        let enemy_rect = state.registry.get(enemy).unwrap().rect;
        let bullet_rect = state.registry.get(bullet).unwrap().rect;
        assert_eq!(bullet_rect.midbottom().x, enemy_rect.midbottom().x);
        assert_eq!(bullet_rect.bottom(), enemy_rect.bottom() + 5);
        assert!(state.registry.contains(Group::EnemyBullets, bullet));
    }

    #[test]
    fn test_bullet_comes_from_newest_enemy() {
        let mut state = bare(vec![0.1, 0.9, 0.0]);
        let _older = state.spawn_enemy();
        let newer = state.spawn_enemy();
        let bullet = spawn_step(&mut state).enemy_bullet.unwrap();
        let newer_rect = state.registry.get(newer).unwrap().rect;
        assert_eq!(
            state.registry.get(bullet).unwrap().rect.midbottom().x,
            newer_rect.midbottom().x
        );
    }

    #[test]
    fn test_spawns_are_reproducible_for_a_seed() {
        let run = |seed| {
            let mut state = GameState::bare(Box::new(seeded(seed)), SpriteSizes::default());
            (0..400)
                .map(|_| {
                    let r = spawn_step(&mut state);
                    (r.enemy.is_some(), r.enemy_bullet.is_some())
                })
                .collect::<Vec<_>>()
        };
        let a = run(2024);
        assert_eq!(a, run(2024));
        assert!(a.iter().any(|(enemy, _)| *enemy));
    }
}
