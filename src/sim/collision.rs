//! Collision resolution between actor populations
//!
//! Three checks, always in this order, each destroying actors immediately so
//! later checks see the reduced population:
//! 1. Player vs enemies
//! 2. Shots vs enemies
//! 3. Player vs enemy bullets
//!
//! Overlap is plain rectangle intersection on post-movement rectangles.

use super::rect::Rect;
use super::registry::{ActorId, Group};
use super::state::GameState;

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemies destroyed by touching the player
    pub rammed: Vec<ActorId>,
    /// Enemies destroyed by shots
    pub shot_down: Vec<ActorId>,
    /// Enemy bullets that hit the player
    pub bullets_hit: Vec<ActorId>,
    pub player_killed: bool,
}

impl CollisionReport {
    /// Score gained: one per enemy destroyed
    pub fn points(&self) -> u64 {
        (self.rammed.len() + self.shot_down.len()) as u64
    }
}

/// Members of `group` whose rectangle overlaps `rect`, in creation order
fn overlapping(state: &GameState, rect: &Rect, group: Group) -> Vec<ActorId> {
    state
        .registry
        .iter(group)
        .filter(|(_, actor)| actor.rect.intersects(rect))
        .map(|(id, _)| id)
        .collect()
}

/// Run all three checks and apply their side effects
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    // The player's rectangle is used for every check, even once it is dead
    let Some(player_rect) = state.player_actor().map(|p| p.rect) else {
        return report;
    };

    player_vs_enemies(state, &player_rect, &mut report);
    shots_vs_enemies(state, &mut report);
    player_vs_enemy_bullets(state, &player_rect, &mut report);

    if report.points() > 0 || report.player_killed {
        log::debug!(
            "collisions: {} rammed, {} shot down, {} bullet hits, score {}",
            report.rammed.len(),
            report.shot_down.len(),
            report.bullets_hit.len(),
            state.score
        );
    }
    report
}

fn player_vs_enemies(state: &mut GameState, player_rect: &Rect, report: &mut CollisionReport) {
    for enemy in overlapping(state, player_rect, Group::Enemies) {
        let Some(enemy_actor) = state.registry.kill(enemy) else {
            continue;
        };
        state.spawn_explosion(&enemy_actor.rect);
        state.spawn_explosion(player_rect);
        state.score += 1;
        state.registry.kill(state.player);
        report.rammed.push(enemy);
        report.player_killed = true;
    }
}

fn shots_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    for enemy in state.registry.ids(Group::Enemies) {
        let Some(enemy_rect) = state.registry.get(enemy).map(|a| a.rect) else {
            continue;
        };
        let hits = overlapping(state, &enemy_rect, Group::Shots);
        if hits.is_empty() {
            continue;
        }
        for shot in hits {
            state.registry.kill(shot);
        }
        state.registry.kill(enemy);
        state.spawn_explosion(&enemy_rect);
        state.score += 1;
        report.shot_down.push(enemy);
    }
}

fn player_vs_enemy_bullets(
    state: &mut GameState,
    player_rect: &Rect,
    report: &mut CollisionReport,
) {
    for bullet in overlapping(state, player_rect, Group::EnemyBullets) {
        if state.registry.kill(bullet).is_none() {
            continue;
        }
        state.spawn_explosion(player_rect);
        state.registry.kill(state.player);
        report.bullets_hit.push(bullet);
        report.player_killed = true;
    }
}
