//! Session state
//!
//! Everything one play session owns: the actor registry, the score, the
//! spawner countdown and the random source. A new session is a new
//! `GameState`; nothing here is global.

use super::actor::Actor;
use super::rect::Rect;
use super::registry::{ActorId, Registry};
use super::rng::{self, Sampler};
use super::spawner::Spawner;
use super::sprite::SpriteSizes;
use crate::screen_rect;

/// Side effects for the audio boundary, drained once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player fired a shot
    ShotFired,
    /// Something blew up
    Explosion,
}

pub struct GameState {
    /// All live actors and their group memberships
    pub registry: Registry,
    /// Enemies destroyed this session
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub spawner: Spawner,
    /// The player's ID; stays set after death so its last rectangle is known
    pub player: ActorId,
    pub sizes: SpriteSizes,
    /// Play-field bounds
    pub bounds: Rect,
    rng: Box<dyn Sampler>,
    events: Vec<GameEvent>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("score", &self.score)
            .field("time_ticks", &self.time_ticks)
            .field("actors", &self.registry.actor_count())
            .field("player", &self.player)
            .finish()
    }
}

impl GameState {
    /// New session with a seeded generator
    pub fn new(seed: u64, sizes: SpriteSizes) -> Self {
        Self::with_sampler(Box::new(rng::seeded(seed)), sizes)
    }

    /// New session drawing samples from `sampler`
    ///
    /// Starts with the player, one enemy and the score display.
    pub fn with_sampler(sampler: Box<dyn Sampler>, sizes: SpriteSizes) -> Self {
        let bounds = screen_rect();
        let mut registry = Registry::new();
        let player = registry.spawn(Actor::player(&bounds, &sizes));

        let mut state = Self {
            registry,
            score: 0,
            time_ticks: 0,
            spawner: Spawner::new(),
            player,
            sizes,
            bounds,
            rng: sampler,
            events: Vec::new(),
        };
        state.spawn_enemy();
        state
            .registry
            .spawn(Actor::score_display(state.score, &state.sizes));
        state
    }

    /// Empty session with only a player, for focused tests
    pub fn bare(sampler: Box<dyn Sampler>, sizes: SpriteSizes) -> Self {
        let bounds = screen_rect();
        let mut registry = Registry::new();
        let player = registry.spawn(Actor::player(&bounds, &sizes));
        Self {
            registry,
            score: 0,
            time_ticks: 0,
            spawner: Spawner::new(),
            player,
            sizes,
            bounds,
            rng: sampler,
            events: Vec::new(),
        }
    }

    pub fn player_alive(&self) -> bool {
        self.registry.is_alive(self.player)
    }

    pub fn player_actor(&self) -> Option<&Actor> {
        self.registry.get(self.player)
    }

    /// Draw one uniform sample
    pub fn sample(&mut self) -> f64 {
        self.rng.sample()
    }

    pub fn sampler(&mut self) -> &mut dyn Sampler {
        self.rng.as_mut()
    }

    /// Spawn an enemy at a random horizontal offset
    pub fn spawn_enemy(&mut self) -> ActorId {
        let x = (self.sample() * self.bounds.w as f64).floor() as i32;
        let id = self.registry.spawn(Actor::enemy(x, &self.sizes));
        log::debug!("enemy {:?} spawned at x={}", id, x);
        id
    }

    /// Spawn an explosion centered on `site`
    pub fn spawn_explosion(&mut self, site: &Rect) -> ActorId {
        self.events.push(GameEvent::Explosion);
        self.registry.spawn(Actor::explosion(site, &self.sizes))
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
