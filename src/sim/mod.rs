//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded or scripted samples only
//! - Stable iteration order (by actor ID)
//! - No rendering or platform dependencies beyond sprite sizes

pub mod actor;
pub mod collision;
pub mod player;
pub mod rect;
pub mod registry;
pub mod rng;
pub mod spawner;
pub mod sprite;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorKind, Body, Fate};
pub use collision::CollisionReport;
pub use rect::Rect;
pub use registry::{ActorId, Group, Registry};
pub use rng::{Sampler, ScriptedSampler};
pub use spawner::{SpawnReport, Spawner};
pub use sprite::{SpriteId, SpriteSizes};
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, TickReport, tick};
