//! Actor registry with overlapping named groups
//!
//! The registry is the sole owner of every live actor. Groups are index sets
//! of actor IDs, so one actor can belong to any number of them. Iteration is
//! always in ascending ID order (creation order), which keeps the simulation
//! deterministic and doubles as the draw order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::actor::{Actor, ActorKind};

/// Stable identifier of an actor for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActorId(pub u32);

/// Named membership sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Everything that is updated and drawn
    All,
    Enemies,
    Shots,
    EnemyBullets,
    /// The most recently created enemy that is still alive (at most one)
    LastEnemy,
}

impl Group {
    fn is_singleton(&self) -> bool {
        matches!(self, Group::LastEnemy)
    }
}

#[derive(Debug)]
pub struct Registry {
    actors: BTreeMap<ActorId, Actor>,
    groups: HashMap<Group, BTreeSet<ActorId>>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            actors: BTreeMap::new(),
            groups: HashMap::new(),
            next_id: 1,
        }
    }

    /// Take ownership of `actor` and add it to its kind's default groups
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        let groups = actor.kind().groups();
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.insert(id, actor);
        for &group in groups {
            self.add_to_group(id, group);
        }
        id
    }

    fn add_to_group(&mut self, id: ActorId, group: Group) {
        let members = self.groups.entry(group).or_default();
        if group.is_singleton() {
            members.clear();
        }
        members.insert(id);
    }

    /// Destroy an actor, removing it from every group
    ///
    /// Returns the actor so callers can still read its final rectangle.
    /// Killing an already-dead actor is a no-op.
    pub fn kill(&mut self, id: ActorId) -> Option<Actor> {
        let actor = self.actors.remove(&id)?;
        let mut lost_last_enemy = false;
        for (group, members) in self.groups.iter_mut() {
            if members.remove(&id) && *group == Group::LastEnemy {
                lost_last_enemy = true;
            }
        }
        if lost_last_enemy {
            // Fall back to the newest enemy still alive
            if let Some(&newest) = self.groups.get(&Group::Enemies).and_then(|e| e.last()) {
                self.add_to_group(newest, Group::LastEnemy);
            }
        }
        log::debug!("killed {:?} {:?}", actor.kind(), id);
        Some(actor)
    }

    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn contains(&self, group: Group, id: ActorId) -> bool {
        self.groups.get(&group).is_some_and(|m| m.contains(&id))
    }

    /// Number of live members of a group
    pub fn count(&self, group: Group) -> usize {
        self.groups.get(&group).map_or(0, BTreeSet::len)
    }

    pub fn is_empty(&self, group: Group) -> bool {
        self.count(group) == 0
    }

    /// Snapshot of a group's member IDs, for loops that kill or spawn
    pub fn ids(&self, group: Group) -> Vec<ActorId> {
        self.groups
            .get(&group)
            .map(|m| m.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Borrowing iterator over a group's members
    pub fn iter(&self, group: Group) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.groups
            .get(&group)
            .into_iter()
            .flatten()
            .filter_map(|id| self.actors.get(id).map(|a| (*id, a)))
    }

    /// Single member of a singleton group
    pub fn single(&self, group: Group) -> Option<ActorId> {
        self.groups.get(&group).and_then(|m| m.last().copied())
    }

    /// Total live actors
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Live actors of a kind, in creation order
    pub fn of_kind(&self, kind: ActorKind) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.actors
            .iter()
            .filter(move |(_, a)| a.kind() == kind)
            .map(|(id, a)| (*id, a))
    }
}
