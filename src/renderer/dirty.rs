//! Dirty-rectangle renderer
//!
//! Remembers where each actor was drawn last frame and with which image.
//! Each frame only the regions touched by change are erased (background
//! restored) and redrawn. An actor that overlaps a damaged region is redrawn
//! too, and its own rectangles join the damage, until nothing new is pulled
//! in. Unchanged frames produce no commands at all.

use std::collections::{BTreeMap, BTreeSet};

use crate::sim::{ActorId, Group, Rect, Registry, SpriteId};

/// What to paint into a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    /// Restore the static background under the rectangle
    Background,
    /// Draw an actor image with its top-left at the rectangle's origin
    Sprite(SpriteId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub source: DrawSource,
    pub dest: Rect,
}

/// One frame's work for the presentation boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Erases first, then sprite draws in z-order
    pub commands: Vec<DrawCommand>,
    /// Screen regions to flush, each once: erased rectangles, then drawn ones
    pub dirty: Vec<Rect>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug)]
pub struct DirtyRenderer {
    bounds: Rect,
    /// Rectangle and image each actor was drawn with last frame
    last: BTreeMap<ActorId, (Rect, SpriteId)>,
    primed: bool,
}

impl DirtyRenderer {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            last: BTreeMap::new(),
            primed: false,
        }
    }

    /// Compute this frame's erase and draw commands from the live actors
    pub fn render(&mut self, registry: &Registry) -> Frame {
        let current: BTreeMap<ActorId, (Rect, SpriteId)> = registry
            .iter(Group::All)
            .map(|(id, actor)| (id, (actor.rect, actor.sprite)))
            .collect();

        let frame = if self.primed {
            self.incremental(&current)
        } else {
            self.full(&current)
        };
        self.last = current;
        self.primed = true;

        log::trace!(
            "render: {} commands, {} dirty rects",
            frame.commands.len(),
            frame.dirty.len()
        );
        frame
    }

    /// Background over the whole screen, then every actor
    fn full(&self, current: &BTreeMap<ActorId, (Rect, SpriteId)>) -> Frame {
        let mut frame = Frame::default();
        frame.commands.push(DrawCommand {
            source: DrawSource::Background,
            dest: self.bounds,
        });
        frame.dirty.push(self.bounds);
        for (rect, sprite) in current.values() {
            if let Some(dest) = self.visible(rect) {
                frame.commands.push(DrawCommand {
                    source: DrawSource::Sprite(*sprite),
                    dest: *rect,
                });
                frame.dirty.push(dest);
            }
        }
        frame
    }

    fn incremental(&self, current: &BTreeMap<ActorId, (Rect, SpriteId)>) -> Frame {
        // Destroyed actors leave damage where they were last drawn
        let mut erase: Vec<Rect> = self
            .last
            .iter()
            .filter(|(id, _)| !current.contains_key(id))
            .map(|(_, (rect, _))| *rect)
            .collect();

        let mut redraw: BTreeSet<ActorId> = current
            .iter()
            .filter(|(id, now)| self.last.get(id) != Some(now))
            .map(|(id, _)| *id)
            .collect();
        let mut pending: Vec<ActorId> = redraw.iter().copied().collect();

        // Grow the redraw set until no untouched actor overlaps the damage
        loop {
            for id in pending.drain(..) {
                // Actors created this frame have nothing to erase; their IDs
                // are the highest, so they already draw on top of everything
                let Some((before, _)) = self.last.get(&id) else {
                    continue;
                };
                erase.push(*before);
                if let Some((rect, _)) = current.get(&id) {
                    erase.push(*rect);
                }
            }
            pending.extend(
                current
                    .iter()
                    .filter(|(id, _)| !redraw.contains(id))
                    .filter(|(_, (rect, _))| erase.iter().any(|e| e.intersects(rect)))
                    .map(|(id, _)| *id),
            );
            if pending.is_empty() {
                break;
            }
            redraw.extend(pending.iter().copied());
        }

        let mut frame = Frame::default();
        let mut seen = BTreeSet::new();
        for rect in erase {
            let Some(dest) = self.visible(&rect) else {
                continue;
            };
            if !seen.insert((dest.x, dest.y, dest.w, dest.h)) {
                continue;
            }
            frame.commands.push(DrawCommand {
                source: DrawSource::Background,
                dest,
            });
            frame.dirty.push(dest);
        }
        for id in &redraw {
            let Some((rect, sprite)) = current.get(id) else {
                continue;
            };
            let Some(dest) = self.visible(rect) else {
                continue;
            };
            frame.commands.push(DrawCommand {
                source: DrawSource::Sprite(*sprite),
                dest: *rect,
            });
            if seen.insert((dest.x, dest.y, dest.w, dest.h)) {
                frame.dirty.push(dest);
            }
        }
        frame
    }

    /// On-screen part of `rect`, if any
    fn visible(&self, rect: &Rect) -> Option<Rect> {
        rect.intersection(&self.bounds)
    }
}
