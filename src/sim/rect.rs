//! Integer axis-aligned rectangles
//!
//! Pixel-space rectangles with top-left origin. All anchor math uses floor
//! division so positions are bit-for-bit reproducible.

use glam::IVec2;

/// An axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Create a rectangle; negative sizes collapse to zero
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        let w = if w < 0 { 0 } else { w };
        let h = if h < 0 { 0 } else { h };
        Self { x, y, w, h }
    }

    /// Rectangle of `size` whose mid-bottom point is `anchor`
    pub fn from_midbottom(anchor: IVec2, size: IVec2) -> Self {
        Self::new(anchor.x - size.x / 2, anchor.y - size.y, size.x, size.y)
    }

    /// Rectangle of `size` centered on `anchor`
    pub fn from_center(anchor: IVec2, size: IVec2) -> Self {
        Self::new(anchor.x - size.x / 2, anchor.y - size.y / 2, size.x, size.y)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn midbottom(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h)
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Translate in place
    pub fn move_by(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Translated copy
    pub fn moved(&self, delta: IVec2) -> Self {
        let mut r = *self;
        r.move_by(delta);
        r
    }

    /// Change size, keeping the top-left corner
    pub fn resize(&mut self, size: IVec2) {
        self.w = size.x.max(0);
        self.h = size.y.max(0);
    }

    /// True if the two rectangles share a non-empty area
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlapping region, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// True if `other` lies fully inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Copy moved inside `bounds`
    ///
    /// On an axis where the rectangle is at least as large as the bounds it
    /// is centered instead.
    pub fn clamped(&self, bounds: &Rect) -> Rect {
        let x = clamp_axis(self.x, self.w, bounds.x, bounds.w);
        let y = clamp_axis(self.y, self.h, bounds.y, bounds.h);
        Rect::new(x, y, self.w, self.h)
    }
}

fn clamp_axis(pos: i32, len: i32, min: i32, span: i32) -> i32 {
    if len >= span {
        min + span / 2 - len / 2
    } else if pos < min {
        min
    } else if pos + len > min + span {
        min + span - len
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_intersects_requires_area() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
        // Touching edges share no area
        assert!(!a.intersects(&Rect::new(10, 0, 5, 5)));
        assert!(!a.intersects(&Rect::new(0, 10, 5, 5)));
        assert!(!a.intersects(&Rect::new(2, 2, 0, 5)));
    }

    #[test]
    fn test_anchors_use_floor_division() {
        let r = Rect::from_midbottom(IVec2::new(320, 480), IVec2::new(41, 30));
        assert_eq!(r, Rect::new(300, 450, 41, 30));
        assert_eq!(r.midbottom(), IVec2::new(320, 480));

        let c = Rect::from_center(IVec2::new(50, 50), IVec2::new(7, 7));
        assert_eq!(c, Rect::new(47, 47, 7, 7));
    }

    #[test]
    fn test_clamp_pushes_inside() {
        let bounds = Rect::new(0, 0, 640, 480);
        assert_eq!(Rect::new(-15, 10, 40, 20).clamped(&bounds).x, 0);
        assert_eq!(Rect::new(630, 10, 40, 20).clamped(&bounds).x, 600);
        assert_eq!(Rect::new(100, 10, 40, 20).clamped(&bounds).x, 100);
        // Wider than the bounds: centered
        assert_eq!(Rect::new(5, 0, 700, 20).clamped(&bounds).x, -30);
    }

    #[test]
    fn test_union_and_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.union(&b), Rect::new(0, 0, 15, 15));
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersection(&Rect::new(20, 20, 1, 1)), None);
        assert_eq!(Rect::default().union(&a), a);
    }

    #[test]
    fn test_negative_size_collapses() {
        let r = Rect::new(3, 3, -4, 2);
        assert_eq!(r.w, 0);
        assert!(r.is_empty());
    }

    proptest! {
        #[test]
        fn prop_clamped_lies_inside(x in -2000i32..2000, y in -2000i32..2000, w in 0i32..640, h in 0i32..480) {
            let bounds = Rect::new(0, 0, 640, 480);
            let r = Rect::new(x, y, w, h).clamped(&bounds);
            prop_assert!(bounds.contains(&r));
            prop_assert_eq!(r.size(), IVec2::new(w, h));
        }

        #[test]
        fn prop_intersects_is_symmetric(
            ax in -50i32..50, ay in -50i32..50, aw in 0i32..40, ah in 0i32..40,
            bx in -50i32..50, by in -50i32..50, bw in 0i32..40, bh in 0i32..40,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
            prop_assert_eq!(a.intersects(&b), a.intersection(&b).is_some());
        }
    }
}
