//! Collision predicates
//!
//! Two shapes meet in this game: circles (projectiles, enemies) and the
//! player's axis-aligned rectangle. Both tests are pure.

use glam::Vec2;

/// A circle in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }
}

/// Circle-vs-circle test on the circles' bounding boxes
///
/// This is a box overlap, not a distance check: two circles whose boxes
/// touch diagonally count as colliding even though their edges are apart.
/// Touching edges count as overlap.
pub fn circle_overlap(a: &Circle, b: &Circle) -> bool {
    a.center.x + a.radius >= b.center.x - b.radius
        && a.center.x - a.radius <= b.center.x + b.radius
        && a.center.y - a.radius <= b.center.y + b.radius
        && a.center.y + a.radius >= b.center.y - b.radius
}

/// Exact circle-vs-rectangle test (closest point on the rectangle)
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let half = rect.half_extents();
    let dist = (circle.center - rect.center()).abs();

    // Too far on either axis
    if dist.x > half.x + circle.radius || dist.y > half.y + circle.radius {
        return false;
    }

    // Center lies within the rectangle's horizontal or vertical band
    if dist.x <= half.x || dist.y <= half.y {
        return true;
    }

    // Corner region
    let corner = dist - half;
    corner.length_squared() <= circle.radius * circle.radius
}
