//! Axis-aligned rectangle geometry for every entity
//!
//! Positions are integer pixels with the origin at the top-left of the
//! window and y growing downward. Velocities are `Vec2` in pixels per
//! millisecond.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose center is at `center`
    pub fn centered_at(center: IVec2, width: i32, height: i32) -> Self {
        Self::new(center.x - width / 2, center.y - height / 2, width, height)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Move so the center lands on `center`, keeping the size
    pub fn set_center(&mut self, center: IVec2) {
        self.x = center.x - self.width / 2;
        self.y = center.y - self.height / 2;
    }

    /// Strict AABB overlap test (shared edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// Overlapping region of two rectangles, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Offset by whole pixels
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// The playable window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: crate::consts::WINDOW_WIDTH,
            height: crate::consts::WINDOW_HEIGHT,
        }
    }
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True if the rectangle lies entirely inside the window
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left() >= 0
            && rect.top() >= 0
            && rect.right() <= self.width
            && rect.bottom() <= self.height
    }

    /// Shift the rectangle back inside the window (size is preserved)
    pub fn clamp(&self, rect: Rect) -> Rect {
        let mut out = rect;
        if out.left() < 0 {
            out.x = 0;
        } else if out.right() > self.width {
            out.x = self.width - out.width;
        }
        if out.top() < 0 {
            out.y = 0;
        } else if out.bottom() > self.height {
            out.y = self.height - out.height;
        }
        out
    }
}

/// Displacement for one frame, each component truncated toward zero
#[inline]
pub fn displacement(velocity: Vec2, dt_ms: u32) -> IVec2 {
    let dt = dt_ms as f32;
    IVec2::new((velocity.x * dt) as i32, (velocity.y * dt) as i32)
}

/// Advance a rectangle by `velocity * dt_ms`
pub fn integrate(rect: Rect, velocity: Vec2, dt_ms: u32) -> Rect {
    let d = displacement(velocity, dt_ms);
    rect.translated(d.x, d.y)
}
