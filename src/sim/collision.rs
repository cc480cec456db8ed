//! Collision detection and response for rectangular bodies
//!
//! Three independent checks:
//! - a body against the four window walls (reflection)
//! - two same-type bodies against each other (equal-mass elastic exchange)
//! - a spawn candidate against everything already in play (broad phase)

use glam::Vec2;

use super::rect::{Bounds, Rect, integrate};

/// A moving body as seen by the pairwise resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub velocity: Vec2,
}

impl Body {
    pub fn new(rect: Rect, velocity: Vec2) -> Self {
        Self { rect, velocity }
    }
}

/// Result of reflecting a body off the window walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBounce {
    pub rect: Rect,
    pub velocity: Vec2,
    /// Whether any wall was hit this frame
    pub bounced: bool,
}

/// Reflect a body off the window walls
///
/// Top/bottom and left/right are handled independently, so a corner hit
/// flips both components.
pub fn bounce_off_walls(rect: Rect, velocity: Vec2, bounds: Bounds) -> WallBounce {
    let mut rect = rect;
    let mut velocity = velocity;
    let mut bounced = false;

    if rect.top() < 0 {
        rect.y = 0;
        velocity.y = -velocity.y;
        bounced = true;
    } else if rect.bottom() > bounds.height {
        rect.y = bounds.height - rect.height;
        velocity.y = -velocity.y;
        bounced = true;
    }

    if rect.left() < 0 {
        rect.x = 0;
        velocity.x = -velocity.x;
        bounced = true;
    } else if rect.right() > bounds.width {
        rect.x = bounds.width - rect.width;
        velocity.x = -velocity.x;
        bounced = true;
    }

    WallBounce {
        rect,
        velocity,
        bounced,
    }
}

/// What happens to one body after a pairwise collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyOutcome {
    /// Keep the body, with its new position and velocity
    Moved { rect: Rect, velocity: Vec2 },
    /// The separated position leaves the window; deactivate the body
    OutOfBounds,
}

impl BodyOutcome {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, BodyOutcome::OutOfBounds)
    }
}

/// Outcome for both bodies of a colliding pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolution {
    pub first: BodyOutcome,
    pub second: BodyOutcome,
}

impl CollisionResolution {
    /// Same resolution seen from the other body's side
    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

/// Axis along which two overlapping bodies exchange momentum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionAxis {
    Horizontal,
    Vertical,
    Both,
}

/// Contact normal of an overlap: the shallower extent of the overlap region
pub fn collision_axis(overlap: &Rect) -> CollisionAxis {
    use std::cmp::Ordering;
    match overlap.width.cmp(&overlap.height) {
        Ordering::Less => CollisionAxis::Horizontal,
        Ordering::Greater => CollisionAxis::Vertical,
        Ordering::Equal => CollisionAxis::Both,
    }
}

/// Exchange the velocity components along `axis`
fn exchange(a: Vec2, b: Vec2, axis: CollisionAxis) -> (Vec2, Vec2) {
    match axis {
        CollisionAxis::Horizontal => (Vec2::new(b.x, a.y), Vec2::new(a.x, b.y)),
        CollisionAxis::Vertical => (Vec2::new(a.x, b.y), Vec2::new(b.x, a.y)),
        CollisionAxis::Both => (b, a),
    }
}

/// Rewind this frame's motion and replay it with the post-collision velocity
fn separate(body: Body, post_velocity: Vec2, dt_ms: u32, bounds: Bounds) -> BodyOutcome {
    let rewound = integrate(body.rect, -body.velocity, dt_ms);
    let rect = integrate(rewound, post_velocity, dt_ms);
    if bounds.contains(&rect) {
        BodyOutcome::Moved {
            rect,
            velocity: post_velocity,
        }
    } else {
        BodyOutcome::OutOfBounds
    }
}

/// Resolve a collision between two same-type bodies
///
/// Returns `None` when the rectangles do not overlap; velocities are then
/// untouched. Otherwise the bodies trade velocity along the contact axis and
/// each is moved to where the new velocity would have taken it this frame.
/// A body whose new position leaves the window is flagged out of bounds
/// rather than clamped.
pub fn resolve_pair(
    dt_ms: u32,
    bounds: Bounds,
    first: Body,
    second: Body,
) -> Option<CollisionResolution> {
    let overlap = first.rect.intersection(&second.rect)?;
    let axis = collision_axis(&overlap);
    let (first_velocity, second_velocity) = exchange(first.velocity, second.velocity, axis);

    Some(CollisionResolution {
        first: separate(first, first_velocity, dt_ms, bounds),
        second: separate(second, second_velocity, dt_ms, bounds),
    })
}

/// Broad-phase spawn check: true if `candidate` overlaps none of `obstacles`
pub fn is_collision_free<'a, I>(candidate: &Rect, obstacles: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    obstacles.into_iter().all(|r| !candidate.intersects(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds::new(800, 600);

    #[test]
    fn test_bounce_left_wall() {
        let result = bounce_off_walls(Rect::new(-4, 100, 20, 20), Vec2::new(-0.2, 0.1), BOUNDS);
        assert!(result.bounced);
        assert_eq!(result.rect.x, 0);
        assert_eq!(result.velocity, Vec2::new(0.2, 0.1));
    }

    #[test]
    fn test_bounce_corner_flips_both() {
        let result = bounce_off_walls(Rect::new(790, 590, 20, 20), Vec2::new(0.2, 0.3), BOUNDS);
        assert!(result.bounced);
        assert_eq!(result.rect, Rect::new(780, 580, 20, 20));
        assert_eq!(result.velocity, Vec2::new(-0.2, -0.3));
    }

    #[test]
    fn test_no_bounce_inside() {
        let rect = Rect::new(100, 100, 20, 20);
        let velocity = Vec2::new(0.2, 0.3);
        let result = bounce_off_walls(rect, velocity, BOUNDS);
        assert!(!result.bounced);
        assert_eq!(result.rect, rect);
        assert_eq!(result.velocity, velocity);
    }

    #[test]
    fn test_collision_axis() {
        assert_eq!(collision_axis(&Rect::new(0, 0, 2, 10)), CollisionAxis::Horizontal);
        assert_eq!(collision_axis(&Rect::new(0, 0, 10, 2)), CollisionAxis::Vertical);
        assert_eq!(collision_axis(&Rect::new(0, 0, 4, 4)), CollisionAxis::Both);
    }

    #[test]
    fn test_resolve_pair_no_overlap() {
        let a = Body::new(Rect::new(0, 0, 10, 10), Vec2::new(0.1, 0.0));
        let b = Body::new(Rect::new(100, 100, 10, 10), Vec2::new(-0.1, 0.0));
        assert_eq!(resolve_pair(16, BOUNDS, a, b), None);
    }

    #[test]
    fn test_resolve_pair_head_on_horizontal() {
        // Side contact: overlap 2 wide, 20 tall
        let a = Body::new(Rect::new(100, 100, 20, 20), Vec2::new(0.25, 0.05));
        let b = Body::new(Rect::new(118, 100, 20, 20), Vec2::new(-0.25, 0.0));
        let result = resolve_pair(20, BOUNDS, a, b).expect("overlapping bodies collide");

        // a: rewind 5px right/1px down, replay with (-0.25, 0.05)
        assert_eq!(
            result.first,
            BodyOutcome::Moved {
                rect: Rect::new(90, 100, 20, 20),
                velocity: Vec2::new(-0.25, 0.05),
            }
        );
        assert_eq!(
            result.second,
            BodyOutcome::Moved {
                rect: Rect::new(128, 100, 20, 20),
                velocity: Vec2::new(0.25, 0.0),
            }
        );
    }

    #[test]
    fn test_resolve_pair_vertical_keeps_x() {
        // Top/bottom contact: overlap 20 wide, 3 tall
        let a = Body::new(Rect::new(200, 200, 20, 20), Vec2::new(0.1, 0.2));
        let b = Body::new(Rect::new(200, 217, 20, 20), Vec2::new(-0.1, -0.2));
        let result = resolve_pair(10, BOUNDS, a, b).expect("collision");
        match (result.first, result.second) {
            (
                BodyOutcome::Moved { velocity: va, .. },
                BodyOutcome::Moved { velocity: vb, .. },
            ) => {
                assert_eq!(va, Vec2::new(0.1, -0.2));
                assert_eq!(vb, Vec2::new(-0.1, 0.2));
            }
            other => panic!("expected both moved, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_pair_out_of_bounds_flagged() {
        // a hugs the left wall and is pushed further left by the exchange
        let a = Body::new(Rect::new(0, 100, 20, 20), Vec2::new(0.0, 0.0));
        let b = Body::new(Rect::new(15, 100, 20, 20), Vec2::new(-0.5, 0.0));
        let result = resolve_pair(20, BOUNDS, a, b).expect("collision");
        assert!(result.first.is_out_of_bounds());
        assert!(!result.second.is_out_of_bounds());
    }

    #[test]
    fn test_resolve_pair_symmetry() {
        let a = Body::new(Rect::new(300, 300, 30, 20), Vec2::new(0.15, -0.1));
        let b = Body::new(Rect::new(320, 310, 30, 20), Vec2::new(-0.2, 0.12));
        let ab = resolve_pair(16, BOUNDS, a, b);
        let ba = resolve_pair(16, BOUNDS, b, a);
        assert!(ab.is_some());
        assert_eq!(ab.map(CollisionResolution::swapped), ba);
    }

    #[test]
    fn test_is_collision_free() {
        let candidate = Rect::new(100, 100, 20, 20);
        let clear = [Rect::new(0, 0, 10, 10), Rect::new(120, 100, 10, 10)];
        assert!(is_collision_free(&candidate, &clear));

        let blocked = [Rect::new(0, 0, 10, 10), Rect::new(110, 110, 10, 10)];
        assert!(!is_collision_free(&candidate, &blocked));

        assert!(is_collision_free(&candidate, &[]));
    }
}
