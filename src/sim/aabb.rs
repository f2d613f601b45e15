//! Axis-aligned bounding boxes
//!
//! Every collision test in the simulation goes through [`intersects`].
//! Boxes are stored as a top-left corner plus a size, in screen space
//! (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_corner(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Overlap test; boxes that only touch along an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects(self, other)
    }

    /// True if this box lies entirely inside `bounds` (edges may coincide)
    pub fn is_within(&self, bounds: &Aabb) -> bool {
        let max = self.max();
        let bounds_max = bounds.max();
        self.min.x >= bounds.min.x
            && self.min.y >= bounds.min.y
            && max.x <= bounds_max.x
            && max.y <= bounds_max.y
    }
}

/// Standard AABB overlap: projections must overlap on both axes
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    a.min.x < b_max.x && b.min.x < a_max.x && a.min.y < b_max.y && b.min.y < a_max.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        let corner = Aabb::new(10.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
        assert!(!intersects(&a, &corner));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 20.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = Aabb::new(0.0, 0.0, 40.0, 40.0);
        let inner = Aabb::centered(Vec2::new(20.0, 20.0), Vec2::splat(6.0));
        assert!(intersects(&outer, &inner));
        assert!(inner.is_within(&outer));
        assert!(!outer.is_within(&inner));
    }

    #[test]
    fn test_centered_box() {
        let b = Aabb::centered(Vec2::new(10.0, 10.0), Vec2::splat(6.0));
        assert_eq!(b.min, Vec2::new(7.0, 7.0));
        assert_eq!(b.max(), Vec2::new(13.0, 13.0));
        assert_eq!(b.center(), Vec2::new(10.0, 10.0));
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            aw in 1.0f32..50.0, ah in 1.0f32..50.0,
            bw in 1.0f32..50.0, bh in 1.0f32..50.0,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            let b = Aabb::new(bx, by, bw, bh);
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn box_intersects_itself(
            x in -100.0f32..100.0, y in -100.0f32..100.0,
            w in 1.0f32..50.0, h in 1.0f32..50.0,
        ) {
            let a = Aabb::new(x, y, w, h);
            prop_assert!(intersects(&a, &a));
        }
    }
}
