//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use rs_math3d::{Dimensioni, Recti, Vec2i};
use std::cmp::{max, min};

/// Stand-in for "unbounded" sizes. Half of `i32::MAX` so a sum of two stays representable.
pub const LARGE_INT: i32 = i32::MAX / 2;

/// Adds `b` to `a`, clamping at the numeric bounds instead of wrapping.
pub fn add_clamp_at_max(a: i32, b: i32) -> i32 { a.saturating_add(b) }

/// Clamps `value` into `[lo, hi]`.
///
/// Unlike [`Ord::clamp`] this never panics: when `lo > hi` the lower bound wins.
pub fn clamp_i32(value: i32, lo: i32, hi: i32) -> i32 { max(lo, min(value, hi)) }

/// Grid (taxicab) distance between two points.
pub fn grid_distance(a: Vec2i, b: Vec2i) -> u32 { a.x.abs_diff(b.x).saturating_add(a.y.abs_diff(b.y)) }

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Axis-aligned integer rectangle stored as min and max corners.
///
/// The max corner is exclusive for point containment. A rectangle is *valid* when
/// its max corner is not below its min corner on either axis, which keeps zero-width
/// and zero-height rectangles meaningful (lines are drawn through them).
pub struct Rect {
    /// Left edge.
    pub min_x: i32,
    /// Top edge.
    pub min_y: i32,
    /// Right edge (exclusive).
    pub max_x: i32,
    /// Bottom edge (exclusive).
    pub max_y: i32,
}

impl Rect {
    /// Rectangle covering nothing at the origin.
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    /// Creates a rectangle from its corners.
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self { Self { min_x, min_y, max_x, max_y } }

    /// Creates a rectangle from its top-left corner and size, saturating the far corner.
    pub fn from_min_and_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, add_clamp_at_max(x, width), add_clamp_at_max(y, height))
    }

    /// Creates a rectangle anchored at the origin with the given size.
    pub fn from_size(size: Dimensioni) -> Self { Self::from_min_and_size(0, 0, size.width, size.height) }

    /// Horizontal extent. Negative for inverted rectangles.
    pub fn width(&self) -> i32 { self.max_x.saturating_sub(self.min_x) }

    /// Vertical extent. Negative for inverted rectangles.
    pub fn height(&self) -> i32 { self.max_y.saturating_sub(self.min_y) }

    /// Extents as a [`Dimensioni`].
    pub fn size(&self) -> Dimensioni { Dimensioni::new(self.width(), self.height()) }

    /// Top-left corner.
    pub fn min(&self) -> Vec2i { Vec2i::new(self.min_x, self.min_y) }

    /// Bottom-right corner.
    pub fn max(&self) -> Vec2i { Vec2i::new(self.max_x, self.max_y) }

    /// `true` when the corners are ordered on both axes (zero extents allowed).
    pub fn is_valid(&self) -> bool { self.min_x <= self.max_x && self.min_y <= self.max_y }

    /// `true` when the rectangle covers at least one pixel.
    pub fn has_area(&self) -> bool { self.min_x < self.max_x && self.min_y < self.max_y }

    /// Half-open point containment: the max edges are outside.
    pub fn contains(&self, p: Vec2i) -> bool { p.x >= self.min_x && p.x < self.max_x && p.y >= self.min_y && p.y < self.max_y }

    /// `true` when `other` lies entirely inside `self` (edges may touch).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x && other.min_y >= self.min_y && other.max_x <= self.max_x && other.max_y <= self.max_y
    }

    /// Component-wise intersection. The result is invalid when the rectangles do not overlap.
    pub fn intersection(&self, other: &Rect) -> Rect {
        Rect::new(
            max(self.min_x, other.min_x),
            max(self.min_y, other.min_y),
            min(self.max_x, other.max_x),
            min(self.max_y, other.max_y),
        )
    }

    /// Moves the rectangle by `(dx, dy)` with saturating arithmetic.
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            add_clamp_at_max(self.min_x, dx),
            add_clamp_at_max(self.min_y, dy),
            add_clamp_at_max(self.max_x, dx),
            add_clamp_at_max(self.max_y, dy),
        )
    }

    /// Grows every edge outwards by `amount` (shrinks when negative).
    pub fn expand(&self, amount: i32) -> Rect {
        Rect::new(
            self.min_x.saturating_sub(amount),
            self.min_y.saturating_sub(amount),
            add_clamp_at_max(self.max_x, amount),
            add_clamp_at_max(self.max_y, amount),
        )
    }
}

impl From<Recti> for Rect {
    fn from(r: Recti) -> Self { Rect::from_min_and_size(r.x, r.y, r.width, r.height) }
}

impl From<Rect> for Recti {
    fn from(r: Rect) -> Self { Recti { x: r.min_x, y: r.min_y, width: r.width(), height: r.height() } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_and_from_origin_size_rects() {
        let r: Rect = Recti { x: 5, y: -3, width: 20, height: 0 }.into();
        assert_eq!(r, Rect::new(5, -3, 25, -3));
        assert!(r.is_valid() && !r.has_area());
        let back: Recti = Rect::new(1, 2, 11, 32).into();
        assert_eq!((back.x, back.y, back.width, back.height), (1, 2, 10, 30));
        let saturated: Rect = Recti { x: i32::MAX - 1, y: 0, width: 10, height: 1 }.into();
        assert_eq!(saturated.max_x, i32::MAX);
    }

    #[test]
    fn containment_is_half_open() {
        let r = Rect::from_min_and_size(10, 10, 5, 5);
        assert!(r.contains(Vec2i::new(10, 10)));
        assert!(r.contains(Vec2i::new(14, 14)));
        assert!(!r.contains(Vec2i::new(15, 14)));
        assert!(!r.contains(Vec2i::new(14, 15)));
        assert!(!r.contains(Vec2i::new(9, 12)));
    }

    #[test]
    fn validity_allows_zero_extent_but_area_does_not() {
        let line = Rect::new(4, 7, 20, 7);
        assert!(line.is_valid());
        assert!(!line.has_area());
        let inverted = Rect::new(5, 0, 4, 10);
        assert!(!inverted.is_valid());
        assert!(Rect::from_min_and_size(0, 0, 1, 1).has_area());
    }

    #[test]
    fn min_and_size_saturates_instead_of_wrapping() {
        let r = Rect::from_min_and_size(10, 10, LARGE_INT, i32::MAX);
        assert_eq!(r.max_x, 10 + LARGE_INT);
        assert_eq!(r.max_y, i32::MAX);
        assert!(r.is_valid());
        assert_eq!(add_clamp_at_max(i32::MAX - 1, 5), i32::MAX);
    }

    #[test]
    fn intersection_of_disjoint_rects_is_invalid() {
        let a = Rect::from_min_and_size(0, 0, 10, 10);
        let b = Rect::from_min_and_size(20, 0, 10, 10);
        assert!(!a.intersection(&b).is_valid());
        let c = Rect::from_min_and_size(5, 5, 10, 10);
        assert_eq!(a.intersection(&c), Rect::new(5, 5, 10, 10));
        assert!(a.contains_rect(&a.intersection(&c)));
    }

    #[test]
    fn expand_and_translate() {
        let r = Rect::from_min_and_size(10, 20, 30, 40);
        assert_eq!(r.expand(2), Rect::new(8, 18, 42, 62));
        assert_eq!(r.expand(-2), Rect::new(12, 22, 38, 58));
        assert_eq!(r.translate(-10, 5), Rect::new(0, 25, 30, 65));
        assert_eq!(r.width(), 30);
        assert_eq!(r.height(), 40);
    }

    #[test]
    fn clamp_and_distance() {
        assert_eq!(clamp_i32(5, 0, 10), 5);
        assert_eq!(clamp_i32(-5, 0, 10), 0);
        assert_eq!(clamp_i32(50, 0, 10), 10);
        // inverted bounds do not panic
        assert_eq!(clamp_i32(50, 10, 0), 10);
        assert_eq!(grid_distance(Vec2i::new(0, 0), Vec2i::new(3, -4)), 7);
        assert_eq!(grid_distance(Vec2i::new(i32::MIN, 0), Vec2i::new(i32::MAX, 0)), u32::MAX);
    }
}
