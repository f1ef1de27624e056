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
use super::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Four-sided inset, used for widget margins and nine-slice background borders.
///
/// Insets are never negative; [`Border::new`] clamps them to zero.
pub struct Border {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl Border {
    /// Border with no insets.
    pub const ZERO: Border = Border { left: 0, right: 0, top: 0, bottom: 0 };

    /// Creates a border from its four insets.
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self { left: left.max(0), right: right.max(0), top: top.max(0), bottom: bottom.max(0) }
    }

    /// Creates a border with the same inset on every side.
    pub fn uniform(inset: i32) -> Self { Self::new(inset, inset, inset, inset) }

    /// Left inset.
    pub fn left(&self) -> i32 { self.left }
    /// Right inset.
    pub fn right(&self) -> i32 { self.right }
    /// Top inset.
    pub fn top(&self) -> i32 { self.top }
    /// Bottom inset.
    pub fn bottom(&self) -> i32 { self.bottom }

    /// `left + right`.
    pub fn total_width(&self) -> i32 { add_clamp_at_max(self.left, self.right) }

    /// `top + bottom`.
    pub fn total_height(&self) -> i32 { add_clamp_at_max(self.top, self.bottom) }

    /// Combined horizontal and vertical insets.
    pub fn totals(&self) -> Dimensioni { Dimensioni::new(self.total_width(), self.total_height()) }

    /// `true` when every inset is zero.
    pub fn is_empty(&self) -> bool { self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0 }

    /// Moves the top-left corner inwards and reduces the size by the totals.
    pub fn shrink(&self, region: Rect) -> Rect {
        Rect::from_min_and_size(
            add_clamp_at_max(region.min_x, self.left),
            add_clamp_at_max(region.min_y, self.top),
            region.width().saturating_sub(self.total_width()),
            region.height().saturating_sub(self.total_height()),
        )
    }

    /// Inverse of [`Border::shrink`] for inputs that do not overflow.
    pub fn grow(&self, region: Rect) -> Rect {
        Rect::from_min_and_size(
            region.min_x.saturating_sub(self.left),
            region.min_y.saturating_sub(self.top),
            add_clamp_at_max(region.width(), self.total_width()),
            add_clamp_at_max(region.height(), self.total_height()),
        )
    }

    /// Reduces a size by the totals.
    pub fn shrink_size(&self, size: Dimensioni) -> Dimensioni {
        Dimensioni::new(size.width.saturating_sub(self.total_width()), size.height.saturating_sub(self.total_height()))
    }

    /// Increases a size by the totals, clamping at the numeric bounds.
    pub fn grow_size(&self, size: Dimensioni) -> Dimensioni {
        Dimensioni::new(add_clamp_at_max(size.width, self.total_width()), add_clamp_at_max(size.height, self.total_height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn shrink_and_grow_are_inverse() {
        let mut rng = StdRng::seed_from_u64(0x6e7569);
        for _ in 0..1000 {
            let r = Rect::from_min_and_size(
                rng.random_range(-10_000..10_000),
                rng.random_range(-10_000..10_000),
                rng.random_range(0..4_000),
                rng.random_range(0..4_000),
            );
            let b = Border::new(rng.random_range(0..200), rng.random_range(0..200), rng.random_range(0..200), rng.random_range(0..200));
            assert_eq!(b.shrink(b.grow(r)), r);

            // the other direction only holds while the border fits inside the rectangle
            if b.total_width() <= r.width() && b.total_height() <= r.height() {
                assert_eq!(b.grow(b.shrink(r)), r);
            }
        }
    }

    #[test]
    fn shrink_moves_min_by_left_and_top() {
        let b = Border::new(2, 3, 4, 5);
        let r = b.shrink(Rect::from_min_and_size(10, 10, 20, 20));
        assert_eq!(r, Rect::from_min_and_size(12, 14, 15, 11));
        assert_eq!(b.total_width(), 5);
        assert_eq!(b.total_height(), 9);
    }

    #[test]
    fn grow_saturates_near_the_limit() {
        let b = Border::uniform(10);
        let r = b.grow(Rect::from_min_and_size(0, 0, LARGE_INT, i32::MAX));
        assert_eq!(r.min_x, -10);
        assert!(r.is_valid());
        let size = b.grow_size(Dimensioni::new(i32::MAX, 5));
        assert_eq!(size.width, i32::MAX);
        assert_eq!(size.height, 25);
        let shrunk = b.shrink_size(Dimensioni::new(30, 30));
        assert_eq!((shrunk.width, shrunk.height), (10, 10));
    }

    #[test]
    fn negative_insets_are_clamped() {
        let b = Border::new(-1, 2, -3, 4);
        assert_eq!((b.left(), b.right(), b.top(), b.bottom()), (0, 2, 0, 4));
        assert!(!b.is_empty());
        assert!(Border::ZERO.is_empty());
    }
}
