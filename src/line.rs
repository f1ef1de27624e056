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

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Absolute endpoints of a line after clipping.
///
/// `start` and `end` keep the direction of the requested line: if the line ran right
/// to left before clipping, the clipped start is still its right-most point.
pub struct LineCoordinates {
    /// Start X.
    pub start_x: i32,
    /// Start Y.
    pub start_y: i32,
    /// End X.
    pub end_x: i32,
    /// End Y.
    pub end_y: i32,
}

/// Translates a scope-relative rectangle into absolute coordinates.
pub fn relative_to_absolute(region: Rect, base: Rect) -> Rect { region.translate(base.min_x, base.min_y) }

/// Clips the line `(start_x, start_y) -> (end_x, end_y)`, relative to `base`, against `crop`.
///
/// The line is treated as a degenerate rectangle, so the overlap test is inclusive on
/// both edges. Returns `None` when nothing of the line is left or only a point remains.
pub fn line_coordinates(start_x: i32, start_y: i32, end_x: i32, end_y: i32, base: Rect, crop: Rect) -> Option<LineCoordinates> {
    let bounds = Rect::new(start_x.min(end_x), start_y.min(end_y), start_x.max(end_x), start_y.max(end_y));
    let clipped = relative_to_absolute(bounds, base).intersection(&crop);
    if !clipped.is_valid() || (clipped.width() == 0 && clipped.height() == 0) {
        return None;
    }

    let (sx, ex) = if start_x > end_x { (clipped.max_x, clipped.min_x) } else { (clipped.min_x, clipped.max_x) };
    let (sy, ey) = if start_y > end_y { (clipped.max_y, clipped.min_y) } else { (clipped.min_y, clipped.max_y) };
    Some(LineCoordinates { start_x: sx, start_y: sy, end_x: ex, end_y: ey })
}
