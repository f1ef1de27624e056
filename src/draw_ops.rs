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

/// Draw call captured while the canvas is in draw-on-top mode.
///
/// Rectangles are absolute and evaluated at enqueue time, so replaying an operation does
/// not depend on the scope that recorded it.
pub(crate) enum DrawOperation {
    Texture {
        texture: Rc<dyn Texture>,
        color: Color,
        mode: ScaleMode,
        region: Rect,
        crop: Rect,
        uv: UvRect,
        alpha: f32,
    },
    BorderedTexture {
        texture: Rc<dyn Texture>,
        region: Rect,
        crop: Rect,
        border: Border,
        tile: bool,
        uv: UvRect,
        alpha: f32,
    },
    Text {
        text: String,
        font: Rc<dyn Font>,
        appearance: TextAppearance,
        region: Rect,
        crop: Rect,
        alpha: f32,
    },
    // lines are clipped at record time and need no crop
    Line {
        coords: LineCoordinates,
        color: Color,
    },
    Interaction(InteractionRegion),
}

impl DrawOperation {
    fn run(self, renderer: &mut dyn CanvasRenderer, regions: &mut Vec<InteractionRegion>, restore_crop: Rect) {
        match self {
            Self::Texture { texture, color, mode, region, crop, uv, alpha } => {
                renderer.crop(crop);
                renderer.draw_texture(texture.as_ref(), color, mode, region, uv, alpha);
                renderer.crop(restore_crop);
            }
            Self::BorderedTexture { texture, region, crop, border, tile, uv, alpha } => {
                renderer.crop(crop);
                renderer.draw_texture_bordered(texture.as_ref(), region, border, tile, uv, alpha);
                renderer.crop(restore_crop);
            }
            Self::Text { text, font, appearance, region, crop, alpha } => {
                renderer.crop(crop);
                renderer.draw_text(&text, font.as_ref(), appearance, region, alpha);
                renderer.crop(restore_crop);
            }
            Self::Line { coords, color } => renderer.draw_line(coords.start_x, coords.start_y, coords.end_x, coords.end_y, color),
            Self::Interaction(region) => regions.push(region),
        }
    }
}

#[derive(Default)]
/// FIFO of deferred draw operations.
pub(crate) struct DrawOnTopQueue {
    ops: Vec<DrawOperation>,
}

impl DrawOnTopQueue {
    pub(crate) fn push(&mut self, op: DrawOperation) { self.ops.push(op) }

    pub(crate) fn len(&self) -> usize { self.ops.len() }

    pub(crate) fn clear(&mut self) { self.ops.clear() }

    /// Replays every queued operation in submission order, then empties the queue.
    pub(crate) fn flush(&mut self, renderer: &mut dyn CanvasRenderer, regions: &mut Vec<InteractionRegion>, restore_crop: Rect) {
        for op in self.ops.drain(..) {
            op.run(renderer, regions, restore_crop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    #[derive(Default)]
    struct Log {
        calls: Vec<String>,
    }

    struct Tex;

    impl Texture for Tex {
        fn width(&self) -> i32 { 4 }
        fn height(&self) -> i32 { 4 }
        fn as_any(&self) -> &dyn Any { self }
    }

    impl CanvasRenderer for Log {
        fn pre_render(&mut self) {}
        fn post_render(&mut self) {}
        fn target_size(&self) -> Dimensioni { Dimensioni::new(100, 100) }
        fn crop(&mut self, r: Rect) { self.calls.push(format!("crop {} {} {} {}", r.min_x, r.min_y, r.max_x, r.max_y)) }
        fn white_texture(&self) -> Rc<dyn Texture> { Rc::new(Tex) }
        fn draw_line(&mut self, sx: i32, _sy: i32, ex: i32, _ey: i32, _color: Color) { self.calls.push(format!("line {sx} {ex}")) }
        fn draw_texture(&mut self, _t: &dyn Texture, _c: Color, _m: ScaleMode, r: Rect, _uv: UvRect, _a: f32) {
            self.calls.push(format!("texture {}", r.min_x))
        }
        fn draw_text(&mut self, _text: &str, _f: &dyn Font, _a: TextAppearance, _r: Rect, _alpha: f32) {}
    }

    #[test]
    fn flush_replays_in_submission_order_with_crops() {
        let mut queue = DrawOnTopQueue::default();
        let tex: Rc<dyn Texture> = Rc::new(Tex);
        let crop = Rect::new(0, 0, 10, 10);
        queue.push(DrawOperation::Texture {
            texture: tex.clone(),
            color: Color::WHITE,
            mode: ScaleMode::Stretch,
            region: Rect::new(1, 0, 20, 20),
            crop,
            uv: UvRect::FULL,
            alpha: 1.0,
        });
        queue.push(DrawOperation::Line { coords: LineCoordinates { start_x: 3, start_y: 0, end_x: 4, end_y: 0 }, color: Color::WHITE });
        queue.push(DrawOperation::Texture {
            texture: tex,
            color: Color::WHITE,
            mode: ScaleMode::Stretch,
            region: Rect::new(2, 0, 5, 5),
            crop,
            uv: UvRect::FULL,
            alpha: 1.0,
        });
        assert_eq!(queue.len(), 3);

        let mut log = Log::default();
        let mut regions = Vec::new();
        queue.flush(&mut log, &mut regions, Rect::new(0, 0, 100, 100));
        assert_eq!(
            log.calls,
            vec![
                "crop 0 0 10 10",
                "texture 1",
                "crop 0 0 100 100",
                "line 3 4",
                "crop 0 0 10 10",
                "texture 2",
                "crop 0 0 100 100",
            ]
        );
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn deferred_interaction_regions_land_in_the_registry() {
        let mut queue = DrawOnTopQueue::default();
        let listener: Rc<dyn InteractionListener> = Rc::new(BaseInteractionListener::new());
        queue.push(DrawOperation::Interaction(InteractionRegion {
            listener,
            region: Rect::new(0, 0, 5, 5),
            offset: Vec2i::new(0, 0),
            element: None,
            tooltip: None,
        }));
        let mut regions = Vec::new();
        queue.flush(&mut Log::default(), &mut regions, Rect::new(0, 0, 100, 100));
        assert_eq!(regions.len(), 1);
    }
}
