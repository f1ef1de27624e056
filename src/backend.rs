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
use log::{debug, warn};
use std::any::Any;

/// Width recorded for every line.
pub const LINE_WIDTH: i32 = 2;

/// Scissor entries kept before further narrowing is refused.
pub const DEFAULT_MAX_SCISSOR_DEPTH: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Handle referencing a renderer-owned texture.
pub struct TextureId(u32);

impl TextureId {
    /// Wraps a raw identifier.
    pub fn new(raw: u32) -> Self { Self(raw) }

    /// Returns the raw numeric identifier stored inside the handle.
    pub fn raw(self) -> u32 { self.0 }
}

/// Texture known to [`CommandRenderer`].
pub struct AtlasTexture {
    id: TextureId,
    width: i32,
    height: i32,
}

impl AtlasTexture {
    /// Describes a texture of `width` by `height` pixels.
    pub fn new(id: TextureId, width: i32, height: i32) -> Self { Self { id, width, height } }

    /// Identifier recorded in quad commands.
    pub fn id(&self) -> TextureId { self.id }
}

impl Texture for AtlasTexture {
    fn width(&self) -> i32 { self.width }
    fn height(&self) -> i32 { self.height }
    fn as_any(&self) -> &dyn Any { self }
}

/// Fixed-advance font known to [`CommandRenderer`].
pub struct BitmapFont {
    glyph_width: i32,
    line_height: i32,
}

impl BitmapFont {
    /// Creates a font where every printable character advances `glyph_width`.
    pub fn new(glyph_width: i32, line_height: i32) -> Self { Self { glyph_width, line_height } }
}

impl Font for BitmapFont {
    fn char_width(&self, c: char) -> i32 { if self.has_character(c) { self.glyph_width } else { 0 } }
    fn line_height(&self) -> i32 { self.line_height }
    fn base_height(&self) -> i32 { self.line_height - self.line_height / 4 }
    fn has_character(&self, c: char) -> bool { !c.is_control() && !is_color_char(c) }
    fn as_any(&self) -> &dyn Any { self }
}

#[derive(Clone, Debug, PartialEq)]
/// Draw command recorded by [`CommandRenderer`].
pub enum RenderCommand {
    /// Clip change; `None` means the whole target.
    Clip(Option<Rect>),
    /// Textured quad.
    Quad {
        /// Texture drawn.
        texture: TextureId,
        /// Destination after scale-mode fitting.
        region: Rect,
        /// Source UVs after tiling.
        uv: UvRect,
        /// Tint with alpha applied.
        color: Color,
    },
    /// Run of single-colour text.
    Glyphs {
        /// Text.
        text: String,
        /// Left edge.
        x: i32,
        /// Top of the line.
        y: i32,
        /// Colour with alpha applied.
        color: Color,
    },
    /// Line segment.
    Line {
        /// Start point.
        start: (i32, i32),
        /// End point.
        end: (i32, i32),
        /// Colour.
        color: Color,
        /// Stroke width.
        width: i32,
    },
}

/// Renderer that records commands instead of talking to a GPU.
///
/// It only accepts its own [`AtlasTexture`] and [`BitmapFont`]; anything else is dropped.
/// Crops are kept on a bounded scissor stack: a crop equal to the target resets the stack,
/// a crop matching an earlier entry pops back to it, and pushes beyond the bound are
/// ignored so drawing continues under the previous clip.
pub struct CommandRenderer {
    target: Dimensioni,
    white: Rc<AtlasTexture>,
    scissors: Vec<Rect>,
    max_scissors: usize,
    commands: Vec<RenderCommand>,
    frames: u64,
}

impl CommandRenderer {
    /// Creates a renderer for a target of the given size.
    pub fn new(target: Dimensioni) -> Self {
        Self {
            target,
            white: Rc::new(AtlasTexture::new(TextureId::new(0), 1, 1)),
            scissors: Vec::new(),
            max_scissors: DEFAULT_MAX_SCISSOR_DEPTH,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Changes the scissor stack bound.
    pub fn with_max_scissor_depth(mut self, depth: usize) -> Self {
        self.max_scissors = depth;
        self
    }

    /// Resizes the target, e.g. after a window resize.
    pub fn set_target_size(&mut self, target: Dimensioni) { self.target = target }

    /// Commands recorded since the last [`CanvasRenderer::pre_render`].
    pub fn commands(&self) -> &[RenderCommand] { &self.commands }

    /// Takes the recorded commands.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> { std::mem::take(&mut self.commands) }

    /// Active clip, `None` when unclipped.
    pub fn active_clip(&self) -> Option<Rect> { self.scissors.last().copied() }

    /// Entries on the scissor stack.
    pub fn scissor_depth(&self) -> usize { self.scissors.len() }

    /// Completed frames.
    pub fn frames(&self) -> u64 { self.frames }

    fn quad(&mut self, texture: TextureId, region: Rect, uv: UvRect, color: Color) {
        self.commands.push(RenderCommand::Quad { texture, region, uv, color });
    }
}

fn scaled(size: f32, scale: f32) -> i32 { (size * scale).round() as i32 }

impl CanvasRenderer for CommandRenderer {
    fn pre_render(&mut self) {
        self.commands.clear();
        self.scissors.clear();
    }

    fn post_render(&mut self) { self.frames += 1 }

    fn target_size(&self) -> Dimensioni { self.target }

    fn crop(&mut self, region: Rect) {
        if region == Rect::from_size(self.target) {
            self.scissors.clear();
            self.commands.push(RenderCommand::Clip(None));
            return;
        }
        if let Some(idx) = self.scissors.iter().rposition(|s| *s == region) {
            self.scissors.truncate(idx + 1);
        } else if self.scissors.len() >= self.max_scissors {
            warn!("scissor stack full ({} entries), keeping the current clip", self.scissors.len());
            return;
        } else {
            self.scissors.push(region);
        }
        self.commands.push(RenderCommand::Clip(Some(region)));
    }

    fn white_texture(&self) -> Rc<dyn Texture> { self.white.clone() }

    fn draw_line(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: Color) {
        self.commands.push(RenderCommand::Line { start: (start_x, start_y), end: (end_x, end_y), color, width: LINE_WIDTH });
    }

    fn draw_texture(&mut self, texture: &dyn Texture, color: Color, mode: ScaleMode, region: Rect, uv: UvRect, alpha: f32) {
        let Some(atlas) = texture.as_any().downcast_ref::<AtlasTexture>() else {
            debug!("dropping texture draw: not an atlas texture");
            return;
        };
        let color = color.scale_alpha(alpha);
        let src_w = atlas.width as f32 * uv.width;
        let src_h = atlas.height as f32 * uv.height;
        match mode {
            ScaleMode::Stretch => self.quad(atlas.id, region, uv, color),
            ScaleMode::Tiled => {
                let repeat_w = region.width() as f32 / atlas.width.max(1) as f32;
                let repeat_h = region.height() as f32 / atlas.height.max(1) as f32;
                self.quad(atlas.id, region, UvRect::new(uv.u, uv.v, repeat_w, repeat_h), color)
            }
            ScaleMode::ScaleFit | ScaleMode::ScaleFill => {
                if src_w <= 0.0 || src_h <= 0.0 {
                    return;
                }
                let sx = region.width() as f32 / src_w;
                let sy = region.height() as f32 / src_h;
                let scale = if mode == ScaleMode::ScaleFit { sx.min(sy) } else { sx.max(sy) };
                let dest = Rect::from_min_and_size(region.min_x, region.min_y, scaled(src_w, scale), scaled(src_h, scale));
                self.quad(atlas.id, dest, uv, color)
            }
        }
    }

    fn draw_text(&mut self, text: &str, font: &dyn Font, appearance: TextAppearance, region: Rect, alpha: f32) {
        let Some(bitmap) = font.as_any().downcast_ref::<BitmapFont>() else {
            debug!("dropping text draw: not a bitmap font");
            return;
        };
        let runs = layout_colored_text(bitmap, text, region, appearance.h_align, appearance.v_align, appearance.color);
        if appearance.shadow_color.a != 0 {
            let shadow = appearance.shadow_color.scale_alpha(alpha);
            for run in &runs {
                self.commands.push(RenderCommand::Glyphs { text: run.text.clone(), x: run.x - 1, y: run.y + 1, color: shadow });
            }
        }
        let white = self.white.id;
        for run in runs {
            let color = run.color.scale_alpha(alpha);
            if appearance.underline {
                let y = run.y + bitmap.base_height() + bitmap.underline_offset();
                let underline = Rect::from_min_and_size(run.x, y, bitmap.width(&run.text), bitmap.underline_thickness());
                self.quad(white, underline, UvRect::FULL, color);
            }
            self.commands.push(RenderCommand::Glyphs { text: run.text, x: run.x, y: run.y, color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> CommandRenderer { CommandRenderer::new(Dimensioni::new(800, 600)) }

    struct Foreign;

    impl Texture for Foreign {
        fn width(&self) -> i32 { 8 }
        fn height(&self) -> i32 { 8 }
        fn as_any(&self) -> &dyn Any { self }
    }

    #[test]
    fn foreign_textures_are_dropped() {
        let mut r = renderer();
        r.draw_texture(&Foreign, Color::WHITE, ScaleMode::Stretch, Rect::from_min_and_size(0, 0, 8, 8), UvRect::FULL, 1.0);
        assert!(r.commands().is_empty());
        let atlas = AtlasTexture::new(TextureId::new(3), 8, 8);
        r.draw_texture(&atlas, Color::WHITE, ScaleMode::Stretch, Rect::from_min_and_size(0, 0, 8, 8), UvRect::FULL, 0.5);
        match &r.commands()[0] {
            RenderCommand::Quad { texture, color, .. } => {
                assert_eq!(texture.raw(), 3);
                assert_eq!(color.a, 128);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn scissor_stack_pops_back_and_refuses_overflow() {
        let mut r = renderer().with_max_scissor_depth(2);
        let a = Rect::from_min_and_size(0, 0, 100, 100);
        let b = Rect::from_min_and_size(10, 10, 50, 50);
        let c = Rect::from_min_and_size(20, 20, 10, 10);
        r.crop(a);
        r.crop(b);
        r.crop(c);
        assert_eq!(r.scissor_depth(), 2);
        assert_eq!(r.active_clip(), Some(b));
        r.crop(a);
        assert_eq!(r.scissor_depth(), 1);
        r.crop(Rect::from_size(Dimensioni::new(800, 600)));
        assert_eq!(r.active_clip(), None);
        assert_eq!(r.commands().last(), Some(&RenderCommand::Clip(None)));
    }

    #[test]
    fn scale_fit_and_fill_keep_aspect_at_min_corner() {
        let mut r = renderer();
        let atlas = AtlasTexture::new(TextureId::new(1), 20, 10);
        let dest = Rect::from_min_and_size(5, 5, 100, 100);
        r.draw_texture(&atlas, Color::WHITE, ScaleMode::ScaleFit, dest, UvRect::FULL, 1.0);
        r.draw_texture(&atlas, Color::WHITE, ScaleMode::ScaleFill, dest, UvRect::FULL, 1.0);
        r.draw_texture(&atlas, Color::WHITE, ScaleMode::Tiled, dest, UvRect::FULL, 1.0);
        let regions: Vec<(Rect, UvRect)> = r
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Quad { region, uv, .. } => Some((*region, *uv)),
                _ => None,
            })
            .collect();
        assert_eq!(regions[0].0, Rect::from_min_and_size(5, 5, 100, 50));
        assert_eq!(regions[1].0, Rect::from_min_and_size(5, 5, 200, 100));
        assert_eq!(regions[2], (dest, UvRect::new(0.0, 0.0, 5.0, 10.0)));
    }

    #[test]
    fn text_draws_shadow_first_then_underlined_runs() {
        let mut r = renderer();
        let font = BitmapFont::new(8, 16);
        let appearance = TextAppearance {
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Top,
            color: Color::WHITE,
            shadow_color: Color::BLACK,
            underline: true,
        };
        r.draw_text("hi", &font, appearance, Rect::from_min_and_size(10, 20, 100, 16), 1.0);
        let cmds = r.commands();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], RenderCommand::Glyphs { text: "hi".into(), x: 9, y: 21, color: Color::BLACK });
        assert_eq!(
            cmds[1],
            RenderCommand::Quad { texture: TextureId::new(0), region: Rect::from_min_and_size(10, 34, 16, 1), uv: UvRect::FULL, color: Color::WHITE }
        );
        assert_eq!(cmds[2], RenderCommand::Glyphs { text: "hi".into(), x: 10, y: 20, color: Color::WHITE });
    }

    #[test]
    fn transparent_shadow_is_skipped() {
        let mut r = renderer();
        let appearance = TextAppearance {
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Top,
            color: Color::WHITE,
            shadow_color: Color::TRANSPARENT,
            underline: false,
        };
        r.draw_text("x", &BitmapFont::new(8, 16), appearance, Rect::from_min_and_size(0, 0, 50, 16), 1.0);
        assert_eq!(r.commands().len(), 1);
    }

    #[test]
    fn bordered_draw_goes_through_five_quads() {
        let mut r = renderer();
        let atlas = AtlasTexture::new(TextureId::new(2), 32, 32);
        r.draw_texture_bordered(&atlas, Rect::from_min_and_size(0, 0, 64, 64), Border::new(2, 2, 1, 1), false, UvRect::FULL, 1.0);
        assert_eq!(r.commands().len(), 5);
        r.draw_line(0, 0, 10, 0, Color::WHITE);
        assert!(matches!(r.commands().last(), Some(RenderCommand::Line { width: LINE_WIDTH, .. })));
    }
}
