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
use std::any::Any;

/// Image a renderer can draw. Concrete types belong to a specific backend.
pub trait Texture {
    /// Width in pixels.
    fn width(&self) -> i32;
    /// Height in pixels.
    fn height(&self) -> i32;
    /// Lets a backend recover its own concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// Font metrics a renderer and the layout code rely on.
pub trait Font {
    /// Advance of a single character in pixels.
    fn char_width(&self, c: char) -> i32;
    /// Distance between two baselines.
    fn line_height(&self) -> i32;
    /// Distance from the top of a line to the baseline.
    fn base_height(&self) -> i32 { self.line_height() }
    /// `true` when the font has a glyph for `c`.
    fn has_character(&self, c: char) -> bool;
    /// Distance of the underline below the baseline.
    fn underline_offset(&self) -> i32 { 2 }
    /// Thickness of the underline.
    fn underline_thickness(&self) -> i32 { 1 }
    /// Lets a backend recover its own concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Width of `text`, skipping inline colour escapes.
    fn width(&self, text: &str) -> i32 {
        text.chars().filter(|c| !is_color_char(*c)).fold(0, |acc, c| acc.saturating_add(self.char_width(c)))
    }

    /// Size of a block of lines: the widest line by the summed line height.
    fn size(&self, lines: &[&str]) -> Dimensioni {
        let width = lines.iter().map(|l| self.width(l)).max().unwrap_or(0);
        Dimensioni::new(width, self.line_height().saturating_mul(lines.len() as i32))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Normalized sub-rectangle of a texture.
pub struct UvRect {
    /// Left, in `[0, 1]`.
    pub u: f32,
    /// Top, in `[0, 1]`.
    pub v: f32,
    /// Width, in `[0, 1]`.
    pub width: f32,
    /// Height, in `[0, 1]`.
    pub height: f32,
}

impl UvRect {
    /// The whole texture.
    pub const FULL: UvRect = UvRect { u: 0.0, v: 0.0, width: 1.0, height: 1.0 };

    /// Creates a UV rectangle.
    pub fn new(u: f32, v: f32, width: f32, height: f32) -> Self { Self { u, v, width, height } }

    /// Converts a pixel rectangle of `texture` into normalized coordinates.
    pub fn from_pixels(texture: &dyn Texture, x: i32, y: i32, w: i32, h: i32) -> Self {
        let tw = texture.width().max(1) as f32;
        let th = texture.height().max(1) as f32;
        Self::new(x as f32 / tw, y as f32 / th, w as f32 / tw, h as f32 / th)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
/// Text presentation passed along with a text draw.
pub struct TextAppearance {
    /// Horizontal alignment inside the destination.
    pub h_align: HorizontalAlign,
    /// Vertical alignment inside the destination.
    pub v_align: VerticalAlign,
    /// Text colour.
    pub color: Color,
    /// Shadow colour; fully transparent disables the shadow.
    pub shadow_color: Color,
    /// Underlines the text.
    pub underline: bool,
}

/// Splits a bordered (nine-slice) texture draw into an interior and four edge strips.
///
/// Edge UVs are the border thickness divided by the *source texture* size, so they do not
/// depend on the destination size. The interior is drawn inside the border; strips with a
/// zero inset are omitted. Corners are covered by the left and right strips.
pub fn bordered_texture_slices(texture_size: Dimensioni, region: Rect, border: Border, uv: UvRect) -> Vec<(Rect, UvRect)> {
    let tx = texture_size.width.max(1) as f32;
    let ty = texture_size.height.max(1) as f32;
    let (l, r, t, b) = (border.left(), border.right(), border.top(), border.bottom());
    let (lu, ru, tv, bv) = (l as f32 / tx, r as f32 / tx, t as f32 / ty, b as f32 / ty);
    let (w, h) = (region.width(), region.height());

    let mut slices = Vec::with_capacity(5);
    slices.push((border.shrink(region), UvRect::new(uv.u + lu, uv.v + tv, uv.width - lu - ru, uv.height - tv - bv)));
    if l > 0 {
        slices.push((Rect::from_min_and_size(region.min_x, region.min_y, l, h), UvRect::new(uv.u, uv.v, lu, uv.height)));
    }
    if r > 0 {
        slices.push((Rect::from_min_and_size(region.max_x - r, region.min_y, r, h), UvRect::new(uv.u + uv.width - ru, uv.v, ru, uv.height)));
    }
    if t > 0 {
        slices.push((Rect::from_min_and_size(region.min_x, region.min_y, w, t), UvRect::new(uv.u, uv.v, uv.width, tv)));
    }
    if b > 0 {
        slices.push((Rect::from_min_and_size(region.min_x, region.max_y - b, w, b), UvRect::new(uv.u, uv.v + uv.height - bv, uv.width, bv)));
    }
    slices
}

/// Backend the canvas draws through.
///
/// Rectangles are absolute and *not* pre-clipped: clipping is communicated through
/// [`CanvasRenderer::crop`], which replaces the active clip rectangle.
pub trait CanvasRenderer {
    /// Called once at the start of a frame.
    fn pre_render(&mut self);
    /// Called once at the end of a frame.
    fn post_render(&mut self);
    /// Size of the render target in pixels.
    fn target_size(&self) -> Dimensioni;
    /// Replaces the active clip rectangle.
    fn crop(&mut self, region: Rect);
    /// A 1x1 white texture for filled rectangles.
    fn white_texture(&self) -> Rc<dyn Texture>;
    /// Draws a line.
    fn draw_line(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: Color);
    /// Draws part of a texture into `region`, tinted by `color`.
    fn draw_texture(&mut self, texture: &dyn Texture, color: Color, mode: ScaleMode, region: Rect, uv: UvRect, alpha: f32);
    /// Draws text inside `region`.
    fn draw_text(&mut self, text: &str, font: &dyn Font, appearance: TextAppearance, region: Rect, alpha: f32);

    /// Draws a texture stretched or tiled around a fixed-size border.
    fn draw_texture_bordered(&mut self, texture: &dyn Texture, region: Rect, border: Border, tile: bool, uv: UvRect, alpha: f32) {
        let mode = if tile { ScaleMode::Tiled } else { ScaleMode::Stretch };
        let size = Dimensioni::new(texture.width(), texture.height());
        for (dest, slice_uv) in bordered_texture_slices(size, region, border, uv) {
            self.draw_texture(texture, Color::WHITE, mode, dest, slice_uv, alpha);
        }
    }
}

/// Shared handle to a renderer.
///
/// The canvas keeps a type-erased handle while the host keeps a typed one to reach
/// backend-specific state.
pub struct RendererHandle<R: CanvasRenderer + ?Sized> {
    handle: Rc<RefCell<R>>,
}

impl<R: CanvasRenderer + ?Sized> Clone for RendererHandle<R> {
    fn clone(&self) -> Self { Self { handle: self.handle.clone() } }
}

impl<R: CanvasRenderer + 'static> RendererHandle<R> {
    /// Wraps a renderer so it can be shared.
    pub fn new(renderer: R) -> Self { Self { handle: Rc::new(RefCell::new(renderer)) } }

    /// Returns a type-erased handle to the same renderer.
    pub fn erase(&self) -> RendererHandle<dyn CanvasRenderer> {
        let handle: Rc<RefCell<dyn CanvasRenderer>> = self.handle.clone();
        RendererHandle { handle }
    }
}

impl<R: CanvasRenderer + ?Sized> RendererHandle<R> {
    /// Executes the provided closure with a shared reference to the renderer.
    pub fn scope<Res>(&self, f: impl FnOnce(&R) -> Res) -> Res { f(&self.handle.borrow()) }

    /// Executes the provided closure with a mutable reference to the renderer.
    pub fn scope_mut<Res>(&self, f: impl FnOnce(&mut R) -> Res) -> Res { f(&mut self.handle.borrow_mut()) }
}
