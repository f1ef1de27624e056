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
use crate::{clamp_i32, HorizontalAlign, Rect, VerticalAlign};

/// Pixels between the pointer and a tooltip placed below it.
const CURSOR_GAP: i32 = 18;

/// Overlay that follows the pointer and draws an attached widget, typically a tooltip label.
///
/// The style's alignment picks the side of the pointer the attachment appears on; the
/// result is clamped to stay on the canvas.
pub struct Tooltip {
    core: WidgetCore,
    attachment: RefCell<Option<Rc<dyn Widget>>>,
}

impl Default for Tooltip {
    fn default() -> Self { Self::new() }
}

impl Tooltip {
    /// Creates a tooltip with nothing attached.
    pub fn new() -> Self { Self { core: WidgetCore::new("tooltip"), attachment: RefCell::new(None) } }

    /// Attached widget.
    pub fn attachment(&self) -> Option<Rc<dyn Widget>> { self.attachment.borrow().clone() }

    /// Attaches a widget, or detaches with `None`.
    pub fn set_attachment(&self, attachment: Option<Rc<dyn Widget>>) { *self.attachment.borrow_mut() = attachment }
}

impl Widget for Tooltip {
    fn core(&self) -> &WidgetCore { &self.core }
    fn type_tag(&self) -> &'static str { "tooltip" }

    fn on_draw(&self, canvas: &mut Canvas) {
        let Some(attachment) = self.attachment() else { return };
        let style = canvas.current_style();
        let size = style.margin.grow_size(canvas.calculate_preferred_size(&attachment));
        let (w, h) = (size.width, size.height);
        let mouse = canvas.mouse_position();

        let top = match style.align_vertical {
            VerticalAlign::Top => mouse.y - h,
            VerticalAlign::Middle => mouse.y - h / 2,
            VerticalAlign::Bottom => mouse.y + CURSOR_GAP,
        };
        let left = match style.align_horizontal {
            HorizontalAlign::Right => mouse.x - w,
            HorizontalAlign::Center => mouse.x - w / 2,
            HorizontalAlign::Left => mouse.x,
        };
        let canvas_size = canvas.size();
        let left = clamp_i32(left, 0, canvas_size.width - w);
        let top = clamp_i32(top, 0, canvas_size.height - h);

        let mut scope = canvas.sub_region(Rect::from_min_and_size(left, top, w, h), false);
        scope.draw_background(None);
        let inner = style.background_border.shrink(scope.region());
        scope.draw_widget(&attachment, inner);
    }

    fn preferred_content_size(&self, canvas: &mut Canvas, _size_hint: Dimensioni) -> Dimensioni {
        match self.attachment() {
            Some(attachment) => canvas.calculate_preferred_size(&attachment),
            None => Dimensioni::new(0, 0),
        }
    }

    fn is_visible(&self) -> bool { self.attachment.borrow().as_ref().is_some_and(|a| a.is_visible()) }

    fn is_skin_applied_by_canvas(&self) -> bool { false }

    fn can_be_focus(&self) -> bool { false }
}
