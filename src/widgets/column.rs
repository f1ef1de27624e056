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
use crate::Rect;

/// Stacks its children top to bottom, each at its preferred height and the full width.
pub struct Column {
    core: WidgetCore,
    children: RefCell<Vec<Rc<dyn Widget>>>,
    spacing: Cell<i32>,
}

impl Column {
    /// Creates an empty column.
    pub fn new(id: &str) -> Self { Self { core: WidgetCore::new(id), children: RefCell::new(Vec::new()), spacing: Cell::new(0) } }

    /// Appends a child.
    pub fn add(&self, child: Rc<dyn Widget>) { self.children.borrow_mut().push(child) }

    /// Children in drawing order.
    pub fn children(&self) -> Vec<Rc<dyn Widget>> { self.children.borrow().clone() }

    /// Vertical gap between children.
    pub fn set_spacing(&self, spacing: i32) { self.spacing.set(spacing) }
}

impl Widget for Column {
    fn core(&self) -> &WidgetCore { &self.core }
    fn type_tag(&self) -> &'static str { "column" }

    fn on_draw(&self, canvas: &mut Canvas) {
        let width = canvas.size().width;
        let mut y: i32 = 0;
        for child in self.children() {
            let height = canvas.calculate_restricted_size(&child, Dimensioni::new(width, LARGE_INT)).height;
            canvas.draw_widget(&child, Rect::from_min_and_size(0, y, width, height));
            y = y.saturating_add(height).saturating_add(self.spacing.get());
        }
    }

    fn preferred_content_size(&self, canvas: &mut Canvas, size_hint: Dimensioni) -> Dimensioni {
        let children = self.children();
        let mut width: i32 = 0;
        let mut height: i32 = 0;
        for child in &children {
            let size = canvas.calculate_restricted_size(child, Dimensioni::new(size_hint.width, LARGE_INT));
            width = width.max(size.width);
            height = height.saturating_add(size.height);
        }
        let gaps = (children.len() as i32 - 1).max(0);
        Dimensioni::new(width, height.saturating_add(gaps.saturating_mul(self.spacing.get())))
    }

    fn can_be_focus(&self) -> bool { false }
}
