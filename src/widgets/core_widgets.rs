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
use crate::{
    build_text_lines, Color, DISABLED_MODE, DOWN_MODE, HOVER_MODE, InteractionListener, MouseButton, MouseClickEvent, MouseOverEvent,
    MouseReleaseEvent, Texture,
};

fn text_block_size(canvas: &Canvas, text: &str, size_hint: Dimensioni) -> Dimensioni {
    let style = canvas.current_style();
    let Some(font) = style.font.as_ref() else { return Dimensioni::new(0, 0) };
    let lines = build_text_lines(font.as_ref(), text, Some(size_hint.width));
    let parts: Vec<&str> = lines.iter().map(|l| &text[l.start..l.end]).collect();
    font.size(&parts)
}

/// Static text.
pub struct Label {
    core: WidgetCore,
    text: RefCell<String>,
}

impl Label {
    /// Creates a label.
    pub fn new(id: &str, text: &str) -> Self { Self { core: WidgetCore::new(id), text: RefCell::new(text.to_string()) } }

    /// Current text.
    pub fn text(&self) -> String { self.text.borrow().clone() }

    /// Replaces the text.
    pub fn set_text(&self, text: &str) { *self.text.borrow_mut() = text.to_string() }
}

impl Widget for Label {
    fn core(&self) -> &WidgetCore { &self.core }
    fn type_tag(&self) -> &'static str { "label" }
    fn on_draw(&self, canvas: &mut Canvas) { canvas.draw_text(&self.text.borrow(), None) }
    fn preferred_content_size(&self, canvas: &mut Canvas, size_hint: Dimensioni) -> Dimensioni { text_block_size(canvas, &self.text.borrow(), size_hint) }
    fn can_be_focus(&self) -> bool { false }
}

#[derive(Default)]
struct ButtonListener {
    over: Cell<bool>,
    down: Cell<bool>,
    activations: Cell<u32>,
    action: RefCell<Option<Rc<dyn Fn()>>>,
}

impl ButtonListener {
    fn activate(&self) {
        self.activations.set(self.activations.get() + 1);
        // released before the call so the action may rebind itself
        let action = self.action.borrow().clone();
        if let Some(action) = action {
            action();
        }
    }
}

impl InteractionListener for ButtonListener {
    fn on_mouse_over(&self, _event: &MouseOverEvent) { self.over.set(true) }

    fn on_mouse_leave(&self) { self.over.set(false) }

    fn on_mouse_click(&self, event: &MouseClickEvent) -> bool {
        if event.button == MouseButton::LEFT {
            self.down.set(true);
            return true;
        }
        false
    }

    fn on_mouse_release(&self, event: &MouseReleaseEvent) {
        if event.button == MouseButton::LEFT {
            if self.over.get() {
                self.activate();
            }
            self.down.set(false);
        }
    }

    fn is_mouse_over(&self) -> bool { self.over.get() }
}

/// Clickable text button. Activates on a left click released over it, or on Enter while focused.
pub struct Button {
    core: WidgetCore,
    text: RefCell<String>,
    listener: Rc<ButtonListener>,
}

impl Button {
    /// Creates a button.
    pub fn new(id: &str, text: &str) -> Self {
        Self { core: WidgetCore::new(id), text: RefCell::new(text.to_string()), listener: Rc::new(ButtonListener::default()) }
    }

    /// Current text.
    pub fn text(&self) -> String { self.text.borrow().clone() }

    /// Replaces the text.
    pub fn set_text(&self, text: &str) { *self.text.borrow_mut() = text.to_string() }

    /// Sets the callback run on activation.
    pub fn on_activate(&self, action: impl Fn() + 'static) { *self.listener.action.borrow_mut() = Some(Rc::new(action)) }

    /// Number of activations so far.
    pub fn activations(&self) -> u32 { self.listener.activations.get() }

    /// `true` while a press started on the button is held.
    pub fn is_down(&self) -> bool { self.listener.down.get() }

    /// `true` while the pointer is over the button.
    pub fn is_hovered(&self) -> bool { self.listener.over.get() }
}

impl Activatable for Button {
    fn activate(&self) { self.listener.activate() }
}

impl Widget for Button {
    fn core(&self) -> &WidgetCore { &self.core }
    fn type_tag(&self) -> &'static str { "button" }

    fn on_draw(&self, canvas: &mut Canvas) {
        canvas.draw_text(&self.text.borrow(), None);
        let listener: Rc<dyn InteractionListener> = self.listener.clone();
        canvas.add_interaction_region(&listener, None, None);
    }

    fn preferred_content_size(&self, canvas: &mut Canvas, size_hint: Dimensioni) -> Dimensioni { text_block_size(canvas, &self.text.borrow(), size_hint) }

    fn mode(&self) -> &'static str {
        if !self.core.is_enabled() {
            DISABLED_MODE
        } else if self.listener.down.get() {
            DOWN_MODE
        } else if self.listener.over.get() {
            HOVER_MODE
        } else {
            DEFAULT_MODE
        }
    }

    fn as_activatable(&self) -> Option<&dyn Activatable> { Some(self) }
}

/// Texture tinted by a colour.
pub struct Image {
    core: WidgetCore,
    texture: RefCell<Option<Rc<dyn Texture>>>,
    tint: Cell<Color>,
}

impl Image {
    /// Creates an image widget.
    pub fn new(id: &str, texture: Option<Rc<dyn Texture>>) -> Self {
        Self { core: WidgetCore::new(id), texture: RefCell::new(texture), tint: Cell::new(Color::WHITE) }
    }

    /// Replaces the texture.
    pub fn set_texture(&self, texture: Option<Rc<dyn Texture>>) { *self.texture.borrow_mut() = texture }

    /// Tint colour.
    pub fn tint(&self) -> Color { self.tint.get() }

    /// Changes the tint colour.
    pub fn set_tint(&self, tint: Color) { self.tint.set(tint) }
}

impl Widget for Image {
    fn core(&self) -> &WidgetCore { &self.core }
    fn type_tag(&self) -> &'static str { "image" }

    fn on_draw(&self, canvas: &mut Canvas) {
        let texture = self.texture.borrow().clone();
        if let Some(texture) = texture {
            canvas.draw_texture(&texture, None, Some(self.tint.get()));
        }
    }

    fn preferred_content_size(&self, _canvas: &mut Canvas, _size_hint: Dimensioni) -> Dimensioni {
        match self.texture.borrow().as_ref() {
            Some(t) => Dimensioni::new(t.width(), t.height()),
            None => Dimensioni::new(0, 0),
        }
    }

    fn can_be_focus(&self) -> bool { false }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    fn canvas() -> (RendererHandle<CommandRenderer>, Canvas) {
        let renderer = RendererHandle::new(CommandRenderer::new(Dimensioni::new(320, 240)));
        let mut base = Style::default();
        base.font = Some(Rc::new(BitmapFont::new(8, 16)));
        let canvas = Canvas::new(&renderer, Rc::new(MapSkin::new(base)), CanvasConfig::default()).unwrap();
        (renderer, canvas)
    }

    #[test]
    fn button_mode_tracks_pointer_and_enabled_state() {
        let button = Button::new("b", "Go");
        assert_eq!(button.mode(), DEFAULT_MODE);
        button.listener.on_mouse_over(&MouseOverEvent { pos: vec2(0, 0), top_most: true });
        assert_eq!(button.mode(), HOVER_MODE);
        assert!(button.listener.on_mouse_click(&MouseClickEvent { pos: vec2(0, 0), button: MouseButton::LEFT }));
        assert_eq!(button.mode(), DOWN_MODE);
        button.core().set_enabled(false);
        assert_eq!(button.mode(), DISABLED_MODE);
    }

    #[test]
    fn only_the_left_button_presses() {
        let button = Button::new("b", "Go");
        assert!(!button.listener.on_mouse_click(&MouseClickEvent { pos: vec2(0, 0), button: MouseButton::RIGHT }));
        assert!(!button.is_down());
    }

    #[test]
    fn activation_runs_the_callback() {
        let button = Button::new("b", "Go");
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        button.on_activate(move || counter.set(counter.get() + 1));
        if let Some(activatable) = button.as_activatable() {
            activatable.activate();
        }
        assert_eq!((fired.get(), button.activations()), (1, 1));
    }

    #[test]
    fn callback_can_rebind_itself() {
        let button = Rc::new(Button::new("b", "Go"));
        let fired = Rc::new(Cell::new(0));
        let weak = Rc::downgrade(&button);
        let counter = fired.clone();
        button.on_activate(move || {
            counter.set(counter.get() + 1);
            if let Some(button) = weak.upgrade() {
                let counter = counter.clone();
                button.on_activate(move || counter.set(counter.get() + 10));
            }
        });
        button.activate();
        button.activate();
        assert_eq!((fired.get(), button.activations()), (11, 2));
    }

    #[test]
    fn button_registers_a_region_over_its_placed_area() {
        let (_renderer, mut canvas) = canvas();
        let button: Rc<dyn Widget> = Rc::new(Button::new("b", "Go"));
        canvas.pre_render();
        canvas.draw_widget(&button, rect(10, 10, 100, 30));
        assert_eq!(canvas.interaction_regions().len(), 1);
        assert_eq!(canvas.interaction_regions()[0].region(), rect(10, 10, 100, 30));
        assert!(canvas.interaction_regions()[0].element().is_some_and(|e| same_widget(&e, &button)));
    }

    #[test]
    fn image_sizes_to_its_texture_and_draws_tinted() {
        let (renderer, mut canvas) = canvas();
        let texture: Rc<dyn Texture> = Rc::new(AtlasTexture::new(TextureId::new(7), 20, 10));
        let image = Rc::new(Image::new("img", Some(texture)));
        image.set_tint(color(255, 0, 0, 255));
        let widget: Rc<dyn Widget> = image.clone();

        canvas.pre_render();
        let size = canvas.calculate_preferred_size(&widget);
        assert_eq!((size.width, size.height), (20, 10));
        canvas.draw_widget(&widget, rect(0, 0, 40, 40));
        let quad = renderer.scope(|r| {
            r.commands().iter().find_map(|c| match c {
                RenderCommand::Quad { texture, color, .. } => Some((texture.raw(), *color)),
                _ => None,
            })
        });
        assert_eq!(quad, Some((7, color(255, 0, 0, 255))));
    }

    #[test]
    fn label_text_can_change() {
        let (renderer, mut canvas) = canvas();
        let label = Rc::new(Label::new("l", "one"));
        let widget: Rc<dyn Widget> = label.clone();
        label.set_text("two");
        assert_eq!(label.text(), "two");
        canvas.pre_render();
        canvas.draw_widget(&widget, rect(0, 0, 100, 20));
        assert!(renderer.scope(|r| r.commands().iter().any(|c| matches!(c, RenderCommand::Glyphs { text, .. } if text == "two"))));
        assert!(!label.can_be_focus());
    }
}
