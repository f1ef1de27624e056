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
mod column;
mod core_widgets;
mod tooltip;

pub use column::*;
pub use core_widgets::*;
pub use tooltip::*;

use crate::{
    BaseInteractionListener, Canvas, Dimensioni, KeyboardAction, LARGE_INT, Skin, DEFAULT_MODE,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// Seconds a pointer has to rest on a widget before its tooltip shows.
pub const DEFAULT_TOOLTIP_DELAY: f32 = 0.5;

/// Widget capability to be triggered from the keyboard (Enter) or by a click.
pub trait Activatable {
    /// Performs the widget's action.
    fn activate(&self);
}

/// Contract between a widget and the canvas.
///
/// Widgets are shared as `Rc<dyn Widget>` and mutate through interior mutability, so the
/// canvas, the focus context and interaction regions can all refer to the same instance.
pub trait Widget {
    /// Shared widget state.
    fn core(&self) -> &WidgetCore;

    /// Stable type tag used as the widget-type component of style lookups.
    fn type_tag(&self) -> &'static str;

    /// Draws the widget into the current canvas scope.
    fn on_draw(&self, canvas: &mut Canvas);

    /// Preferred size of the content, margin excluded, given a size hint.
    fn preferred_content_size(&self, canvas: &mut Canvas, size_hint: Dimensioni) -> Dimensioni;

    /// Largest useful content size.
    fn max_content_size(&self, _canvas: &mut Canvas) -> Dimensioni { Dimensioni::new(LARGE_INT, LARGE_INT) }

    /// Mode component of style lookups.
    fn mode(&self) -> &'static str { DEFAULT_MODE }

    /// `false` skips drawing entirely.
    fn is_visible(&self) -> bool { self.core().is_visible() }

    /// When `true` the canvas draws the background and applies the margin before [`Widget::on_draw`].
    fn is_skin_applied_by_canvas(&self) -> bool { true }

    /// Whether the widget may hold focus.
    fn can_be_focus(&self) -> bool { true }

    /// Called when the widget becomes focused.
    fn on_gain_focus(&self) { self.core().set_focused(true) }

    /// Called when the widget loses focus.
    fn on_lose_focus(&self) { self.core().set_focused(false) }

    /// Keyboard action delivered while focused. Returns `true` when consumed.
    fn on_key_event(&self, _event: &KeyboardAction) -> bool { false }

    /// Tooltip shown when the pointer rests on the widget.
    fn tooltip(&self) -> Option<Rc<dyn Widget>> { self.core().tooltip() }

    /// Exposes the activation capability, if any.
    fn as_activatable(&self) -> Option<&dyn Activatable> { None }
}

/// `true` when both handles point at the same widget.
pub fn same_widget(a: &Rc<dyn Widget>, b: &Rc<dyn Widget>) -> bool { Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const () }

/// State common to every widget.
pub struct WidgetCore {
    id: String,
    skin: RefCell<Option<Rc<dyn Skin>>>,
    family: RefCell<Option<String>>,
    visible: Cell<bool>,
    enabled: Cell<bool>,
    focused: Cell<bool>,
    tooltip: RefCell<Option<Rc<dyn Widget>>>,
    tooltip_delay: Cell<f32>,
    tooltip_listener: Rc<BaseInteractionListener>,
}

impl WidgetCore {
    /// Creates a visible, enabled widget state.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            skin: RefCell::new(None),
            family: RefCell::new(None),
            visible: Cell::new(true),
            enabled: Cell::new(true),
            focused: Cell::new(false),
            tooltip: RefCell::new(None),
            tooltip_delay: Cell::new(DEFAULT_TOOLTIP_DELAY),
            tooltip_listener: Rc::new(BaseInteractionListener::new()),
        }
    }

    /// Identifier, used for lookups by the host.
    pub fn id(&self) -> &str { &self.id }

    /// Skin override.
    pub fn skin(&self) -> Option<Rc<dyn Skin>> { self.skin.borrow().clone() }
    /// Sets or clears the skin override.
    pub fn set_skin(&self, skin: Option<Rc<dyn Skin>>) { *self.skin.borrow_mut() = skin }

    /// Family override.
    pub fn family(&self) -> Option<String> { self.family.borrow().clone() }
    /// Sets or clears the family override.
    pub fn set_family(&self, family: Option<&str>) { *self.family.borrow_mut() = family.map(str::to_string) }

    /// Visibility flag.
    pub fn is_visible(&self) -> bool { self.visible.get() }
    /// Shows or hides the widget.
    pub fn set_visible(&self, visible: bool) { self.visible.set(visible) }

    /// Enabled flag; disabled widgets are skipped by tabbing.
    pub fn is_enabled(&self) -> bool { self.enabled.get() }
    /// Enables or disables the widget.
    pub fn set_enabled(&self, enabled: bool) { self.enabled.set(enabled) }

    /// `true` while the widget holds focus.
    pub fn is_focused(&self) -> bool { self.focused.get() }
    /// Updated by the default focus callbacks.
    pub fn set_focused(&self, focused: bool) { self.focused.set(focused) }

    /// Tooltip widget.
    pub fn tooltip(&self) -> Option<Rc<dyn Widget>> { self.tooltip.borrow().clone() }
    /// Sets or clears the tooltip widget.
    pub fn set_tooltip(&self, tooltip: Option<Rc<dyn Widget>>) { *self.tooltip.borrow_mut() = tooltip }
    /// Uses a label as tooltip; an empty string clears it.
    pub fn set_tooltip_text(&self, text: &str) {
        let tooltip: Option<Rc<dyn Widget>> = if text.is_empty() { None } else { Some(Rc::new(Label::new("", text))) };
        self.set_tooltip(tooltip)
    }

    /// Seconds before the tooltip shows.
    pub fn tooltip_delay(&self) -> f32 { self.tooltip_delay.get() }
    /// Changes the tooltip delay.
    pub fn set_tooltip_delay(&self, seconds: f32) { self.tooltip_delay.set(seconds) }

    /// Hover listener registered on the widget's behalf when it has a tooltip.
    ///
    /// It lives as long as the widget so the region matches itself from frame to frame.
    pub fn tooltip_listener(&self) -> &Rc<BaseInteractionListener> { &self.tooltip_listener }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_defaults() {
        let core = WidgetCore::new("w");
        assert_eq!(core.id(), "w");
        assert!(core.is_visible() && core.is_enabled() && !core.is_focused());
        assert_eq!(core.tooltip_delay(), DEFAULT_TOOLTIP_DELAY);
        assert!(core.skin().is_none() && core.family().is_none());
    }

    #[test]
    fn tooltip_text_wraps_a_label() {
        let core = WidgetCore::new("w");
        core.set_tooltip_text("hello");
        assert_eq!(core.tooltip().map(|t| t.type_tag()), Some("label"));
        core.set_tooltip_text("");
        assert!(core.tooltip().is_none());
    }

    #[test]
    fn same_widget_compares_identity() {
        let a: Rc<dyn Widget> = Rc::new(Label::new("a", "x"));
        let b: Rc<dyn Widget> = Rc::new(Label::new("a", "x"));
        assert!(same_widget(&a, &a.clone()));
        assert!(!same_widget(&a, &b));
    }
}
