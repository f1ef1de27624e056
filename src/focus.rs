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
use log::trace;
use std::rc::Weak;

struct TabTarget {
    order: i32,
    widget: Weak<dyn Widget>,
}

/// Tracks the focused widget and keyboard tab order.
///
/// One instance is owned by each [`Canvas`]; widgets reach it through the canvas instead of
/// a global.
#[derive(Default)]
pub struct FocusContext {
    focus: Option<Weak<dyn Widget>>,
    targets: Vec<TabTarget>,
    current: Option<i32>,
    reverse: bool,
    set_through_tab: bool,
}

impl FocusContext {
    /// Creates an empty context.
    pub fn new() -> Self { Self::default() }

    /// Currently focused widget, if still alive.
    pub fn focus(&self) -> Option<Rc<dyn Widget>> { self.focus.as_ref().and_then(Weak::upgrade) }

    /// `true` when `widget` holds focus.
    pub fn is_focused(&self, widget: &Rc<dyn Widget>) -> bool { self.focus().is_some_and(|f| same_widget(&f, widget)) }

    /// `true` when the current focus was reached with Tab.
    pub fn is_set_through_tab(&self) -> bool { self.set_through_tab }

    /// Moves focus to `widget` (or clears it), notifying both widgets.
    ///
    /// Widgets that cannot be focused are ignored; refocusing the focused widget does nothing.
    pub fn set_focus(&mut self, widget: Option<&Rc<dyn Widget>>) {
        if widget.is_some_and(|w| !w.can_be_focus()) {
            return;
        }
        let previous = self.focus();
        match (&previous, widget) {
            (Some(p), Some(w)) if same_widget(p, w) => return,
            (None, None) => {
                self.focus = None;
                return;
            }
            _ => {}
        }
        if let Some(p) = previous {
            p.on_lose_focus();
        }
        self.focus = widget.map(Rc::downgrade);
        if let Some(w) = widget {
            trace!("focus -> {}", w.core().id());
            w.on_gain_focus();
        }
    }

    /// Adds `widget` to the tab order. Equal orders keep registration order.
    pub fn register_tab_target(&mut self, order: i32, widget: &Rc<dyn Widget>) {
        self.targets.retain(|t| t.widget.strong_count() > 0);
        let at = self.targets.partition_point(|t| t.order <= order);
        self.targets.insert(at, TabTarget { order, widget: Rc::downgrade(widget) });
    }

    /// Empties the tab order.
    pub fn clear_tab_targets(&mut self) {
        self.targets.clear();
        self.current = None;
    }

    /// Forgets the tab position. Called on every mouse click.
    pub fn reset_tabbing(&mut self) {
        self.current = None;
        self.set_through_tab = false;
    }

    /// Handles Shift, Tab and Enter. Returns `true` when the action was consumed.
    pub fn handle_tabbing_input(&mut self, action: &KeyboardAction) -> bool {
        if action.key.is_shift() {
            self.reverse = action.state == ButtonState::Down;
            return false;
        }
        if action.is_down(Key::Tab) {
            self.focus_next();
            return true;
        }
        if action.is_down(Key::Enter) {
            if let Some(focused) = self.focus() {
                if let Some(activatable) = focused.as_activatable() {
                    activatable.activate();
                    return true;
                }
            }
        }
        false
    }

    fn start_index(&self) -> Option<usize> {
        if let Some(focused) = self.focus() {
            if let Some(idx) = self.targets.iter().position(|t| t.widget.upgrade().is_some_and(|w| same_widget(&w, &focused))) {
                return Some(idx);
            }
        }
        let current = self.current?;
        self.targets.iter().position(|t| t.order == current)
    }

    /// Moves focus to the next enabled, visible target in the current direction, wrapping around.
    pub fn focus_next(&mut self) {
        self.targets.retain(|t| t.widget.strong_count() > 0);
        let n = self.targets.len();
        if n == 0 {
            return;
        }
        let start = self.start_index();
        for step in 1..=n {
            let idx = match (start, self.reverse) {
                (Some(s), false) => (s + step) % n,
                (Some(s), true) => (s + n - step % n) % n,
                (None, false) => step - 1,
                (None, true) => n - step,
            };
            let Some(widget) = self.targets[idx].widget.upgrade() else { continue };
            if widget.core().is_enabled() && widget.is_visible() && widget.can_be_focus() {
                self.current = Some(self.targets[idx].order);
                self.set_through_tab = true;
                self.set_focus(Some(&widget));
                return;
            }
        }
    }
}
