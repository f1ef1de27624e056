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
use std::{
    cell::Cell,
    hash::{Hash, Hasher},
    rc::Weak,
};

#[derive(Copy, Clone, Debug)]
/// Pointer entered or moved over a region.
pub struct MouseOverEvent {
    /// Position relative to the registering scope.
    pub pos: Vec2i,
    /// `true` for the region that is visually on top at this position.
    pub top_most: bool,
}

#[derive(Copy, Clone, Debug)]
/// Button press (single or double) over a region.
pub struct MouseClickEvent {
    /// Position relative to the registering scope.
    pub pos: Vec2i,
    /// Button pressed.
    pub button: MouseButton,
}

#[derive(Copy, Clone, Debug)]
/// Pointer moved while a region holds the press.
pub struct MouseDragEvent {
    /// Position relative to the pressed region's scope, possibly outside of it.
    pub pos: Vec2i,
}

#[derive(Copy, Clone, Debug)]
/// Button released after a press was accepted.
pub struct MouseReleaseEvent {
    /// Position relative to the pressed region's scope.
    pub pos: Vec2i,
    /// Button released.
    pub button: MouseButton,
}

#[derive(Copy, Clone, Debug)]
/// Wheel turned over a region.
pub struct MouseWheelEvent {
    /// Position relative to the registering scope.
    pub pos: Vec2i,
    /// Wheel steps; positive away from the user.
    pub wheel: i32,
}

/// Receives pointer events for an interaction region.
///
/// Methods take `&self`; listeners that track state use interior mutability. Returning
/// `true` from the click, double-click and wheel handlers consumes the event.
pub trait InteractionListener {
    /// Pointer is over the region.
    fn on_mouse_over(&self, _event: &MouseOverEvent) {}
    /// Pointer left the region.
    fn on_mouse_leave(&self) {}
    /// Single click.
    fn on_mouse_click(&self, _event: &MouseClickEvent) -> bool { false }
    /// Second click of a double click on an already focused widget.
    fn on_mouse_double_click(&self, _event: &MouseClickEvent) -> bool { false }
    /// Pointer moved while this listener holds the press.
    fn on_mouse_drag(&self, _event: &MouseDragEvent) {}
    /// Press released.
    fn on_mouse_release(&self, _event: &MouseReleaseEvent) {}
    /// Wheel turned.
    fn on_mouse_wheel(&self, _event: &MouseWheelEvent) -> bool { false }
    /// `true` while the pointer is over the region.
    fn is_mouse_over(&self) -> bool { false }
}

/// Listener that only tracks hover. Registered for widgets that carry a tooltip.
#[derive(Default)]
pub struct BaseInteractionListener {
    over: Cell<bool>,
}

impl BaseInteractionListener {
    /// Creates a listener with the pointer outside.
    pub fn new() -> Self { Self::default() }
}

impl InteractionListener for BaseInteractionListener {
    fn on_mouse_over(&self, _event: &MouseOverEvent) { self.over.set(true) }
    fn on_mouse_leave(&self) { self.over.set(false) }
    fn is_mouse_over(&self) -> bool { self.over.get() }
}

fn listener_addr(listener: &Rc<dyn InteractionListener>) -> *const () { Rc::as_ptr(listener) as *const () }

/// Hit-testable rectangle registered during drawing.
///
/// Two regions are equal when they share the same listener, regardless of geometry, so a
/// region can be matched across frames.
#[derive(Clone)]
pub struct InteractionRegion {
    pub(crate) listener: Rc<dyn InteractionListener>,
    pub(crate) region: Rect,
    pub(crate) offset: Vec2i,
    pub(crate) element: Option<Weak<dyn Widget>>,
    pub(crate) tooltip: Option<Rc<dyn Widget>>,
}

impl InteractionRegion {
    /// Absolute rectangle, already clipped to the crop region it was registered under.
    pub fn region(&self) -> Rect { self.region }

    /// Origin of the registering scope; event positions are relative to it.
    pub fn offset(&self) -> Vec2i { self.offset }

    /// Listener receiving the events.
    pub fn listener(&self) -> &Rc<dyn InteractionListener> { &self.listener }

    /// Widget that was being drawn when the region was registered, if still alive.
    pub fn element(&self) -> Option<Rc<dyn Widget>> { self.element.as_ref().and_then(|w| w.upgrade()) }

    /// Tooltip replacing the element's own tooltip.
    pub fn tooltip(&self) -> Option<&Rc<dyn Widget>> { self.tooltip.as_ref() }

    pub(crate) fn relative(&self, pos: Vec2i) -> Vec2i { Vec2i::new(pos.x.saturating_sub(self.offset.x), pos.y.saturating_sub(self.offset.y)) }
}

impl PartialEq for InteractionRegion {
    fn eq(&self, other: &Self) -> bool { listener_addr(&self.listener) == listener_addr(&other.listener) }
}

impl Eq for InteractionRegion {}

impl Hash for InteractionRegion {
    fn hash<H: Hasher>(&self, state: &mut H) { listener_addr(&self.listener).hash(state) }
}
