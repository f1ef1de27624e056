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
use log::debug;

/// Owns a canvas, its input queue and the root widgets, and runs whole frames.
///
/// Device adapters fill [`Context::input_mut`]; [`Context::frame`] then feeds the queued
/// actions to the pointer and focus engines and draws the roots.
pub struct Context {
    canvas: Canvas,
    input: InputQueue,
    roots: Vec<Rc<dyn Widget>>,
}

impl Context {
    /// Creates a context drawing through `renderer`.
    pub fn new<R: CanvasRenderer + 'static>(renderer: &RendererHandle<R>, skin: Rc<dyn Skin>, config: CanvasConfig) -> Result<Self, NuiError> {
        Ok(Self { canvas: Canvas::new(renderer, skin, config)?, input: InputQueue::new(), roots: Vec::new() })
    }

    /// Canvas driven by this context.
    pub fn canvas(&self) -> &Canvas { &self.canvas }

    /// Canvas driven by this context, mutably.
    pub fn canvas_mut(&mut self) -> &mut Canvas { &mut self.canvas }

    /// Input queue to fill between frames.
    pub fn input_mut(&mut self) -> &mut InputQueue { &mut self.input }

    /// Adds a root widget drawn over the whole canvas. Later roots draw on top.
    pub fn add_root(&mut self, widget: Rc<dyn Widget>) { self.roots.push(widget) }

    /// Removes every root widget.
    pub fn clear_roots(&mut self) { self.roots.clear() }

    /// Dispatches queued input against the regions of the last frame.
    pub fn process_input(&mut self) {
        let mut moved = false;
        for action in self.input.drain_mouse() {
            match action {
                MouseAction::Move(pos) => {
                    moved = true;
                    self.canvas.process_mouse_position(pos);
                }
                MouseAction::Button { button, state: ButtonState::Down, pos } => {
                    self.canvas.process_mouse_click(button, pos);
                }
                MouseAction::Button { button, state: ButtonState::Up, pos } => {
                    self.canvas.process_mouse_release(button, pos);
                }
                MouseAction::Wheel { delta, pos } => {
                    self.canvas.process_mouse_wheel(delta, pos);
                }
            }
        }
        // regions moved under a still pointer
        if !moved {
            let pos = self.input.mouse_position();
            self.canvas.process_mouse_position(pos);
        }

        for action in self.input.drain_keyboard() {
            let consumed = self.canvas.focus().focus().is_some_and(|w| w.on_key_event(&action));
            if !consumed && !self.canvas.focus_mut().handle_tabbing_input(&action) {
                debug!("unhandled key {:?} {:?}", action.key, action.state);
            }
        }
    }

    /// Draws every root widget as one frame.
    pub fn render(&mut self) {
        self.canvas.pre_render();
        let region = self.canvas.region();
        for root in &self.roots {
            self.canvas.draw_widget(root, region);
        }
        self.canvas.post_render();
    }

    /// Runs one frame at `time_ms`: input first, then drawing.
    pub fn frame(&mut self, time_ms: u64) {
        self.canvas.set_game_time(time_ms);
        self.process_input();
        self.render();
    }
}
