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
use std::collections::VecDeque;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Logical key resolved by the device adapter.
pub enum Key {
    /// Tab.
    Tab,
    /// Enter / Return.
    Enter,
    /// Left shift.
    LeftShift,
    /// Right shift.
    RightShift,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// Cursor up.
    Up,
    /// Cursor down.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Any other key, identified by the adapter's code.
    Other(u32),
}

impl Key {
    /// `true` for either shift key.
    pub fn is_shift(self) -> bool { matches!(self, Key::LeftShift | Key::RightShift) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Transition of a key or button.
pub enum ButtonState {
    /// Pressed.
    Down,
    /// Released.
    Up,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// One keyboard transition.
pub struct KeyboardAction {
    /// Logical key.
    pub key: Key,
    /// Transition.
    pub state: ButtonState,
    /// Character produced by the transition, if any.
    pub character: Option<char>,
}

impl KeyboardAction {
    /// `true` for a press of `key`.
    pub fn is_down(&self, key: Key) -> bool { self.key == key && self.state == ButtonState::Down }
}

#[derive(Copy, Clone, Debug)]
/// One mouse action, in logical (UI-scaled) coordinates.
pub enum MouseAction {
    /// Button pressed or released at a position.
    Button {
        /// Button.
        button: MouseButton,
        /// Transition.
        state: ButtonState,
        /// Pointer position.
        pos: Vec2i,
    },
    /// Pointer moved.
    Move(Vec2i),
    /// Wheel turned at a position.
    Wheel {
        /// Wheel steps.
        delta: i32,
        /// Pointer position.
        pos: Vec2i,
    },
}

/// Queue of abstract input actions filled by device adapters and drained once per frame.
#[derive(Default)]
pub struct InputQueue {
    mouse_pos: Vec2i,
    mouse: VecDeque<MouseAction>,
    keyboard: VecDeque<KeyboardAction>,
}

impl InputQueue {
    /// Creates an empty queue with the pointer at the origin.
    pub fn new() -> Self { Self::default() }

    /// Last known pointer position.
    pub fn mouse_position(&self) -> Vec2i { self.mouse_pos }

    /// Records a pointer move.
    pub fn mousemove(&mut self, x: i32, y: i32) {
        self.mouse_pos = vec2(x, y);
        self.mouse.push_back(MouseAction::Move(self.mouse_pos));
    }

    /// Records a button press.
    pub fn mousedown(&mut self, x: i32, y: i32, button: MouseButton) {
        self.mouse_pos = vec2(x, y);
        self.mouse.push_back(MouseAction::Button { button, state: ButtonState::Down, pos: self.mouse_pos });
    }

    /// Records a button release.
    pub fn mouseup(&mut self, x: i32, y: i32, button: MouseButton) {
        self.mouse_pos = vec2(x, y);
        self.mouse.push_back(MouseAction::Button { button, state: ButtonState::Up, pos: self.mouse_pos });
    }

    /// Records a wheel turn at the current pointer position.
    pub fn scroll(&mut self, delta: i32) { self.mouse.push_back(MouseAction::Wheel { delta, pos: self.mouse_pos }) }

    /// Records a key press.
    pub fn keydown(&mut self, key: Key, character: Option<char>) {
        self.keyboard.push_back(KeyboardAction { key, state: ButtonState::Down, character });
    }

    /// Records a key release.
    pub fn keyup(&mut self, key: Key) { self.keyboard.push_back(KeyboardAction { key, state: ButtonState::Up, character: None }) }

    /// Records typed text as a press and release per character.
    pub fn text(&mut self, text: &str) {
        for c in text.chars() {
            let key = Key::Other(c as u32);
            self.keyboard.push_back(KeyboardAction { key, state: ButtonState::Down, character: Some(c) });
            self.keyboard.push_back(KeyboardAction { key, state: ButtonState::Up, character: Some(c) });
        }
    }

    /// Takes every pending mouse action in arrival order.
    pub fn drain_mouse(&mut self) -> Vec<MouseAction> { self.mouse.drain(..).collect() }

    /// Takes every pending keyboard action in arrival order.
    pub fn drain_keyboard(&mut self) -> Vec<KeyboardAction> { self.keyboard.drain(..).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_expands_to_down_up_pairs() {
        let mut input = InputQueue::new();
        input.text("hi");
        let actions = input.drain_keyboard();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], KeyboardAction { key: Key::Other('h' as u32), state: ButtonState::Down, character: Some('h') });
        assert_eq!(actions[1].state, ButtonState::Up);
        assert_eq!(actions[3].character, Some('i'));
        assert!(input.drain_keyboard().is_empty());
    }

    #[test]
    fn mouse_actions_keep_order_and_position() {
        let mut input = InputQueue::new();
        input.mousemove(10, 20);
        input.mousedown(11, 21, MouseButton::LEFT);
        input.scroll(-1);
        input.mouseup(12, 22, MouseButton::LEFT);
        let actions = input.drain_mouse();
        assert_eq!(actions.len(), 4);
        assert!(matches!(actions[0], MouseAction::Move(p) if p.x == 10 && p.y == 20));
        assert!(matches!(actions[1], MouseAction::Button { state: ButtonState::Down, .. }));
        assert!(matches!(actions[2], MouseAction::Wheel { delta: -1, pos } if pos.x == 11));
        assert!(matches!(actions[3], MouseAction::Button { state: ButtonState::Up, pos, .. } if pos.y == 22));
        assert_eq!((input.mouse_position().x, input.mouse_position().y), (12, 22));
    }

    #[test]
    fn shift_keys() {
        assert!(Key::LeftShift.is_shift());
        assert!(Key::RightShift.is_shift());
        assert!(!Key::Tab.is_shift());
        let a = KeyboardAction { key: Key::Tab, state: ButtonState::Down, character: None };
        assert!(a.is_down(Key::Tab));
        assert!(!a.is_down(Key::Enter));
    }
}
