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

/// Largest grid distance between two clicks that still counts as a double click;
/// moving farther than this also re-arms the tooltip timer.
pub const MAX_DOUBLE_CLICK_DISTANCE: u32 = 5;
/// Milliseconds within which a second click counts as a double click.
pub const DOUBLE_CLICK_TIME: u64 = 200;

impl Canvas {
    fn arm_tooltip(&mut self, region: &InteractionRegion, pos: Vec2i) {
        let delay = region.element().map_or(DEFAULT_TOOLTIP_DELAY, |e| e.core().tooltip_delay());
        self.tooltip_time = self.game_time.saturating_add((delay.max(0.0) * 1000.0) as u64);
        self.last_tooltip_pos = pos;
    }

    /// Updates hover state for a pointer at `pos`.
    ///
    /// A held press receives a drag event wherever the pointer is. Regions are scanned in
    /// reverse registration order, so the last drawn is the top-most; regions the pointer
    /// left receive a leave event. The tooltip timer re-arms when the top region changes or
    /// the pointer moves more than [`MAX_DOUBLE_CLICK_DISTANCE`] from where it was armed.
    pub fn process_mouse_position(&mut self, pos: Vec2i) {
        self.mouse_pos = pos;
        if let Some(clicked) = &self.clicked {
            clicked.listener.on_mouse_drag(&MouseDragEvent { pos: clicked.relative(pos) });
        }

        let mut over: Vec<InteractionRegion> = Vec::new();
        for region in self.regions.iter().rev() {
            if region.region.contains(pos) && !over.contains(region) {
                region.listener.on_mouse_over(&MouseOverEvent { pos: region.relative(pos), top_most: over.is_empty() });
                over.push(region.clone());
            }
        }
        for old in &self.mouse_over {
            if !over.contains(old) {
                old.listener.on_mouse_leave();
            }
        }

        // the pressed widget may have disappeared mid-drag
        if self.clicked.as_ref().is_some_and(|c| !self.regions.contains(c)) {
            self.clicked = None;
        }

        let top = over.first().cloned();
        match &top {
            Some(new_top) if self.top_region.as_ref() != Some(new_top) => self.arm_tooltip(new_top, pos),
            Some(new_top) if grid_distance(self.last_tooltip_pos, pos) > MAX_DOUBLE_CLICK_DISTANCE => self.arm_tooltip(new_top, pos),
            _ => {}
        }
        self.top_region = top;
        self.mouse_over = over;
    }

    /// Dispatches a button press at `pos`. Returns `true` when a region consumed it.
    ///
    /// A press is a double click when the previous press used the same button, less than
    /// [`DOUBLE_CLICK_TIME`] ago and less than [`MAX_DOUBLE_CLICK_DISTANCE`] away. Double
    /// clicks only go to regions whose widget already holds focus; elsewhere they behave as
    /// single clicks. Regions are tried top-most first and the first to accept wins.
    pub fn process_mouse_click(&mut self, button: MouseButton, pos: Vec2i) -> bool {
        self.focus.reset_tabbing();
        let now = self.game_time;
        let possible_double = self.last_click.is_some_and(|last| {
            last.button == button && grid_distance(last.pos, pos) < MAX_DOUBLE_CLICK_DISTANCE && now.saturating_sub(last.time) < DOUBLE_CLICK_TIME
        });
        self.last_click = Some(ClickRecord { pos, button, time: now });

        let over = self.mouse_over.clone();
        for region in over {
            if !region.region.contains(pos) {
                continue;
            }
            let event = MouseClickEvent { pos: region.relative(pos), button };
            let element = region.element();
            if possible_double && element.as_ref().is_some_and(|e| self.focus.is_focused(e)) {
                if region.listener.on_mouse_double_click(&event) {
                    trace!("double click consumed at {},{}", pos.x, pos.y);
                    self.clicked = Some(region);
                    return true;
                }
            } else if region.listener.on_mouse_click(&event) {
                trace!("click consumed at {},{}", pos.x, pos.y);
                self.focus.set_focus(element.as_ref());
                self.clicked = Some(region);
                return true;
            }
        }
        false
    }

    /// Sends the release to the region holding the press and clears it. Returns `true`
    /// when a press was held.
    pub fn process_mouse_release(&mut self, button: MouseButton, pos: Vec2i) -> bool {
        let Some(clicked) = self.clicked.take() else { return false };
        clicked.listener.on_mouse_release(&MouseReleaseEvent { pos: clicked.relative(pos), button });
        true
    }

    /// Dispatches a wheel turn top-most first. The accepting region's widget gains focus and
    /// the region holds the press until the next release.
    pub fn process_mouse_wheel(&mut self, wheel: i32, pos: Vec2i) -> bool {
        let over = self.mouse_over.clone();
        for region in over {
            if !region.region.contains(pos) {
                continue;
            }
            if region.listener.on_mouse_wheel(&MouseWheelEvent { pos: region.relative(pos), wheel }) {
                trace!("wheel consumed at {},{}", pos.x, pos.y);
                let element = region.element();
                self.focus.set_focus(element.as_ref());
                self.clicked = Some(region);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        accept: bool,
        log: Log,
    }

    impl Recorder {
        fn note(&self, what: String) { self.log.borrow_mut().push(what) }
    }

    impl InteractionListener for Recorder {
        fn on_mouse_over(&self, event: &MouseOverEvent) { self.note(format!("over {} {}", self.name, event.top_most)) }
        fn on_mouse_leave(&self) { self.note(format!("leave {}", self.name)) }
        fn on_mouse_click(&self, event: &MouseClickEvent) -> bool {
            self.note(format!("click {} {},{}", self.name, event.pos.x, event.pos.y));
            self.accept
        }
        fn on_mouse_double_click(&self, _event: &MouseClickEvent) -> bool {
            self.note(format!("double {}", self.name));
            self.accept
        }
        fn on_mouse_drag(&self, _event: &MouseDragEvent) { self.note(format!("drag {}", self.name)) }
        fn on_mouse_release(&self, _event: &MouseReleaseEvent) { self.note(format!("release {}", self.name)) }
        fn on_mouse_wheel(&self, event: &MouseWheelEvent) -> bool {
            self.note(format!("wheel {} {}", self.name, event.wheel));
            self.accept
        }
    }

    /// Widget covering its whole scope with one interaction region.
    struct Pad {
        core: WidgetCore,
        listener: Rc<dyn InteractionListener>,
    }

    impl Widget for Pad {
        fn core(&self) -> &WidgetCore { &self.core }
        fn type_tag(&self) -> &'static str { "pad" }
        fn on_draw(&self, canvas: &mut Canvas) { canvas.add_interaction_region(&self.listener, None, None) }
        fn preferred_content_size(&self, _canvas: &mut Canvas, _hint: Dimensioni) -> Dimensioni { Dimensioni::new(0, 0) }
    }

    fn pad(name: &'static str, accept: bool, log: &Log) -> Rc<dyn Widget> {
        let listener: Rc<dyn InteractionListener> = Rc::new(Recorder { name, accept, log: log.clone() });
        Rc::new(Pad { core: WidgetCore::new(name), listener })
    }

    fn canvas() -> Canvas {
        let renderer = RendererHandle::new(CommandRenderer::new(Dimensioni::new(800, 600)));
        Canvas::new(&renderer, Rc::new(MapSkin::new(Style::default())), CanvasConfig::default()).unwrap()
    }

    fn draw(canvas: &mut Canvas, pads: &[(&Rc<dyn Widget>, Rect)]) {
        canvas.pre_render();
        for (widget, region) in pads {
            canvas.draw_widget(widget, *region);
        }
        canvas.post_render();
    }

    fn take(log: &Log) -> Vec<String> { log.borrow_mut().drain(..).collect() }

    #[test]
    fn last_registered_region_is_on_top() {
        let log = Log::default();
        let (a, b, c) = (pad("a", true, &log), pad("b", true, &log), pad("c", true, &log));
        let mut canvas = canvas();
        let area = rect(0, 0, 100, 100);
        draw(&mut canvas, &[(&a, area), (&b, area), (&c, rect(0, 0, 50, 50))]);

        canvas.process_mouse_position(vec2(20, 20));
        assert_eq!(take(&log), vec!["over c true", "over b false", "over a false"]);
        assert_eq!(canvas.mouse_over_regions().len(), 3);
        assert_eq!(canvas.top_mouse_over_region().map(|r| r.region()), Some(rect(0, 0, 50, 50)));

        canvas.process_mouse_position(vec2(70, 70));
        assert_eq!(take(&log), vec!["over b true", "over a false", "leave c"]);

        canvas.process_mouse_position(vec2(500, 500));
        assert_eq!(take(&log), vec!["leave b", "leave a"]);
        assert!(canvas.top_mouse_over_region().is_none());
    }

    #[test]
    fn clicks_go_top_down_until_accepted() {
        let log = Log::default();
        let (a, b, c) = (pad("a", true, &log), pad("b", false, &log), pad("c", false, &log));
        let mut canvas = canvas();
        let area = rect(10, 20, 100, 100);
        draw(&mut canvas, &[(&a, area), (&b, area), (&c, area)]);
        canvas.process_mouse_position(vec2(15, 25));
        take(&log);

        assert!(canvas.process_mouse_click(MouseButton::LEFT, vec2(15, 25)));
        assert_eq!(take(&log), vec!["click c 5,5", "click b 5,5", "click a 5,5"]);
        assert!(canvas.focus().focus().is_some_and(|f| same_widget(&f, &a)));
        assert!(canvas.clicked_region().is_some());

        canvas.process_mouse_position(vec2(16, 25));
        assert_eq!(take(&log).first().map(String::as_str), Some("drag a"));
        assert!(canvas.process_mouse_release(MouseButton::LEFT, vec2(16, 25)));
        assert_eq!(take(&log), vec!["release a"]);
        assert!(!canvas.process_mouse_release(MouseButton::LEFT, vec2(16, 25)));
    }

    #[test]
    fn unaccepted_click_is_not_consumed() {
        let log = Log::default();
        let b = pad("b", false, &log);
        let mut canvas = canvas();
        draw(&mut canvas, &[(&b, rect(0, 0, 100, 100))]);
        canvas.process_mouse_position(vec2(5, 5));
        assert!(!canvas.process_mouse_click(MouseButton::LEFT, vec2(5, 5)));
        assert!(canvas.clicked_region().is_none());
        assert!(canvas.focus().focus().is_none());
    }

    #[test]
    fn double_click_compares_with_the_previous_click() {
        let log = Log::default();
        let a = pad("a", true, &log);
        let mut canvas = canvas();
        draw(&mut canvas, &[(&a, rect(0, 0, 100, 100))]);
        canvas.process_mouse_position(vec2(10, 10));
        take(&log);

        let click_at = |canvas: &mut Canvas, time: u64, button: MouseButton, x: i32, y: i32| {
            canvas.set_game_time(time);
            canvas.process_mouse_click(button, vec2(x, y));
            let entry = take(&log);
            entry[0].split(' ').next().unwrap_or_default().to_string()
        };
        assert_eq!(click_at(&mut canvas, 0, MouseButton::LEFT, 10, 10), "click");
        assert_eq!(click_at(&mut canvas, 150, MouseButton::LEFT, 12, 11), "double");
        // 300ms after the first click but only 150ms after the second
        assert_eq!(click_at(&mut canvas, 300, MouseButton::LEFT, 10, 10), "double");
        assert_eq!(click_at(&mut canvas, 600, MouseButton::LEFT, 10, 10), "click");
        assert_eq!(click_at(&mut canvas, 650, MouseButton::RIGHT, 10, 10), "click");
        assert_eq!(click_at(&mut canvas, 700, MouseButton::RIGHT, 14, 12), "click");
        assert_eq!(click_at(&mut canvas, 750, MouseButton::RIGHT, 14, 12), "double");
    }

    #[test]
    fn double_click_needs_prior_focus() {
        let log = Log::default();
        let a = pad("a", true, &log);
        let mut canvas = canvas();
        draw(&mut canvas, &[(&a, rect(0, 0, 100, 100))]);
        canvas.process_mouse_position(vec2(10, 10));

        canvas.process_mouse_click(MouseButton::LEFT, vec2(10, 10));
        canvas.focus_mut().set_focus(None);
        take(&log);
        canvas.set_game_time(50);
        canvas.process_mouse_click(MouseButton::LEFT, vec2(10, 10));
        assert_eq!(take(&log), vec!["click a 10,10"]);
    }

    #[test]
    fn tooltip_timer_rearms_on_new_region_or_long_move() {
        let log = Log::default();
        let a = pad("a", true, &log);
        let b = pad("b", true, &log);
        b.core().set_tooltip_delay(2.0);
        let mut canvas = canvas();
        draw(&mut canvas, &[(&a, rect(0, 0, 100, 100)), (&b, rect(200, 0, 100, 100))]);

        canvas.set_game_time(1_000);
        canvas.process_mouse_position(vec2(10, 10));
        assert_eq!(canvas.tooltip_time(), 1_500);

        canvas.set_game_time(1_100);
        canvas.process_mouse_position(vec2(13, 12));
        assert_eq!(canvas.tooltip_time(), 1_500);
        canvas.process_mouse_position(vec2(14, 12));
        assert_eq!(canvas.tooltip_time(), 1_600);

        canvas.set_game_time(1_200);
        canvas.process_mouse_position(vec2(210, 10));
        assert_eq!(canvas.tooltip_time(), 3_200);
    }

    #[test]
    fn vanished_pressed_region_is_released_without_event() {
        let log = Log::default();
        let a = pad("a", true, &log);
        let mut canvas = canvas();
        draw(&mut canvas, &[(&a, rect(0, 0, 100, 100))]);
        canvas.process_mouse_position(vec2(10, 10));
        assert!(canvas.process_mouse_click(MouseButton::LEFT, vec2(10, 10)));

        draw(&mut canvas, &[]);
        canvas.process_mouse_position(vec2(11, 10));
        assert!(canvas.clicked_region().is_none());
        take(&log);
        assert!(!canvas.process_mouse_release(MouseButton::LEFT, vec2(11, 10)));
        assert!(take(&log).is_empty());
    }

    #[test]
    fn wheel_focuses_and_presses_the_accepting_region() {
        let log = Log::default();
        let (a, b) = (pad("a", true, &log), pad("b", false, &log));
        let mut canvas = canvas();
        let area = rect(0, 0, 100, 100);
        draw(&mut canvas, &[(&a, area), (&b, area)]);
        canvas.process_mouse_position(vec2(10, 10));
        take(&log);

        assert!(canvas.process_mouse_wheel(-2, vec2(10, 10)));
        assert_eq!(take(&log), vec!["wheel b -2", "wheel a -2"]);
        assert!(canvas.focus().focus().is_some_and(|f| same_widget(&f, &a)));
        assert!(canvas.clicked_region().is_some_and(|r| r.element().is_some_and(|e| same_widget(&e, &a))));
        assert!(!canvas.process_mouse_wheel(1, vec2(500, 500)));

        canvas.process_mouse_position(vec2(12, 10));
        assert_eq!(take(&log).first().map(String::as_str), Some("drag a"));
        assert!(canvas.process_mouse_release(MouseButton::LEFT, vec2(12, 10)));
        assert_eq!(take(&log), vec!["release a"]);
    }

    #[test]
    fn held_press_drags_outside_its_region() {
        let log = Log::default();
        let a = pad("a", true, &log);
        let mut canvas = canvas();
        draw(&mut canvas, &[(&a, rect(10, 20, 100, 100))]);
        canvas.process_mouse_position(vec2(15, 25));
        assert!(canvas.process_mouse_click(MouseButton::LEFT, vec2(15, 25)));
        take(&log);

        canvas.process_mouse_position(vec2(500, 500));
        assert_eq!(take(&log), vec!["drag a", "leave a"]);
        assert!(canvas.clicked_region().is_some());
        canvas.process_mouse_position(vec2(600, 550));
        assert_eq!(take(&log), vec!["drag a"]);
        assert!(canvas.process_mouse_release(MouseButton::LEFT, vec2(600, 550)));
        assert_eq!(take(&log), vec!["release a"]);
    }
}
