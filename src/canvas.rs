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
use log::{debug, trace, warn};
use std::{
    ops::{Deref, DerefMut},
    rc::Weak,
};

#[derive(Clone)]
/// Snapshot of the drawing context for one scope.
///
/// A child inherits everything from its parent except its regions and alpha; the
/// parent's effective alpha becomes the child's base alpha.
pub struct CanvasState {
    skin: Rc<dyn Skin>,
    family: String,
    element: Option<Weak<dyn Widget>>,
    part: String,
    mode: String,
    draw_region: Rect,
    crop_region: Rect,
    alpha: f32,
    base_alpha: f32,
    draw_on_top: bool,
}

impl CanvasState {
    fn root(skin: Rc<dyn Skin>, region: Rect) -> Self {
        Self {
            skin,
            family: String::new(),
            element: None,
            part: String::new(),
            mode: String::new(),
            draw_region: region,
            crop_region: region,
            alpha: 1.0,
            base_alpha: 1.0,
            draw_on_top: false,
        }
    }

    fn child(&self, draw_region: Rect, crop_region: Rect) -> Self {
        Self {
            skin: self.skin.clone(),
            family: self.family.clone(),
            element: self.element.clone(),
            part: self.part.clone(),
            mode: self.mode.clone(),
            draw_region,
            crop_region,
            alpha: 1.0,
            base_alpha: self.alpha(),
            draw_on_top: self.draw_on_top,
        }
    }

    /// Effective alpha: the scope's own alpha times everything inherited.
    pub fn alpha(&self) -> f32 { self.alpha * self.base_alpha }

    /// Absolute draw region.
    pub fn draw_region(&self) -> Rect { self.draw_region }

    /// Absolute crop region.
    pub fn crop_region(&self) -> Rect { self.crop_region }

    /// `true` when draws are deferred until the end of the frame.
    pub fn is_draw_on_top(&self) -> bool { self.draw_on_top }

    fn relative_region(&self) -> Rect { Rect::from_min_and_size(0, 0, self.draw_region.width(), self.draw_region.height()) }

    fn type_tag(&self) -> &'static str { self.element.as_ref().and_then(Weak::upgrade).map_or("", |e| e.type_tag()) }

    fn current_style(&self) -> Rc<Style> { self.skin.style_for(&self.family, self.type_tag(), &self.part, &self.mode) }
}

#[derive(Copy, Clone)]
pub(crate) struct ClickRecord {
    pub(crate) pos: Vec2i,
    pub(crate) button: MouseButton,
    pub(crate) time: u64,
}

/// Scope guard returned by [`Canvas::sub_region`].
///
/// Dereferences to the canvas. Dropping it restores the parent scope and, if this scope
/// narrowed the clip, re-applies the parent's crop. Guards borrow the canvas mutably, so
/// they can only be closed in reverse order of opening.
pub struct SubRegion<'a> {
    canvas: &'a mut Canvas,
    cropping: bool,
}

impl Deref for SubRegion<'_> {
    type Target = Canvas;
    fn deref(&self) -> &Canvas { self.canvas }
}

impl DerefMut for SubRegion<'_> {
    fn deref_mut(&mut self) -> &mut Canvas { self.canvas }
}

impl Drop for SubRegion<'_> {
    fn drop(&mut self) { self.canvas.pop_state(self.cropping) }
}

/// Retained-mode drawing surface.
///
/// Each frame runs [`Canvas::pre_render`], a depth-first draw of the widget tree, then
/// [`Canvas::post_render`]. Draw calls take rectangles relative to the current scope and
/// are clipped against its crop region; anything without area after clipping is skipped.
pub struct Canvas {
    pub(crate) renderer: RendererHandle<dyn CanvasRenderer>,
    pub(crate) config: CanvasConfig,
    pub(crate) focus: FocusContext,
    pub(crate) skin: Rc<dyn Skin>,
    white_texture: Rc<dyn Texture>,
    state: CanvasState,
    stack: Vec<CanvasState>,
    deferred: DrawOnTopQueue,
    pub(crate) regions: Vec<InteractionRegion>,
    pub(crate) mouse_over: Vec<InteractionRegion>,
    pub(crate) top_region: Option<InteractionRegion>,
    pub(crate) clicked: Option<InteractionRegion>,
    pub(crate) tooltip_time: u64,
    pub(crate) last_tooltip_pos: Vec2i,
    tooltip: Rc<Tooltip>,
    pub(crate) last_click: Option<ClickRecord>,
    pub(crate) mouse_pos: Vec2i,
    pub(crate) game_time: u64,
    focus_drawn: bool,
}

impl Canvas {
    /// Creates a canvas drawing through `renderer` with `skin` as the root skin.
    pub fn new<R: CanvasRenderer + 'static>(renderer: &RendererHandle<R>, skin: Rc<dyn Skin>, config: CanvasConfig) -> Result<Self, NuiError> {
        config.validate()?;
        let renderer = renderer.erase();
        let (target, white_texture) = renderer.scope(|r| (r.target_size(), r.white_texture()));
        if target.width <= 0 || target.height <= 0 {
            return Err(NuiError::EmptyTarget { width: target.width, height: target.height });
        }
        let size = config.logical_size(target);
        let state = CanvasState::root(skin.clone(), Rect::from_size(size));
        Ok(Self {
            renderer,
            config,
            focus: FocusContext::new(),
            skin,
            white_texture,
            state,
            stack: Vec::new(),
            deferred: DrawOnTopQueue::default(),
            regions: Vec::new(),
            mouse_over: Vec::new(),
            top_region: None,
            clicked: None,
            tooltip_time: 0,
            last_tooltip_pos: Vec2i::default(),
            tooltip: Rc::new(Tooltip::new()),
            last_click: None,
            mouse_pos: Vec2i::default(),
            game_time: 0,
            focus_drawn: false,
        })
    }

    /// Changes the UI scale, applied at the next [`Canvas::pre_render`].
    pub fn set_ui_scale(&mut self, ui_scale: i32) -> Result<(), NuiError> {
        let config = self.config.with_ui_scale(ui_scale);
        if let Err(err) = config.validate() {
            warn!("rejected ui scale {}", ui_scale);
            return Err(err);
        }
        self.config = config;
        Ok(())
    }

    /// Current configuration.
    pub fn config(&self) -> &CanvasConfig { &self.config }

    /// Focus and tab order.
    pub fn focus(&self) -> &FocusContext { &self.focus }

    /// Focus and tab order, mutably.
    pub fn focus_mut(&mut self) -> &mut FocusContext { &mut self.focus }

    /// Advances the clock used for tooltip and double-click timing.
    pub fn set_game_time(&mut self, time_ms: u64) { self.game_time = time_ms }

    /// Clock value last passed to [`Canvas::set_game_time`].
    pub fn game_time(&self) -> u64 { self.game_time }

    /// Last pointer position seen by the pointer engine.
    pub fn mouse_position(&self) -> Vec2i { self.mouse_pos }

    /// Widget used to present tooltips.
    pub fn tooltip_widget(&self) -> &Rc<Tooltip> { &self.tooltip }

    /// Interaction regions registered so far this frame, in registration order.
    pub fn interaction_regions(&self) -> &[InteractionRegion] { &self.regions }

    /// Region at the top of the pointer, if any.
    pub fn top_mouse_over_region(&self) -> Option<&InteractionRegion> { self.top_region.as_ref() }

    /// Regions under the pointer, top-most first.
    pub fn mouse_over_regions(&self) -> &[InteractionRegion] { &self.mouse_over }

    /// Region holding the current press, if any.
    pub fn clicked_region(&self) -> Option<&InteractionRegion> { self.clicked.as_ref() }

    /// Time at which the pending tooltip may show.
    pub fn tooltip_time(&self) -> u64 { self.tooltip_time }

    /// Current scope.
    pub fn state(&self) -> &CanvasState { &self.state }

    /// Number of open scopes above the root.
    pub fn depth(&self) -> usize { self.stack.len() }

    /// Size of the current scope.
    pub fn size(&self) -> Dimensioni { self.state.draw_region.size() }

    /// Current scope's region in its own coordinates: `(0, 0, width, height)`.
    pub fn region(&self) -> Rect { self.state.relative_region() }

    /// Effective alpha of the current scope.
    pub fn alpha(&self) -> f32 { self.state.alpha() }

    /// Sets the current scope's own alpha.
    pub fn set_alpha(&mut self, alpha: f32) { self.state.alpha = alpha }

    /// Skin of the current scope.
    pub fn skin(&self) -> &Rc<dyn Skin> { &self.state.skin }

    /// Replaces the current scope's skin.
    pub fn set_skin(&mut self, skin: Rc<dyn Skin>) { self.state.skin = skin }

    /// Replaces the current scope's family.
    pub fn set_family(&mut self, family: &str) { self.state.family = family.to_string() }

    /// Replaces the current scope's part.
    pub fn set_part(&mut self, part: &str) { self.state.part = part.to_string() }

    /// Replaces the current scope's mode.
    pub fn set_mode(&mut self, mode: &str) { self.state.mode = mode.to_string() }

    /// Enables or disables deferred drawing for the current scope and its children.
    pub fn set_draw_on_top(&mut self, draw_on_top: bool) { self.state.draw_on_top = draw_on_top }

    /// Style for the current (family, widget, part, mode).
    pub fn current_style(&self) -> Rc<Style> { self.state.current_style() }

    /// Starts a frame: drops last frame's regions, recomputes the root scope from the
    /// render target and the UI scale, and resets the renderer clip.
    pub fn pre_render(&mut self) {
        self.regions.clear();
        self.deferred.clear();
        self.stack.clear();
        let target = self.renderer.scope(|r| r.target_size());
        let size = self.config.logical_size(target);
        let root = Rect::from_size(size);
        self.state = CanvasState::root(self.skin.clone(), root);
        self.renderer.scope_mut(|r| {
            r.pre_render();
            r.crop(root);
        });
        self.focus_drawn = false;
        trace!("frame start {}x{} at {}ms", size.width, size.height, self.game_time);
    }

    /// Ends a frame: flushes deferred draws in submission order, draws the tooltip when
    /// due, and clears focus if the focused widget was not drawn.
    pub fn post_render(&mut self) {
        let restore = self.state.crop_region;
        if self.deferred.len() > 0 {
            trace!("flushing {} deferred draws", self.deferred.len());
        }
        let deferred = &mut self.deferred;
        let regions = &mut self.regions;
        self.renderer.scope_mut(|r| deferred.flush(r, regions, restore));

        match self.top_region.clone() {
            Some(top) if self.game_time >= self.tooltip_time => {
                let attachment = top.tooltip.clone().or_else(|| top.element().and_then(|e| e.tooltip()));
                self.tooltip.set_attachment(attachment);
                let tooltip: Rc<dyn Widget> = self.tooltip.clone();
                let region = self.region();
                self.draw_widget(&tooltip, region);
            }
            _ => self.tooltip.set_attachment(None),
        }

        self.renderer.scope_mut(|r| r.post_render());
        if !self.focus_drawn {
            self.focus.set_focus(None);
        }
    }

    /// Opens a child scope at `region`, relative to the current scope.
    ///
    /// With `crop` the child clips to `region` intersected with the current crop. The
    /// returned guard restores the current scope when dropped.
    pub fn sub_region(&mut self, region: Rect, crop: bool) -> SubRegion<'_> {
        let cropping = self.push_state(region, crop);
        SubRegion { canvas: self, cropping }
    }

    /// Runs `f` inside a child scope, see [`Canvas::sub_region`].
    pub fn with_sub_region<T>(&mut self, region: Rect, crop: bool, f: impl FnOnce(&mut Canvas) -> T) -> T {
        let mut scope = self.sub_region(region, crop);
        f(&mut scope)
    }

    fn push_state(&mut self, region: Rect, crop: bool) -> bool {
        let sub = relative_to_absolute(region, self.state.draw_region);
        let mut cropping = false;
        let crop_region = if crop {
            let narrowed = sub.intersection(&self.state.crop_region);
            if narrowed.has_area() && narrowed != self.state.crop_region {
                self.renderer.scope_mut(|r| r.crop(narrowed));
                cropping = true;
            }
            narrowed
        } else {
            self.state.crop_region
        };
        let child = self.state.child(sub, crop_region);
        self.stack.push(std::mem::replace(&mut self.state, child));
        cropping
    }

    fn pop_state(&mut self, cropping: bool) {
        let Some(parent) = self.stack.pop() else { return };
        if cropping {
            let crop = parent.crop_region;
            self.renderer.scope_mut(|r| r.crop(crop));
        }
        self.state = parent;
    }

    fn sub_region_for_widget(&mut self, widget: &Rc<dyn Widget>, region: Rect, crop: bool) -> SubRegion<'_> {
        let mut scope = self.sub_region(region, crop);
        scope.state.element = Some(Rc::downgrade(widget));
        if let Some(skin) = widget.core().skin() {
            scope.state.skin = skin;
        }
        if let Some(family) = widget.core().family() {
            scope.state.family = family;
        }
        scope.state.part = BASE_PART.to_string();
        scope.state.mode = widget.mode().to_string();
        scope
    }

    fn style_for_widget(&self, widget: &dyn Widget) -> Rc<Style> {
        let skin = widget.core().skin().unwrap_or_else(|| self.state.skin.clone());
        let family = widget.core().family().unwrap_or_else(|| self.state.family.clone());
        skin.style_for(&family, widget.type_tag(), BASE_PART, widget.mode())
    }

    /// Applies the current style's size constraints and alignment to `region`.
    pub fn apply_style_to_size(&self, region: Rect) -> Rect { self.current_style().apply_to_region(region, None) }

    /// Preferred size of `widget` including its margin, unconstrained.
    pub fn calculate_preferred_size(&mut self, widget: &Rc<dyn Widget>) -> Dimensioni {
        self.calculate_restricted_size(widget, Dimensioni::new(LARGE_INT, LARGE_INT))
    }

    /// Preferred size of `widget` including its margin, within `restrictions`.
    pub fn calculate_restricted_size(&mut self, widget: &Rc<dyn Widget>, restrictions: Dimensioni) -> Dimensioni {
        let style = self.style_for_widget(widget.as_ref());
        let region = style.apply_to_region(Rect::from_size(restrictions), None);
        let mut scope = self.sub_region_for_widget(widget, region, false);
        let content = widget.preferred_content_size(&mut scope, style.margin.shrink_size(restrictions));
        style.constrain_size(style.margin.grow_size(content))
    }

    /// Largest useful size of `widget` including its margin.
    pub fn calculate_maximum_size(&mut self, widget: &Rc<dyn Widget>) -> Dimensioni {
        let style = self.style_for_widget(widget.as_ref());
        let region = self.region();
        let mut scope = self.sub_region_for_widget(widget, region, false);
        let content = widget.max_content_size(&mut scope);
        style.constrain_size(style.margin.grow_size(content))
    }

    /// Draws `widget` over the whole current scope.
    pub fn draw_widget_full(&mut self, widget: &Rc<dyn Widget>) {
        let region = self.region();
        self.draw_widget(widget, region)
    }

    /// Places `widget` inside `region` according to its style and draws it.
    ///
    /// Invisible widgets are skipped. When the skin is applied by the canvas, the
    /// background is drawn first and the widget draws inside its margin.
    pub fn draw_widget(&mut self, widget: &Rc<dyn Widget>, region: Rect) {
        if !widget.is_visible() {
            return;
        }
        if self.focus.is_focused(widget) {
            self.focus_drawn = true;
        }

        let style = self.style_for_widget(widget.as_ref());
        let area = {
            let mut scope = self.sub_region_for_widget(widget, region, false);
            let max_size = scope.calculate_maximum_size(widget);
            style.apply_to_region(region, Some(max_size))
        };

        let mut placed = self.sub_region_for_widget(widget, area, false);
        if widget.is_skin_applied_by_canvas() {
            placed.draw_background(None);
            let inner = style.margin.shrink(Rect::from_size(area.size()));
            let mut content = placed.sub_region_for_widget(widget, inner, false);
            content.draw_styled_widget(widget);
        } else {
            placed.draw_styled_widget(widget);
        }
    }

    fn draw_styled_widget(&mut self, widget: &Rc<dyn Widget>) {
        if widget.tooltip().is_some() {
            let listener: Rc<dyn InteractionListener> = widget.core().tooltip_listener().clone();
            self.add_interaction_region(&listener, None, None);
        }
        widget.on_draw(self);
    }

    /// Translates `region` to absolute coordinates and clips it. `None` when nothing is visible.
    fn clip(&self, region: Rect) -> Option<(Rect, Rect)> {
        let absolute = relative_to_absolute(region, self.state.draw_region);
        let crop = absolute.intersection(&self.state.crop_region);
        crop.has_area().then_some((absolute, crop))
    }

    /// Draws text with the current style's font, colours, alignment and underline.
    /// `None` uses the whole scope.
    pub fn draw_text(&mut self, text: &str, region: Option<Rect>) {
        let style = self.current_style();
        let Some(font) = style.font.clone() else {
            debug!("text skipped: style has no font");
            return;
        };
        let appearance = TextAppearance {
            h_align: style.text_align_horizontal,
            v_align: style.text_align_vertical,
            color: style.text_color,
            shadow_color: if style.text_shadowed { style.text_shadow_color } else { Color::TRANSPARENT },
            underline: style.text_underline,
        };
        self.draw_text_raw(text, &font, appearance, region)
    }

    /// Draws text with an explicit font and appearance.
    pub fn draw_text_raw(&mut self, text: &str, font: &Rc<dyn Font>, appearance: TextAppearance, region: Option<Rect>) {
        let region = region.unwrap_or_else(|| self.region());
        let Some((absolute, crop)) = self.clip(region) else { return };
        let alpha = self.state.alpha();
        if self.state.draw_on_top {
            self.deferred.push(DrawOperation::Text { text: text.to_string(), font: font.clone(), appearance, region: absolute, crop, alpha });
        } else {
            self.renderer.scope_mut(|r| r.draw_text(text, font.as_ref(), appearance, absolute, alpha));
        }
    }

    /// Draws a whole texture with the current style's texture scale mode, tinted by `color`
    /// (white when `None`). `None` region uses the whole scope.
    pub fn draw_texture(&mut self, texture: &Rc<dyn Texture>, region: Option<Rect>, color: Option<Color>) {
        let region = region.unwrap_or_else(|| self.region());
        let mode = self.current_style().texture_scale_mode;
        self.draw_texture_raw(texture, region, color.unwrap_or(Color::WHITE), mode, UvRect::FULL)
    }

    /// Draws part of a texture. Use [`UvRect::from_pixels`] for pixel coordinates.
    pub fn draw_texture_raw(&mut self, texture: &Rc<dyn Texture>, region: Rect, color: Color, mode: ScaleMode, uv: UvRect) {
        let Some((absolute, crop)) = self.clip(region) else { return };
        let alpha = self.state.alpha();
        if self.state.draw_on_top {
            self.deferred.push(DrawOperation::Texture { texture: texture.clone(), color, mode, region: absolute, crop, uv, alpha });
        } else {
            self.renderer.scope_mut(|r| r.draw_texture(texture.as_ref(), color, mode, absolute, uv, alpha));
        }
    }

    /// Draws a nine-slice texture: fixed-size borders, stretched or tiled interior.
    pub fn draw_texture_bordered(&mut self, texture: &Rc<dyn Texture>, region: Rect, border: Border, tile: bool, uv: UvRect) {
        let Some((absolute, crop)) = self.clip(region) else { return };
        let alpha = self.state.alpha();
        if self.state.draw_on_top {
            self.deferred.push(DrawOperation::BorderedTexture { texture: texture.clone(), region: absolute, crop, border, tile, uv, alpha });
        } else {
            self.renderer.scope_mut(|r| r.draw_texture_bordered(texture.as_ref(), absolute, border, tile, uv, alpha));
        }
    }

    /// Draws the current style's background. `None` uses the style-constrained scope region.
    pub fn draw_background(&mut self, region: Option<Rect>) {
        let style = self.current_style();
        let region = region.unwrap_or_else(|| style.apply_to_region(self.region(), None));
        if !region.is_valid() {
            return;
        }
        let Some(background) = style.background.as_ref() else { return };
        if style.background_border.is_empty() {
            self.draw_texture_raw(background, region, Color::WHITE, style.background_scale_mode, UvRect::FULL);
        } else {
            let tile = style.background_scale_mode == ScaleMode::Tiled;
            self.draw_texture_bordered(background, region, style.background_border, tile, UvRect::FULL);
        }
    }

    /// Fills `region` with a solid colour.
    pub fn draw_filled_rectangle(&mut self, region: Rect, color: Color) {
        let white = self.white_texture.clone();
        self.draw_texture_raw(&white, region, color, ScaleMode::Stretch, UvRect::FULL)
    }

    /// Draws a line between two scope-relative points, clipped to the crop region.
    pub fn draw_line(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: Color) {
        let Some(coords) = line_coordinates(start_x, start_y, end_x, end_y, self.state.draw_region, self.state.crop_region) else { return };
        if self.state.draw_on_top {
            self.deferred.push(DrawOperation::Line { coords, color });
        } else {
            self.renderer.scope_mut(|r| r.draw_line(coords.start_x, coords.start_y, coords.end_x, coords.end_y, color));
        }
    }

    /// Registers a hit-testable region for `listener`.
    ///
    /// `None` region uses the style-constrained scope region grown by the margin. The
    /// region is clipped to the crop region and dropped when nothing is left. Event
    /// positions are reported relative to the current scope.
    pub fn add_interaction_region(&mut self, listener: &Rc<dyn InteractionListener>, tooltip: Option<Rc<dyn Widget>>, region: Option<Rect>) {
        let region = region.unwrap_or_else(|| {
            let style = self.current_style();
            style.margin.grow(style.apply_to_region(self.region(), None))
        });
        let clipped = self.state.crop_region.intersection(&relative_to_absolute(region, self.state.draw_region));
        if !clipped.has_area() {
            return;
        }
        let interaction = InteractionRegion {
            listener: listener.clone(),
            region: clipped,
            offset: self.state.draw_region.min(),
            element: self.state.element.clone(),
            tooltip,
        };
        if self.state.draw_on_top {
            self.deferred.push(DrawOperation::Interaction(interaction));
        } else {
            self.regions.push(interaction);
        }
    }

    /// Like [`Canvas::add_interaction_region`] with a text tooltip; empty text means none.
    pub fn add_interaction_region_with_text(&mut self, listener: &Rc<dyn InteractionListener>, tooltip: &str, region: Option<Rect>) {
        let tooltip: Option<Rc<dyn Widget>> = if tooltip.is_empty() { None } else { Some(Rc::new(Label::new("", tooltip))) };
        self.add_interaction_region(listener, tooltip, region)
    }
}
