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
use std::collections::HashMap;

/// Part name used for a widget's own style.
pub const BASE_PART: &str = "base";
/// Mode of an enabled widget at rest.
pub const DEFAULT_MODE: &str = "active";
/// Mode while the pointer is over a widget.
pub const HOVER_MODE: &str = "hover";
/// Mode while a widget is held down.
pub const DOWN_MODE: &str = "down";
/// Mode of a disabled widget.
pub const DISABLED_MODE: &str = "disabled";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Horizontal placement of an inner extent within an outer one.
pub enum HorizontalAlign {
    #[default]
    /// Flush with the left edge.
    Left,
    /// Centered.
    Center,
    /// Flush with the right edge.
    Right,
}

impl HorizontalAlign {
    /// Offset of an `inner`-wide item inside an `outer`-wide span.
    pub fn offset(self, inner: i32, outer: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => outer.saturating_sub(inner) / 2,
            Self::Right => outer.saturating_sub(inner),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Vertical placement of an inner extent within an outer one.
pub enum VerticalAlign {
    #[default]
    /// Flush with the top edge.
    Top,
    /// Centered.
    Middle,
    /// Flush with the bottom edge.
    Bottom,
}

impl VerticalAlign {
    /// Offset of an `inner`-tall item inside an `outer`-tall span.
    pub fn offset(self, inner: i32, outer: i32) -> i32 {
        match self {
            Self::Top => 0,
            Self::Middle => outer.saturating_sub(inner) / 2,
            Self::Bottom => outer.saturating_sub(inner),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// How a texture fills its destination rectangle.
pub enum ScaleMode {
    #[default]
    /// Stretch to the destination, ignoring aspect.
    Stretch,
    /// Repeat at the texture's native size.
    Tiled,
    /// Largest aspect-preserving size that fits inside the destination.
    ScaleFit,
    /// Smallest aspect-preserving size that covers the destination.
    ScaleFill,
}

#[derive(Clone)]
/// Resolved visual configuration for one (family, widget type, part, mode) key.
pub struct Style {
    /// Space between the placed region and the widget content.
    pub margin: Border,
    /// Fixed width; `0` means "not fixed".
    pub fixed_width: i32,
    /// Fixed height; `0` means "not fixed".
    pub fixed_height: i32,
    /// Minimum width when not fixed.
    pub min_width: i32,
    /// Minimum height when not fixed.
    pub min_height: i32,
    /// Maximum width when not fixed.
    pub max_width: i32,
    /// Maximum height when not fixed.
    pub max_height: i32,
    /// Placement of the widget within the region it is given.
    pub align_horizontal: HorizontalAlign,
    /// Placement of the widget within the region it is given.
    pub align_vertical: VerticalAlign,
    /// Background texture.
    pub background: Option<Rc<dyn Texture>>,
    /// Nine-slice border of the background, in source texture pixels.
    pub background_border: Border,
    /// Scale mode of the background.
    pub background_scale_mode: ScaleMode,
    /// Scale mode for textures drawn by widgets.
    pub texture_scale_mode: ScaleMode,
    /// Font for text.
    pub font: Option<Rc<dyn Font>>,
    /// Text colour.
    pub text_color: Color,
    /// Shadow colour, used when `text_shadowed` is set.
    pub text_shadow_color: Color,
    /// Draws a drop shadow under text.
    pub text_shadowed: bool,
    /// Underlines text.
    pub text_underline: bool,
    /// Horizontal text alignment.
    pub text_align_horizontal: HorizontalAlign,
    /// Vertical text alignment.
    pub text_align_vertical: VerticalAlign,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            margin: Border::ZERO,
            fixed_width: 0,
            fixed_height: 0,
            min_width: 0,
            min_height: 0,
            max_width: LARGE_INT,
            max_height: LARGE_INT,
            align_horizontal: HorizontalAlign::Center,
            align_vertical: VerticalAlign::Middle,
            background: None,
            background_border: Border::ZERO,
            background_scale_mode: ScaleMode::Stretch,
            texture_scale_mode: ScaleMode::Stretch,
            font: None,
            text_color: Color::WHITE,
            text_shadow_color: Color::BLACK,
            text_shadowed: false,
            text_underline: false,
            text_align_horizontal: HorizontalAlign::Center,
            text_align_vertical: VerticalAlign::Middle,
        }
    }
}

impl Style {
    /// Applies fixed size, or min/max clamping, to `size`. A fixed extent overrides the bounds entirely.
    pub fn constrain_size(&self, size: Dimensioni) -> Dimensioni {
        let width = if self.fixed_width != 0 { self.fixed_width } else { clamp_i32(size.width, self.min_width, self.max_width) };
        let height = if self.fixed_height != 0 { self.fixed_height } else { clamp_i32(size.height, self.min_height, self.max_height) };
        Dimensioni::new(width, height)
    }

    /// Constrains the size of `region`, optionally caps it at `max_size`, and aligns the
    /// result inside the original region. Invalid regions are returned unchanged.
    pub fn apply_to_region(&self, region: Rect, max_size: Option<Dimensioni>) -> Rect {
        if !region.is_valid() {
            return region;
        }
        let mut size = self.constrain_size(region.size());
        if let Some(max_size) = max_size {
            size = Dimensioni::new(size.width.min(max_size.width), size.height.min(max_size.height));
        }
        let x = region.min_x + self.align_horizontal.offset(size.width, region.width());
        let y = region.min_y + self.align_vertical.offset(size.height, region.height());
        Rect::from_min_and_size(x, y, size.width, size.height)
    }
}

/// Resolves styles for widgets. Skins are opaque to the canvas beyond this lookup.
pub trait Skin {
    /// Returns the style for `(family, type_tag, part, mode)`.
    fn style_for(&self, family: &str, type_tag: &str, part: &str, mode: &str) -> Rc<Style>;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Lookup key of a [`MapSkin`] entry; empty strings act as wildcards.
pub struct StyleKey {
    /// Family name.
    pub family: String,
    /// Widget type tag.
    pub type_tag: String,
    /// Part name.
    pub part: String,
    /// Mode name.
    pub mode: String,
}

impl StyleKey {
    /// Creates a key; pass `""` for any component that should match everything.
    pub fn new(family: &str, type_tag: &str, part: &str, mode: &str) -> Self {
        Self { family: family.to_string(), type_tag: type_tag.to_string(), part: part.to_string(), mode: mode.to_string() }
    }
}

/// Skin backed by a table of styles with wildcard fallback.
///
/// A lookup tries the most specific key first and relaxes components right to left
/// (mode, part, type, family) until an entry is found, then falls back to the base style.
pub struct MapSkin {
    base: Rc<Style>,
    styles: HashMap<StyleKey, Rc<Style>>,
}

impl MapSkin {
    /// Creates a skin where every lookup resolves to `base`.
    pub fn new(base: Style) -> Self { Self { base: Rc::new(base), styles: HashMap::new() } }

    /// Adds or replaces an entry.
    pub fn with_style(mut self, key: StyleKey, style: Style) -> Self {
        self.styles.insert(key, Rc::new(style));
        self
    }

    /// Style returned when nothing more specific matches.
    pub fn base(&self) -> &Rc<Style> { &self.base }
}

impl Skin for MapSkin {
    fn style_for(&self, family: &str, type_tag: &str, part: &str, mode: &str) -> Rc<Style> {
        for f in [family, ""] {
            for t in [type_tag, ""] {
                for p in [part, ""] {
                    for m in [mode, ""] {
                        if let Some(style) = self.styles.get(&StyleKey::new(f, t, p, m)) {
                            return style.clone();
                        }
                    }
                }
            }
        }
        self.base.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect_eq(actual: Rect, expected: (i32, i32, i32, i32)) {
        assert_eq!((actual.min_x, actual.min_y, actual.width(), actual.height()), expected);
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(HorizontalAlign::Left.offset(10, 100), 0);
        assert_eq!(HorizontalAlign::Center.offset(10, 100), 45);
        assert_eq!(HorizontalAlign::Right.offset(10, 100), 90);
        assert_eq!(VerticalAlign::Middle.offset(11, 100), 44);
        assert_eq!(VerticalAlign::Bottom.offset(100, 10), -90);
    }

    #[test]
    fn fixed_size_overrides_bounds() {
        let style = Style { fixed_width: 40, min_width: 100, max_height: 30, ..Style::default() };
        let size = style.constrain_size(Dimensioni::new(10, 90));
        assert_eq!((size.width, size.height), (40, 30));
    }

    #[test]
    fn apply_to_region_aligns_inside_the_original() {
        let style = Style { fixed_width: 20, fixed_height: 10, ..Style::default() };
        assert_rect_eq(style.apply_to_region(Rect::from_min_and_size(100, 100, 60, 40), None), (120, 115, 20, 10));

        let style = Style { align_horizontal: HorizontalAlign::Right, align_vertical: VerticalAlign::Top, ..Style::default() };
        assert_rect_eq(
            style.apply_to_region(Rect::from_min_and_size(0, 0, 60, 40), Some(Dimensioni::new(25, 100))),
            (35, 0, 25, 40),
        );

        let inverted = Rect::new(10, 10, 0, 0);
        assert_eq!(style.apply_to_region(inverted, None), inverted);
    }

    #[test]
    fn apply_to_region_is_idempotent() {
        use rand::{Rng, SeedableRng, rngs::StdRng};
        let mut rng = StdRng::seed_from_u64(42);
        let aligns_h = [HorizontalAlign::Left, HorizontalAlign::Center, HorizontalAlign::Right];
        let aligns_v = [VerticalAlign::Top, VerticalAlign::Middle, VerticalAlign::Bottom];
        for _ in 0..500 {
            let style = Style {
                fixed_width: if rng.random_bool(0.3) { rng.random_range(1..300) } else { 0 },
                fixed_height: if rng.random_bool(0.3) { rng.random_range(1..300) } else { 0 },
                min_width: rng.random_range(0..100),
                min_height: rng.random_range(0..100),
                max_width: rng.random_range(50..400),
                max_height: rng.random_range(50..400),
                align_horizontal: aligns_h[rng.random_range(0..3)],
                align_vertical: aligns_v[rng.random_range(0..3)],
                ..Style::default()
            };
            let region = Rect::from_min_and_size(rng.random_range(-500..500), rng.random_range(-500..500), rng.random_range(0..600), rng.random_range(0..600));
            let max_size = if rng.random_bool(0.5) { Some(Dimensioni::new(rng.random_range(0..500), rng.random_range(0..500))) } else { None };
            let once = style.apply_to_region(region, max_size);
            assert_eq!(style.apply_to_region(once, max_size), once);
        }
    }

    #[test]
    fn map_skin_relaxes_from_mode_to_family() {
        let base = Style::default();
        let buttons = Style { fixed_width: 1, ..Style::default() };
        let hovered = Style { fixed_width: 2, ..Style::default() };
        let menu = Style { fixed_width: 3, ..Style::default() };
        let skin = MapSkin::new(base)
            .with_style(StyleKey::new("", "button", "", ""), buttons)
            .with_style(StyleKey::new("", "button", BASE_PART, HOVER_MODE), hovered)
            .with_style(StyleKey::new("menu", "", "", ""), menu);

        assert_eq!(skin.style_for("", "button", BASE_PART, DEFAULT_MODE).fixed_width, 1);
        assert_eq!(skin.style_for("", "button", BASE_PART, HOVER_MODE).fixed_width, 2);
        assert_eq!(skin.style_for("menu", "button", BASE_PART, HOVER_MODE).fixed_width, 3);
        assert_eq!(skin.style_for("", "label", BASE_PART, DEFAULT_MODE).fixed_width, 0);
    }
}
