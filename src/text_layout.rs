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

/// First character of the private-use range that encodes inline colours.
pub const FIRST_COLOR: char = '\u{E000}';
/// Pops the innermost inline colour.
pub const RESET_COLOR: char = '\u{F000}';

/// `true` for characters that change the text colour instead of being drawn.
pub fn is_color_char(c: char) -> bool { (FIRST_COLOR..=RESET_COLOR).contains(&c) }

/// Encodes a colour as an inline escape character, keeping 4 bits per channel.
pub fn encode_color(color: Color) -> char {
    let packed = ((color.r as u32 & 0xF0) << 4) | (color.g as u32 & 0xF0) | (color.b as u32 >> 4);
    char::from_u32(FIRST_COLOR as u32 + packed).unwrap_or(RESET_COLOR)
}

/// Decodes an escape produced by [`encode_color`]. Returns `None` for [`RESET_COLOR`] and ordinary characters.
pub fn decode_color(c: char) -> Option<Color> {
    if c < FIRST_COLOR || c >= RESET_COLOR {
        return None;
    }
    let packed = c as u32 - FIRST_COLOR as u32;
    let nibble = |shift: u32| (((packed >> shift) & 0xF) as u8) * 17;
    Some(color(nibble(8), nibble(4), nibble(0), 255))
}

/// Removes every colour escape from `text`.
pub fn strip_color_codes(text: &str) -> String { text.chars().filter(|c| !is_color_char(*c)).collect() }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Byte range of one laid-out line inside the source text, with its measured width.
pub struct TextLine {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Width in pixels, colour escapes excluded.
    pub width: i32,
}

fn push_wrapped_line(lines: &mut Vec<TextLine>, buf: &str, line_start: usize, line_end: usize, max_width: Option<i32>, font: &dyn Font) {
    let line = &buf[line_start..line_end];
    let max_width = match max_width {
        Some(w) if w > 0 && !line.is_empty() => w,
        _ => {
            lines.push(TextLine { start: line_start, end: line_end, width: font.width(line) });
            return;
        }
    };

    let mut offset = 0;
    let mut seg_start = 0;
    let mut seg_width = 0;
    for word in line.split_inclusive(' ') {
        let word_width = font.width(word);
        if seg_width > 0 && seg_width + word_width > max_width {
            lines.push(TextLine { start: line_start + seg_start, end: line_start + offset, width: seg_width });
            seg_start = offset;
            seg_width = 0;
        }
        seg_width += word_width;
        offset += word.len();
    }

    lines.push(TextLine { start: line_start + seg_start, end: line_end, width: seg_width });
}

/// Splits `buf` into lines on `'\n'`, word-wrapping each paragraph to `max_width` when given.
///
/// Always returns at least one line.
pub fn build_text_lines(font: &dyn Font, buf: &str, max_width: Option<i32>) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    for (idx, ch) in buf.char_indices() {
        if ch == '\n' {
            push_wrapped_line(&mut lines, buf, line_start, idx, max_width, font);
            line_start = idx + ch.len_utf8();
        }
    }
    push_wrapped_line(&mut lines, buf, line_start, buf.len(), max_width, font);
    lines
}

#[derive(Clone, Debug, PartialEq)]
/// A single-colour piece of text placed at an absolute position.
pub struct TextRun {
    /// Text without colour escapes.
    pub text: String,
    /// Left edge of the run.
    pub x: i32,
    /// Top of the line the run sits on.
    pub y: i32,
    /// Colour in effect for the run.
    pub color: Color,
}

/// Lays out text containing inline colour escapes into positioned single-colour runs.
///
/// Every escape pushes a colour and [`RESET_COLOR`] pops one; the colour stack carries over
/// line breaks. Each line is aligned horizontally inside `region`, and the block of lines is
/// aligned vertically.
pub fn layout_colored_text(
    font: &dyn Font,
    text: &str,
    region: Rect,
    h_align: HorizontalAlign,
    v_align: VerticalAlign,
    base_color: Color,
) -> Vec<TextRun> {
    let lines = build_text_lines(font, text, Some(region.width()));
    let line_height = font.line_height();
    let block_height = line_height.saturating_mul(lines.len() as i32);

    let mut runs = Vec::new();
    let mut colors: Vec<Color> = Vec::new();
    let mut y = region.min_y + v_align.offset(block_height, region.height());
    for line in &lines {
        let mut x = region.min_x + h_align.offset(line.width, region.width());
        let mut run = String::new();
        for ch in text[line.start..line.end].chars() {
            if !is_color_char(ch) {
                run.push(ch);
                continue;
            }
            if !run.is_empty() {
                let width = font.width(&run);
                let color = colors.last().copied().unwrap_or(base_color);
                runs.push(TextRun { text: std::mem::take(&mut run), x, y, color });
                x += width;
            }
            match decode_color(ch) {
                Some(c) => colors.push(c),
                None => {
                    colors.pop();
                }
            }
        }
        if !run.is_empty() {
            let color = colors.last().copied().unwrap_or(base_color);
            runs.push(TextRun { text: run, x, y, color });
        }
        y += line_height;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> BitmapFont { BitmapFont::new(8, 10) }

    #[test]
    fn color_escape_keeps_high_nibbles() {
        let c = encode_color(color(0xFF, 0x80, 0x1F, 255));
        assert!(is_color_char(c));
        let back = decode_color(c).unwrap();
        assert_eq!((back.r, back.g, back.b, back.a), (0xFF, 0x88, 0x11, 255));
        assert!(decode_color(RESET_COLOR).is_none());
        assert!(decode_color('a').is_none());
    }

    #[test]
    fn widths_ignore_color_codes() {
        let f = font();
        let red = encode_color(color(255, 0, 0, 255));
        let text = format!("ab{red}cd{RESET_COLOR}");
        assert_eq!(f.width(&text), 32);
        assert_eq!(strip_color_codes(&text), "abcd");
    }

    #[test]
    fn wraps_words_and_splits_newlines() {
        let f = font();
        let text = "aaa bbb ccc\ndd";
        let lines = build_text_lines(&f, text, Some(64));
        let parts: Vec<&str> = lines.iter().map(|l| &text[l.start..l.end]).collect();
        assert_eq!(parts, vec!["aaa bbb ", "ccc", "dd"]);
        assert_eq!(lines[0].width, 64);
        assert_eq!(build_text_lines(&f, "", None).len(), 1);
    }

    #[test]
    fn runs_follow_the_color_stack() {
        let f = font();
        let red = color(255, 0, 0, 255);
        let blue = color(0, 0, 255, 255);
        let white = color(255, 255, 255, 255);
        let text = format!("a{}b{}c{}d{}e", encode_color(red), encode_color(blue), RESET_COLOR, RESET_COLOR);
        let runs = layout_colored_text(&f, &text, Rect::from_min_and_size(10, 20, 400, 100), HorizontalAlign::Left, VerticalAlign::Top, white);
        let summary: Vec<(&str, i32, Color)> = runs.iter().map(|r| (r.text.as_str(), r.x, r.color)).collect();
        assert_eq!(summary, vec![("a", 10, white), ("b", 18, red), ("c", 26, blue), ("d", 34, red), ("e", 42, white)]);
        assert!(runs.iter().all(|r| r.y == 20));
    }

    #[test]
    fn color_carries_across_lines_and_alignment_applies_per_line() {
        let f = font();
        let green = color(0, 255, 0, 255);
        let text = format!("{}ab\ncccc", encode_color(green));
        let runs = layout_colored_text(&f, &text, Rect::from_min_and_size(0, 0, 100, 100), HorizontalAlign::Right, VerticalAlign::Middle, color(0, 0, 0, 255));
        assert_eq!(runs.len(), 2);
        assert_eq!((runs[0].x, runs[0].y, runs[0].color), (84, 40, green));
        assert_eq!((runs[1].x, runs[1].y, runs[1].color), (68, 50, green));
    }
}
