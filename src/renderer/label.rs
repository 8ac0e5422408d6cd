//! Block label layout
//!
//! Picks a font size that fits the block and word-wraps the display name.
//! Measurement goes through [`TextMeasure`] so the layout can be computed
//! against a real canvas or a fixed-width stand-in in tests. The string that
//! gets measured is always the string that gets drawn.

use glam::Vec2;

use crate::consts::{LABEL_LINE_HEIGHT, LABEL_MAX_FONT_PX, LABEL_MIN_FONT_PX, LABEL_PADDING};

/// Something that can measure rendered text
pub trait TextMeasure {
    /// Switch the font used by later `width` calls
    fn set_font_px(&mut self, px: f32);
    /// Rendered width of `text` in the current font
    fn width(&self, text: &str) -> f32;
}

/// One line of a laid-out label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLine {
    pub text: String,
    /// Center of the line
    pub pos: Vec2,
}

/// Label ready to draw (center-aligned, middle baseline)
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub font_px: f32,
    pub lines: Vec<LabelLine>,
}

/// Largest font size (16px down to 10px) at which `text` fits in
/// `box_width` minus padding. Leaves `measure` set to the chosen size.
pub fn fit_font_size<M: TextMeasure>(measure: &mut M, text: &str, box_width: f32) -> f32 {
    let max_width = box_width - LABEL_PADDING;
    let mut size = LABEL_MAX_FONT_PX;
    measure.set_font_px(size);
    while measure.width(text) > max_width && size > LABEL_MIN_FONT_PX {
        size -= 1.0;
        measure.set_font_px(size);
    }
    size
}

/// Greedy word wrap on spaces. A word wider than `max_width` gets a line of
/// its own rather than being split.
pub fn wrap_lines<M: TextMeasure>(measure: &M, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure.width(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Full layout for a label inside the box at `pos` (top-left) of `size`
pub fn layout_label<M: TextMeasure>(
    measure: &mut M,
    text: &str,
    pos: Vec2,
    size: Vec2,
) -> LabelLayout {
    let font_px = fit_font_size(measure, text, size.x);
    let lines = wrap_lines(measure, text, size.x - LABEL_PADDING);

    let center = pos + size / 2.0;
    // Vertically center the whole block of lines
    let first_y = center.y - (lines.len().saturating_sub(1)) as f32 * LABEL_LINE_HEIGHT / 2.0;

    let lines = lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| LabelLine {
            text,
            pos: Vec2::new(center.x, first_y + i as f32 * LABEL_LINE_HEIGHT),
        })
        .collect();

    LabelLayout { font_px, lines }
}
