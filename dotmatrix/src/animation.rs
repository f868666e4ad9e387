//! Scrolling text for dot matrix displays
//!
//! A [`Marquee`] redraws its whole text one column further left on every
//! step and starts over from just past the right edge once the last glyph
//! has left the display.

use crate::widget::DotMatrix;

/// Columns of blank space before the text re-enters on the right.
pub const REENTRY_GAP: i32 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Marquee {
    text: String,
    /// Column of the first glyph's left edge.
    x: i32,
    /// Row of the glyphs' top edge.
    y: i32,
    /// Glyph colors, cycled by character index.
    colors: Vec<u32>,
}

impl Marquee {
    /// Text starting just off the right edge of a `cols`-wide display.
    pub fn new(text: impl Into<String>, cols: usize, y: i32, colors: Vec<u32>) -> Self {
        Self {
            text: text.into(),
            x: cols as i32 + REENTRY_GAP,
            y,
            colors,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and restart from the right edge.
    pub fn set_text(&mut self, text: impl Into<String>, cols: usize) {
        self.text = text.into();
        self.x = cols as i32 + REENTRY_GAP;
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    /// Text width in dots for a font `char_width` dots wide.
    pub fn width_in_dots(&self, char_width: usize) -> i32 {
        (self.text.chars().count() * char_width) as i32
    }

    fn color_for(&self, index: usize) -> u32 {
        if self.colors.is_empty() {
            return crate::color::DotColors::ACTIVE;
        }
        self.colors[index % self.colors.len()]
    }

    /// Draw the text at its current position, then move one column left.
    pub fn step(&mut self, matrix: &mut DotMatrix) {
        let char_width = matrix.matrix_font().character_width();
        if self.x < -self.width_in_dots(char_width) {
            self.x = matrix.cols() as i32 + REENTRY_GAP;
        }
        matrix.set_text_at(&self.text, self.x, self.y, |i| self.color_for(i));
        self.x -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DotColors;
    use crate::config::DotMatrixConfig;

    fn matrix(cols: usize, rows: usize) -> DotMatrix {
        DotMatrix::new(DotMatrixConfig::default().cols_and_rows(cols, rows)).unwrap()
    }

    #[test]
    fn test_starts_past_right_edge() {
        let m = Marquee::new("hi", 16, 0, vec![DotColors::LIME]);
        assert_eq!(m.x(), 16 + REENTRY_GAP);
        assert_eq!(m.width_in_dots(8), 16);
    }

    #[test]
    fn test_step_moves_left_and_draws() {
        let mut display = matrix(16, 8);
        let mut m = Marquee::new("_", 16, 0, vec![DotColors::LIME]);
        for _ in 0..=REENTRY_GAP + 8 {
            m.step(&mut display);
        }
        // '_' lands with its left edge on column 8 on the last step
        assert_eq!(m.x(), 7);
        assert!((8..16).all(|x| display.color_at(x, 7) == Some(DotColors::LIME)));
        assert_eq!(display.color_at(7, 7), Some(display.inactive_color()));
    }

    #[test]
    fn test_alternating_colors() {
        let mut display = matrix(16, 8);
        let mut m = Marquee::new("__", 0, 0, vec![DotColors::LIME, DotColors::RED]);
        // x starts at 0 + gap; move it to the left edge first
        while m.x() > 0 {
            m.x -= 1;
        }
        m.step(&mut display);
        assert_eq!(display.color_at(0, 7), Some(DotColors::LIME));
        assert_eq!(display.color_at(8, 7), Some(DotColors::RED));
    }

    #[test]
    fn test_wraps_after_leaving_left_edge() {
        let mut display = matrix(16, 8);
        let mut m = Marquee::new("ab", 16, 0, vec![]);
        let width = m.width_in_dots(8);
        m.x = -width - 1;
        m.step(&mut display);
        // restarted at the right edge, then moved one column
        assert_eq!(m.x(), 16 + REENTRY_GAP - 1);
    }

    #[test]
    fn test_no_colors_falls_back_to_active() {
        let mut display = matrix(8, 8);
        let mut m = Marquee::new("_", 8, 0, vec![]);
        m.x = 0;
        m.step(&mut display);
        assert_eq!(display.color_at(0, 7), Some(DotColors::ACTIVE));
    }
}
