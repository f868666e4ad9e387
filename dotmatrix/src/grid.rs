//! Dot grid model
//!
//! A dense `cols × rows` array of packed colors stored row-major. Writes
//! take signed coordinates because scrolling text routinely lands partly
//! outside the grid; anything out of range is dropped.

use crate::color::DotColors;
use crate::font::{bit_at, MatrixFont};

#[derive(Debug, Clone, PartialEq)]
pub struct DotGrid {
    cols: usize,
    rows: usize,
    cells: Vec<u32>,
    active_color: u32,
    inactive_color: u32,
}

impl Default for DotGrid {
    fn default() -> Self {
        Self::new(32, 32, DotColors::ACTIVE, DotColors::INACTIVE)
    }
}

impl DotGrid {
    /// Create a grid with every cell set to `inactive_color`.
    pub fn new(cols: usize, rows: usize, active_color: u32, inactive_color: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![inactive_color; cols * rows],
            active_color,
            inactive_color,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn active_color(&self) -> u32 {
        self.active_color
    }

    pub fn inactive_color(&self) -> u32 {
        self.inactive_color
    }

    pub fn set_active_color(&mut self, color: u32) {
        self.active_color = color;
    }

    /// Change the "off" color. Every cell is reset to it.
    pub fn set_inactive_color(&mut self, color: u32) {
        self.inactive_color = color;
        self.cells.fill(color);
    }

    /// Reallocate the grid. Returns `false` (and leaves the grid alone) when
    /// either dimension is zero.
    pub fn set_cols_and_rows(&mut self, cols: usize, rows: usize) -> bool {
        if cols == 0 || rows == 0 {
            tracing::warn!(cols, rows, "ignoring empty matrix dimensions");
            return false;
        }
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![self.inactive_color; cols * rows];
        tracing::debug!(cols, rows, "matrix reallocated");
        true
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.cols && y < self.rows).then(|| y * self.cols + x)
    }

    /// Write one cell; out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    pub fn set_pixel_on(&mut self, x: i32, y: i32, on: bool) {
        let color = if on { self.active_color } else { self.inactive_color };
        self.set_pixel(x, y, color);
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.cols && y < self.rows {
            Some(self.cells[y * self.cols + x])
        } else {
            None
        }
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.color_at(x, y) == Some(self.active_color)
    }

    /// Blit a glyph with its top-left corner at `(x, y)`. Set bits become
    /// `color`, clear bits become the inactive color.
    pub fn set_char_at(&mut self, font: &dyn MatrixFont, character: char, x: i32, y: i32, color: u32) {
        self.blit(font, character, x, y, color, true);
    }

    /// Like [`set_char_at`](Self::set_char_at) but clear bits leave the cell
    /// untouched, so the glyph overlays whatever is already there.
    pub fn set_char_at_with_background(
        &mut self,
        font: &dyn MatrixFont,
        character: char,
        x: i32,
        y: i32,
        color: u32,
    ) {
        self.blit(font, character, x, y, color, false);
    }

    fn blit(&mut self, font: &dyn MatrixFont, character: char, pos_x: i32, pos_y: i32, color: u32, clear: bool) {
        let glyph = font.character(character);
        let width = font.character_width();
        for gx in 0..width {
            for gy in 0..font.character_height() {
                let Some((x, y)) = offset(pos_x, gx).zip(offset(pos_y, gy)) else {
                    continue;
                };
                // columns are read mirrored: the high bit is the leftmost dot
                if bit_at(width - 1 - gx, gy, glyph) {
                    self.set_pixel(x, y, color);
                } else if clear {
                    self.set_pixel(x, y, self.inactive_color);
                }
            }
        }
    }

    /// Blit consecutive glyphs starting at `(x, y)`, advancing by the font
    /// width. `color_for` picks the color of the glyph at each index.
    pub fn set_text_at(
        &mut self,
        font: &dyn MatrixFont,
        text: &str,
        x: i32,
        y: i32,
        mut color_for: impl FnMut(usize) -> u32,
    ) {
        let advance = font.character_width();
        for (i, character) in text.chars().enumerate() {
            // the rest of the text lies past i32::MAX
            let Some(glyph_x) = i.checked_mul(advance).and_then(|dx| offset(x, dx)) else {
                break;
            };
            self.set_char_at(font, character, glyph_x, y, color_for(i));
        }
    }

    /// Rotate every row one column to the left; the first column wraps to
    /// the right edge.
    pub fn shift_left(&mut self) {
        if self.cols == 0 {
            return;
        }
        for row in self.cells.chunks_exact_mut(self.cols) {
            row.rotate_left(1);
        }
    }

    pub fn shift_right(&mut self) {
        if self.cols == 0 {
            return;
        }
        for row in self.cells.chunks_exact_mut(self.cols) {
            row.rotate_right(1);
        }
    }

    /// Rotate rows upward; the top row wraps to the bottom.
    pub fn shift_up(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        self.cells.rotate_left(self.cols);
    }

    pub fn shift_down(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        self.cells.rotate_right(self.cols);
    }

    pub fn set_all_on(&mut self) {
        self.cells.fill(self.active_color);
    }

    pub fn set_all_off(&mut self) {
        self.cells.fill(self.inactive_color);
    }
}

/// `origin + delta`, or `None` when the cell cannot be addressed.
fn offset(origin: i32, delta: usize) -> Option<i32> {
    i32::try_from(delta).ok().and_then(|d| origin.checked_add(d))
}
