//! Dot sizing and hit-testing
//!
//! All coordinates are local to the matrix canvas: `(0, 0)` is the top-left
//! corner of cell `(0, 0)`'s slot, before the spacer inset.

use egui::{Pos2, Rect, Vec2};

pub const DEFAULT_SPACER_SIZE_FACTOR: f32 = 0.05;
pub const MAX_SPACER_SIZE_FACTOR: f32 = 0.2;
/// Corner radius of rounded dots relative to the dot size.
pub const CORNER_RADIUS_FACTOR: f32 = 0.125;

/// Clamp a spacer factor into `0.0..=0.2`. NaN becomes the lower bound.
pub fn clamp_spacer_factor(factor: f32) -> f32 {
    if factor.is_nan() {
        return 0.0;
    }
    factor.clamp(0.0, MAX_SPACER_SIZE_FACTOR)
}

/// Spacing options that feed the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub use_spacer: bool,
    pub spacer_size_factor: f32,
    pub square_dots: bool,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            use_spacer: true,
            spacer_size_factor: DEFAULT_SPACER_SIZE_FACTOR,
            square_dots: true,
        }
    }
}

/// Derived per-dot measurements for one widget size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DotGeometry {
    cols: usize,
    rows: usize,
    dot_size: f32,
    dot_width: f32,
    dot_height: f32,
    spacer: f32,
}

impl DotGeometry {
    /// Lay out `cols × rows` dots inside `width × height` (insets already
    /// removed). A non-positive area or an empty grid yields zero geometry.
    pub fn compute(width: f32, height: f32, cols: usize, rows: usize, spacing: Spacing) -> Self {
        if !(width > 0.0 && height > 0.0) || cols == 0 || rows == 0 {
            return Self { cols, rows, ..Self::default() };
        }
        let col_width = width / cols as f32;
        let row_height = height / rows as f32;
        let dot_size = col_width.min(row_height);
        let spacer = if spacing.use_spacer {
            dot_size * clamp_spacer_factor(spacing.spacer_size_factor)
        } else {
            0.0
        };
        let (dot_width, dot_height) = if spacing.square_dots {
            (dot_size, dot_size)
        } else {
            (col_width, row_height)
        };
        Self { cols, rows, dot_size, dot_width, dot_height, spacer }
    }

    pub fn is_empty(&self) -> bool {
        self.dot_size <= 0.0
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Smaller of the column width and row height.
    pub fn dot_size(&self) -> f32 {
        self.dot_size
    }

    pub fn dot_width(&self) -> f32 {
        self.dot_width
    }

    pub fn dot_height(&self) -> f32 {
        self.dot_height
    }

    pub fn spacer(&self) -> f32 {
        self.spacer
    }

    /// Size of the painted part of a dot, after the spacer on both sides.
    pub fn drawable_size(&self) -> Vec2 {
        Vec2::new(
            (self.dot_width - 2.0 * self.spacer).max(0.0),
            (self.dot_height - 2.0 * self.spacer).max(0.0),
        )
    }

    pub fn corner_radius(&self) -> f32 {
        self.dot_size * CORNER_RADIUS_FACTOR
    }

    /// Canvas size actually covered by dots.
    pub fn matrix_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * self.dot_width, self.rows as f32 * self.dot_height)
    }

    /// Painted rectangle of cell `(x, y)`.
    pub fn cell_rect(&self, x: usize, y: usize) -> Rect {
        let min = Pos2::new(
            x as f32 * self.dot_width + self.spacer,
            y as f32 * self.dot_height + self.spacer,
        );
        Rect::from_min_size(min, self.drawable_size())
    }

    /// Find the cell whose painted rectangle contains `pos` (edges
    /// inclusive). Cells are scanned row by row and the first match wins;
    /// points in the gaps between dots hit nothing.
    pub fn hit_test(&self, pos: Pos2) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        for y in 0..self.rows {
            for x in 0..self.cols {
                let rect = self.cell_rect(x, y);
                if pos.x >= rect.min.x && pos.x <= rect.max.x && pos.y >= rect.min.y && pos.y <= rect.max.y {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spacing(factor: f32, square: bool) -> Spacing {
        Spacing { use_spacer: true, spacer_size_factor: factor, square_dots: square }
    }

    #[test]
    fn test_clamp_spacer_factor() {
        assert_eq!(clamp_spacer_factor(-1.0), 0.0);
        assert_eq!(clamp_spacer_factor(0.1), 0.1);
        assert_eq!(clamp_spacer_factor(0.5), MAX_SPACER_SIZE_FACTOR);
        assert_eq!(clamp_spacer_factor(f32::NAN), 0.0);
    }

    #[test]
    fn test_square_dots_use_smaller_side() {
        let g = DotGeometry::compute(200.0, 50.0, 10, 5, spacing(0.1, true));
        assert_eq!(g.dot_size(), 10.0);
        assert_eq!(g.dot_width(), 10.0);
        assert_eq!(g.dot_height(), 10.0);
        assert_eq!(g.spacer(), 1.0);
        assert_eq!(g.drawable_size(), Vec2::new(8.0, 8.0));
        assert_eq!(g.matrix_size(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_free_aspect_dots() {
        let g = DotGeometry::compute(200.0, 50.0, 10, 5, spacing(0.1, false));
        assert_eq!(g.dot_width(), 20.0);
        assert_eq!(g.dot_height(), 10.0);
        assert_eq!(g.spacer(), 1.0);
        assert_eq!(g.matrix_size(), Vec2::new(200.0, 50.0));
        assert_eq!(g.cell_rect(1, 2), Rect::from_min_size(Pos2::new(21.0, 21.0), Vec2::new(18.0, 8.0)));
    }

    #[test]
    fn test_no_spacer() {
        let g = DotGeometry::compute(100.0, 100.0, 10, 10, Spacing { use_spacer: false, ..Spacing::default() });
        assert_eq!(g.spacer(), 0.0);
        assert_eq!(g.drawable_size(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_spacer_never_exceeds_half_dot() {
        for factor in [-3.0, 0.0, 0.05, 0.2, 0.25, 7.0] {
            let g = DotGeometry::compute(123.0, 77.0, 9, 4, spacing(factor, false));
            assert!(g.spacer() <= g.dot_size() / 2.0);
            assert!(g.drawable_size().x >= 0.0 && g.drawable_size().y >= 0.0);
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(DotGeometry::compute(0.0, 100.0, 4, 4, Spacing::default()).is_empty());
        assert!(DotGeometry::compute(100.0, -5.0, 4, 4, Spacing::default()).is_empty());
        assert!(DotGeometry::compute(100.0, 100.0, 0, 4, Spacing::default()).is_empty());
        assert!(DotGeometry::compute(f32::NAN, 100.0, 4, 4, Spacing::default()).is_empty());
        let g = DotGeometry::compute(0.0, 0.0, 4, 4, Spacing::default());
        assert_eq!(g.hit_test(Pos2::ZERO), None);
    }

    #[test]
    fn test_corner_radius() {
        let g = DotGeometry::compute(80.0, 80.0, 10, 10, Spacing::default());
        assert_eq!(g.corner_radius(), 1.0);
    }

    #[test]
    fn test_hit_center_of_every_cell() {
        for factor in [0.0, 0.05, 0.1, 0.2] {
            for square in [true, false] {
                let g = DotGeometry::compute(317.0, 91.0, 13, 7, spacing(factor, square));
                for y in 0..7 {
                    for x in 0..13 {
                        let center = g.cell_rect(x, y).center();
                        assert_eq!(g.hit_test(center), Some((x, y)), "factor {factor} square {square}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_hit_gap_and_outside() {
        let g = DotGeometry::compute(100.0, 100.0, 10, 10, spacing(0.2, true));
        // slot 0 spans 0..10, painted 2..8
        assert_eq!(g.hit_test(Pos2::new(1.0, 5.0)), None);
        assert_eq!(g.hit_test(Pos2::new(9.0, 5.0)), None);
        assert_eq!(g.hit_test(Pos2::new(2.0, 2.0)), Some((0, 0)));
        assert_eq!(g.hit_test(Pos2::new(8.0, 8.0)), Some((0, 0)));
        assert_eq!(g.hit_test(Pos2::new(-1.0, 5.0)), None);
        assert_eq!(g.hit_test(Pos2::new(150.0, 5.0)), None);
    }

    #[test]
    fn test_hit_shared_edge_prefers_first_cell() {
        let g = DotGeometry::compute(40.0, 40.0, 4, 4, Spacing { use_spacer: false, ..Spacing::default() });
        assert_eq!(g.hit_test(Pos2::new(10.0, 10.0)), Some((0, 0)));
        assert_eq!(g.hit_test(Pos2::new(10.5, 10.0)), Some((1, 0)));
    }
}
