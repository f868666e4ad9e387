//! Matrix renderer
//!
//! [`draw_matrix`] walks the grid once per frame and fills one shape per
//! cell through a [`DotCanvas`]. Two canvases ship with the crate: an
//! [`EguiCanvas`] for on-screen painting and a [`PixmapCanvas`] backed by
//! `tiny-skia` for headless snapshots.

use std::path::Path;

use egui::{Painter, Pos2, Rect, Shape, Stroke};
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::color::{to_color32, unpack_u8};
use crate::error::{DotMatrixError, Result};
use crate::geometry::DotGeometry;
use crate::grid::DotGrid;

/// Shape used for every dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotShape {
    /// Ellipse inscribed in the dot's rectangle.
    Round,
    #[default]
    Square,
    /// Rectangle with a corner radius of 1/8 of the dot size.
    RoundedRect,
}

impl DotShape {
    pub const ALL: [DotShape; 3] = [DotShape::Round, DotShape::Square, DotShape::RoundedRect];

    pub fn label(self) -> &'static str {
        match self {
            DotShape::Round => "round",
            DotShape::Square => "square",
            DotShape::RoundedRect => "rounded",
        }
    }
}

/// Drawing surface for the renderer. Rectangles are in matrix-local
/// coordinates.
pub trait DotCanvas {
    /// Called once before a full redraw.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: u32);
    fn fill_oval(&mut self, rect: Rect, color: u32);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32);
}

/// Redraw every cell of `grid`, row by row.
pub fn draw_matrix(canvas: &mut dyn DotCanvas, grid: &DotGrid, geometry: &DotGeometry, shape: DotShape) {
    canvas.clear();
    if geometry.is_empty() || grid.cols() == 0 {
        return;
    }
    let cols = grid.cols().min(geometry.cols());
    let rows = grid.rows().min(geometry.rows());
    let radius = geometry.corner_radius();
    for (y, row) in grid.cells().chunks_exact(grid.cols()).take(rows).enumerate() {
        for (x, &color) in row.iter().take(cols).enumerate() {
            let rect = geometry.cell_rect(x, y);
            match shape {
                DotShape::Square => canvas.fill_rect(rect, color),
                DotShape::Round => canvas.fill_oval(rect, color),
                DotShape::RoundedRect => canvas.fill_rounded_rect(rect, radius, color),
            }
        }
    }
}

const OVAL_SEGMENTS: usize = 24;

/// Paints through an egui [`Painter`], offsetting every dot by `origin`.
pub struct EguiCanvas<'a> {
    painter: &'a Painter,
    origin: Pos2,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self { painter, origin }
    }

    fn place(&self, rect: Rect) -> Rect {
        rect.translate(self.origin.to_vec2())
    }
}

impl DotCanvas for EguiCanvas<'_> {
    // egui repaints from scratch every frame
    fn clear(&mut self) {}

    fn fill_rect(&mut self, rect: Rect, color: u32) {
        self.painter.rect_filled(self.place(rect), 0.0, to_color32(color));
    }

    fn fill_oval(&mut self, rect: Rect, color: u32) {
        let rect = self.place(rect);
        let fill = to_color32(color);
        if (rect.width() - rect.height()).abs() < f32::EPSILON {
            self.painter.circle_filled(rect.center(), rect.width() / 2.0, fill);
            return;
        }
        let center = rect.center();
        let radii = rect.size() / 2.0;
        let points = (0..OVAL_SEGMENTS)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::TAU / OVAL_SEGMENTS as f32;
                Pos2::new(center.x + radii.x * angle.cos(), center.y + radii.y * angle.sin())
            })
            .collect();
        self.painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32) {
        self.painter.rect_filled(self.place(rect), radius, to_color32(color));
    }
}

/// Offscreen canvas backed by a `tiny-skia` pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    background: u32,
}

impl PixmapCanvas {
    /// Allocate a `width × height` pixmap cleared to `background`.
    pub fn new(width: u32, height: u32, background: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(DotMatrixError::EmptySnapshot { width, height })?;
        let mut canvas = Self { pixmap, background };
        canvas.clear();
        Ok(canvas)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Unpremultiplied color of one pixel, packed like grid cells.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(crate::color::pack(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|e| DotMatrixError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn paint(color: u32) -> Paint<'static> {
        let [r, g, b, a] = unpack_u8(color);
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn fill_path(&mut self, path: Option<tiny_skia::Path>, color: u32) {
        if let Some(path) = path {
            self.pixmap.fill_path(&path, &Self::paint(color), FillRule::Winding, Transform::identity(), None);
        }
    }
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(rect.min.x, rect.min.y, rect.width(), rect.height())
}

impl DotCanvas for PixmapCanvas {
    fn clear(&mut self) {
        let [r, g, b, a] = unpack_u8(self.background);
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    fn fill_rect(&mut self, rect: Rect, color: u32) {
        if let Some(rect) = skia_rect(rect) {
            self.pixmap.fill_rect(rect, &Self::paint(color), Transform::identity(), None);
        }
    }

    fn fill_oval(&mut self, rect: Rect, color: u32) {
        let path = skia_rect(rect).and_then(PathBuilder::from_oval);
        self.fill_path(path, color);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32) {
        let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
        let (left, top, right, bottom) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);
        let mut pb = PathBuilder::new();
        pb.move_to(left + r, top);
        pb.line_to(right - r, top);
        pb.quad_to(right, top, right, top + r);
        pb.line_to(right, bottom - r);
        pb.quad_to(right, bottom, right - r, bottom);
        pb.line_to(left + r, bottom);
        pb.quad_to(left, bottom, left, bottom - r);
        pb.line_to(left, top + r);
        pb.quad_to(left, top, left + r, top);
        pb.close();
        self.fill_path(pb.finish(), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spacing;
    use egui::Vec2;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Rect(Rect, u32),
        Oval(Rect, u32),
        Rounded(Rect, f32, u32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl DotCanvas for Recorder {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn fill_rect(&mut self, rect: Rect, color: u32) {
            self.calls.push(Call::Rect(rect, color));
        }
        fn fill_oval(&mut self, rect: Rect, color: u32) {
            self.calls.push(Call::Oval(rect, color));
        }
        fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: u32) {
            self.calls.push(Call::Rounded(rect, radius, color));
        }
    }

    fn setup() -> (DotGrid, DotGeometry) {
        let mut grid = DotGrid::new(3, 2, 1, 0);
        grid.set_pixel(2, 1, 5);
        let spacing = Spacing { use_spacer: true, spacer_size_factor: 0.1, square_dots: true };
        (grid, DotGeometry::compute(30.0, 20.0, 3, 2, spacing))
    }

    #[test]
    fn test_square_row_major() {
        let (grid, geometry) = setup();
        let mut rec = Recorder::default();
        draw_matrix(&mut rec, &grid, &geometry, DotShape::Square);
        assert_eq!(rec.calls.len(), 7);
        assert_eq!(rec.calls[0], Call::Clear);
        let size = Vec2::new(8.0, 8.0);
        assert_eq!(rec.calls[1], Call::Rect(Rect::from_min_size(Pos2::new(1.0, 1.0), size), 0));
        assert_eq!(rec.calls[2], Call::Rect(Rect::from_min_size(Pos2::new(11.0, 1.0), size), 0));
        assert_eq!(rec.calls[4], Call::Rect(Rect::from_min_size(Pos2::new(1.0, 11.0), size), 0));
        assert_eq!(rec.calls[6], Call::Rect(Rect::from_min_size(Pos2::new(21.0, 11.0), size), 5));
    }

    #[test]
    fn test_shape_variants() {
        let (grid, geometry) = setup();
        let mut rec = Recorder::default();
        draw_matrix(&mut rec, &grid, &geometry, DotShape::Round);
        assert!(rec.calls[1..].iter().all(|c| matches!(c, Call::Oval(..))));

        let mut rec = Recorder::default();
        draw_matrix(&mut rec, &grid, &geometry, DotShape::RoundedRect);
        assert!(rec.calls[1..]
            .iter()
            .all(|c| matches!(c, Call::Rounded(_, radius, _) if *radius == 1.25)));
    }

    #[test]
    fn test_empty_geometry_only_clears() {
        let (grid, _) = setup();
        let mut rec = Recorder::default();
        draw_matrix(&mut rec, &grid, &DotGeometry::default(), DotShape::Square);
        assert_eq!(rec.calls, vec![Call::Clear]);
    }

    #[test]
    fn test_pixmap_canvas_paints_cells() {
        let mut grid = DotGrid::new(2, 1, 0xFFFF_0000, 0xFF00_00FF);
        grid.set_pixel_on(0, 0, true);
        let spacing = Spacing { use_spacer: true, spacer_size_factor: 0.2, square_dots: true };
        let geometry = DotGeometry::compute(20.0, 10.0, 2, 1, spacing);
        let mut canvas = PixmapCanvas::new(20, 10, 0).unwrap();
        draw_matrix(&mut canvas, &grid, &geometry, DotShape::Square);

        assert_eq!(canvas.pixel(5, 5), Some(0xFFFF_0000));
        assert_eq!(canvas.pixel(15, 5), Some(0xFF00_00FF));
        // spacer gap between the two dots stays transparent
        assert_eq!(canvas.pixel(10, 5).map(|p| p >> 24), Some(0));
    }

    #[test]
    fn test_pixmap_rounded_and_round_fill_centers() {
        let grid = DotGrid::new(1, 1, 0xFFFF_FFFF, 0xFF00_FF00);
        let geometry = DotGeometry::compute(40.0, 40.0, 1, 1, Spacing::default());
        for shape in [DotShape::Round, DotShape::RoundedRect] {
            let mut canvas = PixmapCanvas::new(40, 40, 0).unwrap();
            draw_matrix(&mut canvas, &grid, &geometry, shape);
            assert_eq!(canvas.pixel(20, 20), Some(0xFF00_FF00));
            // the corner is cut away by both shapes
            assert_eq!(canvas.pixel(2, 2).map(|p| p >> 24), Some(0));
        }
    }

    #[test]
    fn test_pixmap_rejects_empty() {
        assert!(matches!(
            PixmapCanvas::new(0, 10, 0),
            Err(DotMatrixError::EmptySnapshot { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_encode_png_signature() {
        let canvas = PixmapCanvas::new(4, 4, 0xFF00_0000).unwrap();
        let png = canvas.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
