//! The `DotMatrix` widget
//!
//! Owns the grid, the layout and the listeners. Hosts feed it two inputs,
//! a size change and a pointer press; [`egui::Widget`] is implemented for
//! `&mut DotMatrix` so the usual entry point is `ui.add(&mut matrix)`.

use std::path::Path;
use std::sync::Arc;

use egui::{Painter, Pos2, Rect, Response, Sense, Ui, Vec2, Widget};

use crate::config::{DotMatrixConfig, Size};
use crate::error::Result;
use crate::event::{DotMatrixEvent, ListenerId, Listeners};
use crate::font::{MatrixFont, MatrixFont8x8};
use crate::geometry::{clamp_spacer_factor, DotGeometry, Spacing};
use crate::grid::DotGrid;
use crate::render::{draw_matrix, DotShape, EguiCanvas, PixmapCanvas};

static DEFAULT_FONT: MatrixFont8x8 = MatrixFont8x8::INSTANCE;

pub struct DotMatrix {
    grid: DotGrid,
    font: Option<Arc<dyn MatrixFont>>,
    shape: DotShape,
    spacing: Spacing,
    pref_size: Size,
    min_size: Option<Size>,
    max_size: Option<Size>,
    padding: f32,
    fill_available: bool,
    /// Widget size from the last resize, padding included.
    size: Vec2,
    geometry: DotGeometry,
    listeners: Listeners,
    events: Vec<DotMatrixEvent>,
    needs_redraw: bool,
    disposed: bool,
}

impl Default for DotMatrix {
    fn default() -> Self {
        Self::from_valid_config(DotMatrixConfig::default())
    }
}

impl std::fmt::Debug for DotMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DotMatrix")
            .field("cols", &self.grid.cols())
            .field("rows", &self.grid.rows())
            .field("shape", &self.shape)
            .field("geometry", &self.geometry)
            .field("listeners", &self.listeners)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl DotMatrix {
    /// Build a matrix from a validated configuration.
    pub fn new(config: DotMatrixConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DotMatrixConfig) -> Self {
        Self {
            grid: DotGrid::new(config.cols, config.rows, config.active_color, config.inactive_color),
            font: None,
            shape: config.dot_shape,
            spacing: config.spacing(),
            pref_size: config.pref_size,
            min_size: config.min_size,
            max_size: config.max_size,
            padding: config.padding,
            fill_available: config.fill_available,
            size: Vec2::ZERO,
            geometry: DotGeometry::default(),
            listeners: Listeners::new(),
            events: Vec::new(),
            needs_redraw: true,
            disposed: false,
        }
    }

    /// Replace the font used by the character methods.
    pub fn with_font(mut self, font: Arc<dyn MatrixFont>) -> Self {
        self.set_matrix_font(font);
        self
    }

    // ---- grid ----

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn grid(&self) -> &DotGrid {
        &self.grid
    }

    /// Reallocate the grid with every dot off. Zero dimensions are ignored.
    pub fn set_cols_and_rows(&mut self, cols: usize, rows: usize) {
        if self.grid.set_cols_and_rows(cols, rows) {
            self.relayout();
        }
    }

    pub fn active_color(&self) -> u32 {
        self.grid.active_color()
    }

    pub fn set_active_color(&mut self, color: u32) {
        self.grid.set_active_color(color);
        self.request_redraw();
    }

    pub fn inactive_color(&self) -> u32 {
        self.grid.inactive_color()
    }

    /// Changing the inactive color clears the whole matrix to it.
    pub fn set_inactive_color(&mut self, color: u32) {
        self.grid.set_inactive_color(color);
        self.request_redraw();
    }

    pub fn dot_shape(&self) -> DotShape {
        self.shape
    }

    pub fn set_dot_shape(&mut self, shape: DotShape) {
        self.shape = shape;
        self.request_redraw();
    }

    pub fn matrix_font(&self) -> &dyn MatrixFont {
        match &self.font {
            Some(font) => font.as_ref(),
            None => &DEFAULT_FONT,
        }
    }

    pub fn set_matrix_font(&mut self, font: Arc<dyn MatrixFont>) {
        self.font = Some(font);
        self.request_redraw();
    }

    pub fn is_using_spacer(&self) -> bool {
        self.spacing.use_spacer
    }

    pub fn set_use_spacer(&mut self, use_spacer: bool) {
        self.spacing.use_spacer = use_spacer;
        self.relayout();
    }

    pub fn is_square_dots(&self) -> bool {
        self.spacing.square_dots
    }

    pub fn set_square_dots(&mut self, square_dots: bool) {
        self.spacing.square_dots = square_dots;
        self.relayout();
    }

    pub fn spacer_size_factor(&self) -> f32 {
        self.spacing.spacer_size_factor
    }

    /// Stored clamped to `0.0..=0.2`.
    pub fn set_spacer_size_factor(&mut self, factor: f32) {
        self.spacing.spacer_size_factor = clamp_spacer_factor(factor);
        self.relayout();
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        self.grid.set_pixel(x, y, color);
    }

    pub fn set_pixel_on(&mut self, x: i32, y: i32, on: bool) {
        self.grid.set_pixel_on(x, y, on);
    }

    pub fn set_pixel_with_redraw(&mut self, x: i32, y: i32, color: u32) {
        self.grid.set_pixel(x, y, color);
        self.request_redraw();
    }

    pub fn set_pixel_on_with_redraw(&mut self, x: i32, y: i32, on: bool) {
        self.grid.set_pixel_on(x, y, on);
        self.request_redraw();
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<u32> {
        self.grid.color_at(x, y)
    }

    /// Draw `character` in the active color with its top-left dot at `(x, y)`.
    pub fn set_char_at(&mut self, character: char, x: i32, y: i32) {
        let color = self.grid.active_color();
        self.set_char_at_color(character, x, y, color);
    }

    pub fn set_char_at_color(&mut self, character: char, x: i32, y: i32, color: u32) {
        let font: &dyn MatrixFont = self.font.as_deref().unwrap_or(&DEFAULT_FONT);
        self.grid.set_char_at(font, character, x, y, color);
        self.request_redraw();
    }

    pub fn set_char_at_with_background(&mut self, character: char, x: i32, y: i32) {
        let color = self.grid.active_color();
        self.set_char_at_with_background_color(character, x, y, color);
    }

    pub fn set_char_at_with_background_color(&mut self, character: char, x: i32, y: i32, color: u32) {
        let font: &dyn MatrixFont = self.font.as_deref().unwrap_or(&DEFAULT_FONT);
        self.grid.set_char_at_with_background(font, character, x, y, color);
        self.request_redraw();
    }

    /// Draw a run of characters, one font width apart.
    pub fn set_text_at(&mut self, text: &str, x: i32, y: i32, color_for: impl FnMut(usize) -> u32) {
        let font: &dyn MatrixFont = self.font.as_deref().unwrap_or(&DEFAULT_FONT);
        self.grid.set_text_at(font, text, x, y, color_for);
        self.request_redraw();
    }

    pub fn shift_left(&mut self) {
        self.grid.shift_left();
        self.request_redraw();
    }

    pub fn shift_right(&mut self) {
        self.grid.shift_right();
        self.request_redraw();
    }

    pub fn shift_up(&mut self) {
        self.grid.shift_up();
        self.request_redraw();
    }

    pub fn shift_down(&mut self) {
        self.grid.shift_down();
        self.request_redraw();
    }

    pub fn set_all_dots_on(&mut self) {
        self.grid.set_all_on();
        self.request_redraw();
    }

    pub fn set_all_dots_off(&mut self) {
        self.grid.set_all_off();
        self.request_redraw();
    }

    // ---- layout ----

    pub fn geometry(&self) -> &DotGeometry {
        &self.geometry
    }

    pub fn dot_size(&self) -> f32 {
        self.geometry.dot_size()
    }

    pub fn dot_width(&self) -> f32 {
        self.geometry.dot_width()
    }

    pub fn dot_height(&self) -> f32 {
        self.geometry.dot_height()
    }

    /// Area covered by dots, which can be smaller than the widget when
    /// square dots are on.
    pub fn matrix_size(&self) -> Vec2 {
        self.geometry.matrix_size()
    }

    /// Host notification that the widget now measures `width × height`.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.disposed {
            return;
        }
        self.size = Vec2::new(width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        let inner = self.size - Vec2::splat(2.0 * self.padding);
        self.geometry = DotGeometry::compute(inner.x, inner.y, self.grid.cols(), self.grid.rows(), self.spacing);
        tracing::debug!(
            width = inner.x,
            height = inner.y,
            dot_size = self.geometry.dot_size(),
            spacer = self.geometry.spacer(),
            "matrix layout"
        );
        self.request_redraw();
    }

    /// Size the widget asks for given the space its parent offers.
    pub fn desired_size(&self, available: Vec2) -> Vec2 {
        let mut size = if self.fill_available && available.x.is_finite() && available.y.is_finite() {
            available
        } else {
            Vec2::new(self.pref_size.width, self.pref_size.height)
        };
        if let Some(min) = self.min_size {
            size = size.max(Vec2::new(min.width, min.height));
        }
        if let Some(max) = self.max_size {
            size = size.min(Vec2::new(max.width, max.height));
        }
        size
    }

    /// Where the dot area sits inside the widget rectangle: inset by the
    /// padding and centered in what remains.
    pub fn matrix_bounds(&self, widget_rect: Rect) -> Rect {
        let inner = widget_rect.shrink(self.padding);
        let matrix = self.geometry.matrix_size();
        let min = inner.min + ((inner.size() - matrix) * 0.5).max(Vec2::ZERO);
        Rect::from_min_size(min, matrix)
    }

    // ---- events ----

    /// Host notification of a primary press at `local` (matrix coordinates)
    /// and `screen`. Fires listeners for the dot under the pointer, if any.
    pub fn pointer_pressed(&mut self, local: Pos2, screen: Pos2) -> Option<DotMatrixEvent> {
        if self.disposed {
            return None;
        }
        let (x, y) = self.geometry.hit_test(local)?;
        let event = DotMatrixEvent::new(x, y, screen);
        tracing::trace!(x, y, "dot pressed");
        self.listeners.fire(&event);
        self.events.push(event);
        Some(event)
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&DotMatrixEvent) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Events raised since the last call, oldest first. When the widget is
    /// driven through `ui.add`, only presses from the current frame are kept,
    /// so poll after adding it.
    pub fn take_events(&mut self) -> Vec<DotMatrixEvent> {
        std::mem::take(&mut self.events)
    }

    /// Detach all listeners and stop reacting to resize and pointer input.
    /// Calling it again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.listeners.clear();
        self.events.clear();
        self.disposed = true;
        tracing::debug!("matrix disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ---- painting ----

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Paint every dot into `widget_rect`.
    pub fn paint(&mut self, painter: &Painter, widget_rect: Rect) {
        let origin = self.matrix_bounds(widget_rect).min;
        let mut canvas = EguiCanvas::new(painter, origin);
        draw_matrix(&mut canvas, &self.grid, &self.geometry, self.shape);
        self.needs_redraw = false;
    }

    /// Render the current grid offscreen. A matrix that was never laid out
    /// is rendered at its preferred size.
    pub fn snapshot(&self, background: u32) -> Result<PixmapCanvas> {
        let geometry = if self.geometry.is_empty() {
            let inner = Vec2::new(self.pref_size.width, self.pref_size.height) - Vec2::splat(2.0 * self.padding);
            DotGeometry::compute(inner.x, inner.y, self.grid.cols(), self.grid.rows(), self.spacing)
        } else {
            self.geometry
        };
        let size = geometry.matrix_size();
        let mut canvas = PixmapCanvas::new(size.x.ceil() as u32, size.y.ceil() as u32, background)?;
        draw_matrix(&mut canvas, &self.grid, &geometry, self.shape);
        Ok(canvas)
    }

    pub fn snapshot_png(&self, path: impl AsRef<Path>, background: u32) -> Result<()> {
        let path = path.as_ref();
        self.snapshot(background)?.save_png(path)?;
        tracing::info!(path = %path.display(), "saved matrix snapshot");
        Ok(())
    }
}

impl Widget for &mut DotMatrix {
    fn ui(self, ui: &mut Ui) -> Response {
        // unpolled events from earlier frames are dropped
        self.events.clear();

        let desired = self.desired_size(ui.available_size());
        let (rect, response) = ui.allocate_exact_size(desired, Sense::click());

        if rect.size() != self.size {
            self.resize(rect.width(), rect.height());
        }

        if ui.is_rect_visible(rect) {
            self.paint(&ui.painter_at(rect), rect);
        } else {
            // repainted in full once it scrolls back into view
            self.needs_redraw = false;
        }

        let pressed = ui.input(|i| i.pointer.primary_pressed());
        if pressed && response.hovered() {
            if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
                let window_offset = ui.input(|i| i.viewport().inner_rect.map_or(Vec2::ZERO, |r| r.min.to_vec2()));
                let local = pos - self.matrix_bounds(rect).min.to_vec2();
                self.pointer_pressed(local, pos + window_offset);
            }
        }

        // a listener or the caller may have changed the grid after painting
        if self.needs_redraw {
            ui.ctx().request_repaint();
        }

        response
    }
}
