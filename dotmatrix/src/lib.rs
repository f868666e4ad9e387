//! dotmatrix: an LED dot-matrix display widget for egui
//!
//! The model (grid, font, geometry) knows nothing about egui; the widget
//! layer wires it to egui's layout, painter and pointer input.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod font;
pub mod geometry;
pub mod grid;
pub mod logging;
pub mod render;
pub mod repaint;
pub mod theme;
pub mod widget;

pub use animation::Marquee;
pub use color::DotColors;
pub use config::DotMatrixConfig;
pub use error::{DotMatrixError, Result};
pub use event::{DotMatrixEvent, ListenerId};
pub use font::{MatrixFont, MatrixFont8x8};
pub use geometry::{DotGeometry, Spacing};
pub use grid::DotGrid;
pub use render::DotShape;
pub use repaint::RepaintController;
pub use theme::DotTheme;
pub use widget::DotMatrix;

/// Window position offset for staggering several demo windows, read from
/// `DOTMATRIX_CASCADE` (an instance index).
pub fn cascade_position() -> Option<egui::Pos2> {
    std::env::var("DOTMATRIX_CASCADE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .map(|n| {
            let offset = n as f32 * 30.0;
            egui::Pos2::new(100.0 + offset, 100.0 + offset)
        })
}
