//! Heat-map window: month and weekday labels around a dot matrix, a
//! legend below and a short-lived tooltip for the clicked day.

use std::time::{Duration, Instant};

use dotmatrix::color::to_color32;
use dotmatrix::{DotMatrix, DotMatrixConfig, DotShape, DotTheme};
use egui::{Align2, CentralPanel, Context, FontId, Frame, Margin, Pos2, Rect, Vec2};

use crate::calendar::{HeatMap, COLOR_CODING, DAYS_PER_WEEK, EMPTY_COLOR, MONTH_LABELS};

const TOOLTIP_TIMEOUT: Duration = Duration::from_secs(2);
const LABEL_GAP: f32 = 20.0;
const LEGEND_SWATCH: f32 = 10.0;

struct Tooltip {
    text: String,
    pos: Pos2,
    hide_at: Instant,
}

pub struct CalendarApp {
    matrix: DotMatrix,
    heat_map: HeatMap,
    months: Vec<String>,
    weekdays: Vec<String>,
    tooltip: Option<Tooltip>,
    theme: DotTheme,
}

impl CalendarApp {
    pub fn new(heat_map: HeatMap, theme: DotTheme) -> dotmatrix::Result<Self> {
        let range = *heat_map.range();
        let config = DotMatrixConfig::default()
            .cols_and_rows(range.weeks(), DAYS_PER_WEEK)
            .pref_size(600.0, 80.0)
            .fill_available(true)
            .use_spacer(true)
            .spacer_size_factor(0.1)
            .dot_shape(DotShape::Square)
            .inactive_color(EMPTY_COLOR);
        let mut matrix = DotMatrix::new(config)?;
        for day in heat_map.days() {
            matrix.set_pixel(day.x as i32, day.y as i32, day.color());
        }
        matrix.request_redraw();
        tracing::info!(start = %range.start(), end = %range.end(), weeks = range.weeks(), "heat map ready");

        Ok(Self {
            matrix,
            months: range.month_labels(),
            weekdays: range.weekday_labels(),
            heat_map,
            tooltip: None,
            theme,
        })
    }

    /// Turn dot presses into a tooltip for the pressed day. A new press
    /// replaces the current tooltip and restarts its timeout.
    fn handle_presses(&mut self, pointer: Option<Pos2>, now: Instant) {
        for event in self.matrix.take_events() {
            let Some(day) = self.heat_map.get(event.x, event.y) else {
                tracing::warn!(x = event.x, y = event.y, "no data for dot");
                continue;
            };
            tracing::debug!(date = %day.date, value = day.value, "day selected");
            self.tooltip = Some(Tooltip {
                text: day.tooltip(),
                pos: pointer.unwrap_or_else(|| event.screen_pos()),
                hide_at: now + TOOLTIP_TIMEOUT,
            });
        }
    }

    fn expire_tooltip(&mut self, now: Instant) {
        if self.tooltip.as_ref().is_some_and(|t| now >= t.hide_at) {
            self.tooltip = None;
        }
    }

    fn draw_labels(&self, painter: &egui::Painter, bounds: Rect) {
        let ink = self.theme.foreground();
        let small = FontId::proportional(self.theme.font_size_small + 2.0);

        let slot = bounds.width() / MONTH_LABELS as f32;
        for (i, month) in self.months.iter().enumerate() {
            let pos = Pos2::new(bounds.left() + (i as f32 + 0.5) * slot, bounds.top() - 4.0);
            painter.text(pos, Align2::CENTER_BOTTOM, month, small.clone(), ink);
        }

        let geometry = self.matrix.geometry();
        for (i, weekday) in self.weekdays.iter().enumerate() {
            let y = bounds.top() + geometry.cell_rect(0, i).center().y;
            let pos = Pos2::new(bounds.left() - 4.0, y);
            painter.text(pos, Align2::RIGHT_CENTER, weekday, FontId::proportional(self.theme.font_size_small), ink);
        }
    }

    fn draw_legend(&self, painter: &egui::Painter, bounds: Rect) {
        let ink = self.theme.foreground();
        let font = FontId::proportional(self.theme.font_size_small + 2.0);
        let y = bounds.bottom() + LABEL_GAP * 0.5 + 2.0;
        let mut x = bounds.right();

        let more = painter.text(Pos2::new(x, y), Align2::RIGHT_CENTER, "More", font.clone(), ink);
        x = more.left() - 5.0;
        for &(_, color) in COLOR_CODING.iter() {
            let swatch = Rect::from_min_size(
                Pos2::new(x - LEGEND_SWATCH, y - LEGEND_SWATCH * 0.5),
                Vec2::splat(LEGEND_SWATCH),
            );
            painter.rect_filled(swatch, 0.0, to_color32(color));
            x = swatch.left() - 5.0;
        }
        painter.text(Pos2::new(x, y), Align2::RIGHT_CENTER, "Less", font, ink);
    }

    fn draw_tooltip(&self, ctx: &Context) {
        let Some(tooltip) = &self.tooltip else { return };
        egui::Area::new(egui::Id::new("day_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(tooltip.pos + Vec2::new(12.0, 12.0))
            .interactable(false)
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(&tooltip.text).monospace());
                });
            });
    }
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        CentralPanel::default()
            .frame(Frame::none().fill(self.theme.background()).inner_margin(Margin::same(10.0)))
            .show(ctx, |ui| {
                let full = ui.available_rect_before_wrap();
                let matrix_rect = Rect::from_min_max(
                    full.min + Vec2::new(LABEL_GAP, LABEL_GAP),
                    full.max - Vec2::new(0.0, LABEL_GAP),
                );
                let response = ui.allocate_ui_at_rect(matrix_rect, |ui| ui.add(&mut self.matrix)).inner;
                let bounds = self.matrix.matrix_bounds(response.rect);

                let painter = ui.painter();
                self.draw_labels(painter, bounds);
                self.draw_legend(painter, bounds);
            });

        let pointer = ctx.input(|i| i.pointer.interact_pos());
        self.handle_presses(pointer, now);
        self.expire_tooltip(now);
        self.draw_tooltip(ctx);

        if let Some(tooltip) = &self.tooltip {
            ctx.request_repaint_after(tooltip.hide_at.saturating_duration_since(now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DateRange;
    use chrono::NaiveDate;

    fn app() -> CalendarApp {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let range = DateRange::ending_in_month_of(today).unwrap();
        let map = HeatMap::generate(range, || 9.0);
        CalendarApp::new(map, DotTheme::paper()).unwrap()
    }

    #[test]
    fn test_matrix_mirrors_heat_map() {
        let app = app();
        assert_eq!(app.matrix.cols(), 57);
        assert_eq!(app.matrix.rows(), 7);
        assert_eq!(app.matrix.color_at(0, 0), Some(0xFF1F_6823));
        assert_eq!(app.matrix.color_at(56, 6), Some(0xFF1F_6823));
    }

    #[test]
    fn test_press_shows_tooltip_until_timeout() {
        let mut app = app();
        app.matrix.resize(600.0, 80.0);
        let center = app.matrix.geometry().cell_rect(1, 2).center();
        app.matrix.pointer_pressed(center, Pos2::new(300.0, 200.0));

        let t0 = Instant::now();
        app.handle_presses(None, t0);
        let tooltip = app.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.text, "Date : 10.03.2023\nValue: 9.0");
        assert_eq!(tooltip.pos, Pos2::new(300.0, 200.0));

        app.expire_tooltip(t0 + Duration::from_millis(1999));
        assert!(app.tooltip.is_some());
        app.expire_tooltip(t0 + TOOLTIP_TIMEOUT);
        assert!(app.tooltip.is_none());
    }

    #[test]
    fn test_new_press_restarts_timeout() {
        let mut app = app();
        app.matrix.resize(600.0, 80.0);
        let t0 = Instant::now();
        let first = app.matrix.geometry().cell_rect(0, 0).center();
        app.matrix.pointer_pressed(first, Pos2::ZERO);
        app.handle_presses(Some(Pos2::new(5.0, 5.0)), t0);

        let second = app.matrix.geometry().cell_rect(3, 4).center();
        app.matrix.pointer_pressed(second, Pos2::ZERO);
        app.handle_presses(Some(Pos2::new(50.0, 5.0)), t0 + Duration::from_secs(1));

        app.expire_tooltip(t0 + Duration::from_millis(2500));
        let tooltip = app.tooltip.as_ref().unwrap();
        assert!(tooltip.text.starts_with("Date : 26.03.2023"));
    }
}
