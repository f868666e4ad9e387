//! Marquee application state and UI

use std::path::PathBuf;
use std::time::{Duration, Instant};

use dotmatrix::config::{config_dir, load_json_or_default, save_json};
use dotmatrix::theme::{menu_bar, status_bar};
use dotmatrix::{DotColors, DotMatrix, DotMatrixConfig, DotShape, DotTheme, Marquee, RepaintController};
use egui::{CentralPanel, Context, Frame, Key, Margin, TopBottomPanel};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "dotmarquee";
const COLS: usize = 128;
const ROWS: usize = 16;
const TEXT_ROW: i32 = 4;
/// Background behind the snapshot PNG, same as the panel.
const SNAPSHOT_BACKGROUND: u32 = dotmatrix::color::pack(20, 20, 20, 255);

/// User settings, read from `settings.json` in the config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeSettings {
    pub text: String,
    /// Milliseconds per one-column step.
    pub step_ms: u64,
    pub dot_shape: DotShape,
}

impl Default for MarqueeSettings {
    fn default() -> Self {
        Self {
            text: "follow me on twitter @hansolo_ ".to_string(),
            step_ms: 10,
            dot_shape: DotShape::Square,
        }
    }
}

impl MarqueeSettings {
    pub fn path() -> PathBuf {
        config_dir(APP_NAME).join("settings.json")
    }

    pub fn load() -> Self {
        load_json_or_default(&Self::path())
    }
}

pub struct MarqueeApp {
    matrix: DotMatrix,
    marquee: Marquee,
    repaint: RepaintController,
    theme: DotTheme,
    status: String,
}

impl MarqueeApp {
    pub fn new(settings: MarqueeSettings, theme: DotTheme) -> dotmatrix::Result<Self> {
        let config = DotMatrixConfig::default()
            .cols_and_rows(COLS, ROWS)
            .pref_size(264.0, 33.0)
            .min_size(264.0, 33.0)
            .fill_available(true)
            .active_color(DotColors::ACTIVE)
            .dot_shape(settings.dot_shape);
        let matrix = DotMatrix::new(config)?;
        let marquee = Marquee::new(settings.text, COLS, TEXT_ROW, vec![DotColors::LIME, DotColors::RED]);
        let repaint = RepaintController::new(Duration::from_millis(settings.step_ms));
        tracing::info!(step_ms = settings.step_ms, "marquee ready");
        Ok(Self { matrix, marquee, repaint, theme, status: String::new() })
    }

    fn toggle_pause(&mut self) {
        let running = !self.repaint.is_running();
        self.repaint.set_running(running);
        self.status = if running { String::new() } else { "paused".to_string() };
        tracing::debug!(running, "marquee toggled");
    }

    fn current_settings(&self) -> MarqueeSettings {
        MarqueeSettings {
            text: self.marquee.text().to_string(),
            step_ms: self.repaint.interval().as_millis() as u64,
            dot_shape: self.matrix.dot_shape(),
        }
    }

    /// Apply settings to the running display. New text restarts the scroll
    /// from the right edge on a cleared matrix.
    fn apply_settings(&mut self, settings: MarqueeSettings) {
        if settings.text != self.marquee.text() {
            self.marquee.set_text(settings.text, self.matrix.cols());
            self.matrix.set_all_dots_off();
        }
        self.repaint.set_interval(Duration::from_millis(settings.step_ms));
        self.matrix.set_dot_shape(settings.dot_shape);
        self.repaint.mark_needs_repaint();
    }

    fn reload_settings(&mut self) {
        self.apply_settings(MarqueeSettings::load());
        self.status = "settings reloaded".to_string();
        tracing::info!(path = %MarqueeSettings::path().display(), "settings reloaded");
    }

    fn save_settings(&mut self) {
        let path = MarqueeSettings::path();
        self.status = match save_json(&path, &self.current_settings()) {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "saving settings failed");
                format!("saving settings failed: {e}")
            }
        };
        self.repaint.mark_needs_repaint();
    }

    fn save_snapshot(&mut self) {
        let path = config_dir(APP_NAME).join("snapshot.png");
        let result = std::fs::create_dir_all(config_dir(APP_NAME))
            .map_err(dotmatrix::DotMatrixError::from)
            .and_then(|_| self.matrix.snapshot_png(&path, SNAPSHOT_BACKGROUND));
        self.status = match result {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "snapshot failed");
                format!("snapshot failed: {e}")
            }
        };
        self.repaint.mark_needs_repaint();
    }

    fn draw_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("file", |ui| {
                    if ui.button("save snapshot").clicked() {
                        self.save_snapshot();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("reload settings").clicked() {
                        self.reload_settings();
                        ui.close_menu();
                    }
                    if ui.button("save settings").clicked() {
                        self.save_settings();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("view", |ui| {
                    let label = if self.repaint.is_running() { "pause" } else { "resume" };
                    if ui.button(label).clicked() {
                        self.toggle_pause();
                        ui.close_menu();
                    }
                    ui.separator();
                    for shape in DotShape::ALL {
                        if ui.radio(self.matrix.dot_shape() == shape, shape.label()).clicked() {
                            self.matrix.set_dot_shape(shape);
                            self.repaint.mark_needs_repaint();
                            ui.close_menu();
                        }
                    }
                });
            });
        });
    }
}

impl eframe::App for MarqueeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(Key::Space)) {
            self.toggle_pause();
        }

        for _ in 0..self.repaint.take_ticks(Instant::now()) {
            self.marquee.step(&mut self.matrix);
        }

        self.draw_menu_bar(ctx);

        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, &self.status);
        });

        CentralPanel::default()
            .frame(Frame::none().fill(self.theme.background()).inner_margin(Margin::same(10.0)))
            .show(ctx, |ui| {
                ui.add(&mut self.matrix);
            });

        self.repaint.end_frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: MarqueeSettings = serde_json::from_str(r#"{ "text": "hi " }"#).unwrap();
        assert_eq!(settings.text, "hi ");
        assert_eq!(settings.step_ms, 10);
        assert_eq!(settings.dot_shape, DotShape::Square);
    }

    #[test]
    fn test_marquee_scrolls_on_matrix() {
        let app = MarqueeApp::new(MarqueeSettings::default(), DotTheme::panel()).unwrap();
        let MarqueeApp { mut matrix, mut marquee, .. } = app;
        assert_eq!(marquee.x(), COLS as i32 + 7);
        for _ in 0..marquee.x() {
            marquee.step(&mut matrix);
        }
        // first glyph 'f' now starts at column 1
        assert_eq!(marquee.x(), 0);
        let lit = (0..8)
            .flat_map(|x| (4..12).map(move |y| (x, y)))
            .filter(|&(x, y)| matrix.color_at(x, y) == Some(DotColors::LIME))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut app = MarqueeApp::new(MarqueeSettings::default(), DotTheme::panel()).unwrap();
        app.toggle_pause();
        assert_eq!(app.repaint.take_ticks(Instant::now()), 0);
        assert_eq!(app.status, "paused");
        app.toggle_pause();
        assert_eq!(app.repaint.take_ticks(Instant::now()), 1);
    }

    #[test]
    fn test_apply_settings_restarts_text() {
        let mut app = MarqueeApp::new(MarqueeSettings::default(), DotTheme::panel()).unwrap();
        for _ in 0..20 {
            app.marquee.step(&mut app.matrix);
        }
        let settings = MarqueeSettings {
            text: "hello ".to_string(),
            step_ms: 25,
            dot_shape: DotShape::Round,
        };
        app.apply_settings(settings.clone());

        assert_eq!(app.marquee.x(), COLS as i32 + 7);
        assert!(app.matrix.grid().cells().iter().all(|&c| c == app.matrix.inactive_color()));
        assert_eq!(app.current_settings(), settings);
    }

    #[test]
    fn test_apply_same_text_keeps_position() {
        let mut app = MarqueeApp::new(MarqueeSettings::default(), DotTheme::panel()).unwrap();
        app.marquee.step(&mut app.matrix);
        let x = app.marquee.x();
        app.apply_settings(MarqueeSettings { step_ms: 40, ..MarqueeSettings::default() });
        assert_eq!(app.marquee.x(), x);
        assert_eq!(app.repaint.interval(), Duration::from_millis(40));
    }
}
