//! Demo theme
//!
//! Two looks: a dark "LED panel" for marquee-style displays and a light
//! paper look for charts. Both are flat with 1px outlines and no shadows.

use egui::{Color32, Rounding, Stroke, Visuals};

pub struct PanelColors;

impl PanelColors {
    pub const PANEL: Color32 = Color32::from_rgb(20, 20, 20);
    pub const PANEL_TEXT: Color32 = Color32::from_rgb(200, 200, 200);
    pub const PAPER: Color32 = Color32::WHITE;
    pub const INK: Color32 = Color32::from_rgb(40, 40, 40);
    pub const OUTLINE: Color32 = Color32::from_rgb(90, 90, 90);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Panel,
    Paper,
}

#[derive(Debug, Clone, Copy)]
pub struct DotTheme {
    pub kind: ThemeKind,
    pub font_size_body: f32,
    pub font_size_small: f32,
    pub item_spacing: f32,
}

impl DotTheme {
    pub fn panel() -> Self {
        Self { kind: ThemeKind::Panel, font_size_body: 13.0, font_size_small: 9.0, item_spacing: 4.0 }
    }

    pub fn paper() -> Self {
        Self { kind: ThemeKind::Paper, ..Self::panel() }
    }

    pub fn background(&self) -> Color32 {
        match self.kind {
            ThemeKind::Panel => PanelColors::PANEL,
            ThemeKind::Paper => PanelColors::PAPER,
        }
    }

    pub fn foreground(&self) -> Color32 {
        match self.kind {
            ThemeKind::Panel => PanelColors::PANEL_TEXT,
            ThemeKind::Paper => PanelColors::INK,
        }
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = match self.kind {
            ThemeKind::Panel => Visuals::dark(),
            ThemeKind::Paper => Visuals::light(),
        };
        let bg = self.background();
        let fg = self.foreground();

        visuals.window_fill = bg;
        visuals.panel_fill = bg;
        visuals.extreme_bg_color = bg;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, PanelColors::OUTLINE);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;
        visuals.override_text_color = Some(fg);

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_stroke = Stroke::new(1.0, PanelColors::OUTLINE);
            ws.fg_stroke = Stroke::new(1.0, fg);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive);
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.hovered);
        flat(&mut visuals.widgets.active);
        flat(&mut visuals.widgets.open);

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.text_styles.insert(egui::TextStyle::Body, egui::FontId::proportional(self.font_size_body));
        style.text_styles.insert(egui::TextStyle::Button, egui::FontId::proportional(self.font_size_body));
        style.text_styles.insert(egui::TextStyle::Small, egui::FontId::proportional(self.font_size_small));
        ctx.set_style(style);
    }
}

/// Menu bar strip with a 1px outline.
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::none()
        .stroke(Stroke::new(1.0, PanelColors::OUTLINE))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner)
        .inner
}

/// One-line status strip.
pub fn status_bar(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .stroke(Stroke::new(1.0, PanelColors::OUTLINE))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.small(text);
        });
}
