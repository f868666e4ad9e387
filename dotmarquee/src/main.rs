//! dotmarquee: scrolling text on a 128×16 LED matrix
//!
//! Space pauses and resumes. Text, speed and dot shape can be set in
//! `settings.json` inside the platform config directory.

mod app;

use app::{MarqueeApp, MarqueeSettings, APP_NAME};
use dotmatrix::DotTheme;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    dotmatrix::logging::init("dotmarquee=info,dotmatrix=info,warn");

    let settings = MarqueeSettings::load();
    tracing::info!(path = %MarqueeSettings::path().display(), "settings loaded");

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([300.0, 110.0])
        .with_min_inner_size([284.0, 100.0])
        .with_title("DotMatrix");

    if let Some(pos) = dotmatrix::cascade_position() {
        viewport = viewport.with_position(pos);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    let theme = DotTheme::panel();
    let app = match MarqueeApp::new(settings, theme) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "invalid marquee configuration");
            std::process::exit(1);
        }
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            theme.apply(&cc.egui_ctx);
            Box::new(app)
        }),
    )
}
