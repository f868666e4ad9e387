//! dotcalendar: a year of random daily values as a heat map
//!
//! Click a day to see its date and value for two seconds.

mod app;
mod calendar;

use app::CalendarApp;
use calendar::{DateRange, HeatMap};
use chrono::Local;
use dotmatrix::DotTheme;
use eframe::NativeOptions;
use rand::Rng;

fn main() -> eframe::Result<()> {
    dotmatrix::logging::init("dotcalendar=info,dotmatrix=info,warn");

    let today = Local::now().date_naive();
    let Some(range) = DateRange::ending_in_month_of(today) else {
        tracing::error!(%today, "date out of range");
        std::process::exit(1);
    };

    let mut rng = rand::thread_rng();
    let heat_map = HeatMap::generate(range, || rng.gen_range(0.0..10.0));

    let theme = DotTheme::paper();
    let app = match CalendarApp::new(heat_map, theme) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "invalid heat map configuration");
            std::process::exit(1);
        }
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([660.0, 150.0])
        .with_title("DotMatrix Calendar");

    if let Some(pos) = dotmatrix::cascade_position() {
        viewport = viewport.with_position(pos);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "dotcalendar",
        options,
        Box::new(move |cc| {
            theme.apply(&cc.egui_ctx);
            Box::new(app)
        }),
    )
}
