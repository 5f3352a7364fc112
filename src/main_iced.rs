//! Expat Tax - iced UI entry point.
//!
//! Build with: cargo build --features iced-ui

use iced::{window, Size};

use expat_tax::ui::TaxYearApp;
use expat_tax::{logging, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Config::load();
    tracing::info!(
        hotkey = config.search.use_global_hotkey,
        theme = %config.appearance.theme,
        "Starting Expat Tax"
    );

    let window_settings = window::Settings {
        size: Size::new(config.appearance.window_width as f32, 720.0),
        position: window::Position::Centered,
        ..Default::default()
    };

    let (app, task) = TaxYearApp::new(config)?;

    iced::application("Expat Tax", TaxYearApp::update, TaxYearApp::view)
        .subscription(TaxYearApp::subscription)
        .window(window_settings)
        .run_with(move || (app, task))?;

    Ok(())
}
