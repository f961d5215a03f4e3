use anyhow::Context;
use eframe::egui;
use penguin_dash::app::PenguinDashApp;
use penguin_dash::config::DashConfig;
use penguin_dash::data;
use penguin_dash::state::Session;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashConfig::discover().context("loading configuration")?;
    let dataset = data::provider::init(&config.dataset.source())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([config.window.min_width, config.window.min_height]),
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            let session = Session::new(
                dataset,
                config.plot.scatter_options(),
                &config.controls,
            );
            Ok(Box::new(PenguinDashApp::new(session, config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
