//! Parser Bot desktop shell.

mod app;
mod icons;
mod logging;
mod services;

use anyhow::Context as _;
use eframe::NativeOptions;
use parserbot_settings::{IconLibrary, ResourceLoader};
use parserbot_shell::{AppPaths, Shell};

use crate::app::ParserBotApp;

const APP_NAME: &str = "Parser Bot";

fn main() -> anyhow::Result<()> {
    logging::init();

    let resources = ResourceLoader::locate();
    let icons_dir = resources
        .dir()
        .parent()
        .map(|assets| assets.join("icons"))
        .unwrap_or_else(|| resources.dir().join("icons"));
    let paths = AppPaths::for_current_user();
    tracing::info!(
        resources = %resources.dir().display(),
        settings = %paths.settings_file.display(),
        "starting {APP_NAME}"
    );
    let shell = Shell::start(&resources, IconLibrary::new(icons_dir), &paths, APP_NAME)
        .context("failed to load bundled configuration")?;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title(APP_NAME),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Box::new(ParserBotApp::new(cc, shell))),
    )
    .map_err(|err| anyhow::anyhow!("event loop failed: {err}"))
}
