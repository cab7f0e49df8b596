use anyhow::Context;
use tokio::sync::mpsc;

use hlds_console::applog::AppLog;
use hlds_console::ui::controller::{AppController, ConsoleEvent};
use hlds_console::ui::AppUI;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging first: everything after this point reports through `log`.
    AppLog::init()
        .context("failed to initialize the application log")?
        .install(log::LevelFilter::Info)
        .context("failed to register the global logger")?;
    log::info!("HLDS Console {} starting", hlds_console::VERSION);

    // Single event channel; the egui update loop is the only consumer.
    let (events_tx, events_rx) = mpsc::channel::<ConsoleEvent>(1024);

    let controller =
        AppController::new(events_tx).context("failed to initialize the application")?;
    let app = AppUI::new(controller, events_rx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native("HLDS Console", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow::anyhow!("egui frontend failed: {e}"))?;

    log::info!("HLDS Console shutting down");
    Ok(())
}
