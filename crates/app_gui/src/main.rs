mod app;
mod config;
mod i18n;

use app::UiApp;
use config::AppSettings;
use eframe::{NativeOptions, egui};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("autoparts-analysis")
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Не удалось запустить фоновые задачи: {e}");
            return;
        }
    };

    let settings = AppSettings::load_or_default();
    tracing::info!(
        version = env!("AUTOPARTS_VERSION"),
        compare_tab = settings.compare_tab,
        "starting AutoParts"
    );

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AutoParts AI")
            .with_inner_size([1100.0, 760.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    let handle = runtime.handle().clone();
    if let Err(e) = eframe::run_native(
        "AutoParts AI",
        options,
        Box::new(move |_cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(
                settings, handle,
            )))
        }),
    ) {
        eprintln!("Приложение остановлено с ошибкой: {e}");
    }

    runtime.shutdown_timeout(Duration::from_millis(250));
}
