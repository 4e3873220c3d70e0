use eframe::egui;
use egui_aesthetix::themes::NordDark;
use egui_aesthetix::Aesthetix;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod home;
mod landing;
mod models;
mod session;

use api::ApiClient;
use app::FitTrackApp;
use session::SessionStore;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("FITTRACK_API_URL").unwrap_or_else(|_| api::DEFAULT_BASE_URL.to_string());
    tracing::info!("starting FitTrack against {base_url}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FitTrack",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_style(NordDark.custom_style());

            let api = ApiClient::new(&base_url)?;

            // One-shot reachability check; purely informational.
            let probe = api.clone();
            std::thread::spawn(move || match probe.test_connection() {
                Ok(()) => tracing::info!("backend reachable at {}", probe.base_url()),
                Err(e) => tracing::warn!("backend probe failed: {e}"),
            });

            Ok(Box::new(FitTrackApp::new(api, SessionStore::open())))
        }),
    )
}
