#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod config;
mod constants;
mod data;
mod error;
mod logging;
mod state;
mod store;
mod ui;
mod units;
mod widgets;

use app::GraphOxide;
use constants::layout::MAIN_WINDOW_SIZE;

fn main() -> eframe::Result<()> {
    logging::init_logging();

    // Keep the server alive for the whole run; viewer connects on the default port
    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = start_puffin_server();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app::APP_NAME)
            .with_inner_size(MAIN_WINDOW_SIZE)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        app::APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(GraphOxide::new(cc)))),
    )
}

#[cfg(feature = "profile-with-puffin")]
fn start_puffin_server() -> Option<puffin_http::Server> {
    puffin::set_scopes_on(true);
    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            tracing::info!(%addr, "Puffin server listening");
            Some(server)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not start puffin server");
            None
        }
    }
}
