mod api;
mod dto;
mod fetch;
mod state;

use crate::state::AppState;
use axum::routing::get;
use std::sync::Arc;
use tracing::{error, info};

const PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let port = match std::env::var("PORT") {
        Ok(value) => match value.parse() {
            Ok(port) => port,
            Err(err) => {
                error!("Invalid PORT {value}: {err}");
                std::process::exit(1);
            }
        },
        Err(_) => PORT,
    };

    let state = Arc::new(AppState::new(reqwest::Client::new()));
    let app = axum::Router::new()
        .route("/", get(api::index))
        .route("/cue_sheet", get(api::cue_sheet))
        .route("/cue_sheet.txt", get(api::cue_sheet_text))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
