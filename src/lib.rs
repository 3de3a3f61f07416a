pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod workers;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::services::word_source::WordSource;
use crate::state::AppState;

pub async fn create_app() -> axum::Router {
    let config = Config::from_env();
    let store = store::from_config(&config);
    let word_source = Arc::new(WordSource::from_env());
    let state = AppState::new(store, word_source);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
