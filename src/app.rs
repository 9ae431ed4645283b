use crate::handlers;
use crate::models::StoreData;
use axum::{routing::{get, post}, Router};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// The reference store's shared data. Every handler mutates under the one
/// lock and persists before it responds.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<StoreData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: StoreData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/humores", get(handlers::list_moods).post(handlers::create_mood))
        .route("/humores/filtro", get(handlers::filter_moods))
        .route(
            "/humores/:id",
            get(handlers::get_mood)
                .put(handlers::update_mood)
                .delete(handlers::delete_mood),
        )
        .route("/estatisticas", get(handlers::list_stats))
        .route("/estatisticas/registrar/:id", post(handlers::record_view))
        .with_state(state)
}
