pub mod auth;
pub mod handlers;

use crate::config::AppConfig;
use crate::search::PropertyStore;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PropertyStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn PropertyStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    let properties = Router::new()
        .route(
            "/",
            get(handlers::search_properties).post(handlers::create_property),
        )
        .route("/user/properties", get(handlers::user_properties))
        .route(
            "/:id",
            get(handlers::get_property)
                .put(handlers::update_property)
                .delete(handlers::delete_property),
        )
        .route("/:id/featured", put(handlers::toggle_featured))
        .route("/:id/verify", put(handlers::toggle_verified));

    Router::new()
        .route("/api", get(handlers::health))
        .nest("/api/properties", properties)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
