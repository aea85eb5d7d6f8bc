use crate::server::handlers;
use crate::server::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the router for the dashboard and the JSON API
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/init", post(handlers::init))
        .route("/status", get(handlers::status))
        .route("/add", post(handlers::add))
        .route("/commit", post(handlers::commit))
        .route("/commit/{id}", get(handlers::commit_by_id))
        .route("/log", get(handlers::log))
        .route("/show", get(handlers::show))
        .route("/files", get(handlers::list_files))
        .route(
            "/file/{*path}",
            get(handlers::read_file).delete(handlers::delete_file),
        )
        .route("/diff/{*path}", get(handlers::diff))
        .route("/stage/{*path}", post(handlers::stage))
        .route("/unstage/{*path}", post(handlers::unstage));

    Router::new()
        .route("/", get(handlers::dashboard))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
