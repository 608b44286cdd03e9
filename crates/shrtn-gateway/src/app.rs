use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_handler, health_handler, index_handler, method_not_allowed, not_found_handler,
    redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Builds the route table. Known paths hit with the wrong method answer
    /// 404, the same as unknown paths.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler).fallback(method_not_allowed))
            .route("/new", post(create_handler).fallback(method_not_allowed))
            .route(
                "/s/{code}",
                get(redirect_handler).fallback(method_not_allowed),
            )
            .route("/health", get(health_handler))
            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
