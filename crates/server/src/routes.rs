use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use common::paths;
use service::RecordStore;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api;

/// Store handle shared by every handler.
pub type SharedStore = Arc<dyn RecordStore>;

/// Build the full application router: the five envelope operations, the
/// liveness check and the redirect front door.
///
/// Unknown paths fall through to axum's empty 404; a known path hit with the
/// wrong method gets its empty 405.
pub fn build_router(store: SharedStore) -> Router {
    let redirect_route = format!("{}*name", paths::REDIRECT_PREFIX);

    Router::new()
        .route(paths::STATUS, get(api::status))
        .route(paths::SCAN, post(api::scan))
        .route(paths::GET, post(api::get_record))
        .route(paths::PUT, post(api::put_record))
        .route(paths::DELETE, post(api::delete_record))
        .route(&redirect_route, get(api::redirect))
        .with_state(store)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
