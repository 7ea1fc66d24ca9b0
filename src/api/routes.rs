use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    let mut router = Router::new()
        // Subjects
        .route("/subjects", get(handlers::list_subjects))
        .route("/subjects", post(handlers::create_subject))
        .route("/subjects/:id", get(handlers::get_subject))
        .route("/subjects/:id", put(handlers::update_subject))
        .route("/subjects/:id", delete(handlers::delete_subject))
        // Documents
        .route("/documents", get(handlers::list_documents))
        .route(
            "/documents",
            post(handlers::create_document).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/documents/:id", get(handlers::get_document))
        .route("/documents/:id/status", patch(handlers::update_document_status))
        .route("/documents/:id", delete(handlers::delete_document))
        // Static content (local-backend file downloads)
        .route("/static/*key", get(handlers::serve_static))
        // Internal
        .route("/_internal/health", get(handlers::health));

    // Test-only routes
    if state.config.test_mode {
        tracing::warn!("Test mode enabled — purge route is available.");
        router = router.route("/admin/purge", delete(handlers::admin_purge));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
