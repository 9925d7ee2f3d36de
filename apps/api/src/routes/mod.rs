pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::lifecycle::handlers as lifecycle;
use crate::locations;
use crate::reviews::handlers as reviews;
use crate::state::AppState;
use crate::taxonomy::handlers as taxonomy;
use crate::users;

/// Publish bodies carry up to five 10MB evidence files plus form overhead.
const MAX_BODY_BYTES: usize = 55 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/me", get(users::handle_me))
        // Taxonomy
        .route("/api/v1/categories", get(taxonomy::handle_list_categories))
        .route("/api/v1/categories/search", get(taxonomy::handle_search))
        .route(
            "/api/v1/categories/:key/tags",
            get(taxonomy::handle_category_tags),
        )
        // Requests
        .route(
            "/api/v1/requests",
            post(lifecycle::handle_create_request).get(lifecycle::handle_list_requests),
        )
        .route(
            "/api/v1/requests/open",
            get(lifecycle::handle_list_open_requests),
        )
        .route(
            "/api/v1/requests/:id",
            get(lifecycle::handle_get_request).patch(lifecycle::handle_update_request),
        )
        .route("/api/v1/requests/:id/publish", post(lifecycle::handle_publish))
        .route("/api/v1/requests/:id/cancel", post(lifecycle::handle_cancel))
        .route(
            "/api/v1/requests/:id/complete",
            post(lifecycle::handle_complete),
        )
        // Quotes
        .route(
            "/api/v1/requests/:id/quotes",
            post(lifecycle::handle_submit_quote).get(lifecycle::handle_list_quotes),
        )
        .route(
            "/api/v1/quotes/:id/accept",
            post(lifecycle::handle_accept_quote),
        )
        .route(
            "/api/v1/quotes/:id/reject",
            post(lifecycle::handle_reject_quote),
        )
        // Reviews
        .route(
            "/api/v1/requests/:id/reviews",
            post(reviews::handle_submit_review),
        )
        .route(
            "/api/v1/requests/:id/client-reviews",
            post(reviews::handle_submit_client_review),
        )
        .route("/api/v1/reviews/pending", get(reviews::handle_pending_reviews))
        // Locations
        .route(
            "/api/v1/locations",
            post(locations::handle_create_location).get(locations::handle_list_locations),
        )
        .route(
            "/api/v1/locations/:id",
            delete(locations::handle_delete_location),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
