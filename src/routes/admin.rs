use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Nested under `/admin`. The 'admin' role check happens inside the handlers,
/// after the `AuthUser` extractor has authenticated the caller.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/routes/overlaps
        // Table ordering audit: shadowed routes and ambiguously overlapping pairs.
        .route("/routes/overlaps", get(handlers::get_route_overlaps))
}
