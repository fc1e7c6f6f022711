use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Every handler here receives a validated `AuthUser`; the router is wrapped
/// by the authentication middleware in `create_router`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /navigation
        // The sidebar menu pruned for the caller's role.
        .route("/navigation", get(handlers::get_navigation))
}
