use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Read-only endpoints about the route table itself. `/access` resolves the
/// caller's session opportunistically and answers for anonymous callers too.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for monitoring and load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /routes
        // The ordered route table, fallback included.
        .route("/routes", get(handlers::list_routes))
        // GET /routes/resolve?url=...
        // First-match resolution of a concrete URL; 404 when nothing matches.
        .route("/routes/resolve", get(handlers::resolve_route))
        // GET /access?url=...
        // Render / loading / redirect / forbidden / not-found for the caller.
        .route("/access", get(handlers::check_access))
}
