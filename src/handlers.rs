use crate::{
    AppState,
    access::normalize_role,
    auth::{AuthUser, Session},
    catalog::ROLE_ADMIN,
    guards::{PageGuards, resolve_page},
    models::{AccessReport, NavigationNode, RouteDescriptor, RouteMatch, RouteOverlap},
    navigation::filter_navigation,
    route_table::RouteTableState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

// --- Query Structs ---

/// UrlQuery
///
/// Defines the accepted query parameter for the URL-based endpoints
/// (`/routes/resolve`, `/access`). Bound by Axum's `Query` extractor.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct UrlQuery {
    /// The concrete dashboard URL, e.g. `/dashboard/products/42`. Query string
    /// and fragment are ignored during matching.
    pub url: String,
}

// --- Handlers ---

/// list_routes
///
/// [Public Route] The full route table in resolution order, fallback included.
///
/// The frontend uses it to build its router; order matters because resolution
/// is first-match.
#[utoipa::path(
    get,
    path = "/routes",
    responses((status = 200, description = "Route table", body = [RouteDescriptor]))
)]
pub async fn list_routes(State(routes): State<RouteTableState>) -> Json<Vec<RouteDescriptor>> {
    Json(routes.descriptors().cloned().collect())
}

/// resolve_route
///
/// [Public Route] Resolves a URL to its route and captured parameters.
/// Unknown URLs are a 404; the `*` entry is never returned here.
#[utoipa::path(
    get,
    path = "/routes/resolve",
    params(UrlQuery),
    responses(
        (status = 200, description = "Matched route", body = RouteMatch),
        (status = 404, description = "No route matches the URL")
    )
)]
pub async fn resolve_route(
    State(routes): State<RouteTableState>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<RouteMatch>, StatusCode> {
    routes
        .match_url(&query.url)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// check_access
///
/// [Public Route] The decision the dashboard router takes for a direct
/// navigation to `url`, for the caller's session (anonymous without a token).
#[utoipa::path(
    get,
    path = "/access",
    params(UrlQuery),
    responses((status = 200, description = "Page decision", body = AccessReport))
)]
pub async fn check_access(
    Session(session): Session,
    State(state): State<AppState>,
    Query(query): Query<UrlQuery>,
) -> Json<AccessReport> {
    // 1. Guard redirect targets come from the loaded configuration.
    let guards = PageGuards::new(&state.config.login_path, &state.config.home_path);

    // 2. Path matching, guards and role check, in the router's order.
    let page = resolve_page(&state.routes, &query.url, &session, &guards);

    tracing::debug!(
        url = %query.url,
        route = %page.route.name,
        decision = ?page.decision,
        "page access resolved"
    );

    // 3. Unknown URLs report the `*` entry with a `not_found` decision.
    Json(AccessReport {
        url: query.url,
        route: page.route.clone(),
        params: page.params,
        decision: page.decision,
    })
}

/// get_navigation
///
/// [Authenticated Route] The sidebar menu pruned to what the caller's role may see.
///
/// *Note*: The role is resolved by the `AuthUser` extractor (token claim, or the
/// local role header in `Env::Local`). The result is recomputed on every call;
/// nothing is cached across roles.
#[utoipa::path(
    get,
    path = "/navigation",
    responses(
        (status = 200, description = "Visible sidebar entries", body = [NavigationNode]),
        (status = 401, description = "No valid session")
    )
)]
pub async fn get_navigation(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<NavigationNode>> {
    let visible = filter_navigation(&state.sidebar, &state.routes, Some(&role));
    tracing::debug!(
        role = %role,
        visible = visible.len(),
        total = state.sidebar.len(),
        "navigation filtered"
    );
    Json(visible)
}

/// get_route_overlaps
///
/// [Admin Route] The route-ordering audit: `shadowed` routes can never be
/// reached, `ambiguous` pairs share some URLs and table order silently picks
/// the winner. An empty list means no two routes compete for a URL except
/// where a specific route deliberately precedes a more general one.
///
/// *Authorization*: The 'admin' role is checked here, after authentication,
/// through the shared role normalisation.
#[utoipa::path(
    get,
    path = "/admin/routes/overlaps",
    responses(
        (status = 200, description = "Shadowed and ambiguous routes", body = [RouteOverlap]),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn get_route_overlaps(
    AuthUser { role, .. }: AuthUser,
    State(routes): State<RouteTableState>,
) -> Result<Json<Vec<RouteOverlap>>, StatusCode> {
    // 1. Role check (403 for any authenticated non-admin).
    if normalize_role(&role).as_deref() != Some(ROLE_ADMIN) {
        return Err(StatusCode::FORBIDDEN);
    }
    // 2. The audit is recomputed from the immutable table.
    Ok(Json(routes.overlaps()))
}
