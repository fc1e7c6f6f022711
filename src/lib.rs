use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Access-control core: pure, synchronous decision logic.
pub mod access;
pub mod catalog;
pub mod guards;
pub mod matcher;
pub mod models;
pub mod navigation;
pub mod route_table;

// Service plumbing.
pub mod auth;
pub mod config;
pub mod handlers;

// Module for routing segregation (Public, Authenticated, Admin).
pub mod routes;
use auth::AuthUser;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use models::NavigationNode;
pub use route_table::{RouteTable, RouteTableError, RouteTableState};

/// ApiDoc
///
/// OpenAPI document for the access-control API, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_routes, handlers::resolve_route, handlers::check_access,
        handlers::get_navigation, handlers::get_route_overlaps
    ),
    components(
        schemas(
            models::RouteDescriptor, models::Visibility, models::RouteMatch,
            models::RouteOverlap, models::OverlapKind, models::NavigationNode, models::NavigationItem,
            models::SessionContext, models::PageDecision, models::AccessReport,
        )
    ),
    tags(
        (name = "dashboard-access", description = "Dashboard route access and navigation API")
    )
)]
struct ApiDoc;

/// SidebarState
///
/// The unfiltered, hand-authored sidebar tree, shared read-only across requests.
/// Every `/navigation` call filters it afresh for the caller's role.
pub type SidebarState = Arc<Vec<NavigationNode>>;

/// AppState
///
/// Everything a request needs, immutable after startup and cheap to clone
/// into every handler.
#[derive(Clone)]
pub struct AppState {
    /// The validated, ordered route table (fallback included).
    pub routes: RouteTableState,
    /// The sidebar source tree, before role filtering.
    pub sidebar: SidebarState,
    /// Configuration: environment, token secret and guard redirect targets.
    pub config: AppConfig,
}

impl AppState {
    pub fn new(routes: RouteTable, sidebar: Vec<NavigationNode>, config: AppConfig) -> Self {
        Self {
            routes: Arc::new(routes),
            sidebar: Arc::new(sidebar),
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// Handlers and extractors pull only the part of the state they need
// (e.g. the admin audit takes `State<RouteTableState>`, `AuthUser` takes `AppConfig`).

impl FromRef<AppState> for RouteTableState {
    fn from_ref(app_state: &AppState) -> RouteTableState {
        app_state.routes.clone()
    }
}

impl FromRef<AppState> for SidebarState {
    fn from_ref(app_state: &AppState) -> SidebarState {
        app_state.sidebar.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Rejects requests to the authenticated routes with 401 unless `AuthUser`
/// can be extracted.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing structure, the scoped auth middleware and the
/// observability layers, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS: the dashboard frontend is served from a different origin.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base router: docs, then the three access levels.
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Admin handlers authenticate through their AuthUser argument and check the role.
        .nest("/admin", admin::admin_routes())
        .with_state(state);

    // 3. Observability: request id generation, tracing span, id propagation.
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS outermost.
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying the method, URI and `x-request-id`, so every log line
/// of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
