use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use dashboard_access::{
    AppState,
    auth::{AuthUser, Session},
    catalog::{dashboard_sidebar, dashboard_table},
    config::AppConfig,
    handlers::{self, UrlQuery},
    models::{OverlapKind, PageDecision, RouteDescriptor, SessionContext},
    route_table::RouteTable,
};
use tokio::test;
use uuid::Uuid;

// --- TEST UTILITIES ---

fn create_test_state() -> AppState {
    AppState::new(dashboard_table().unwrap(), dashboard_sidebar(), AppConfig::default())
}

fn user(role: &str) -> AuthUser {
    AuthUser {
        id: Uuid::from_u128(7),
        role: role.to_string(),
    }
}

fn url(url: &str) -> Query<UrlQuery> {
    Query(UrlQuery {
        url: url.to_string(),
    })
}

// --- HANDLER TESTS ---

#[test]
async fn test_list_routes_preserves_table_order() {
    let state = create_test_state();

    let Json(routes) = handlers::list_routes(State(state.routes.clone())).await;

    assert_eq!(routes.len(), state.routes.len());
    assert_eq!(routes.first().map(|r| r.path.as_str()), Some("/"));
    assert_eq!(routes.last().map(|r| r.path.as_str()), Some("*"));
}

#[test]
async fn test_resolve_route_success() {
    let state = create_test_state();

    let Json(found) = handlers::resolve_route(State(state.routes), url("/dashboard/providers/9"))
        .await
        .expect("provider detail should resolve");

    assert_eq!(found.route.name, "providerDetail");
    assert_eq!(found.params.get("id").map(String::as_str), Some("9"));
}

#[test]
async fn test_resolve_route_not_found() {
    let state = create_test_state();

    let result = handlers::resolve_route(State(state.routes), url("/dashboard/nowhere")).await;

    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);
}

#[test]
async fn test_check_access_for_anonymous_caller() {
    let state = create_test_state();

    let Json(report) = handlers::check_access(
        Session(SessionContext::anonymous()),
        State(state),
        url("/dashboard/stock/adjustments"),
    )
    .await;

    assert_eq!(report.route.name, "stockAdjustments");
    assert_eq!(
        report.decision,
        PageDecision::Redirect {
            to: "/login".to_string()
        }
    );
}

#[test]
async fn test_check_access_forbidden_for_role() {
    let state = create_test_state();

    let Json(report) = handlers::check_access(
        Session(user("adviser").session()),
        State(state),
        url("/dashboard/stock/adjustments"),
    )
    .await;

    assert_eq!(report.decision, PageDecision::Forbidden);
}

#[test]
async fn test_check_access_unknown_url_reports_fallback() {
    let state = create_test_state();

    let Json(report) = handlers::check_access(
        Session(user("admin").session()),
        State(state),
        url("/totally/unknown"),
    )
    .await;

    assert_eq!(report.route.path, "*");
    assert_eq!(report.decision, PageDecision::NotFound);
}

#[test]
async fn test_get_navigation_is_role_filtered() {
    let state = create_test_state();

    let Json(admin_nav) = handlers::get_navigation(user("admin"), State(state.clone())).await;
    let Json(adviser_nav) = handlers::get_navigation(user("adviser"), State(state)).await;

    assert!(admin_nav.iter().any(|node| node.label == "Users"));
    assert!(!adviser_nav.iter().any(|node| node.label == "Users"));
    assert!(adviser_nav.len() < admin_nav.len());
}

#[test]
async fn test_get_route_overlaps_forbidden_for_non_admin() {
    let state = create_test_state();

    let result = handlers::get_route_overlaps(user("supervisor"), State(state.routes)).await;

    assert_eq!(result.unwrap_err(), StatusCode::FORBIDDEN);
}

#[test]
async fn test_get_route_overlaps_reports_misordering() {
    let routes = RouteTable::new(vec![
        RouteDescriptor::protected("/dashboard/products/{id}", "productDetail"),
        RouteDescriptor::protected("/dashboard/products/new", "productCreate"),
        RouteDescriptor::fallback("notFound"),
    ])
    .unwrap();
    let state = AppState::new(routes, dashboard_sidebar(), AppConfig::default());

    let Json(overlaps) = handlers::get_route_overlaps(user(" Admin "), State(state.routes))
        .await
        .expect("admin may audit the table");

    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].earlier, "/dashboard/products/{id}");
    assert_eq!(overlaps[0].later, "/dashboard/products/new");
    assert_eq!(overlaps[0].kind, OverlapKind::Shadowed);
}
