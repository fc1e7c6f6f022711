use dashboard_access::{
    RouteTable, RouteTableError,
    catalog::dashboard_table,
    matcher::{PathPattern, Segment},
    models::{OverlapKind, RouteDescriptor, Visibility},
};

// --- Helpers ---

fn table(descriptors: Vec<RouteDescriptor>) -> RouteTable {
    RouteTable::new(descriptors).expect("table should be valid")
}

fn small_table() -> RouteTable {
    table(vec![
        RouteDescriptor::auth_entry("/login", "login"),
        RouteDescriptor::protected("/dashboard", "dashboard"),
        RouteDescriptor::protected("/dashboard/users/sessions", "userSessions")
            .with_roles(&["admin"]),
        RouteDescriptor::protected("/dashboard/users/{id}", "userDetail").with_roles(&["admin"]),
        RouteDescriptor::protected("/dashboard/products/:id/edit", "productEdit"),
        RouteDescriptor::fallback("notFound"),
    ])
}

// --- Construction ---

#[test]
fn test_missing_fallback_is_rejected() {
    let result = RouteTable::new(vec![RouteDescriptor::protected("/dashboard", "dashboard")]);
    assert_eq!(result.unwrap_err(), RouteTableError::MissingFallback);
}

#[test]
fn test_duplicate_fallback_is_rejected() {
    let result = RouteTable::new(vec![
        RouteDescriptor::fallback("notFound"),
        RouteDescriptor::fallback("alsoNotFound"),
    ]);
    assert_eq!(result.unwrap_err(), RouteTableError::DuplicateFallback(2));
}

#[test]
fn test_protected_fallback_is_rejected() {
    let mut fallback = RouteDescriptor::fallback("notFound");
    fallback.visibility = Visibility::Protected;

    let result = RouteTable::new(vec![fallback]);
    assert_eq!(
        result.unwrap_err(),
        RouteTableError::FallbackNotPublic(Visibility::Protected)
    );
}

#[test]
fn test_empty_and_blank_role_sets_are_rejected() {
    let empty = RouteTable::new(vec![
        RouteDescriptor::protected("/dashboard/users", "users").with_roles(&[]),
        RouteDescriptor::fallback("notFound"),
    ]);
    assert!(matches!(empty, Err(RouteTableError::EmptyRoleSet { ref path }) if path == "/dashboard/users"));

    let blank = RouteTable::new(vec![
        RouteDescriptor::protected("/dashboard/users", "users").with_roles(&["admin", "  "]),
        RouteDescriptor::fallback("notFound"),
    ]);
    assert!(matches!(blank, Err(RouteTableError::BlankRole { .. })));
}

#[test]
fn test_malformed_patterns_are_rejected() {
    for path in ["dashboard", "/dashboard//users", "/users/{}", "/users/{id", "/users/:"] {
        let result = RouteTable::new(vec![
            RouteDescriptor::protected(path, "broken"),
            RouteDescriptor::fallback("notFound"),
        ]);
        assert!(
            matches!(result, Err(RouteTableError::InvalidPattern { .. })),
            "{path} should be rejected"
        );
    }
}

#[test]
fn test_dashboard_catalog_is_valid_and_well_ordered() {
    let table = dashboard_table().expect("catalog must validate");
    assert_eq!(table.fallback().path, "*");
    assert_eq!(table.fallback().visibility, Visibility::Public);
    assert!(table.overlaps().is_empty(), "{:?}", table.overlaps());
}

// --- Lookup ---

#[test]
fn test_find_by_literal_path_includes_fallback() {
    let table = small_table();
    assert_eq!(table.find_by_literal_path("*").unwrap().name, "notFound");
    assert_eq!(
        table.find_by_literal_path("/dashboard/users/{id}").unwrap().name,
        "userDetail"
    );
    // Literal lookup does not resolve parameters.
    assert!(table.find_by_literal_path("/dashboard/users/7").is_none());
}

#[test]
fn test_find_by_name() {
    let table = small_table();
    assert_eq!(table.find_by_name("userSessions").unwrap().path, "/dashboard/users/sessions");
    assert_eq!(table.find_by_name("notFound").unwrap().path, "*");
    assert!(table.find_by_name("missing").is_none());
}

#[test]
fn test_find_by_url_never_returns_fallback() {
    let table = small_table();
    assert!(table.find_by_url("/nowhere").is_none());
    assert!(table.find_by_url("*").is_none());
    assert!(table.find_by_url("").is_none());
}

#[test]
fn test_find_by_url_requires_full_path_match() {
    let table = small_table();
    assert_eq!(table.find_by_url("/dashboard").unwrap().name, "dashboard");
    assert!(table.find_by_url("/dashboard/unknown").is_none());
    assert!(table.find_by_url("/dash").is_none());
    assert!(table.find_by_url("/dashboard/users/7/extra").is_none());
}

#[test]
fn test_find_by_url_first_match_wins() {
    let table = small_table();
    assert_eq!(
        table.find_by_url("/dashboard/users/sessions").unwrap().name,
        "userSessions"
    );
    assert_eq!(table.find_by_url("/dashboard/users/42").unwrap().name, "userDetail");
}

#[test]
fn test_find_by_url_ignores_query_fragment_and_trailing_slash() {
    let table = small_table();
    assert_eq!(table.find_by_url("/dashboard/?tab=1").unwrap().name, "dashboard");
    assert_eq!(table.find_by_url("/dashboard#top").unwrap().name, "dashboard");
}

#[test]
fn test_match_url_captures_params_in_both_spellings() {
    let table = small_table();

    let found = table.match_url("/dashboard/users/42").unwrap();
    assert_eq!(found.route.name, "userDetail");
    assert_eq!(found.params.get("id").map(String::as_str), Some("42"));

    let found = table.match_url("/dashboard/products/abc/edit").unwrap();
    assert_eq!(found.route.name, "productEdit");
    assert_eq!(found.params.get("id").map(String::as_str), Some("abc"));
}

// --- Ordering audit ---

#[test]
fn test_overlaps_report_shadowed_routes() {
    let table = table(vec![
        RouteDescriptor::protected("/dashboard/users/{id}", "userDetail"),
        RouteDescriptor::protected("/dashboard/users/sessions", "userSessions"),
        RouteDescriptor::fallback("notFound"),
    ]);

    let overlaps = table.overlaps();
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].earlier, "/dashboard/users/{id}");
    assert_eq!(overlaps[0].later, "/dashboard/users/sessions");
    assert_eq!(overlaps[0].kind, OverlapKind::Shadowed);

    // The shadowed route is indeed unreachable.
    assert_eq!(
        table.find_by_url("/dashboard/users/sessions").unwrap().name,
        "userDetail"
    );
}

#[test]
fn test_overlaps_report_partially_overlapping_routes() {
    let table = table(vec![
        RouteDescriptor::protected("/dashboard/users/{id}", "userDetail"),
        RouteDescriptor::protected("/dashboard/{section}/sessions", "sectionSessions"),
        RouteDescriptor::fallback("notFound"),
    ]);

    let overlaps = table.overlaps();
    assert_eq!(overlaps.len(), 1, "{overlaps:?}");
    assert_eq!(overlaps[0].earlier, "/dashboard/users/{id}");
    assert_eq!(overlaps[0].later, "/dashboard/{section}/sessions");
    assert_eq!(overlaps[0].kind, OverlapKind::Ambiguous);

    // The shared URL goes to the earlier route; the later one still owns the rest.
    assert_eq!(
        table.find_by_url("/dashboard/users/sessions").unwrap().name,
        "userDetail"
    );
    assert_eq!(
        table.find_by_url("/dashboard/products/sessions").unwrap().name,
        "sectionSessions"
    );
}

#[test]
fn test_overlaps_ignore_specific_before_general() {
    let table = table(vec![
        RouteDescriptor::protected("/dashboard/users/sessions", "userSessions"),
        RouteDescriptor::protected("/dashboard/users/{id}", "userDetail"),
        RouteDescriptor::protected("/dashboard/products/new", "productCreate"),
        RouteDescriptor::protected("/dashboard/{section}/{id}", "sectionDetail"),
        RouteDescriptor::fallback("notFound"),
    ]);

    assert!(table.overlaps().is_empty(), "{:?}", table.overlaps());
}

#[test]
fn test_pattern_parsing_and_cover_relation() {
    let general = PathPattern::parse("/a/{x}").unwrap();
    let specific = PathPattern::parse("/a/b").unwrap();

    assert_eq!(
        general.segments(),
        &[Segment::Literal("a".into()), Segment::Param("x".into())]
    );
    assert!(general.covers(&specific));
    assert!(!specific.covers(&general));
    assert!(PathPattern::parse("/").unwrap().matches("/"));
}

#[test]
fn test_pattern_intersection() {
    let users = PathPattern::parse("/dashboard/users/{id}").unwrap();
    let sessions = PathPattern::parse("/dashboard/{section}/sessions").unwrap();
    let products = PathPattern::parse("/dashboard/products/new").unwrap();

    assert!(users.intersects(&sessions));
    assert!(sessions.intersects(&users));
    assert!(!users.covers(&sessions) && !sessions.covers(&users));
    assert!(!users.intersects(&products));
    assert!(!users.intersects(&PathPattern::parse("/dashboard/users").unwrap()));
}

#[test]
fn test_find_by_url_rejects_doubled_slashes() {
    let table = table(vec![
        RouteDescriptor::public("/", "landing"),
        RouteDescriptor::protected("/dashboard", "dashboard"),
        RouteDescriptor::fallback("notFound"),
    ]);

    assert_eq!(table.find_by_url("/").unwrap().name, "landing");
    assert!(table.find_by_url("//").is_none());
    assert!(table.find_by_url("//?tab=1").is_none());
    assert!(table.find_by_url("/dashboard//").is_none());
    assert_eq!(table.find_by_url("/dashboard/").unwrap().name, "dashboard");
}
