use dashboard_access::{
    access::{can_access, is_auth_only_entry, normalize_role, requires_authentication},
    models::RouteDescriptor,
};

const ROLES: &[&str] = &["admin", "supervisor", "adviser", "Admin", "  seller "];

#[test]
fn test_normalize_role_trims_and_lowercases() {
    assert_eq!(normalize_role("  Admin \n").as_deref(), Some("admin"));
    assert_eq!(normalize_role("SUPERVISOR").as_deref(), Some("supervisor"));
    assert_eq!(normalize_role(""), None);
    assert_eq!(normalize_role("   "), None);
}

#[test]
fn test_unrestricted_routes_allow_every_present_role() {
    let routes = [
        RouteDescriptor::public("/", "landing"),
        RouteDescriptor::auth_entry("/login", "login"),
        RouteDescriptor::protected("/dashboard", "dashboard"),
    ];
    for route in &routes {
        for role in ROLES {
            assert!(can_access(route, Some(*role)), "{} / {role}", route.path);
        }
    }
}

#[test]
fn test_missing_role_denied_only_where_authentication_is_required() {
    let public = RouteDescriptor::public("/", "landing");
    let entry = RouteDescriptor::auth_entry("/login", "login");
    let protected = RouteDescriptor::protected("/dashboard", "dashboard");

    for role in [None, Some(""), Some("   ")] {
        assert!(can_access(&public, role));
        assert!(can_access(&entry, role));
        assert!(!can_access(&protected, role));
    }
}

#[test]
fn test_role_match_is_case_insensitive() {
    let users = RouteDescriptor::protected("/dashboard/users", "users").with_roles(&["admin"]);

    assert!(can_access(&users, Some("Admin")));
    assert!(can_access(&users, Some(" ADMIN ")));
    assert!(!can_access(&users, Some("supervisor")));
}

#[test]
fn test_allowed_roles_are_normalised_too() {
    let route = RouteDescriptor::protected("/dashboard/stock/adjustments", "stockAdjustments")
        .with_roles(&[" Admin", "SUPERVISOR "]);

    assert!(can_access(&route, Some("supervisor")));
    assert!(can_access(&route, Some("admin")));
    assert!(!can_access(&route, Some("adviser")));
}

#[test]
fn test_unresolved_role_never_matches_restricted_route() {
    // A role set on a public route still fails closed for callers without a role.
    let restricted_public = RouteDescriptor::public("/reports", "reports").with_roles(&["admin"]);
    let restricted = RouteDescriptor::protected("/dashboard/users", "users").with_roles(&["admin"]);

    for route in [&restricted_public, &restricted] {
        assert!(!can_access(route, None));
        assert!(!can_access(route, Some("")));
    }
}

#[test]
fn test_visibility_predicates() {
    let public = RouteDescriptor::public("/", "landing");
    let entry = RouteDescriptor::auth_entry("/login", "login");
    let protected = RouteDescriptor::protected("/dashboard", "dashboard");

    assert!(!requires_authentication(&public));
    assert!(!requires_authentication(&entry));
    assert!(requires_authentication(&protected));

    assert!(is_auth_only_entry(&entry));
    assert!(!is_auth_only_entry(&public));
    assert!(!is_auth_only_entry(&protected));
}
