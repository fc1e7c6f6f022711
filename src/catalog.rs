use crate::{
    models::{NavigationItem, NavigationNode, RouteDescriptor},
    route_table::{RouteTable, RouteTableError},
};

// --- Roles ---

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPERVISOR: &str = "supervisor";

const MANAGERS: &[&str] = &[ROLE_ADMIN, ROLE_SUPERVISOR];

/// dashboard_routes
///
/// The dashboard's canonical route table, in resolution order.
///
/// Within each section the literal routes (`/new`, `/sessions`) come before the
/// parameterised routes that would otherwise shadow them.
pub fn dashboard_routes() -> Vec<RouteDescriptor> {
    vec![
        // Public
        RouteDescriptor::public("/", "landing"),
        // Authentication entry
        RouteDescriptor::auth_entry("/login", "login"),
        RouteDescriptor::auth_entry("/forgot-password", "forgotPassword"),
        RouteDescriptor::auth_entry("/reset-password/{token}", "resetPassword"),
        // Any authenticated role
        RouteDescriptor::protected("/dashboard", "dashboard"),
        RouteDescriptor::protected("/dashboard/profile", "profile"),
        RouteDescriptor::protected("/dashboard/settings", "settings"),
        // Catalog
        RouteDescriptor::protected("/dashboard/products", "products"),
        RouteDescriptor::protected("/dashboard/products/new", "productCreate").with_roles(MANAGERS),
        RouteDescriptor::protected("/dashboard/products/{id}", "productDetail"),
        RouteDescriptor::protected("/dashboard/products/{id}/edit", "productEdit")
            .with_roles(MANAGERS),
        RouteDescriptor::protected("/dashboard/variants", "variants"),
        RouteDescriptor::protected("/dashboard/variants/{id}", "variantDetail"),
        // Inventory
        RouteDescriptor::protected("/dashboard/warehouses", "warehouses"),
        RouteDescriptor::protected("/dashboard/warehouses/new", "warehouseCreate")
            .with_roles(&[ROLE_ADMIN]),
        RouteDescriptor::protected("/dashboard/warehouses/{id}", "warehouseDetail"),
        RouteDescriptor::protected("/dashboard/locations", "locations"),
        RouteDescriptor::protected("/dashboard/providers", "providers"),
        RouteDescriptor::protected("/dashboard/providers/{id}", "providerDetail"),
        // Stock
        RouteDescriptor::protected("/dashboard/stock/summary", "stockSummary"),
        RouteDescriptor::protected("/dashboard/stock/movements", "stockMovements"),
        RouteDescriptor::protected("/dashboard/stock/adjustments", "stockAdjustments")
            .with_roles(MANAGERS),
        // User management
        RouteDescriptor::protected("/dashboard/users", "users").with_roles(&[ROLE_ADMIN]),
        RouteDescriptor::protected("/dashboard/users/activity", "userActivity")
            .with_roles(MANAGERS),
        RouteDescriptor::protected("/dashboard/users/sessions", "userSessions")
            .with_roles(&[ROLE_ADMIN]),
        RouteDescriptor::protected("/dashboard/users/{id}", "userDetail").with_roles(&[ROLE_ADMIN]),
        // Not found
        RouteDescriptor::fallback("notFound"),
    ]
}

/// Builds the validated dashboard table.
pub fn dashboard_table() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(dashboard_routes())
}

/// dashboard_sidebar
///
/// The hand-authored sidebar menu, before any role filtering.
pub fn dashboard_sidebar() -> Vec<NavigationNode> {
    vec![
        NavigationNode::link("Dashboard", "/dashboard"),
        NavigationNode::group(
            "Catalog",
            vec![
                NavigationItem::link("Products", "/dashboard/products"),
                NavigationItem::link("New product", "/dashboard/products/new"),
                NavigationItem::link("Variants", "/dashboard/variants"),
            ],
        ),
        NavigationNode::group(
            "Inventory",
            vec![
                NavigationItem::link("Warehouses", "/dashboard/warehouses"),
                NavigationItem::link("Locations", "/dashboard/locations"),
            ],
        ),
        NavigationNode::group(
            "Stock",
            vec![
                NavigationItem::link("Summary", "/dashboard/stock/summary"),
                NavigationItem::link("Movements", "/dashboard/stock/movements"),
                NavigationItem::link("Adjustments", "/dashboard/stock/adjustments"),
            ],
        ),
        NavigationNode::link("Suppliers", "/dashboard/providers"),
        NavigationNode::link("Users", "/dashboard/users").with_children(vec![
            NavigationItem::link("Activity", "/dashboard/users/activity"),
            NavigationItem::link("Sessions", "/dashboard/users/sessions"),
        ]),
        NavigationNode::group(
            "Account",
            vec![
                NavigationItem::link("Profile", "/dashboard/profile"),
                NavigationItem::link("Settings", "/dashboard/settings"),
            ],
        ),
    ]
}
