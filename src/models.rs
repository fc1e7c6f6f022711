use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Route Metadata ---

/// Path of the not-found entry every route table must carry.
pub const FALLBACK_PATH: &str = "*";

/// Visibility
///
/// The visibility class of a route: who may enter it before any role check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Visibility {
    /// Needs no session at all.
    Public,
    /// Only for callers without a session (login, password recovery).
    AuthEntry,
    /// Requires an authenticated session.
    Protected,
}

/// RouteDescriptor
///
/// One navigable path of the dashboard and its access rules.
///
/// `path` is either a literal (`/dashboard/products`) or a pattern with named
/// parameters (`/dashboard/products/{id}`). `allowed_roles`, when present,
/// restricts access to the listed roles; when absent every authenticated role
/// may enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<String>>,
}

impl RouteDescriptor {
    pub fn public(path: &str, name: &str) -> Self {
        Self::new(path, name, Visibility::Public)
    }

    pub fn auth_entry(path: &str, name: &str) -> Self {
        Self::new(path, name, Visibility::AuthEntry)
    }

    pub fn protected(path: &str, name: &str) -> Self {
        Self::new(path, name, Visibility::Protected)
    }

    /// The mandatory `*` not-found entry.
    pub fn fallback(name: &str) -> Self {
        Self::new(FALLBACK_PATH, name, Visibility::Public)
    }

    /// Restricts the descriptor to the given roles.
    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.allowed_roles = Some(roles.iter().map(|role| role.to_string()).collect());
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.path == FALLBACK_PATH
    }

    fn new(path: &str, name: &str, visibility: Visibility) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            visibility,
            allowed_roles: None,
        }
    }
}

/// RouteMatch
///
/// The result of resolving a concrete URL: the matched descriptor plus the
/// values captured by its named parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteMatch {
    pub route: RouteDescriptor,
    pub params: BTreeMap<String, String>,
}

/// OverlapKind
///
/// How two routes of the table compete for the same URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OverlapKind {
    /// The earlier route matches every URL the later one does: the later route is unreachable.
    Shadowed,
    /// Both routes match some URLs but neither contains the other: table order
    /// silently decides which one wins for the shared URLs.
    Ambiguous,
}

/// RouteOverlap
///
/// An ordering defect in the route table, reported by the startup audit.
/// A specific route listed before a more general one is the intended layout
/// and is not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteOverlap {
    /// Path of the route that wins under first-match resolution.
    pub earlier: String,
    /// Path of the route that loses some or all of its URLs to `earlier`.
    pub later: String,
    pub kind: OverlapKind,
}

// --- Navigation ---

/// NavigationItem
///
/// A second-level sidebar entry. Items never carry children of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl NavigationItem {
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
        }
    }
}

/// NavigationNode
///
/// A top-level sidebar entry: either a link, a pure group header (no `href`),
/// or a link that also hosts child items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationNode {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub children: Vec<NavigationItem>,
}

impl NavigationNode {
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href.to_string()),
            children: Vec::new(),
        }
    }

    pub fn group(label: &str, children: Vec<NavigationItem>) -> Self {
        Self {
            label: label.to_string(),
            href: None,
            children,
        }
    }

    /// Attaches child items to a node.
    pub fn with_children(mut self, children: Vec<NavigationItem>) -> Self {
        self.children = children;
        self
    }
}

// --- Session ---

/// SessionContext
///
/// The caller's session as resolved by the authentication collaborator.
/// Access-control code only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SessionContext {
    pub is_authenticated: bool,
    pub loading: bool,
    #[serde(default)]
    pub role: Option<String>,
}

impl SessionContext {
    /// Session resolution still in flight.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(role: Option<String>) -> Self {
        Self {
            is_authenticated: true,
            loading: false,
            role,
        }
    }
}

// --- API Output Schemas ---

/// PageDecision
///
/// What the dashboard router should do when a caller navigates directly to a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum PageDecision {
    /// Render the page.
    Render,
    /// Session still resolving: show the placeholder.
    Loading,
    /// Send the caller elsewhere (login page or dashboard home).
    Redirect { to: String },
    /// Authenticated, but the role may not see this page.
    Forbidden,
    /// No route matched; the router falls through to the `*` entry.
    NotFound,
}

/// AccessReport
///
/// Output schema for `GET /access`: the resolved route (or the fallback) and
/// the decision taken for the caller's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AccessReport {
    pub url: String,
    pub route: RouteDescriptor,
    pub params: BTreeMap<String, String>,
    pub decision: PageDecision,
}
