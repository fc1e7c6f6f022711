use crate::{
    access::{can_access, is_auth_only_entry, requires_authentication},
    models::{PageDecision, RouteDescriptor, SessionContext},
    route_table::RouteTable,
};
use std::collections::BTreeMap;

/// SessionState
///
/// The three states a guard distinguishes, derived from a [`SessionContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Session resolution has not finished yet.
    Loading,
    /// Resolution finished without a session.
    Unauthenticated,
    /// Resolution finished with a session (role may still be absent).
    Authenticated,
}

impl From<&SessionContext> for SessionState {
    fn from(session: &SessionContext) -> Self {
        if session.loading {
            SessionState::Loading
        } else if session.is_authenticated {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }
}

/// GuardOutcome
///
/// What a guard tells the renderer to do with the content it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    /// Show the transient placeholder and take no action.
    Loading,
    /// Navigate elsewhere and render nothing for this pass.
    Redirect { to: String },
    /// Render the wrapped content unchanged.
    Render(T),
}

impl<T> GuardOutcome<T> {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardOutcome::Render(_))
    }
}

/// AuthenticationGuard
///
/// Gates content on session presence only; roles are not consulted.
///
/// There is no timeout: a session that never finishes resolving keeps the
/// placeholder on screen.
#[derive(Debug, Clone)]
pub struct AuthenticationGuard {
    /// Where unauthenticated callers are sent (the login page).
    pub login_path: String,
}

impl AuthenticationGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn evaluate<T>(&self, session: &SessionContext, content: T) -> GuardOutcome<T> {
        match SessionState::from(session) {
            SessionState::Loading => GuardOutcome::Loading,
            SessionState::Unauthenticated => GuardOutcome::Redirect {
                to: self.login_path.clone(),
            },
            SessionState::Authenticated => GuardOutcome::Render(content),
        }
    }
}

/// AntiAuthenticationGuard
///
/// Wraps authentication-entry pages: callers who already hold a session are
/// sent to the dashboard home instead. Only `is_authenticated` is consulted.
#[derive(Debug, Clone)]
pub struct AntiAuthenticationGuard {
    /// Where callers who already hold a session are sent (the dashboard home).
    pub home_path: String,
}

impl AntiAuthenticationGuard {
    pub fn new(home_path: impl Into<String>) -> Self {
        Self {
            home_path: home_path.into(),
        }
    }

    pub fn evaluate<T>(&self, session: &SessionContext, content: T) -> GuardOutcome<T> {
        if session.is_authenticated {
            GuardOutcome::Redirect {
                to: self.home_path.clone(),
            }
        } else {
            GuardOutcome::Render(content)
        }
    }
}

/// PageGuards
///
/// The pair of guards the dashboard router wraps pages with.
#[derive(Debug, Clone)]
pub struct PageGuards {
    /// Wraps every protected page.
    pub authentication: AuthenticationGuard,
    /// Wraps the authentication-entry pages (login, password recovery).
    pub anti_authentication: AntiAuthenticationGuard,
}

impl PageGuards {
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            authentication: AuthenticationGuard::new(login_path),
            anti_authentication: AntiAuthenticationGuard::new(home_path),
        }
    }
}

/// ResolvedPage
///
/// The route chosen for a URL and the decision taken for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage<'a> {
    /// The matched route, or the `*` entry when nothing matched.
    pub route: &'a RouteDescriptor,
    /// Values captured by the route's named parameters (empty for the fallback).
    pub params: BTreeMap<String, String>,
    /// The outcome for the caller's session.
    pub decision: PageDecision,
}

/// resolve_page
///
/// What the dashboard router does for a direct navigation to `url`:
/// unknown URLs fall through to the `*` entry, authentication-entry pages go
/// through the anti-authentication guard, protected pages through the
/// authentication guard and then the role check.
pub fn resolve_page<'a>(
    table: &'a RouteTable,
    url: &str,
    session: &SessionContext,
    guards: &PageGuards,
) -> ResolvedPage<'a> {
    // 1. Path matching. Unknown URLs render the not-found page for everyone.
    let Some((route, params)) = table.resolve(url) else {
        return ResolvedPage {
            route: table.fallback(),
            params: BTreeMap::new(),
            decision: PageDecision::NotFound,
        };
    };

    // 2. Guard selection by visibility; public pages are not wrapped.
    let outcome = if is_auth_only_entry(route) {
        guards.anti_authentication.evaluate(session, ())
    } else if requires_authentication(route) {
        guards.authentication.evaluate(session, ())
    } else {
        GuardOutcome::Render(())
    };

    // 3. Role check, only once the guard lets the content through.
    let decision = match outcome {
        GuardOutcome::Loading => PageDecision::Loading,
        GuardOutcome::Redirect { to } => PageDecision::Redirect { to },
        GuardOutcome::Render(()) if can_access(route, session.role.as_deref()) => {
            PageDecision::Render
        }
        GuardOutcome::Render(()) => PageDecision::Forbidden,
    };

    ResolvedPage {
        route,
        params,
        decision,
    }
}
