use std::{collections::BTreeMap, sync::Arc};

use thiserror::Error;

use crate::{
    matcher::PathPattern,
    models::{OverlapKind, RouteDescriptor, RouteMatch, RouteOverlap, Visibility},
};

/// RouteTableError
///
/// Reasons a route table is refused at construction. Any of these aborts startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route table has no '*' fallback entry")]
    MissingFallback,
    #[error("route table has {0} '*' fallback entries, expected exactly one")]
    DuplicateFallback(usize),
    #[error("the '*' fallback entry must be public, found {0:?}")]
    FallbackNotPublic(Visibility),
    #[error("route '{path}' declares an empty allowed-roles list")]
    EmptyRoleSet { path: String },
    #[error("route '{path}' declares a blank role")]
    BlankRole { path: String },
    #[error("route '{path}' is not a valid pattern: {reason}")]
    InvalidPattern { path: String, reason: String },
}

/// Compiled form of one table entry. The fallback has no pattern.
#[derive(Debug, Clone)]
struct CompiledRoute {
    descriptor: RouteDescriptor,
    pattern: Option<PathPattern>,
}

/// RouteTable
///
/// The canonical, ordered list of route descriptors. Built once at startup and
/// read-only afterwards; shared across request handlers as [`RouteTableState`].
///
/// Order is significant: URL resolution is first-match, so more specific
/// routes (`/dashboard/users/sessions`) must precede more general ones
/// (`/dashboard/users/{id}`). [`RouteTable::overlaps`] reports shadowed and
/// ambiguous pairs.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    fallback: usize,
}

/// RouteTableState
///
/// The shared handle stored in the application state.
pub type RouteTableState = Arc<RouteTable>;

impl RouteTable {
    /// new
    ///
    /// Validates and compiles an ordered list of descriptors.
    ///
    /// Fails when the `*` fallback is missing, duplicated or not public, when a
    /// role list is empty or holds a blank role, or when a path is not a valid
    /// pattern.
    pub fn new(descriptors: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let fallbacks: Vec<usize> = descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_fallback())
            .map(|(index, _)| index)
            .collect();

        let fallback = match fallbacks.as_slice() {
            [] => return Err(RouteTableError::MissingFallback),
            [index] => *index,
            many => return Err(RouteTableError::DuplicateFallback(many.len())),
        };
        if descriptors[fallback].visibility != Visibility::Public {
            return Err(RouteTableError::FallbackNotPublic(
                descriptors[fallback].visibility,
            ));
        }

        let mut routes = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if let Some(roles) = &descriptor.allowed_roles {
                if roles.is_empty() {
                    return Err(RouteTableError::EmptyRoleSet {
                        path: descriptor.path,
                    });
                }
                if roles.iter().any(|role| role.trim().is_empty()) {
                    return Err(RouteTableError::BlankRole {
                        path: descriptor.path,
                    });
                }
            }

            let pattern = if descriptor.is_fallback() {
                None
            } else {
                let pattern = PathPattern::parse(&descriptor.path).map_err(|reason| {
                    RouteTableError::InvalidPattern {
                        path: descriptor.path.clone(),
                        reason,
                    }
                })?;
                Some(pattern)
            };

            routes.push(CompiledRoute {
                descriptor,
                pattern,
            });
        }

        let table = Self { routes, fallback };
        for overlap in table.overlaps() {
            match overlap.kind {
                OverlapKind::Shadowed => tracing::warn!(
                    earlier = %overlap.earlier,
                    later = %overlap.later,
                    "route is unreachable: an earlier, more general route matches all of its URLs"
                ),
                OverlapKind::Ambiguous => tracing::warn!(
                    earlier = %overlap.earlier,
                    later = %overlap.later,
                    "routes overlap: table order decides which one serves the shared URLs"
                ),
            }
        }
        tracing::debug!(routes = table.routes.len(), "route table compiled");

        Ok(table)
    }

    /// The full ordered sequence, fallback included.
    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().map(|route| &route.descriptor)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The `*` not-found entry.
    pub fn fallback(&self) -> &RouteDescriptor {
        &self.routes[self.fallback].descriptor
    }

    /// find_by_literal_path
    ///
    /// Exact string lookup against descriptor paths, `*` included. Used to look a
    /// descriptor up by its declared path, not to resolve URLs.
    pub fn find_by_literal_path(&self, path: &str) -> Option<&RouteDescriptor> {
        self.descriptors().find(|descriptor| descriptor.path == path)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.descriptors().find(|descriptor| descriptor.name == name)
    }

    /// find_by_url
    ///
    /// Resolves a concrete URL to the first descriptor (in table order) whose
    /// pattern matches it over the full path. The fallback is never returned.
    pub fn find_by_url(&self, url: &str) -> Option<&RouteDescriptor> {
        self.routes
            .iter()
            .find(|route| route.pattern.as_ref().is_some_and(|p| p.matches(url)))
            .map(|route| &route.descriptor)
    }

    /// Like [`RouteTable::find_by_url`], also returning the captured parameters.
    pub fn resolve(&self, url: &str) -> Option<(&RouteDescriptor, BTreeMap<String, String>)> {
        self.routes.iter().find_map(|route| {
            let params = route.pattern.as_ref()?.captures(url)?;
            Some((&route.descriptor, params))
        })
    }

    /// Owned form of [`RouteTable::resolve`], as served by the API.
    pub fn match_url(&self, url: &str) -> Option<RouteMatch> {
        self.resolve(url).map(|(route, params)| RouteMatch {
            route: route.clone(),
            params,
        })
    }

    /// overlaps
    ///
    /// Audits the table order. For every route, reports
    /// * `Shadowed` when an earlier route matches all of its URLs (the route is unreachable);
    /// * otherwise `Ambiguous` for each earlier route that shares some, but not
    ///   all, URLs with it while not being strictly more specific.
    ///
    /// An earlier route that the later one fully contains is the intended
    /// "specific before general" layout and is not reported.
    pub fn overlaps(&self) -> Vec<RouteOverlap> {
        let compiled: Vec<(&RouteDescriptor, &PathPattern)> = self
            .routes
            .iter()
            .filter_map(|route| Some((&route.descriptor, route.pattern.as_ref()?)))
            .collect();

        let mut found = Vec::new();
        for (index, (later, later_pattern)) in compiled.iter().enumerate() {
            let earlier_routes = &compiled[..index];

            // 1. Unreachable: one report is enough.
            if let Some((earlier, _)) = earlier_routes
                .iter()
                .find(|(_, earlier_pattern)| earlier_pattern.covers(later_pattern))
            {
                found.push(RouteOverlap {
                    earlier: earlier.path.clone(),
                    later: later.path.clone(),
                    kind: OverlapKind::Shadowed,
                });
                continue;
            }

            // 2. Partially overlapping pairs, where order silently picks a winner.
            for (earlier, earlier_pattern) in earlier_routes {
                if earlier_pattern.intersects(later_pattern) && !later_pattern.covers(earlier_pattern)
                {
                    found.push(RouteOverlap {
                        earlier: earlier.path.clone(),
                        later: later.path.clone(),
                        kind: OverlapKind::Ambiguous,
                    });
                }
            }
        }
        found
    }
}
