use crate::models::{RouteDescriptor, Visibility};

/// normalize_role
///
/// The only place role strings are normalised: surrounding whitespace is
/// trimmed and the result lower-cased. A blank role normalises to `None`.
pub fn normalize_role(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// can_access
///
/// Decides whether a caller holding `role` may enter the route.
///
/// * No role restriction: any present role is allowed. A missing role is
///   allowed only on routes that do not require authentication.
/// * Role restriction: allowed iff the normalised role is one of the
///   normalised allowed roles. A missing or blank role (including a role that
///   is still being resolved) is never allowed.
///
/// Never fails; anything malformed is a denial.
pub fn can_access(descriptor: &RouteDescriptor, role: Option<&str>) -> bool {
    let role = role.and_then(normalize_role);

    match descriptor.allowed_roles.as_deref() {
        None | Some([]) => role.is_some() || !requires_authentication(descriptor),
        Some(allowed) => role.is_some_and(|role| {
            allowed
                .iter()
                .filter_map(|candidate| normalize_role(candidate))
                .any(|candidate| candidate == role)
        }),
    }
}

pub fn requires_authentication(descriptor: &RouteDescriptor) -> bool {
    descriptor.visibility == Visibility::Protected
}

/// True for routes meant only for callers without a session (login and the like).
pub fn is_auth_only_entry(descriptor: &RouteDescriptor) -> bool {
    descriptor.visibility == Visibility::AuthEntry
}
