/// Router Module Index
///
/// Splits the HTTP surface by access level so the authentication layer is
/// applied per module rather than per handler.

/// Routes open to anonymous and authenticated callers.
pub mod public;

/// Routes behind the `AuthUser` middleware layer.
pub mod authenticated;

/// Routes restricted to the 'admin' role.
pub mod admin;
