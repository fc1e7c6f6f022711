use std::env;

/// AppConfig
///
/// Holds the service's configuration. Immutable once loaded and pulled into
/// handlers and extractors from the application state via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the local role-header bypass and log format.
    pub env: Env,
    // HMAC secret used to validate session tokens.
    pub jwt_secret: String,
    // Address the HTTP server binds to.
    pub bind_addr: String,
    // Where the authentication guard sends callers without a session.
    pub login_path: String,
    // Where the anti-authentication guard sends callers who already have one.
    pub home_path: String,
}

/// Env
///
/// Runtime context: `Local` enables development conveniences, `Production` hardens them away.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";

impl Default for AppConfig {
    /// Safe, non-panicking values for test setup.
    fn default() -> Self {
        Self {
            env: Env::Local,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics when `JWT_SECRET` is missing in production, so the service never
    /// starts with a guessable signing secret.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            Env::Local => env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
        };

        let defaults = Self::default();
        Self {
            env,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            login_path: env::var("LOGIN_PATH").unwrap_or(defaults.login_path),
            home_path: env::var("HOME_PATH").unwrap_or(defaults.home_path),
        }
    }
}
