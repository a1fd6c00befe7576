use std::time::Duration;

/// Configuration error: a required environment variable was missing or
/// could not be parsed. Fail-fast at boot rather than limping along on a
/// silently-defaulted value (`SPEC_FULL.md` §2.3).
#[derive(Debug)]
pub struct ConfigError(String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Environment-driven configuration for the meta gateway binary.
///
/// `<apipath>/<apiversion>/<prefix>` together form the meta-routing mount
/// point `spec.md` §6 describes; `<prefix>` is the deployment-chosen word
/// (e.g. `meta`, `experimental`).
#[derive(Debug, Clone)]
pub struct MetaServerConfig {
    pub bind_address: String,
    pub api_root: String,
    pub api_version: String,
    pub prefix: String,
    pub system_namespace: String,
    pub backend_host_base: String,
    pub invocation_timeout: Duration,
}

impl MetaServerConfig {
    /// Loads configuration from the process environment, optionally seeded
    /// by a `.env` file (`dotenvy`, matching the reference workspace's own
    /// convention — see `r2e-core`'s config loader). Required keys missing
    /// at boot are a hard startup error; everything else falls back to a
    /// sensible default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            bind_address: env_or("META_BIND_ADDRESS", "0.0.0.0:8080"),
            api_root: env_or("META_API_ROOT", "api"),
            api_version: env_or("META_API_VERSION", "v1"),
            prefix: env_or("META_PREFIX", "meta"),
            system_namespace: require_env("META_SYSTEM_NAMESPACE")?,
            backend_host_base: require_env("META_BACKEND_HOST_BASE")?,
            invocation_timeout: Duration::from_millis(env_or_parse("META_INVOCATION_TIMEOUT_MS", 60_000)?),
        })
    }

    /// The full path the meta-routing `Router` is mounted at, e.g.
    /// `/api/v1/meta`.
    pub fn meta_mount_path(&self) -> String {
        format!("/{}/{}/{}", self.api_root, self.api_version, self.prefix)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError(format!("missing required environment variable {key}")))
}

fn env_or_parse(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError(format!("{key} must be a positive integer, got {value:?}"))),
        Err(_) => Ok(default),
    }
}
