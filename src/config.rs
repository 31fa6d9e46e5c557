//! Configuration for the authorization decision point
//!
//! The permission service location, the session cookie name and the
//! outbound timeouts are injected at construction time. Values can come from
//! code (`with_*` builders), the environment, or a JSON file.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::{AuthzError, AuthzResult};

/// Default permission service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8088/PermissionService?ac=true";
/// Default session cookie name
pub const DEFAULT_CREDENTIAL_NAME: &str = "JSESSIONID";
/// Default total timeout for one permission check (5 seconds)
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
/// Default connect timeout (2 seconds)
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;

const ENV_ENDPOINT: &str = "OMI_AUTHZ_ENDPOINT";
const ENV_CREDENTIAL_NAME: &str = "OMI_AUTHZ_CREDENTIAL_NAME";
const ENV_TIMEOUT_MS: &str = "OMI_AUTHZ_TIMEOUT_MS";
const ENV_CONNECT_TIMEOUT_MS: &str = "OMI_AUTHZ_CONNECT_TIMEOUT_MS";

/// Authorization configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzConfig {
    /// Permission service URL; `write=<bool>` is appended to its query
    pub endpoint: String,
    /// Name of the session credential forwarded to the service
    pub credential_name: String,
    /// Upper bound for a whole permission round trip
    pub request_timeout: Duration,
    /// Upper bound for establishing the connection
    pub connect_timeout: Duration,
}

/// On-disk form of the configuration, every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    endpoint: Option<String>,
    credential_name: Option<String>,
    request_timeout_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
}

impl Default for AuthzConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credential_name: DEFAULT_CREDENTIAL_NAME.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

impl AuthzConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the permission service endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the session credential name
    pub fn with_credential_name(mut self, name: impl Into<String>) -> Self {
        self.credential_name = name.into();
        self
    }

    /// Set the total request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Build a configuration from defaults overridden by `OMI_AUTHZ_*` variables
    pub fn from_env() -> AuthzResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a JSON configuration file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> AuthzResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AuthzError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file: ConfigFile = serde_json::from_str(&raw)
            .map_err(|e| AuthzError::Config(format!("{}: {}", path.display(), e)))?;

        let mut config = Self::default();
        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(name) = file.credential_name {
            config.credential_name = name;
        }
        if let Some(ms) = file.request_timeout_ms {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = file.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AuthzResult<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(name) = lookup(ENV_CREDENTIAL_NAME) {
            config.credential_name = name;
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            config.request_timeout = parse_millis(ENV_TIMEOUT_MS, &ms)?;
        }
        if let Some(ms) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            config.connect_timeout = parse_millis(ENV_CONNECT_TIMEOUT_MS, &ms)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint is an http(s) URL and the name is non-empty
    pub fn validate(&self) -> AuthzResult<()> {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| AuthzError::Config(format!("endpoint '{}': {}", self.endpoint, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AuthzError::Config(format!(
                "endpoint '{}' must use http or https",
                self.endpoint
            )));
        }
        if self.credential_name.trim().is_empty() {
            return Err(AuthzError::Config("credential name is empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(AuthzError::Config("request timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn parse_millis(key: &str, value: &str) -> AuthzResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| AuthzError::Config(format!("{} must be milliseconds, got '{}'", key, value)))
}
