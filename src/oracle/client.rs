//! Permission oracle client
//!
//! Sends the restricted paths of one request to the permission service and
//! turns its textual answer into a boolean. Every failure is logged and
//! answered with `false`.

use async_trait::async_trait;
use reqwest::Url;

use super::transport::{HttpTransport, OracleTransport};
use super::types::{permission_granted, OperationKind, OracleCall};
use crate::config::AuthzConfig;
use crate::core::{AuthzError, AuthzResult};
use crate::credential::Credential;
use crate::path::OmiPath;

/// Authoritative allow/deny source for a set of paths
#[async_trait]
pub trait PermissionOracle: Send + Sync {
    /// Whether `credential` may perform `kind` on every path in `paths`
    async fn check(&self, kind: OperationKind, paths: &[OmiPath], credential: &Credential) -> bool;
}

/// HTTP client for the remote permission service
pub struct HttpPermissionOracle<T = HttpTransport> {
    endpoint: Url,
    transport: T,
}

impl HttpPermissionOracle<HttpTransport> {
    /// Create a client for the endpoint and timeouts in `config`
    pub fn new(config: &AuthzConfig) -> AuthzResult<Self> {
        Self::with_transport(config, HttpTransport::new(config)?)
    }
}

impl<T: OracleTransport> HttpPermissionOracle<T> {
    /// Create a client that sends through a custom transport
    pub fn with_transport(config: &AuthzConfig, transport: T) -> AuthzResult<Self> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| AuthzError::Config(format!("endpoint '{}': {}", config.endpoint, e)))?;

        Ok(Self { endpoint, transport })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run one check, surfacing the failure reason
    pub async fn try_check(
        &self,
        kind: OperationKind,
        paths: &[OmiPath],
        credential: &Credential,
    ) -> AuthzResult<bool> {
        let call = OracleCall::new(&self.endpoint, kind, paths, credential)?;
        tracing::debug!("Sending permission request to {} ({} paths)", call.url, paths.len());

        let mut connection = self.transport.open(&call).await?;
        let body = connection.read_body().await;
        drop(connection);

        let body = body?;
        let granted = permission_granted(&body);
        tracing::debug!("Permission service answered {:?} -> {}", body.trim_end(), granted);

        Ok(granted)
    }
}

#[async_trait]
impl<T: OracleTransport> PermissionOracle for HttpPermissionOracle<T> {
    async fn check(&self, kind: OperationKind, paths: &[OmiPath], credential: &Credential) -> bool {
        match self.try_check(kind, paths, credential).await {
            Ok(granted) => granted,
            Err(e) if e.is_oracle_failure() => {
                tracing::warn!("Permission service unavailable, denying: {}", e);
                false
            }
            Err(e) => {
                tracing::warn!("Permission check failed closed: {}", e);
                false
            }
        }
    }
}
