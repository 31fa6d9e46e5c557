//! Transport seam between the oracle client and the network
//!
//! A connection is acquired per check and owned by the caller; dropping it
//! releases the underlying socket back to the client pool (or closes it).

use async_trait::async_trait;
use std::time::Duration;

use super::types::OracleCall;
use crate::config::AuthzConfig;
use crate::core::{AuthzError, AuthzResult};

/// An open exchange with the permission service
#[async_trait]
pub trait OracleConnection: Send {
    /// Read the full response body as text
    async fn read_body(&mut self) -> AuthzResult<String>;
}

/// Opens connections to the permission service
#[async_trait]
pub trait OracleTransport: Send + Sync {
    /// Send `call` and return the connection holding the response
    async fn open(&self, call: &OracleCall) -> AuthzResult<Box<dyn OracleConnection>>;
}

/// reqwest-backed transport with bounded connect and request timeouts
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport using the timeouts from `config`
    pub fn new(config: &AuthzConfig) -> AuthzResult<Self> {
        Self::with_timeouts(config.request_timeout, config.connect_timeout)
    }

    pub fn with_timeouts(request_timeout: Duration, connect_timeout: Duration) -> AuthzResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OracleTransport for HttpTransport {
    async fn open(&self, call: &OracleCall) -> AuthzResult<Box<dyn OracleConnection>> {
        let response = self
            .client
            .post(call.url.clone())
            .header("Content-Type", "application/json")
            .header("Cookie", &call.cookie)
            .body(call.body.clone())
            .send()
            .await
            .map_err(unreachable_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthzError::OracleStatus(status.as_u16()));
        }

        Ok(Box::new(HttpConnection {
            response: Some(response),
        }))
    }
}

struct HttpConnection {
    response: Option<reqwest::Response>,
}

#[async_trait]
impl OracleConnection for HttpConnection {
    async fn read_body(&mut self) -> AuthzResult<String> {
        let response = self
            .response
            .take()
            .ok_or_else(|| AuthzError::OracleBody("response already consumed".to_string()))?;

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                AuthzError::OracleUnreachable(format!("timed out reading response: {}", e))
            } else {
                AuthzError::OracleBody(e.to_string())
            }
        })
    }
}

fn unreachable_error(e: reqwest::Error) -> AuthzError {
    if e.is_timeout() {
        AuthzError::OracleUnreachable(format!("timed out: {}", e))
    } else if e.is_connect() {
        AuthzError::OracleUnreachable(format!("connect failed: {}", e))
    } else {
        AuthzError::OracleUnreachable(e.to_string())
    }
}
