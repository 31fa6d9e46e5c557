//! Shared fixtures for integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use omi_authz::{AuthorizationEngine, AuthzConfig, Credential, OmiPath};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

pub const SERVICE_PATH: &str = "/PermissionService";

/// Mock permission service
pub struct MockOracle {
    server: ServerGuard,
}

impl MockOracle {
    pub async fn new() -> Self {
        Self {
            server: mockito::Server::new_async().await,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}?ac=true", self.server.url(), SERVICE_PATH)
    }

    pub fn config(&self) -> AuthzConfig {
        AuthzConfig::new()
            .with_endpoint(self.endpoint())
            .with_request_timeout(Duration::from_secs(2))
    }

    pub fn engine(&self) -> AuthorizationEngine {
        AuthorizationEngine::new(&self.config()).expect("engine")
    }

    /// Expect exactly one check for `paths` and answer with `status`/`body`
    pub async fn mock_check(
        &mut self,
        write: bool,
        paths: &[&str],
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock("POST", SERVICE_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ac".into(), "true".into()),
                Matcher::UrlEncoded("write".into(), write.to_string()),
            ]))
            .match_header("content-type", "application/json")
            .match_header("cookie", "JSESSIONID=abc123")
            .match_body(Matcher::Json(json!({ "paths": paths })))
            .with_status(status)
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    /// Answer `hits` checks of any path set with `body`
    pub async fn mock_any(&mut self, hits: usize, body: &str) -> Mock {
        self.server
            .mock("POST", SERVICE_PATH)
            .match_query(Matcher::Any)
            .match_header("cookie", "JSESSIONID=abc123")
            .with_status(200)
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    /// Fail the test if any request reaches the service
    pub async fn mock_no_calls(&mut self) -> Mock {
        self.server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }
}

/// A listener that accepts connections and never answers
pub async fn silent_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}{}?ac=true", addr, SERVICE_PATH)
}

/// An endpoint on a port nothing listens on
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    format!("http://{}{}?ac=true", addr, SERVICE_PATH)
}

pub fn session() -> Vec<Credential> {
    vec![
        Credential::new("theme", "dark"),
        Credential::new("JSESSIONID", "abc123"),
    ]
}

pub fn paths(raw: &[&str]) -> Vec<OmiPath> {
    raw.iter().map(|p| OmiPath::from(*p)).collect()
}
