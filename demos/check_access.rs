//! Access Check - Manual probe against a running permission service
//!
//! Usage: check_access <read|write> <JSESSIONID value> <path>...
//!
//! The endpoint and timeouts come from the `OMI_AUTHZ_*` environment variables.

use anyhow::{bail, Result};
use omi_authz::{AuthApi, AuthorizationEngine, AuthzConfig, Credential, OmiPath, OperationKind};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let mut args = std::env::args().skip(1);
    let kind = match args.next().as_deref() {
        Some("read") => OperationKind::Read,
        Some("write") => OperationKind::Write,
        _ => bail!("usage: check_access <read|write> <session id> <path>..."),
    };
    let Some(session_id) = args.next() else {
        bail!("missing session id");
    };
    let paths: Vec<OmiPath> = args.map(OmiPath::from).collect();

    let config = AuthzConfig::from_env()?;
    println!("Endpoint: {}", config.endpoint);
    println!("Operation: {:?}", kind);
    println!("Paths: {}\n", paths.len());

    let engine = AuthorizationEngine::new(&config)?;
    let credentials = vec![Credential::new(config.credential_name.clone(), session_id)];

    let result = engine.decide(&credentials, kind, &paths).await;
    println!("Decision: {:?}", result);

    Ok(())
}
