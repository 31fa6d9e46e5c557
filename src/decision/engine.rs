//! Authorization decision engine
//!
//! Orchestrates path classification, credential lookup and the permission
//! oracle into a single decision. The engine is stateless and never fails:
//! every error becomes `Unauthorized`.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::request::RequestIntent;
use crate::config::AuthzConfig;
use crate::core::{AuthzError, AuthzResult};
use crate::credential::{self, Credential};
use crate::oracle::{HttpPermissionOracle, OperationKind, PermissionOracle};
use crate::path::{OmiPath, PathClass};

/// Outcome of an authorization decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResult {
    /// Every requested path is permitted
    Authorized,
    /// No requested path is permitted
    Unauthorized,
    /// Only the carried paths are permitted
    ///
    /// Reserved for per-path decisions; [`AuthorizationEngine`] does not
    /// produce it.
    Partial(Vec<OmiPath>),
}

impl AuthorizationResult {
    pub fn from_granted(granted: bool) -> Self {
        if granted {
            Self::Authorized
        } else {
            Self::Unauthorized
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// Paths a host may serve out of `requested`
    pub fn allowed_paths<'a>(&'a self, requested: &'a [OmiPath]) -> &'a [OmiPath] {
        match self {
            Self::Authorized => requested,
            Self::Unauthorized => &[],
            Self::Partial(allowed) => allowed,
        }
    }
}

/// Entry point a request-processing host calls for every operation
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Decide whether `credentials` may perform `kind` on `paths`
    async fn decide(
        &self,
        credentials: &[Credential],
        kind: OperationKind,
        paths: &[OmiPath],
    ) -> AuthorizationResult;

    /// Decide for a parsed request, deriving kind and paths from it
    async fn decide_request(
        &self,
        credentials: &[Credential],
        intent: &RequestIntent,
    ) -> AuthorizationResult {
        self.decide(credentials, intent.operation_kind(), intent.paths())
            .await
    }
}

/// Decision engine backed by a permission oracle
pub struct AuthorizationEngine<O = HttpPermissionOracle> {
    oracle: O,
    credential_name: String,
}

impl AuthorizationEngine<HttpPermissionOracle> {
    /// Create an engine talking to the HTTP permission service in `config`
    pub fn new(config: &AuthzConfig) -> AuthzResult<Self> {
        let oracle = HttpPermissionOracle::new(config)?;
        Ok(Self::with_oracle(config, oracle))
    }
}

impl<O: PermissionOracle> AuthorizationEngine<O> {
    /// Create an engine around any oracle
    pub fn with_oracle(config: &AuthzConfig, oracle: O) -> Self {
        Self {
            oracle,
            credential_name: config.credential_name.clone(),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn credential_name(&self) -> &str {
        &self.credential_name
    }

    async fn evaluate(
        &self,
        credentials: &[Credential],
        kind: OperationKind,
        paths: &[OmiPath],
    ) -> AuthorizationResult {
        let mut restricted = Vec::with_capacity(paths.len());
        for path in paths {
            match path.class() {
                // Root in the request grants the whole request
                PathClass::Root => {
                    tracing::info!("Root tree requested ({}), allowed", path);
                    return AuthorizationResult::Authorized;
                }
                PathClass::Restricted => restricted.push(path.clone()),
            }
        }

        if restricted.is_empty() {
            tracing::debug!("No restricted paths requested, allowed");
            return AuthorizationResult::Authorized;
        }

        let Some(credential) = credential::extract(credentials, &self.credential_name) else {
            let err = AuthzError::MissingCredential {
                name: self.credential_name.clone(),
            };
            tracing::info!("Denied {} restricted paths: {}", restricted.len(), err);
            return AuthorizationResult::Unauthorized;
        };

        let granted = self.oracle.check(kind, &restricted, &credential).await;
        tracing::info!(
            "Permission service {} {:?} on {} paths",
            if granted { "granted" } else { "denied" },
            kind,
            restricted.len()
        );

        AuthorizationResult::from_granted(granted)
    }

    /// Like [`AuthApi::decide`], but gives up with `Unauthorized` as soon as
    /// `cancel` fires, aborting any in-flight oracle call
    pub async fn decide_cancellable(
        &self,
        credentials: &[Credential],
        kind: OperationKind,
        paths: &[OmiPath],
        cancel: &CancellationToken,
    ) -> AuthorizationResult {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("Denied: {}", AuthzError::Cancelled);
                AuthorizationResult::Unauthorized
            }
            result = self.evaluate(credentials, kind, paths) => result,
        }
    }
}

#[async_trait]
impl<O: PermissionOracle> AuthApi for AuthorizationEngine<O> {
    async fn decide(
        &self,
        credentials: &[Credential],
        kind: OperationKind,
        paths: &[OmiPath],
    ) -> AuthorizationResult {
        self.evaluate(credentials, kind, paths).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Oracle double recording every call
    struct RecordingOracle {
        answer: bool,
        calls: Mutex<Vec<(OperationKind, Vec<OmiPath>, Credential)>>,
    }

    impl RecordingOracle {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PermissionOracle for RecordingOracle {
        async fn check(&self, kind: OperationKind, paths: &[OmiPath], credential: &Credential) -> bool {
            self.calls
                .lock()
                .unwrap()
                .push((kind, paths.to_vec(), credential.clone()));
            self.answer
        }
    }

    /// Oracle that never answers
    struct HangingOracle;

    #[async_trait]
    impl PermissionOracle for HangingOracle {
        async fn check(&self, _: OperationKind, _: &[OmiPath], _: &Credential) -> bool {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            true
        }
    }

    fn engine(answer: bool) -> AuthorizationEngine<RecordingOracle> {
        AuthorizationEngine::with_oracle(&AuthzConfig::default(), RecordingOracle::answering(answer))
    }

    fn paths(raw: &[&str]) -> Vec<OmiPath> {
        raw.iter().map(|p| OmiPath::from(*p)).collect()
    }

    fn session() -> Vec<Credential> {
        vec![Credential::new("JSESSIONID", "abc123")]
    }

    #[tokio::test]
    async fn test_root_only_never_calls_oracle() {
        let engine = engine(false);

        for kind in [OperationKind::Read, OperationKind::Write] {
            for root in ["Objects", "objects", "OBJECTS"] {
                assert_eq!(
                    engine.decide(&[], kind, &paths(&[root])).await,
                    AuthorizationResult::Authorized
                );
                assert_eq!(
                    engine.decide(&session(), kind, &paths(&[root, root])).await,
                    AuthorizationResult::Authorized
                );
            }
        }
        assert_eq!(engine.oracle().call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_path_set_is_authorized() {
        let engine = engine(false);
        assert!(engine.decide(&[], OperationKind::Write, &[]).await.is_authorized());
        assert_eq!(engine.oracle().call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_skips_oracle() {
        let engine = engine(true);
        let other = vec![Credential::new("theme", "dark")];

        assert_eq!(
            engine.decide(&[], OperationKind::Read, &paths(&["Objects/Sensor1"])).await,
            AuthorizationResult::Unauthorized
        );
        assert_eq!(
            engine.decide(&other, OperationKind::Write, &paths(&["Objects/Sensor1"])).await,
            AuthorizationResult::Unauthorized
        );
        assert_eq!(engine.oracle().call_count(), 0);
    }

    #[tokio::test]
    async fn test_oracle_answer_decides() {
        let granting = engine(true);
        let denying = engine(false);
        let requested = paths(&["Objects/Sensor1", "Objects/Sensor2"]);

        assert_eq!(
            granting.decide(&session(), OperationKind::Read, &requested).await,
            AuthorizationResult::Authorized
        );
        assert_eq!(
            denying.decide(&session(), OperationKind::Read, &requested).await,
            AuthorizationResult::Unauthorized
        );

        let calls = granting.oracle().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, OperationKind::Read);
        assert_eq!(calls[0].1, requested);
        assert_eq!(calls[0].2.value(), "abc123");
    }

    #[tokio::test]
    async fn test_root_mixed_with_restricted_short_circuits() {
        let engine = engine(false);
        let requested = paths(&["Objects/Sensor1", "Objects", "Objects/Sensor2"]);

        assert_eq!(
            engine.decide(&[], OperationKind::Write, &requested).await,
            AuthorizationResult::Authorized
        );
        assert_eq!(engine.oracle().call_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_credential_name() {
        let config = AuthzConfig::default().with_credential_name("SID");
        let engine = AuthorizationEngine::with_oracle(&config, RecordingOracle::answering(true));

        let jsession_only = session();
        assert!(!engine
            .decide(&jsession_only, OperationKind::Read, &paths(&["Objects/A"]))
            .await
            .is_authorized());

        let sid = vec![Credential::new("sid", "xyz")];
        assert!(engine
            .decide(&sid, OperationKind::Read, &paths(&["Objects/A"]))
            .await
            .is_authorized());
        assert_eq!(engine.oracle().calls.lock().unwrap()[0].2.name(), "sid");
    }

    #[tokio::test]
    async fn test_decide_request_derives_kind() {
        let engine = engine(true);
        let intent = RequestIntent::Delete {
            paths: paths(&["Objects/Sensor1"]),
        };

        assert!(engine.decide_request(&session(), &intent).await.is_authorized());
        assert_eq!(
            engine.oracle().calls.lock().unwrap()[0].0,
            OperationKind::Write
        );
    }

    #[tokio::test]
    async fn test_cancellation_denies() {
        let engine = AuthorizationEngine::with_oracle(&AuthzConfig::default(), HangingOracle);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = engine
            .decide_cancellable(&session(), OperationKind::Read, &paths(&["Objects/A"]), &cancel)
            .await;
        assert_eq!(result, AuthorizationResult::Unauthorized);
    }

    #[tokio::test]
    async fn test_cancellable_passes_through_when_not_cancelled() {
        let engine = engine(true);
        let cancel = CancellationToken::new();

        let result = engine
            .decide_cancellable(&session(), OperationKind::Read, &paths(&["Objects/A"]), &cancel)
            .await;
        assert_eq!(result, AuthorizationResult::Authorized);
    }

    #[test]
    fn test_allowed_paths() {
        let requested = paths(&["Objects/A", "Objects/B"]);
        let partial = AuthorizationResult::Partial(paths(&["Objects/B"]));

        assert_eq!(AuthorizationResult::Authorized.allowed_paths(&requested), requested.as_slice());
        assert!(AuthorizationResult::Unauthorized.allowed_paths(&requested).is_empty());
        assert_eq!(partial.allowed_paths(&requested), &requested[1..]);
    }
}
