//! Authorization Decision
//!
//! Decides, per inbound request, whether the caller may read or write the
//! requested paths.
//!
//! # Overview
//!
//! | Step | Outcome |
//! |------|---------|
//! | Any requested path is the root (`Objects`) | `Authorized`, nothing else runs |
//! | No restricted paths | `Authorized` |
//! | No session credential | `Unauthorized`, the permission service is not contacted |
//! | Permission service answers `true` | `Authorized` |
//! | Anything else (`false`, error, timeout, cancel) | `Unauthorized` |
//!
//! The decision is all-or-nothing for the whole path set. Failures never
//! surface to the host as errors.
//!
//! # Example
//!
//! ```ignore
//! use omi_authz::{AuthApi, AuthorizationEngine, AuthzConfig, Credential, OmiPath, OperationKind};
//!
//! let engine = AuthorizationEngine::new(&AuthzConfig::from_env()?)?;
//! let cookies = Credential::parse_cookie_header("JSESSIONID=abc123");
//! let result = engine
//!     .decide(&cookies, OperationKind::Read, &[OmiPath::from("Objects/Sensor1")])
//!     .await;
//! ```

mod engine;
mod request;

pub use engine::{AuthApi, AuthorizationEngine, AuthorizationResult};
pub use request::RequestIntent;
