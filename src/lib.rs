//! O-MI path authorization
//!
//! Authorization decision point for an O-MI resource tree: classifies the
//! requested paths, extracts the session cookie and asks a remote permission
//! service whether the caller may read or write them.

pub mod config;
pub mod core;
pub mod credential;
pub mod decision;
pub mod logging;
pub mod oracle;
pub mod path;

pub use config::AuthzConfig;
pub use crate::core::{AuthzError, AuthzResult};
pub use credential::Credential;
pub use decision::{AuthApi, AuthorizationEngine, AuthorizationResult, RequestIntent};
pub use oracle::{HttpPermissionOracle, OperationKind, PermissionOracle};
pub use path::{OmiPath, PathClass, ROOT_PATH};
