//! Permission oracle
//!
//! Client for the remote service that makes the authoritative allow/deny
//! decision for a path set, an operation kind and a session credential.

mod client;
mod transport;
mod types;

pub use client::{HttpPermissionOracle, PermissionOracle};
pub use transport::{HttpTransport, OracleConnection, OracleTransport};
pub use types::{permission_granted, OperationKind, OracleCall, PermissionRequest};
