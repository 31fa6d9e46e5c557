//! Wire types for the permission service

use reqwest::Url;
use serde::Serialize;

use crate::core::AuthzResult;
use crate::credential::Credential;
use crate::path::OmiPath;

/// Read or write intent, applied uniformly to every path of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Read,
    Write,
}

impl OperationKind {
    pub fn from_write_flag(is_write: bool) -> Self {
        if is_write {
            Self::Write
        } else {
            Self::Read
        }
    }

    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Value of the `write` query parameter
    pub fn as_query_value(self) -> &'static str {
        if self.is_write() {
            "true"
        } else {
            "false"
        }
    }
}

/// JSON body sent to the permission service
#[derive(Debug, Serialize)]
pub struct PermissionRequest<'a> {
    pub paths: &'a [OmiPath],
}

/// A fully prepared outbound call: URL, cookie and serialized body
#[derive(Debug, Clone)]
pub struct OracleCall {
    pub url: Url,
    pub cookie: String,
    pub body: String,
}

impl OracleCall {
    /// Prepare a call to `endpoint` with `write=<bool>` appended to its query
    pub fn new(
        endpoint: &Url,
        kind: OperationKind,
        paths: &[OmiPath],
        credential: &Credential,
    ) -> AuthzResult<Self> {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("write", kind.as_query_value());

        let body = serde_json::to_string(&PermissionRequest { paths })?;

        Ok(Self {
            url,
            cookie: credential.to_cookie_header(),
            body,
        })
    }
}

/// Interpret a response body: `true` iff it reads "true", ignoring case and
/// trailing whitespace
pub fn permission_granted(body: &str) -> bool {
    body.trim_end().eq_ignore_ascii_case("true")
}
