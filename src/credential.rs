//! Session credentials carried on inbound requests
//!
//! A credential is a cookie-like name/value pair. It is located by name and
//! forwarded unchanged to the permission service in a `Cookie` header.

use std::fmt;

/// A session token attached to an inbound request
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    name: String,
    value: String,
}

impl Credential {
    /// Create a new credential
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The wire form used in a `Cookie` header: `name=value`
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Split a raw `Cookie` header (`a=1; b=2`) into credentials
    ///
    /// Pairs without `=` or with an empty name are skipped.
    pub fn parse_cookie_header(header: &str) -> Vec<Self> {
        header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(Self::new(name, value.trim()))
            })
            .collect()
    }
}

// Session values stay out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Find the first credential whose name matches `name` case-insensitively
pub fn extract(credentials: &[Credential], name: &str) -> Option<Credential> {
    credentials
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .cloned()
}
