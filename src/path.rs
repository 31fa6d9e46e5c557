//! Resource tree paths and their classification
//!
//! The tree itself lives in the host; this crate only needs the string form
//! of a path and whether it is the distinguished root.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The path denoting the whole tree, always readable and writable
pub const ROOT_PATH: &str = "Objects";

/// A hierarchical identifier into the protected resource tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OmiPath(String);

impl OmiPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify this path, see [`classify`]
    pub fn class(&self) -> PathClass {
        classify(self)
    }
}

impl fmt::Display for OmiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OmiPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for OmiPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl AsRef<str> for OmiPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether a path needs a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// The tree root, always allowed
    Root,
    /// Anything below the root, needs the permission service
    Restricted,
}

/// Classify a path by exact, case-insensitive comparison with [`ROOT_PATH`]
pub fn classify(path: &OmiPath) -> PathClass {
    if path.as_str().eq_ignore_ascii_case(ROOT_PATH) {
        PathClass::Root
    } else {
        PathClass::Restricted
    }
}
