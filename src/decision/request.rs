//! Structured request intents
//!
//! Hosts that already parsed an O-MI request can hand the engine the parsed
//! intent instead of a loose path set and write flag.

use crate::oracle::OperationKind;
use crate::path::OmiPath;

/// The operation an inbound request asks for, with the paths it touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestIntent {
    /// One-time read of current values
    Read { paths: Vec<OmiPath> },
    /// Subscription to periodic or event updates
    Subscribe { paths: Vec<OmiPath> },
    /// Poll of data gathered by an existing subscription
    Poll { paths: Vec<OmiPath> },
    /// Value write
    Write { paths: Vec<OmiPath> },
    /// Method call on tree objects
    Call { paths: Vec<OmiPath> },
    /// Removal of tree nodes
    Delete { paths: Vec<OmiPath> },
}

impl RequestIntent {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Read { .. } | Self::Subscribe { .. } | Self::Poll { .. } => OperationKind::Read,
            Self::Write { .. } | Self::Call { .. } | Self::Delete { .. } => OperationKind::Write,
        }
    }

    pub fn paths(&self) -> &[OmiPath] {
        match self {
            Self::Read { paths }
            | Self::Subscribe { paths }
            | Self::Poll { paths }
            | Self::Write { paths }
            | Self::Call { paths }
            | Self::Delete { paths } => paths,
        }
    }
}
