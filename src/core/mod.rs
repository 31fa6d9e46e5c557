//! Core types shared by every module

pub mod error;

pub use error::{AuthzError, AuthzResult};
