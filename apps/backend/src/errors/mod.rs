//! Error handling for the rummy room server.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
