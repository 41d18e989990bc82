//! # Quill Core
//!
//! The domain layer of the post service: identifiers, the post entity,
//! pagination options, the storage port and the service that validates
//! requests before they reach storage.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod id;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use id::Id;
