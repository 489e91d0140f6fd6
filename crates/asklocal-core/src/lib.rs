//! # AskLocal Core
//!
//! The domain layer of the AskLocal backend.
//! This crate contains the record resolution and query-composition engine
//! with zero infrastructure dependencies: entities, repository ports and the
//! services built on top of them.

pub mod domain;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod services;

pub use error::{DomainError, ErrorKind, RepoError};
