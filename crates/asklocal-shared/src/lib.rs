//! # AskLocal Shared
//!
//! Wire types shared between the API server and its clients.
//! Kept free of domain and infrastructure crates so clients can depend on it
//! directly.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
