//! Caller identification.

mod jwt;

pub use jwt::{JwtConfig, JwtIdentityProvider};
