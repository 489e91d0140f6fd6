//! Caller identification port.
//!
//! Identity is issued by an external provider; the core only ever sees the
//! caller's opaque integer id.

/// The authenticated caller of a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
}

/// Resolves a bearer credential into a [`Caller`].
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, token: &str) -> Result<Caller, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
