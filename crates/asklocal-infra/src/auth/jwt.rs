//! JWT bearer token validation.
//!
//! Tokens are minted by an external identity service sharing the HS256
//! secret; this side only validates them and reads the caller id from `sub`.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use asklocal_core::ports::{AuthError, Caller, IdentityProvider};

/// JWT validation configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            issuer: "asklocal-api".to_string(),
        }
    }
}

/// Claims the identity service puts in a token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // integer user id
    exp: i64,
    iss: String,
}

/// Identifies callers from HS256 bearer tokens.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn identify(&self, token: &str) -> Result<Caller, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))?;

        Ok(Caller { user_id })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            issuer: "test-issuer".to_string(),
        }
    }

    fn mint(secret: &str, sub: &str, issuer: &str, lifetime: TimeDelta) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (Utc::now() + lifetime).timestamp(),
            iss: issuer.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_identify_success() {
        let provider = JwtIdentityProvider::new(&test_config());
        let token = mint("test-secret-key", "42", "test-issuer", TimeDelta::hours(1));

        let caller = provider.identify(&token).unwrap();

        assert_eq!(caller.user_id, 42);
    }

    #[test]
    fn test_identify_invalid_token() {
        let provider = JwtIdentityProvider::new(&test_config());

        let result = provider.identify("invalid-token");

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_identify_wrong_issuer() {
        let provider = JwtIdentityProvider::new(&test_config());
        let token = mint("test-secret-key", "42", "someone-else", TimeDelta::hours(1));

        assert!(provider.identify(&token).is_err());
    }

    #[test]
    fn test_identify_wrong_secret() {
        let provider = JwtIdentityProvider::new(&test_config());
        let token = mint("other-secret", "42", "test-issuer", TimeDelta::hours(1));

        assert!(matches!(
            provider.identify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_identify_expired_token() {
        let provider = JwtIdentityProvider::new(&test_config());
        let token = mint("test-secret-key", "42", "test-issuer", TimeDelta::hours(-2));

        assert!(matches!(
            provider.identify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_identify_non_integer_subject() {
        let provider = JwtIdentityProvider::new(&test_config());
        let token = mint(
            "test-secret-key",
            "5f0c6a1e-uuid",
            "test-issuer",
            TimeDelta::hours(1),
        );

        assert!(matches!(
            provider.identify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
