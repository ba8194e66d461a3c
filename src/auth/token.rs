use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

/// Represents the claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: Uuid,
    /// The user's email at the time of issuance.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token was refused. Only the auth gate and logs ever see this; clients
/// get a single undifferentiated `Unauthorized`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies HS256 access tokens under a single static key.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            Duration::minutes(config.token_ttl_minutes),
        )
    }

    pub fn issue(&self, subject_id: Uuid, subject_email: &str) -> Result<String, AppError> {
        self.issue_at(subject_id, subject_email, Utc::now())
    }

    /// Issues a token as if it had been minted at `issued_at`.
    pub fn issue_at(
        &self,
        subject_id: Uuid,
        subject_email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject_id,
            email: subject_email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature and expiry. Expired tokens fail even when the
    /// signature is valid.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        // jsonwebtoken still accepts the second equal to `exp`.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SECRET: &[u8] = b"test_secret_for_token_service_tests";

    fn service() -> TokenService {
        TokenService::new(SECRET, Duration::minutes(60))
    }

    #[test]
    fn test_token_generation_and_verification() {
        let tokens = service();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id, "alice@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_token_expiration() {
        let tokens = service();
        let issued_at = Utc::now() - Duration::minutes(61);
        let expired = tokens
            .issue_at(Uuid::new_v4(), "alice@example.com", issued_at)
            .unwrap();

        assert_eq!(tokens.verify(&expired), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_rejected_at_exact_expiry() {
        let tokens = service();
        let issued_at = Utc::now() - Duration::minutes(60);
        let token = tokens
            .issue_at(Uuid::new_v4(), "alice@example.com", issued_at)
            .unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_just_inside_window() {
        let tokens = service();
        let issued_at = Utc::now() - Duration::minutes(59);
        let token = tokens
            .issue_at(Uuid::new_v4(), "alice@example.com", issued_at)
            .unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_invalid_token_signature() {
        let other = TokenService::new(b"a_completely_different_secret", Duration::minutes(60));
        let token = other.issue(Uuid::new_v4(), "mallory@example.com").unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let tokens = service();
        let alice = tokens.issue(Uuid::new_v4(), "alice@example.com").unwrap();
        let bob = tokens.issue(Uuid::new_v4(), "bob@example.com").unwrap();

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let bob_parts: Vec<&str> = bob.split('.').collect();
        // Bob's claims under Alice's signature.
        let spliced = format!("{}.{}.{}", alice_parts[0], bob_parts[1], alice_parts[2]);

        assert_eq!(tokens.verify(&spliced), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        let tokens = service();
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
        assert_eq!(tokens.verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let header = Header::new(Algorithm::HS512);
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "alice@example.com".into(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(5)).timestamp(),
        };
        let token = encode(&header, &claims, &EncodingKey::from_secret(SECRET)).unwrap();

        assert!(service().verify(&token).is_err());
    }
}
