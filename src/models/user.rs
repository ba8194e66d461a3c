use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// A registered account as held by the credential store.
///
/// Deliberately not `Serialize`: the password hash must not end up in a
/// response body. Use [`UserResponse`] for anything sent to a client.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    password_hash: String,
}

impl User {
    pub fn new(id: Uuid, email: String, password_hash: String) -> Self {
        Self {
            id,
            email,
            password_hash,
        }
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Public projection of a [`User`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Body of both `POST /users/register` and `POST /users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    /// Must be a valid email format. Stored and matched exactly as given.
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub email: String,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_credentials_validation() {
        let input = Credentials {
            email: "alice@example.com".to_string(),
            password: "pw1".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = Credentials {
            email: "invalid-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(input.validate().is_err());

        let input = Credentials {
            email: "alice@example.com".to_string(),
            password: String::new(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let user = User::new(
            Uuid::new_v4(),
            "alice@example.com".into(),
            "$2b$04$secret".into(),
        );
        let printed = format!("{:?}", user);
        assert!(printed.contains("alice@example.com"));
        assert!(!printed.contains("$2b$04$secret"));
    }

    #[test]
    fn test_public_projection_has_no_hash() {
        let user = User::new(Uuid::new_v4(), "bob@example.com".into(), "hash".into());
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["email"], "bob@example.com");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
