use std::sync::Arc;

use actix_web::web;

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::{LoginResponse, User};
use crate::store::CredentialStore;

/// Registration and login on top of the credential store.
///
/// Bcrypt work is pushed onto actix's blocking pool so it never stalls a
/// worker thread.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: web::Data<TokenService>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: web::Data<TokenService>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Fails with `DuplicateEmail` when the address is taken; the existing
    /// credential is left as it was.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let password_hash = web::block(move || hasher.hash(&password)).await??;

        let user = self.store.create(email, &password_hash).await?;
        log::info!("registered user {}", user.id);
        Ok(user)
    }

    /// Unknown email and wrong password are the same `Unauthorized`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self.store.find_by_email(email).await?;

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let stored_hash = user.as_ref().map(|u| u.password_hash().to_owned());
        let verified = web::block(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => {
                hasher.verify_decoy(&password);
                false
            }
        })
        .await?;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                log::debug!("login rejected");
                return Err(AppError::Unauthorized);
            }
        };

        let access_token = self.tokens.issue(user.id, &user.email)?;
        log::info!("user {} logged in", user.id);
        Ok(LoginResponse {
            email: user.email,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn service() -> (AuthService, web::Data<TokenService>) {
        let tokens = web::Data::new(TokenService::new(b"service-test-secret", Duration::minutes(60)));
        let service = AuthService::new(
            Arc::new(MemoryStore::new()),
            PasswordHasher::new(4).unwrap(),
            tokens.clone(),
        );
        (service, tokens)
    }

    #[actix_rt::test]
    async fn test_register_then_login() {
        let (service, tokens) = service();
        let user = service.register("alice@example.com", "pw1").await.unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash(), "pw1");

        let login = service.login("alice@example.com", "pw1").await.unwrap();
        assert_eq!(login.email, "alice@example.com");
        let claims = tokens.verify(&login.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
    }

    #[actix_rt::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service.register("alice@example.com", "pw1").await.unwrap();

        let wrong_password = service.login("alice@example.com", "wrong").await;
        let unknown_email = service.login("nobody@example.com", "pw1").await;

        assert!(matches!(wrong_password, Err(AppError::Unauthorized)));
        assert!(matches!(unknown_email, Err(AppError::Unauthorized)));
    }

    #[actix_rt::test]
    async fn test_duplicate_registration_keeps_first_credential() {
        let (service, _) = service();
        service.register("alice@example.com", "pw1").await.unwrap();

        let second = service.register("alice@example.com", "pw2").await;
        assert!(matches!(second, Err(AppError::DuplicateEmail)));

        assert!(service.login("alice@example.com", "pw1").await.is_ok());
        assert!(matches!(
            service.login("alice@example.com", "pw2").await,
            Err(AppError::Unauthorized)
        ));
    }

    #[actix_rt::test]
    async fn test_email_is_case_sensitive() {
        let (service, _) = service();
        service.register("alice@example.com", "pw1").await.unwrap();

        assert!(matches!(
            service.login("Alice@Example.com", "pw1").await,
            Err(AppError::Unauthorized)
        ));
    }
}
