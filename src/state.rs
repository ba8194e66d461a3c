use std::sync::Arc;

use actix_web::web;

use crate::auth::{AuthService, PasswordHasher, TokenService};
use crate::config::Config;
use crate::error::AppError;
use crate::store::{CredentialStore, MemoryStore, PgStore, TaskRepository};

/// Everything the routes need, built once at startup and cloned into each
/// worker. All members are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<dyn TaskRepository>,
    pub tokens: web::Data<TokenService>,
}

impl AppState {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tasks: Arc<dyn TaskRepository>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        let tokens = web::Data::new(tokens);
        Self {
            auth: web::Data::new(AuthService::new(credentials, hasher, tokens.clone())),
            tasks: web::Data::from(tasks),
            tokens,
        }
    }

    pub fn in_memory(config: &Config) -> Result<Self, AppError> {
        let store = Arc::new(MemoryStore::new());
        Ok(Self::new(
            store.clone(),
            store,
            PasswordHasher::new(config.bcrypt_cost)?,
            TokenService::from_config(config),
        ))
    }

    /// Connects to `database_url` and brings the schema up to date.
    pub async fn postgres(config: &Config, database_url: &str) -> Result<Self, AppError> {
        let store = PgStore::connect(database_url, config.database_max_connections).await?;
        store.migrate().await?;
        let store = Arc::new(store);
        Ok(Self::new(
            store.clone(),
            store,
            PasswordHasher::new(config.bcrypt_cost)?,
            TokenService::from_config(config),
        ))
    }

    /// Picks Postgres when `DATABASE_URL` is set, memory otherwise.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        match &config.database_url {
            Some(url) => {
                log::info!("using postgres store");
                Self::postgres(config, url).await
            }
            None => {
                log::warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
                Self::in_memory(config)
            }
        }
    }
}
