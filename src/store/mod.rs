//! Persistence interfaces.
//!
//! Two engines implement them: [`memory::MemoryStore`] for tests and local
//! runs, and [`postgres::PgStore`] for deployments. Both enforce the same
//! ownership rules; handlers only ever see the traits.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskChanges, TaskQuery, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Users and their password hashes.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive match on the stored email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::DuplicateEmail` if the email is already
    /// registered. Never overwrites an existing user.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError>;
}

/// Task storage where every operation is scoped to an owner.
///
/// Lookups filter on id and owner together. A task that exists but belongs
/// to someone else is reported as `AppError::NotFound`, the same as a task
/// that does not exist at all.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All of the owner's tasks matching `query`, newest first.
    async fn list(&self, owner_id: Uuid, query: &TaskQuery) -> Result<Vec<Task>, AppError>;

    async fn create(&self, owner_id: Uuid, task: NewTask) -> Result<Task, AppError>;

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<Task, AppError>;

    /// Applies only the supplied fields. The owner never changes.
    async fn update(&self, id: Uuid, owner_id: Uuid, changes: TaskChanges) -> Result<Task, AppError>;

    /// Permanent removal.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), AppError>;
}
