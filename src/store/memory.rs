use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, TaskRepository};
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskChanges, TaskQuery, User};

/// Process-local storage. Every operation runs under a single lock
/// acquisition, so writes are all-or-nothing.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(AppError::DuplicateEmail);
        }
        let user = User::new(Uuid::new_v4(), email.to_string(), password_hash.to_string());
        users.insert(email.to_string(), user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn list(&self, owner_id: Uuid, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|task| task.owner_id == owner_id && query.matches(task))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn create(&self, owner_id: Uuid, task: NewTask) -> Result<Task, AppError> {
        let task = Task::new(task, owner_id);
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<Task, AppError> {
        self.tasks
            .read()
            .await
            .get(&id)
            .filter(|task| task.owner_id == owner_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn update(&self, id: Uuid, owner_id: Uuid, changes: TaskChanges) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&id)
            .filter(|task| task.owner_id == owner_id)
            .ok_or(AppError::NotFound)?;
        task.apply(changes);
        Ok(task.clone())
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get(&id) {
            Some(task) if task.owner_id == owner_id => {
                tasks.remove(&id);
                Ok(())
            }
            _ => Err(AppError::NotFound),
        }
    }
}
