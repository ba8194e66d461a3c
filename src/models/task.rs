use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Pending,
    /// Currently being worked on.
    InProgress,
    /// Finished.
    Completed,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Set once at creation from the verified caller; never changed afterwards.
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a fresh task owned by `owner_id`.
    pub fn new(input: NewTask, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the supplied fields; the owner is not part of `TaskChanges`.
    pub fn apply(&mut self, changes: TaskChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Title must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Body of `POST /tasks`.
///
/// Unknown fields (an `ownerId` for instance) are dropped during
/// deserialization, so ownership can never come from the client.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub title: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Defaults to `pending` when omitted.
    pub status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> Result<NewTask, AppError> {
        self.validate()?;
        NewTask::new(self.title, self.description, self.status)
    }
}

/// Body of `PATCH /tasks/{id}`. Absent fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(max = 200), custom = "validate_not_blank")]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    pub fn into_changes(self) -> Result<TaskChanges, AppError> {
        self.validate()?;
        TaskChanges::new(self.title, self.description, self.status)
    }
}

/// Validated input for creating a task. The title is guaranteed non-blank.
#[derive(Debug, Clone)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    status: TaskStatus,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<Self, AppError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput("Title must not be empty".into()));
        }
        Ok(Self {
            title,
            description,
            status: status.unwrap_or_default(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }
}

/// Validated partial update. A supplied title is guaranteed non-blank.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
}

impl TaskChanges {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<Self, AppError> {
        if matches!(&title, Some(t) if t.trim().is_empty()) {
            return Err(AppError::InvalidInput("Title must not be empty".into()));
        }
        Ok(Self {
            title,
            description,
            status,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }
}

/// Query parameters for `GET /tasks`. Listing is always scoped to the caller.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
    }
}
