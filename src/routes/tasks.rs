use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskRequest, TaskQuery, UpdateTaskRequest},
    store::TaskRepository,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

/// Retrieves the authenticated user's tasks, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): `pending`, `in_progress` or `completed`.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn get_tasks(
    repo: web::Data<dyn TaskRepository>,
    query: web::Query<TaskQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = repo.list(user.0.subject_id, &query).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner always comes from the token. Any owner field in the body is
/// ignored. `status` defaults to `pending`.
///
/// ## Responses:
/// - `201 Created`: The new task.
/// - `400 Bad Request`: Blank or overlong title, overlong description, bad status.
/// - `401 Unauthorized`: Missing or invalid token.
#[post("")]
pub async fn create_task(
    repo: web::Data<dyn TaskRepository>,
    body: web::Json<CreateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let new_task = body.into_inner().into_new_task()?;
    let task = repo.create(user.0.subject_id, new_task).await?;
    log::debug!("user {} created task {}", user.0.subject_id, task.id);
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: The task.
/// - `401 Unauthorized`: Missing or invalid token.
/// - `404 Not Found`: No such task for this user (another user's task is reported the same way).
#[get("/{id}")]
pub async fn get_task(
    repo: web::Data<dyn TaskRepository>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = repo.get(task_id.into_inner(), user.0.subject_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Only the fields present in the body change.
///
/// ## Responses:
/// - `200 OK`: The updated task.
/// - `400 Bad Request`: Invalid field values.
/// - `401 Unauthorized`: Missing or invalid token.
/// - `404 Not Found`: No such task for this user.
#[patch("/{id}")]
pub async fn update_task(
    repo: web::Data<dyn TaskRepository>,
    task_id: web::Path<Uuid>,
    body: web::Json<UpdateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let changes = body.into_inner().into_changes()?;
    let task = repo
        .update(task_id.into_inner(), user.0.subject_id, changes)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task permanently.
///
/// ## Responses:
/// - `200 OK`: `{ "message": "Task deleted successfully", "id" }`.
/// - `401 Unauthorized`: Missing or invalid token.
/// - `404 Not Found`: No such task for this user.
#[delete("/{id}")]
pub async fn delete_task(
    repo: web::Data<dyn TaskRepository>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    repo.delete(id, user.0.subject_id).await?;
    log::debug!("user {} deleted task {}", user.0.subject_id, id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully",
        "id": id
    })))
}
