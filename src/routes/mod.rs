pub mod health;
pub mod tasks;
pub mod users;

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, HttpRequest,
};

use crate::auth::AuthGate;
use crate::error::AppError;
use crate::state::AppState;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidInput(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidInput(err.to_string()).into()
}

// An id that does not parse cannot name one of the caller's tasks.
fn path_error(_err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::NotFound.into()
}

/// Registers shared state and all API routes.
///
/// `/users` is open; everything under `/tasks` sits behind [`AuthGate`].
pub fn config(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let gate = AuthGate::new(state.tokens.clone());

        cfg.app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .app_data(state.auth)
            .app_data(state.tasks)
            .app_data(state.tokens)
            .service(
                web::scope("/users")
                    .service(users::register)
                    .service(users::login),
            )
            .service(
                web::scope("/tasks")
                    .wrap(gate)
                    .service(tasks::get_tasks)
                    .service(tasks::create_task)
                    .service(tasks::get_task)
                    .service(tasks::update_task)
                    .service(tasks::delete_task),
            );
    }
}
