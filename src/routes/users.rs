use crate::{
    auth::AuthService,
    error::AppError,
    models::{Credentials, UserResponse},
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates an account and returns its public fields. Never returns the hash.
///
/// ## Responses:
/// - `201 Created`: `{ "id", "email" }`.
/// - `400 Bad Request`: Malformed body, invalid email, or empty password.
/// - `409 Conflict`: The email is already registered.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let user = auth
        .register(&credentials.email, &credentials.password)
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Login user
///
/// The body is not format-validated: any email that is not registered is
/// simply a failed login.
///
/// ## Responses:
/// - `200 OK`: `{ "email", "access_token" }`.
/// - `400 Bad Request`: Malformed body.
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable).
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let response = auth
        .login(&credentials.email, &credentials.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
