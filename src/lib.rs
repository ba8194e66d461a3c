#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Personal task records behind bearer-token authentication. Every task"]
#![doc = "operation is scoped to the identity carried by a verified token, and"]
#![doc = "another user's task is indistinguishable from a missing one."]
#![doc = ""]
#![doc = "The binary (`main.rs`) reads [`config::Config`], builds a [`state::AppState`]"]
#![doc = "and mounts [`routes::config`] on an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
