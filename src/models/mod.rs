pub mod task;
pub mod user;

pub use task::{
    CreateTaskRequest, NewTask, Task, TaskChanges, TaskQuery, TaskStatus, UpdateTaskRequest,
};
pub use user::{Credentials, LoginResponse, User, UserResponse};
