//! Authentication: password hashing, access tokens, the request gate and the
//! register/login flows built from them.

pub mod extractors;
pub mod gate;
pub mod password;
pub mod service;
pub mod token;

pub use extractors::AuthenticatedUser;
pub use gate::{authorize, AuthGate, Identity};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{Claims, TokenError, TokenService};
