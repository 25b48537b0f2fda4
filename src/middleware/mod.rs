pub mod auth;
pub mod error_handler;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use error_handler::problem_details;
pub use response::{ApiResponse, ApiResult};
