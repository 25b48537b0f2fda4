// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /users/*
// Middleware: jwt_auth_middleware injects AuthUser; per-user routes then check
// that the path's :user_id is the token's user.

pub mod anthropometrics;
pub mod exercises;
pub mod fixed_data;
pub mod objectives;
pub mod routines;
pub mod utils;
