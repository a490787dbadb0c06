//! Application services - orchestrate use cases.

pub mod user_service;

pub use user_service::UserService;
