//! Application layer for Userbase.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (UserService)
//! - **Ports**: Interface definitions (traits) for persistence
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::UserService;

pub use ports::UserRepository;

pub use error::ApplicationError;
