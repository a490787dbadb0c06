//! Infrastructure adapters for Userbase.
//!
//! This crate implements the `UserRepository` port defined in
//! `userbase-core::application::ports`. It contains all storage
//! dependencies and I/O operations.

pub mod backend;
pub mod user_store;

// Re-export commonly used adapters
pub use backend::{BackendConfig, BackendKind, connect};
pub use user_store::{
    DocumentUserRepository, InMemoryUserRepository, JsonFileUserRepository, SqliteUserRepository,
};
