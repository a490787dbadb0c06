//! Core domain layer for Userbase.
//!
//! This module contains pure business logic with no I/O. Persistence is
//! handled via the `UserRepository` port defined in the application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or database calls
//! - **Immutable identity**: a `UserId` never changes once assigned

pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{NewUser, User, UserPatch};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
pub use value_objects::UserId;
