//! Userbase Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Userbase
//! service, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       userbase-server (HTTP + CLI)      │
//! │   Routes -> Controllers (axum handlers) │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │              (UserService)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │            (UserRepository)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    userbase-adapters (Infrastructure)   │
//! │  (InMemory, JsonFile, Document, Sqlite) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │     (User, UserId, NewUser, UserPatch)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use userbase_core::prelude::*;
//!
//! # async fn demo(repository: Arc<dyn UserRepository>) -> UserbaseResult<()> {
//! let service = UserService::new(repository);
//!
//! let created = service
//!     .create(NewUser::new("Ada Lovelace", "ada@example.com"))
//!     .await?;
//! let found = service.get(created.id.as_str()).await?;
//! assert_eq!(found, Some(created));
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{UserService, ports::UserRepository};
    pub use crate::domain::{NewUser, User, UserId, UserPatch};
    pub use crate::error::{ErrorCategory, UserbaseError, UserbaseResult};
}
