//! # Userbase server
//!
//! The interface layer: command-line parsing, configuration, logging and
//! the axum HTTP surface over [`userbase_core::application::UserService`].
//!
//! The binary in `main.rs` is a thin shell over this library so that the
//! router can be exercised in-process by integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
