//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `userbase-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `UserRepository`: user persistence
//!
//! - **Driving (Input) Ports**: Called by the outside world
//!   - (HTTP controllers in `userbase-server`, calling `UserService`)

pub mod output;

pub use output::UserRepository;

#[cfg(test)]
pub use output::MockUserRepository;
