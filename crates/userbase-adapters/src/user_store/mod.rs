//! `UserRepository` adapters, one per storage technology.

mod document;
mod json_file;
mod memory;
mod sqlite;
mod table;

pub use document::DocumentUserRepository;
pub use json_file::JsonFileUserRepository;
pub use memory::InMemoryUserRepository;
pub use sqlite::SqliteUserRepository;
