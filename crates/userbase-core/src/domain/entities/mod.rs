pub mod user;

pub use crate::domain::DomainError;
pub use user::{NewUser, User, UserPatch};
