use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainValidator as validator, UserId};

/// The one entity of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Overwrite the fields the patch supplies. The id never changes.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }

    /// Consuming form of [`User::apply`].
    pub fn merged(mut self, patch: UserPatch) -> Self {
        self.apply(patch);
        self
    }
}

/// Creation payload.
///
/// The id is optional and kept raw so that a malformed id surfaces as a
/// validation error rather than a body-parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Validate and turn into a [`User`], generating an id when none was given.
    pub fn into_user(self) -> Result<User, DomainError> {
        validator::validate_new_user(&self)?;

        let id = match self.id {
            Some(raw) => UserId::parse(raw)?,
            None => UserId::generate(),
        };

        Ok(User {
            id,
            name: self.name,
            email: self.email,
        })
    }
}

/// Partial update payload. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validator::validate_patch(self)
    }
}
