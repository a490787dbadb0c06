use crate::domain::{
    entities::{NewUser, UserPatch},
    error::DomainError,
};

pub(crate) const MAX_NAME_LEN: usize = 256;
pub(crate) const MAX_EMAIL_LEN: usize = 320;

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_new_user(new_user: &NewUser) -> Result<(), DomainError> {
        check_name(&new_user.name)?;
        check_email(&new_user.email)
    }

    pub fn validate_patch(patch: &UserPatch) -> Result<(), DomainError> {
        if let Some(name) = &patch.name {
            check_name(name)?;
        }
        if let Some(email) = &patch.email {
            check_email(email)?;
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::invalid_user("name", "must not be blank"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::invalid_user(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::invalid_user("email", reason);

    if email.len() > MAX_EMAIL_LEN {
        return Err(invalid("must be at most 320 characters"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if domain.contains('@') {
        return Err(invalid("must contain exactly one '@'"));
    }
    if local.is_empty() {
        return Err(invalid("is missing the part before '@'"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("must have a domain like 'example.com'"));
    }

    Ok(())
}
