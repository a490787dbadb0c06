//! Ordered id -> user map shared by the backends that keep a whole
//! collection in one place (memory and JSON file).

use std::collections::{BTreeMap, btree_map::Entry};

use userbase_core::domain::{DomainError, User, UserId, UserPatch};

#[derive(Debug, Clone, Default)]
pub(crate) struct UserTable(BTreeMap<UserId, User>);

impl UserTable {
    /// Build from a flat list. Returns the first repeated id on failure.
    pub(crate) fn from_users(users: Vec<User>) -> Result<Self, UserId> {
        let mut map = BTreeMap::new();
        for user in users {
            if let Some(previous) = map.insert(user.id.clone(), user) {
                return Err(previous.id);
            }
        }
        Ok(Self(map))
    }

    pub(crate) fn all(&self) -> Vec<User> {
        self.0.values().cloned().collect()
    }

    pub(crate) fn get(&self, id: &UserId) -> Option<User> {
        self.0.get(id).cloned()
    }

    pub(crate) fn insert_new(&mut self, user: User) -> Result<User, DomainError> {
        match self.0.entry(user.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::UserAlreadyExists {
                id: user.id.into_inner(),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }

    pub(crate) fn update(&mut self, id: &UserId, patch: UserPatch) -> Result<User, DomainError> {
        let user = self.0.get_mut(id).ok_or_else(|| not_found(id))?;
        user.apply(patch);
        Ok(user.clone())
    }

    pub(crate) fn remove(&mut self, id: &UserId) -> Result<User, DomainError> {
        self.0.remove(id).ok_or_else(|| not_found(id))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

pub(crate) fn not_found(id: &UserId) -> DomainError {
    DomainError::UserNotFound { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User::new(UserId::parse(id).unwrap(), id, format!("{id}@example.com"))
    }

    #[test]
    fn all_is_sorted_by_id() {
        let table = UserTable::from_users(vec![user("c"), user("a"), user("b")]).unwrap();
        let ids: Vec<_> = table.all().into_iter().map(|u| u.id.into_inner()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let dup = UserTable::from_users(vec![user("a"), user("a")]).unwrap_err();
        assert_eq!(dup.as_str(), "a");
    }

    #[test]
    fn insert_new_refuses_taken_id() {
        let mut table = UserTable::default();
        table.insert_new(user("a")).unwrap();
        assert!(matches!(
            table.insert_new(user("a")),
            Err(DomainError::UserAlreadyExists { .. })
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn update_and_remove_missing_are_not_found() {
        let mut table = UserTable::default();
        let id = UserId::parse("ghost").unwrap();
        assert!(matches!(
            table.update(&id, UserPatch::default()),
            Err(DomainError::UserNotFound { .. })
        ));
        assert!(matches!(
            table.remove(&id),
            Err(DomainError::UserNotFound { .. })
        ));
    }
}
