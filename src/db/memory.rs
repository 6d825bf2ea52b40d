use crate::db::traits::UserRepository;
use crate::types::{AppError, Result, User};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local user store keyed by id.
///
/// Lookups by email and digest scan the map, which is fine for tests and
/// small development setups.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn find_where(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.read().values().find(|u| pred(u)).cloned()
    }

    fn modify(&self, id: &str, f: impl FnOnce(&mut User)) -> Result<()> {
        let mut users = self.users.write();
        let user = users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
        f(user);
        user.updated_at = Utc::now().timestamp();
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_where(|u| u.email == email))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_by_remember_digest(&self, digest: &str) -> Result<Option<User>> {
        Ok(self.find_where(|u| u.remember_digest == digest))
    }

    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.write();

        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "email {} has already been taken",
                user.email
            )));
        }
        if users.contains_key(&user.id) {
            return Err(AppError::Conflict(format!("user {} already exists", user.id)));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_remember_digest(&self, id: &str, digest: &str) -> Result<()> {
        self.modify(id, |u| u.remember_digest = digest.to_string())
    }

    async fn set_admin(&self, id: &str, admin: bool) -> Result<()> {
        self.modify(id, |u| u.admin = admin)
    }
}
