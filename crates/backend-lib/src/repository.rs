//! User repository: maps between domain users and storage rows.
use std::sync::Arc;
use webook_common::UserId;

use crate::domain::User;
use crate::error::AppError;
use crate::storage::{NewUserRow, Storage, UserRow};

pub struct UserRepository<S> {
    storage: Arc<S>,
}

impl<S: Storage> UserRepository<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Persist a new user. There is no notion of "signing up" at this layer.
    pub async fn create(&self, user: User) -> Result<User, AppError> {
        let row = self
            .storage
            .insert_user(NewUserRow {
                email: user.email,
                password: user.password,
            })
            .await?;
        Ok(to_domain(row))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.storage.find_user_by_email(email).await?.map(to_domain))
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.storage.find_user_by_id(id).await?.map(to_domain))
    }
}

fn to_domain(row: UserRow) -> User {
    User {
        id: row.id,
        email: row.email,
        password: row.password,
    }
}
