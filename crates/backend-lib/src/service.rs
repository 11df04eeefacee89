// ============================
// crates/backend-lib/src/service.rs
// ============================
//! User business logic: signup, login, profile lookup.
use tracing::info;
use webook_common::UserId;

use crate::auth::{hash_password_secure, verify_password};
use crate::domain::User;
use crate::error::AppError;
use crate::metrics::{USER_LOGIN, USER_SIGNUP};
use crate::repository::UserRepository;
use crate::storage::Storage;

pub struct UserService<S> {
    repo: UserRepository<S>,
    scrypt_log_n: u8,
}

impl<S: Storage> UserService<S> {
    pub fn new(repo: UserRepository<S>, scrypt_log_n: u8) -> Self {
        Self { repo, scrypt_log_n }
    }

    /// Register a user whose `password` is plain text. Hashing runs on the
    /// blocking pool.
    pub async fn sign_up(&self, user: User) -> Result<User, AppError> {
        let User { email, mut password, .. } = user;
        let log_n = self.scrypt_log_n;
        let hash =
            tokio::task::spawn_blocking(move || hash_password_secure(&mut password, log_n)).await??;

        let created = self.repo.create(User::new(email, hash)).await?;
        metrics::counter!(USER_SIGNUP).increment(1);
        info!(user_id = created.id, "user signed up");
        Ok(created)
    }

    /// The user owning `email` if `password` matches.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hash = user.password.clone();
        let plain = password.to_string();
        let ok = tokio::task::spawn_blocking(move || verify_password(&hash, &plain)).await?;
        if !ok {
            return Err(AppError::InvalidCredentials);
        }

        metrics::counter!(USER_LOGIN).increment(1);
        info!(user_id = user.id, "user logged in");
        Ok(user)
    }

    pub async fn profile(&self, id: UserId) -> Result<User, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound(id))
    }
}
