// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! User storage abstraction with flat-file implementation.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs as tokio_fs, sync::Mutex};
use webook_common::UserId;

use crate::error::AppError;

const USERS_FILE: &str = "users.json";

/// A stored user record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    /// Unique, compared case-insensitively
    pub email: String,
    /// scrypt PHC string
    pub password: String,
    /// Creation time, epoch ms
    pub ctime: i64,
    /// Last update time, epoch ms
    pub utime: i64,
}

/// Fields supplied by the caller when inserting
#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct UserTable {
    next_id: UserId,
    users: Vec<UserRow>,
}

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a user, assigning id and timestamps.
    /// Fails with [`AppError::DuplicateEmail`] if the email is taken.
    async fn insert_user(&self, user: NewUserRow) -> Result<UserRow, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRow>, AppError>;
}

/// Flat-file implementation of the Storage trait.
///
/// The whole table lives in memory behind a mutex and is rewritten to
/// `users.json` on every insert.
#[derive(Clone)]
pub struct FlatFileStorage {
    root: PathBuf,
    table: Arc<Mutex<UserTable>>,
}

impl FlatFileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        let path = root.join(USERS_FILE);
        let table = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            UserTable::default()
        };

        Ok(Self {
            root,
            table: Arc::new(Mutex::new(table)),
        })
    }

    async fn persist(&self, table: &UserTable) -> Result<(), AppError> {
        let path = self.root.join(USERS_FILE);
        let tmp = self.root.join(format!("{USERS_FILE}.tmp"));

        let json = serde_json::to_string_pretty(table)?;
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FlatFileStorage {
    async fn insert_user(&self, user: NewUserRow) -> Result<UserRow, AppError> {
        let mut table = self.table.lock().await;

        if table
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::DuplicateEmail);
        }

        let now = chrono::Utc::now().timestamp_millis();
        let row = UserRow {
            id: table.next_id + 1,
            email: user.email,
            password: user.password,
            ctime: now,
            utime: now,
        };

        table.next_id = row.id;
        table.users.push(row.clone());
        if let Err(err) = self.persist(&table).await {
            // keep memory consistent with disk
            table.users.pop();
            table.next_id = row.id - 1;
            return Err(err);
        }

        Ok(row)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        let table = self.table.lock().await;
        Ok(table
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRow>, AppError> {
        let table = self.table.lock().await;
        Ok(table.users.iter().find(|u| u.id == id).cloned())
    }
}
