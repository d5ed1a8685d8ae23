use std::path::PathBuf;

use axum::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

use crate::users::repo_types::UserRecord;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("email already present in the store")]
    DuplicateEmail,
    #[error("phone already present in the store")]
    DuplicatePhone,
    #[error("user store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("user store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// The identity repository: sole owner and mutator of `UserRecord`s.
///
/// Both mutating operations are indivisible read-modify-persist sequences.
/// `append` re-checks email and phone uniqueness under the store's write
/// lock, so two concurrent registrations with the same email cannot both
/// succeed even though the flow also pre-checks for a friendlier error.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<UserRecord>, RepoError>;
    async fn append(&self, user: UserRecord) -> Result<(), RepoError>;
    /// Stamps `last_login`, persists, and returns the updated record.
    async fn record_login(
        &self,
        id: &str,
        at: OffsetDateTime,
    ) -> Result<Option<UserRecord>, RepoError>;
}

/// JSON-file backed store. Records live in memory behind an `RwLock`; every
/// mutation rewrites the file while still holding the write lock, so the
/// file on disk is always a consistent snapshot.
#[derive(Debug)]
pub struct FileRepo {
    path: Option<PathBuf>,
    users: RwLock<Vec<UserRecord>>,
}

impl FileRepo {
    /// Loads the store from `path`, starting empty when the file does not
    /// exist yet. A present-but-unreadable file is an error: silently
    /// starting empty would orphan every registered account.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let path = path.into();
        let users: Vec<UserRecord> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), users = users.len(), "user store loaded");
        Ok(Self {
            path: Some(path),
            users: RwLock::new(users),
        })
    }

    /// Ephemeral store with no backing file; persistence is a no-op.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            users: RwLock::new(Vec::new()),
        }
    }

    async fn persist(&self, users: &[UserRecord]) -> Result<(), RepoError> {
        if let Some(path) = &self.path {
            let bytes = serde_json::to_vec_pretty(users)?;
            tokio::fs::write(path, bytes).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepo for FileRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<UserRecord>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.phone == phone).cloned())
    }

    async fn append(&self, user: UserRecord) -> Result<(), RepoError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::DuplicateEmail);
        }
        if users.iter().any(|u| u.phone == user.phone) {
            return Err(RepoError::DuplicatePhone);
        }
        users.push(user);
        self.persist(&users).await
    }

    async fn record_login(
        &self,
        id: &str,
        at: OffsetDateTime,
    ) -> Result<Option<UserRecord>, RepoError> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.last_login = Some(at);
        let updated = user.clone();
        self.persist(&users).await?;
        Ok(Some(updated))
    }
}
