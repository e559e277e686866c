// Storage backend abstraction
// Provides pluggable storage for users, subjects, timer sessions and settings

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Subject, TimerSession, TimerSettings, Topic, UpdateSettingsRequest, User,
};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    NotFound,
    AlreadyExists,
    ConnectionError(String),
    InvalidData(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound => write!(f, "Item not found"),
            StorageError::AlreadyExists => write!(f, "Item already exists"),
            StorageError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            StorageError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Storage backend trait for persisting study data.
///
/// Every row-level operation is scoped by `user_id`: a user can only
/// read or mutate their own rows.
#[async_trait]
pub trait StudyStore: Send + Sync {
    // User operations
    async fn create_user(&self, user: User) -> Result<(), StorageError>;

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, StorageError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Remove a user row and free its email (used to roll back a
    /// half-provisioned registration).
    async fn delete_user(&self, user_id: Uuid) -> Result<(), StorageError>;

    // Subject operations
    async fn create_subject(&self, subject: Subject) -> Result<(), StorageError>;

    /// All subjects for a user, ordered by creation time.
    async fn list_subjects(&self, user_id: Uuid) -> Result<Vec<Subject>, StorageError>;

    async fn get_subject(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Option<Subject>, StorageError>;

    async fn update_subject(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        name: Option<String>,
        color: Option<String>,
    ) -> Result<Subject, StorageError>;

    async fn delete_subject(&self, user_id: Uuid, subject_id: Uuid) -> Result<(), StorageError>;

    // Topic operations (all recompute the owning subject's progress)
    async fn add_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        title: String,
    ) -> Result<Topic, StorageError>;

    async fn update_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_id: Uuid,
        title: Option<String>,
        completed: Option<bool>,
    ) -> Result<Topic, StorageError>;

    async fn toggle_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_id: Uuid,
    ) -> Result<Topic, StorageError>;

    async fn delete_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_id: Uuid,
    ) -> Result<(), StorageError>;

    /// Reorder a subject's checklist. `topic_ids` must contain every
    /// topic of the subject exactly once; order becomes the position index.
    async fn reorder_topics(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_ids: &[Uuid],
    ) -> Result<Vec<Topic>, StorageError>;

    // Timer session operations
    async fn record_session(&self, session: TimerSession) -> Result<(), StorageError>;

    /// All timer sessions for a user, most recent first.
    async fn list_sessions(&self, user_id: Uuid) -> Result<Vec<TimerSession>, StorageError>;

    // Timer settings operations
    async fn create_settings(
        &self,
        user_id: Uuid,
        settings: TimerSettings,
    ) -> Result<(), StorageError>;

    async fn get_settings(&self, user_id: Uuid) -> Result<Option<TimerSettings>, StorageError>;

    /// Apply a partial settings update, creating the row from defaults
    /// if it does not exist yet. Zero-minute intervals are rejected.
    async fn update_settings(
        &self,
        user_id: Uuid,
        update: UpdateSettingsRequest,
    ) -> Result<TimerSettings, StorageError>;

    // Token revocation operations
    async fn revoke_token(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    async fn is_token_revoked(&self, token: &str) -> Result<bool, StorageError>;

    async fn cleanup_expired_revocations(&self) -> Result<usize, StorageError>;
}
