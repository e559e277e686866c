// In-memory storage backend implementation
// Uses HashMap with Mutex for thread-safe access

use super::*;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// In-memory storage backend
/// Thread-safe storage using HashMap and Mutex
pub struct MemoryStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    email_index: Arc<Mutex<HashMap<String, Uuid>>>,
    subjects: Arc<Mutex<HashMap<Uuid, Subject>>>,
    sessions: Arc<Mutex<HashMap<Uuid, Vec<TimerSession>>>>,
    settings: Arc<Mutex<HashMap<Uuid, TimerSettings>>>,
    revoked_tokens: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl MemoryStore {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            email_index: Arc::new(Mutex::new(HashMap::new())),
            subjects: Arc::new(Mutex::new(HashMap::new())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            settings: Arc::new(Mutex::new(HashMap::new())),
            revoked_tokens: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_err<T>(e: std::sync::PoisonError<T>) -> StorageError {
    StorageError::ConnectionError(format!("Lock poisoned: {}", e))
}

#[async_trait]
impl StudyStore for MemoryStore {
    // User operations
    async fn create_user(&self, user: User) -> Result<(), StorageError> {
        let mut email_index = self.email_index.lock().map_err(lock_err)?;
        if email_index.contains_key(&user.email) {
            return Err(StorageError::AlreadyExists);
        }

        let mut users = self.users.lock().map_err(lock_err)?;
        email_index.insert(user.email.clone(), user.id);
        users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, StorageError> {
        let users = self.users.lock().map_err(lock_err)?;
        Ok(users.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let email_index = self.email_index.lock().map_err(lock_err)?;
        let Some(user_id) = email_index.get(email).copied() else {
            return Ok(None);
        };
        drop(email_index);

        let users = self.users.lock().map_err(lock_err)?;
        Ok(users.get(&user_id).cloned())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), StorageError> {
        let mut users = self.users.lock().map_err(lock_err)?;
        let user = users.remove(&user_id).ok_or(StorageError::NotFound)?;

        let mut email_index = self.email_index.lock().map_err(lock_err)?;
        email_index.remove(&user.email);
        Ok(())
    }

    // Subject operations
    async fn create_subject(&self, subject: Subject) -> Result<(), StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        subjects.insert(subject.id, subject);
        Ok(())
    }

    async fn list_subjects(&self, user_id: Uuid) -> Result<Vec<Subject>, StorageError> {
        let subjects = self.subjects.lock().map_err(lock_err)?;
        let mut results: Vec<Subject> = subjects
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(results)
    }

    async fn get_subject(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Option<Subject>, StorageError> {
        let subjects = self.subjects.lock().map_err(lock_err)?;
        Ok(subjects
            .get(&subject_id)
            .filter(|s| s.user_id == user_id)
            .cloned())
    }

    async fn update_subject(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        name: Option<String>,
        color: Option<String>,
    ) -> Result<Subject, StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        let subject = subjects
            .get_mut(&subject_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(StorageError::NotFound)?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(StorageError::InvalidData(
                    "Subject name is required".to_string(),
                ));
            }
            subject.name = name.to_string();
        }
        if let Some(color) = color {
            subject.color = color;
        }
        Ok(subject.clone())
    }

    async fn delete_subject(&self, user_id: Uuid, subject_id: Uuid) -> Result<(), StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        let owned = subjects
            .get(&subject_id)
            .map(|s| s.user_id == user_id)
            .unwrap_or(false);
        if !owned {
            return Err(StorageError::NotFound);
        }
        subjects.remove(&subject_id);
        Ok(())
    }

    // Topic operations
    async fn add_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        title: String,
    ) -> Result<Topic, StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        let subject = subjects
            .get_mut(&subject_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(StorageError::NotFound)?;

        // New topics are appended at the end of the checklist
        let topic = Topic::new(title, subject.topics.len() as i32);
        subject.topics.push(topic.clone());
        subject.recompute_progress();
        Ok(topic)
    }

    async fn update_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_id: Uuid,
        title: Option<String>,
        completed: Option<bool>,
    ) -> Result<Topic, StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        let subject = subjects
            .get_mut(&subject_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(StorageError::NotFound)?;

        let topic = subject
            .topics
            .iter_mut()
            .find(|t| t.id == topic_id)
            .ok_or(StorageError::NotFound)?;

        if let Some(title) = title {
            let title = title.trim();
            if title.is_empty() {
                return Err(StorageError::InvalidData(
                    "Topic title is required".to_string(),
                ));
            }
            topic.title = title.to_string();
        }
        if let Some(completed) = completed {
            topic.completed = completed;
        }
        let updated = topic.clone();
        subject.recompute_progress();
        Ok(updated)
    }

    async fn toggle_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_id: Uuid,
    ) -> Result<Topic, StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        let subject = subjects
            .get_mut(&subject_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(StorageError::NotFound)?;

        let topic = subject
            .topics
            .iter_mut()
            .find(|t| t.id == topic_id)
            .ok_or(StorageError::NotFound)?;

        topic.completed = !topic.completed;
        let toggled = topic.clone();
        subject.recompute_progress();
        Ok(toggled)
    }

    async fn delete_topic(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_id: Uuid,
    ) -> Result<(), StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        let subject = subjects
            .get_mut(&subject_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(StorageError::NotFound)?;

        let before = subject.topics.len();
        subject.topics.retain(|t| t.id != topic_id);
        if subject.topics.len() == before {
            return Err(StorageError::NotFound);
        }

        // Keep the order sequence dense after removal
        for (index, topic) in subject.topics.iter_mut().enumerate() {
            topic.order = index as i32;
        }
        subject.recompute_progress();
        Ok(())
    }

    async fn reorder_topics(
        &self,
        user_id: Uuid,
        subject_id: Uuid,
        topic_ids: &[Uuid],
    ) -> Result<Vec<Topic>, StorageError> {
        let mut subjects = self.subjects.lock().map_err(lock_err)?;
        let subject = subjects
            .get_mut(&subject_id)
            .filter(|s| s.user_id == user_id)
            .ok_or(StorageError::NotFound)?;

        let unique: HashSet<&Uuid> = topic_ids.iter().collect();
        if topic_ids.len() != subject.topics.len() || unique.len() != topic_ids.len() {
            return Err(StorageError::InvalidData(
                "Reorder must include every topic exactly once".to_string(),
            ));
        }

        let mut reordered = Vec::with_capacity(topic_ids.len());
        for (index, topic_id) in topic_ids.iter().enumerate() {
            let mut topic = subject
                .topics
                .iter()
                .find(|t| t.id == *topic_id)
                .cloned()
                .ok_or_else(|| {
                    StorageError::InvalidData(format!("Unknown topic id: {}", topic_id))
                })?;
            topic.order = index as i32;
            reordered.push(topic);
        }

        subject.topics = reordered.clone();
        Ok(reordered)
    }

    // Timer session operations
    async fn record_session(&self, session: TimerSession) -> Result<(), StorageError> {
        let mut sessions = self.sessions.lock().map_err(lock_err)?;
        sessions.entry(session.user_id).or_default().push(session);
        Ok(())
    }

    async fn list_sessions(&self, user_id: Uuid) -> Result<Vec<TimerSession>, StorageError> {
        let sessions = self.sessions.lock().map_err(lock_err)?;
        let mut results = sessions.get(&user_id).cloned().unwrap_or_default();
        results.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(results)
    }

    // Timer settings operations
    async fn create_settings(
        &self,
        user_id: Uuid,
        settings: TimerSettings,
    ) -> Result<(), StorageError> {
        let mut all = self.settings.lock().map_err(lock_err)?;
        if all.contains_key(&user_id) {
            return Err(StorageError::AlreadyExists);
        }
        all.insert(user_id, settings);
        Ok(())
    }

    async fn get_settings(&self, user_id: Uuid) -> Result<Option<TimerSettings>, StorageError> {
        let all = self.settings.lock().map_err(lock_err)?;
        Ok(all.get(&user_id).cloned())
    }

    async fn update_settings(
        &self,
        user_id: Uuid,
        update: UpdateSettingsRequest,
    ) -> Result<TimerSettings, StorageError> {
        // A zero-minute interval would leave the countdown unable to
        // ever complete
        if update.focus_time == Some(0)
            || update.short_break == Some(0)
            || update.long_break == Some(0)
        {
            return Err(StorageError::InvalidData(
                "Timer intervals must be at least 1 minute".to_string(),
            ));
        }

        let mut all = self.settings.lock().map_err(lock_err)?;
        let settings = all.entry(user_id).or_default();
        settings.apply(update);
        Ok(settings.clone())
    }

    // Token revocation operations
    async fn revoke_token(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut revoked = self.revoked_tokens.lock().map_err(lock_err)?;
        revoked.insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn is_token_revoked(&self, token: &str) -> Result<bool, StorageError> {
        let revoked = self.revoked_tokens.lock().map_err(lock_err)?;
        Ok(revoked.contains_key(token))
    }

    async fn cleanup_expired_revocations(&self) -> Result<usize, StorageError> {
        let mut revoked = self.revoked_tokens.lock().map_err(lock_err)?;
        let now = Utc::now();
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > now);
        let count = before - revoked.len();

        if count > 0 {
            debug!("Cleaned up {} expired token revocations", count);
        }
        Ok(count)
    }
}
