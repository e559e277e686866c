use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_SUBJECT_COLOR: &str = "#ffffff";

/// A top-level study topic container with an ordered checklist of topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    /// Percentage of completed topics (0.0 when there are none).
    pub progress: f64,
    pub topics: Vec<Topic>,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(user_id: Uuid, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            color: DEFAULT_SUBJECT_COLOR.to_string(),
            progress: 0.0,
            topics: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Recompute progress from the current topic checklist.
    /// Called after every topic mutation.
    pub fn recompute_progress(&mut self) {
        self.progress = progress_percent(&self.topics);
    }
}

/// A checklist item within a subject. `order` is a dense integer
/// sequence starting at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl Topic {
    pub fn new(title: String, order: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            completed: false,
            order,
            created_at: Utc::now(),
        }
    }
}

pub fn progress_percent(topics: &[Topic]) -> f64 {
    if topics.is_empty() {
        return 0.0;
    }
    let completed = topics.iter().filter(|t| t.completed).count();
    completed as f64 / topics.len() as f64 * 100.0
}

#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTopicRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Full ordering for a subject's checklist; every topic id must appear
/// exactly once.
#[derive(Debug, Deserialize)]
pub struct ReorderTopicsRequest {
    pub topic_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(completed: bool, order: i32) -> Topic {
        Topic {
            completed,
            ..Topic::new(format!("topic-{}", order), order)
        }
    }

    #[test]
    fn test_progress_zero_when_no_topics() {
        assert_eq!(progress_percent(&[]), 0.0);
    }

    #[test]
    fn test_progress_is_completed_fraction() {
        let topics = vec![topic(true, 0), topic(false, 1), topic(true, 2), topic(false, 3)];
        assert_eq!(progress_percent(&topics), 50.0);
    }

    #[test]
    fn test_progress_all_completed() {
        let topics = vec![topic(true, 0), topic(true, 1), topic(true, 2)];
        assert_eq!(progress_percent(&topics), 100.0);
    }

    #[test]
    fn test_recompute_progress_after_mutation() {
        let mut subject = Subject::new(Uuid::new_v4(), "Math".to_string());
        assert_eq!(subject.progress, 0.0);

        subject.topics.push(topic(true, 0));
        subject.topics.push(topic(false, 1));
        subject.recompute_progress();

        assert_eq!(subject.progress, 50.0);
    }
}
