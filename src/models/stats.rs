use serde::Serialize;

/// Aggregate analytics derived from a user's subjects and timer sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Total completed study time in minutes.
    pub total_study_time: u32,
    pub sessions_completed: usize,
    pub streak_days: u32,
    /// Subjects whose checklist is fully completed.
    pub subjects_completed: usize,
    /// Average completed session length in minutes (0 when no sessions).
    pub average_session_length: f64,
}
