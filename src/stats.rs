// Aggregate analytics over a user's subjects and timer sessions.
// Pure functions; callers pass the reference date so streaks are testable.

use chrono::NaiveDate;

use crate::models::{Subject, TimerSession, UserStats};

pub fn compute_stats(
    subjects: &[Subject],
    sessions: &[TimerSession],
    today: NaiveDate,
) -> UserStats {
    let total_study_time: u32 = sessions
        .iter()
        .filter(|s| s.completed)
        .map(|s| s.duration)
        .sum();

    let sessions_completed = sessions.iter().filter(|s| s.completed).count();
    let subjects_completed = subjects.iter().filter(|s| s.progress == 100.0).count();

    let average_session_length = if sessions_completed > 0 {
        total_study_time as f64 / sessions_completed as f64
    } else {
        0.0
    };

    UserStats {
        total_study_time,
        sessions_completed,
        streak_days: streak_days(sessions, today),
        subjects_completed,
        average_session_length,
    }
}

/// Mean progress across subjects (0 when there are none).
pub fn average_progress(subjects: &[Subject]) -> f64 {
    if subjects.is_empty() {
        return 0.0;
    }
    subjects.iter().map(|s| s.progress).sum::<f64>() / subjects.len() as f64
}

/// Simplified streak: 1 if a completed session started today, 2 if one
/// also started yesterday, else 0. Capped at two days regardless of
/// longer consecutive-day history.
fn streak_days(sessions: &[TimerSession], today: NaiveDate) -> u32 {
    let studied_on = |day: NaiveDate| {
        sessions
            .iter()
            .any(|s| s.completed && s.start_time.date_naive() == day)
    };

    if !studied_on(today) {
        return 0;
    }
    match today.pred_opt() {
        Some(yesterday) if studied_on(yesterday) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionKind;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn session(start: chrono::DateTime<Utc>, duration: u32, completed: bool) -> TimerSession {
        TimerSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: SessionKind::Focus,
            duration,
            completed,
            start_time: start,
            end_time: None,
            subject_id: None,
        }
    }

    fn subject_with_progress(progress: f64) -> Subject {
        Subject {
            progress,
            ..Subject::new(Uuid::new_v4(), "Subject".to_string())
        }
    }

    #[test]
    fn test_empty_stats() {
        let today = Utc::now().date_naive();
        let stats = compute_stats(&[], &[], today);

        assert_eq!(stats.total_study_time, 0);
        assert_eq!(stats.sessions_completed, 0);
        assert_eq!(stats.streak_days, 0);
        assert_eq!(stats.subjects_completed, 0);
        assert_eq!(stats.average_session_length, 0.0);
    }

    #[test]
    fn test_totals_only_count_completed_sessions() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let sessions = vec![
            session(now, 25, true),
            session(now, 50, true),
            session(now, 100, false),
        ];

        let stats = compute_stats(&[], &sessions, now.date_naive());
        assert_eq!(stats.total_study_time, 75);
        assert_eq!(stats.sessions_completed, 2);
        assert_eq!(stats.average_session_length, 37.5);
    }

    #[test]
    fn test_subjects_completed_requires_full_progress() {
        let subjects = vec![
            subject_with_progress(100.0),
            subject_with_progress(99.9),
            subject_with_progress(0.0),
        ];
        let stats = compute_stats(&subjects, &[], Utc::now().date_naive());
        assert_eq!(stats.subjects_completed, 1);
    }

    #[test]
    fn test_streak_zero_without_session_today() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let sessions = vec![session(now - Duration::days(1), 25, true)];

        let stats = compute_stats(&[], &sessions, now.date_naive());
        assert_eq!(stats.streak_days, 0);
    }

    #[test]
    fn test_streak_one_for_today_only() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let sessions = vec![session(now, 25, true)];

        let stats = compute_stats(&[], &sessions, now.date_naive());
        assert_eq!(stats.streak_days, 1);
    }

    #[test]
    fn test_streak_two_for_today_and_yesterday() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let sessions = vec![
            session(now, 25, true),
            session(now - Duration::days(1), 25, true),
        ];

        let stats = compute_stats(&[], &sessions, now.date_naive());
        assert_eq!(stats.streak_days, 2);
    }

    #[test]
    fn test_streak_caps_at_two_days() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let sessions = vec![
            session(now, 25, true),
            session(now - Duration::days(1), 25, true),
            session(now - Duration::days(2), 25, true),
            session(now - Duration::days(3), 25, true),
        ];

        let stats = compute_stats(&[], &sessions, now.date_naive());
        assert_eq!(stats.streak_days, 2);
    }

    #[test]
    fn test_incomplete_sessions_do_not_extend_streak() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        let sessions = vec![session(now, 25, false)];

        let stats = compute_stats(&[], &sessions, now.date_naive());
        assert_eq!(stats.streak_days, 0);
    }

    #[test]
    fn test_average_progress() {
        assert_eq!(average_progress(&[]), 0.0);

        let subjects = vec![subject_with_progress(100.0), subject_with_progress(50.0)];
        assert_eq!(average_progress(&subjects), 75.0);
    }
}
