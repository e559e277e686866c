use chrono::{Duration, Utc};
use uuid::Uuid;

use studytrack_api::auth::{create_token, hash_password, validate_token, verify_password};
use studytrack_api::models::{Claims, SessionKind, Subject, TimerSession, TimerSettings, User};
use studytrack_api::stats::{average_progress, compute_stats};
use studytrack_api::storage::memory::MemoryStore;
use studytrack_api::storage::StudyStore;
use studytrack_api::timer::{Countdown, TimerMode};

/// Full account journey: provisioning, checklist work, timer sessions
/// and the analytics derived from them.
#[tokio::test]
async fn test_full_study_flow() {
    let store = MemoryStore::new();

    // Register: profile row plus default settings row
    let password_hash = hash_password("s3cret-pass").unwrap();
    let user = User::new(
        "Alice".to_string(),
        "alice@example.com".to_string(),
        password_hash,
    );
    let user_id = user.id;
    store.create_user(user).await.unwrap();
    store
        .create_settings(user_id, TimerSettings::default())
        .await
        .unwrap();

    let settings = store.get_settings(user_id).await.unwrap().unwrap();
    assert_eq!(settings.focus_time, 25);

    // Build a subject with a three-item checklist
    let subject = Subject::new(user_id, "Linear Algebra".to_string());
    let subject_id = subject.id;
    store.create_subject(subject).await.unwrap();

    let t1 = store
        .add_topic(user_id, subject_id, "Vectors".to_string())
        .await
        .unwrap();
    let t2 = store
        .add_topic(user_id, subject_id, "Matrices".to_string())
        .await
        .unwrap();
    let t3 = store
        .add_topic(user_id, subject_id, "Eigenvalues".to_string())
        .await
        .unwrap();
    assert_eq!((t1.order, t2.order, t3.order), (0, 1, 2));

    // Completing two of three topics puts progress at two thirds
    store.toggle_topic(user_id, subject_id, t1.id).await.unwrap();
    store.toggle_topic(user_id, subject_id, t2.id).await.unwrap();

    let subject = store.get_subject(user_id, subject_id).await.unwrap().unwrap();
    assert!((subject.progress - 200.0 / 3.0).abs() < 1e-9);

    // Reordering preserves the dense order sequence
    let reordered = store
        .reorder_topics(user_id, subject_id, &[t3.id, t1.id, t2.id])
        .await
        .unwrap();
    let orders: Vec<i32> = reordered.iter().map(|t| t.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(reordered[0].title, "Eigenvalues");

    // Record a focus session today and one yesterday
    let now = Utc::now();
    for (offset, duration) in [(Duration::zero(), 25), (Duration::days(1), 50)] {
        store
            .record_session(TimerSession {
                id: Uuid::new_v4(),
                user_id,
                kind: SessionKind::Focus,
                duration,
                completed: true,
                start_time: now - offset,
                end_time: Some(now - offset),
                subject_id: Some(subject_id),
            })
            .await
            .unwrap();
    }

    let subjects = store.list_subjects(user_id).await.unwrap();
    let sessions = store.list_sessions(user_id).await.unwrap();
    assert_eq!(sessions[0].duration, 25); // most recent first

    let stats = compute_stats(&subjects, &sessions, now.date_naive());
    assert_eq!(stats.total_study_time, 75);
    assert_eq!(stats.sessions_completed, 2);
    assert_eq!(stats.streak_days, 2);
    assert_eq!(stats.subjects_completed, 0);
    assert_eq!(stats.average_session_length, 37.5);
    assert!(average_progress(&subjects) > 0.0);
}

/// Login-style credential check plus logout-style token revocation.
#[tokio::test]
async fn test_auth_and_revocation_flow() {
    let store = MemoryStore::new();

    let password_hash = hash_password("hunter2hunter2").unwrap();
    let user = User::new(
        "Bob".to_string(),
        "bob@example.com".to_string(),
        password_hash,
    );
    store.create_user(user).await.unwrap();

    let stored = store
        .get_user_by_email("bob@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("hunter2hunter2", &stored.password_hash).unwrap());
    assert!(!verify_password("wrong", &stored.password_hash).unwrap());

    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let claims = Claims {
        sub: stored.id.to_string(),
        email: stored.email.clone(),
        exp,
    };
    let token = create_token(&claims, "integration-secret").unwrap();
    assert_eq!(
        validate_token(&token, "integration-secret").unwrap().sub,
        stored.id.to_string()
    );

    // Logout revokes the token until its natural expiry
    assert!(!store.is_token_revoked(&token).await.unwrap());
    store
        .revoke_token(&token, Utc::now() + Duration::hours(24))
        .await
        .unwrap();
    assert!(store.is_token_revoked(&token).await.unwrap());
}

/// Drive the countdown to completion and record the produced interval,
/// the way a timer client would.
#[tokio::test]
async fn test_countdown_feeds_session_history() {
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();

    let settings = TimerSettings {
        focus_time: 2,
        ..TimerSettings::default()
    };
    let mut timer = Countdown::new(settings);
    assert_eq!(timer.mode(), TimerMode::Focus);

    timer.start();
    let mut completed = None;
    let mut ticks = 0;
    while completed.is_none() {
        completed = timer.tick();
        ticks += 1;
    }
    assert_eq!(ticks, 2 * 60); // zero reached exactly at the configured duration

    let interval = completed.unwrap();
    let start_time = Utc::now();
    store
        .record_session(TimerSession {
            id: Uuid::new_v4(),
            user_id,
            kind: interval.kind,
            duration: interval.duration,
            completed: true,
            start_time,
            end_time: Some(start_time),
            subject_id: None,
        })
        .await
        .unwrap();

    let sessions = store.list_sessions(user_id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].kind, SessionKind::Focus);
    assert_eq!(sessions[0].duration, 2);

    let stats = compute_stats(&[], &sessions, start_time.date_naive());
    assert_eq!(stats.total_study_time, 2);
    assert_eq!(stats.streak_days, 1);
}
