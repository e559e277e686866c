use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of tracked timer interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Focus,
    Pomodoro,
    Custom,
}

/// A completed or abandoned focus/break interval, tracked for analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: SessionKind,
    /// Duration in minutes.
    pub duration: u32,
    pub completed: bool,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RecordSessionRequest {
    pub kind: SessionKind,
    pub duration: u32,
    pub completed: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub subject_id: Option<Uuid>,
}

/// Per-user timer configuration. All intervals are in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimerSettings {
    pub focus_time: u32,
    pub short_break: u32,
    pub long_break: u32,
    pub auto_start: bool,
    pub sound_enabled: bool,
    pub fullscreen_mode: bool,
    pub notification_sound: String,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_time: 25,
            short_break: 5,
            long_break: 15,
            auto_start: false,
            sound_enabled: true,
            fullscreen_mode: false,
            notification_sound: "bell".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    pub focus_time: Option<u32>,
    pub short_break: Option<u32>,
    pub long_break: Option<u32>,
    pub auto_start: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub fullscreen_mode: Option<bool>,
    pub notification_sound: Option<String>,
}

impl TimerSettings {
    /// Apply a partial update, leaving unspecified fields untouched.
    pub fn apply(&mut self, update: UpdateSettingsRequest) {
        if let Some(focus_time) = update.focus_time {
            self.focus_time = focus_time;
        }
        if let Some(short_break) = update.short_break {
            self.short_break = short_break;
        }
        if let Some(long_break) = update.long_break {
            self.long_break = long_break;
        }
        if let Some(auto_start) = update.auto_start {
            self.auto_start = auto_start;
        }
        if let Some(sound_enabled) = update.sound_enabled {
            self.sound_enabled = sound_enabled;
        }
        if let Some(fullscreen_mode) = update.fullscreen_mode {
            self.fullscreen_mode = fullscreen_mode;
        }
        if let Some(notification_sound) = update.notification_sound {
            self.notification_sound = notification_sound;
        }
    }
}
