// Focus/break countdown state machine.
// Tick-driven so it carries no wall-clock dependency of its own; the
// caller advances it once per second.

use crate::models::{SessionKind, TimerSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn duration_mins(self, settings: &TimerSettings) -> u32 {
        match self {
            TimerMode::Focus => settings.focus_time,
            TimerMode::ShortBreak => settings.short_break,
            TimerMode::LongBreak => settings.long_break,
        }
    }

    pub fn duration_secs(self, settings: &TimerSettings) -> u32 {
        self.duration_mins(settings) * 60
    }

    /// Session kind recorded when an interval of this mode completes.
    fn session_kind(self) -> SessionKind {
        match self {
            TimerMode::Focus => SessionKind::Focus,
            TimerMode::ShortBreak | TimerMode::LongBreak => SessionKind::Custom,
        }
    }

    /// Mode the timer advances to when auto-start is enabled.
    fn next(self) -> TimerMode {
        match self {
            TimerMode::Focus => TimerMode::ShortBreak,
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Focus,
        }
    }
}

/// Interval completed by the countdown, ready to be recorded as a
/// timer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedInterval {
    pub kind: SessionKind,
    /// Configured duration in minutes.
    pub duration: u32,
}

/// Single countdown with an auto-advance branch. Once a session has
/// started, the mode is locked until completion or reset.
#[derive(Debug, Clone)]
pub struct Countdown {
    settings: TimerSettings,
    mode: TimerMode,
    remaining_secs: u32,
    running: bool,
    session_started: bool,
}

impl Countdown {
    pub fn new(settings: TimerSettings) -> Self {
        let remaining_secs = TimerMode::Focus.duration_secs(&settings);
        Self {
            settings,
            mode: TimerMode::Focus,
            remaining_secs,
            running: false,
            session_started: false,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session_started(&self) -> bool {
        self.session_started
    }

    /// Elapsed fraction of the current interval as a percentage.
    pub fn progress_percent(&self) -> f64 {
        let total = self.mode.duration_secs(&self.settings);
        if total == 0 {
            return 0.0;
        }
        (total - self.remaining_secs) as f64 / total as f64 * 100.0
    }

    /// Switch mode. Refused while a session is in progress; returns
    /// whether the switch happened.
    pub fn set_mode(&mut self, mode: TimerMode) -> bool {
        if self.session_started {
            return false;
        }
        self.mode = mode;
        self.remaining_secs = mode.duration_secs(&self.settings);
        true
    }

    pub fn start(&mut self) {
        self.running = true;
        self.session_started = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.session_started = false;
        self.remaining_secs = self.mode.duration_secs(&self.settings);
    }

    /// Advance the countdown by one second. Returns the completed
    /// interval when the countdown reaches zero; with auto-start the
    /// timer then flips to the next mode and keeps running, otherwise
    /// it stops and rearms the current mode.
    pub fn tick(&mut self) -> Option<CompletedInterval> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }

        let completed = CompletedInterval {
            kind: self.mode.session_kind(),
            duration: self.mode.duration_mins(&self.settings),
        };

        if self.settings.auto_start {
            self.mode = self.mode.next();
            self.remaining_secs = self.mode.duration_secs(&self.settings);
        } else {
            self.running = false;
            self.session_started = false;
            self.remaining_secs = self.mode.duration_secs(&self.settings);
        }

        Some(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(focus: u32, short: u32, long: u32, auto_start: bool) -> TimerSettings {
        TimerSettings {
            focus_time: focus,
            short_break: short,
            long_break: long,
            auto_start,
            ..TimerSettings::default()
        }
    }

    #[test]
    fn test_countdown_reaches_zero_at_configured_duration() {
        let mut timer = Countdown::new(settings(1, 5, 15, false));
        timer.start();

        // Exactly 60 ticks for a 1-minute focus interval
        for _ in 0..59 {
            assert_eq!(timer.tick(), None);
        }
        let completed = timer.tick().expect("60th tick completes the interval");
        assert_eq!(completed.kind, SessionKind::Focus);
        assert_eq!(completed.duration, 1);
    }

    #[test]
    fn test_completion_without_auto_start_stops_and_rearms() {
        let mut timer = Countdown::new(settings(1, 5, 15, false));
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }

        assert!(!timer.is_running());
        assert!(!timer.session_started());
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert_eq!(timer.remaining_secs(), 60);
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn test_auto_start_advances_focus_to_short_break() {
        let mut timer = Countdown::new(settings(1, 2, 15, true));
        timer.start();
        for _ in 0..60 {
            timer.tick();
        }

        assert!(timer.is_running());
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.remaining_secs(), 120);

        // The break completes as a custom session and flips back to focus
        let mut completed = None;
        for _ in 0..120 {
            completed = timer.tick();
        }
        let completed = completed.expect("break interval completes");
        assert_eq!(completed.kind, SessionKind::Custom);
        assert_eq!(completed.duration, 2);
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert!(timer.is_running());
    }

    #[test]
    fn test_long_break_returns_to_focus() {
        let mut timer = Countdown::new(settings(1, 2, 1, true));
        assert!(timer.set_mode(TimerMode::LongBreak));
        timer.start();

        let mut completed = None;
        for _ in 0..60 {
            completed = timer.tick();
        }
        assert_eq!(completed.unwrap().kind, SessionKind::Custom);
        assert_eq!(timer.mode(), TimerMode::Focus);
    }

    #[test]
    fn test_pause_halts_ticks() {
        let mut timer = Countdown::new(settings(1, 5, 15, false));
        timer.start();
        timer.tick();
        timer.pause();

        let remaining = timer.remaining_secs();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining_secs(), remaining);
        assert!(timer.session_started());
    }

    #[test]
    fn test_mode_locked_while_session_started() {
        let mut timer = Countdown::new(settings(25, 5, 15, false));
        timer.start();
        assert!(!timer.set_mode(TimerMode::ShortBreak));
        assert_eq!(timer.mode(), TimerMode::Focus);

        timer.reset();
        assert!(timer.set_mode(TimerMode::ShortBreak));
        assert_eq!(timer.remaining_secs(), 5 * 60);
    }

    #[test]
    fn test_reset_restores_full_interval() {
        let mut timer = Countdown::new(settings(1, 5, 15, false));
        timer.start();
        for _ in 0..10 {
            timer.tick();
        }
        assert_eq!(timer.remaining_secs(), 50);

        timer.reset();
        assert_eq!(timer.remaining_secs(), 60);
        assert!(!timer.is_running());
        assert!(!timer.session_started());
    }

    #[test]
    fn test_progress_percent() {
        let mut timer = Countdown::new(settings(1, 5, 15, false));
        assert_eq!(timer.progress_percent(), 0.0);

        timer.start();
        for _ in 0..30 {
            timer.tick();
        }
        assert_eq!(timer.progress_percent(), 50.0);
    }
}
