pub mod countdown;

pub use countdown::{CompletedInterval, Countdown, TimerMode};
