//! Count-up / count-down hunt timer
//!
//! The timer never reads the clock itself: every operation takes the
//! current time in milliseconds from the caller. That keeps the whole
//! state machine deterministic and testable, and lets the CLI drive it
//! from wall time while tests drive it from plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction the timer runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    /// From zero upward, accumulating across pauses
    CountUp,
    /// From a configured duration down to zero, stopping there
    CountDown,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::CountUp => write!(f, "count-up"),
            TimerMode::CountDown => write!(f, "count-down"),
        }
    }
}

/// Hunt session timer
///
/// While running, elapsed/remaining values are derived from the start
/// timestamp; pausing folds the running segment into stored state. A
/// countdown that reaches zero reads as expired; [`HuntTimer::tick`]
/// turns that into a stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntTimer {
    mode: TimerMode,
    running: bool,
    started_at: Option<u64>,
    /// Count-up: milliseconds banked by previous run segments
    accum_up_ms: u64,
    /// Count-down: configured total
    cfg_total_ms: u64,
    /// Count-down: remaining at the last stop
    down_left_ms: u64,
}

impl HuntTimer {
    /// A fresh count-up timer
    pub fn count_up() -> Self {
        Self {
            mode: TimerMode::CountUp,
            running: false,
            started_at: None,
            accum_up_ms: 0,
            cfg_total_ms: 0,
            down_left_ms: 0,
        }
    }

    /// A fresh count-down timer with the given duration
    pub fn count_down(total_ms: u64) -> Self {
        Self {
            mode: TimerMode::CountDown,
            running: false,
            started_at: None,
            accum_up_ms: 0,
            cfg_total_ms: total_ms,
            down_left_ms: total_ms,
        }
    }

    /// A fresh count-down timer configured in whole minutes
    pub fn count_down_minutes(minutes: u64) -> Self {
        Self::count_down(minutes.saturating_mul(60_000))
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Configured count-down duration
    pub fn configured_ms(&self) -> u64 {
        self.cfg_total_ms
    }

    /// Switch modes, stopping and clearing mode-specific progress
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.running = false;
        self.started_at = None;
        match mode {
            TimerMode::CountUp => self.accum_up_ms = 0,
            TimerMode::CountDown => self.down_left_ms = self.cfg_total_ms,
        }
    }

    /// Set the count-down duration from hours/minutes/seconds
    ///
    /// While stopped this also refreshes the remaining time; while
    /// running it only takes effect at the next reset or refill.
    /// Durations past `u64::MAX` milliseconds saturate instead of
    /// wrapping, so arbitrary typed-in numbers stay safe.
    pub fn set_countdown(&mut self, hours: u64, minutes: u64, seconds: u64) {
        let total_seconds = hours
            .saturating_mul(3600)
            .saturating_add(minutes.saturating_mul(60))
            .saturating_add(seconds);
        self.set_countdown_ms(total_seconds.saturating_mul(1000));
    }

    /// Set the count-down duration in milliseconds
    pub fn set_countdown_ms(&mut self, total_ms: u64) {
        self.cfg_total_ms = total_ms;
        if !self.running && self.mode == TimerMode::CountDown {
            self.down_left_ms = total_ms;
        }
    }

    /// Start or resume, returning whether the timer is now running
    ///
    /// A count-down refuses to start with no duration configured. One
    /// that already hit zero refills from the configured duration.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.running {
            return true;
        }
        if self.mode == TimerMode::CountDown {
            if self.cfg_total_ms == 0 {
                return false;
            }
            if self.down_left_ms == 0 || self.down_left_ms > self.cfg_total_ms {
                self.down_left_ms = self.cfg_total_ms;
            }
        }
        self.started_at = Some(now_ms);
        self.running = true;
        true
    }

    /// Pause, folding the running segment into stored state
    pub fn pause(&mut self, now_ms: u64) {
        let Some(started) = self.started_at else {
            return;
        };
        if !self.running {
            return;
        }
        let segment = now_ms.saturating_sub(started);
        match self.mode {
            TimerMode::CountUp => self.accum_up_ms += segment,
            TimerMode::CountDown => {
                self.down_left_ms = self.down_left_ms.saturating_sub(segment);
            }
        }
        self.started_at = None;
        self.running = false;
    }

    /// Stop and clear progress (count-down refills to the configured time)
    pub fn reset(&mut self) {
        self.running = false;
        self.started_at = None;
        match self.mode {
            TimerMode::CountUp => self.accum_up_ms = 0,
            TimerMode::CountDown => self.down_left_ms = self.cfg_total_ms,
        }
    }

    /// Milliseconds remaining (always 0 in count-up mode)
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if self.mode != TimerMode::CountDown {
            return 0;
        }
        match (self.running, self.started_at) {
            (true, Some(started)) => self
                .down_left_ms
                .saturating_sub(now_ms.saturating_sub(started)),
            _ => self.down_left_ms,
        }
    }

    /// Milliseconds elapsed: run time so far (count-up) or time consumed
    /// from the configured duration (count-down)
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.mode {
            TimerMode::CountUp => {
                let running_part = match (self.running, self.started_at) {
                    (true, Some(started)) => now_ms.saturating_sub(started),
                    _ => 0,
                };
                self.accum_up_ms + running_part
            }
            TimerMode::CountDown => self.cfg_total_ms.saturating_sub(self.remaining_ms(now_ms)),
        }
    }

    /// Minutes used for the per-ten-minute averages
    pub fn effective_minutes(&self, now_ms: u64) -> f64 {
        self.elapsed_ms(now_ms) as f64 / 60_000.0
    }

    /// True when a configured count-down has run out
    pub fn expired(&self, now_ms: u64) -> bool {
        self.mode == TimerMode::CountDown
            && self.cfg_total_ms > 0
            && self.remaining_ms(now_ms) == 0
    }

    /// Apply the zero-crossing stop; returns true if the timer just expired
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.running && self.expired(now_ms) {
            self.running = false;
            self.started_at = None;
            self.down_left_ms = 0;
            return true;
        }
        false
    }
}
