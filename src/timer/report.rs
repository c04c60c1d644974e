//! Hunt result aggregation and formatting

use crate::timer::stopwatch::{HuntTimer, TimerMode};
use serde::{Deserialize, Serialize};

/// Ten-minute average of `amount` earned over `minutes`
///
/// Zero or negative durations yield 0 rather than a division blowup.
pub fn per_ten_minutes(amount: f64, minutes: f64) -> f64 {
    if minutes <= 0.0 {
        0.0
    } else {
        amount * (10.0 / minutes)
    }
}

/// Format milliseconds as HH:MM:SS (hours widen past 99)
pub fn fmt_hms(ms: u64) -> String {
    let sec = ms / 1000;
    format!("{:02}:{:02}:{:02}", sec / 3600, (sec % 3600) / 60, sec % 60)
}

/// Round and render with thousands separators
pub fn fmt_grouped(value: f64) -> String {
    let n = value.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    let first_group = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == first_group % 3 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Meso and experience totals for one hunt
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HuntReport {
    /// Meso held before the hunt
    pub start_meso: i64,
    /// Meso held after the hunt
    pub end_meso: i64,
    /// Experience gained over the hunt
    pub exp: i64,
}

impl HuntReport {
    /// Meso earned, never negative (deaths and shop runs clamp to 0)
    pub fn meso_gained(&self) -> i64 {
        (self.end_meso - self.start_meso).max(0)
    }

    pub fn meso_per_ten(&self, minutes: f64) -> f64 {
        per_ten_minutes(self.meso_gained() as f64, minutes)
    }

    pub fn exp_per_ten(&self, minutes: f64) -> f64 {
        per_ten_minutes(self.exp as f64, minutes)
    }

    /// Shareable summary text for the current timer state
    pub fn summary(&self, timer: &HuntTimer, now_ms: u64) -> String {
        let minutes = timer.effective_minutes(now_ms);
        let mode_line = match timer.mode() {
            TimerMode::CountUp => {
                format!("mode: count-up / elapsed {:.2} min", minutes)
            }
            TimerMode::CountDown => format!(
                "mode: count-down / set {} / elapsed {:.2} min / left {}",
                fmt_hms(timer.configured_ms()),
                minutes,
                fmt_hms(timer.remaining_ms(now_ms))
            ),
        };
        format!(
            "[Hunt Report]\n{}\nmeso before: {}\nmeso after: {}\nmeso gained: {}\nmeso per 10 min: {}\nexp gained: {}\nexp per 10 min: {}",
            mode_line,
            fmt_grouped(self.start_meso as f64),
            fmt_grouped(self.end_meso as f64),
            fmt_grouped(self.meso_gained() as f64),
            fmt_grouped(self.meso_per_ten(minutes)),
            fmt_grouped(self.exp as f64),
            fmt_grouped(self.exp_per_ten(minutes))
        )
    }
}
