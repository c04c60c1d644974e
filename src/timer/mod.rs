//! Hunt timer and ten-minute averages
//!
//! A count-up/count-down stopwatch plus the meso/exp bookkeeping hunters
//! use to compare grinding spots. All time values flow in from the
//! caller, so the module itself is clock-free.

pub mod report;
pub mod stopwatch;

pub use report::{fmt_grouped, fmt_hms, per_ten_minutes, HuntReport};
pub use stopwatch::{HuntTimer, TimerMode};
