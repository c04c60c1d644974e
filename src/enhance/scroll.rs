//! Scroll definitions and success rolls

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An enhancement scroll with a fixed success rate
///
/// The classic scrolls are 10% and 60%; anything else comes in through
/// [`Scroll::custom`], which clamps to the 1..=100 range the game allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scroll {
    percent: u8,
}

impl Scroll {
    /// The 10% scroll
    pub fn ten() -> Self {
        Self { percent: 10 }
    }

    /// The 60% scroll
    pub fn sixty() -> Self {
        Self { percent: 60 }
    }

    /// A scroll with an arbitrary rate, clamped to 1..=100
    pub fn custom(percent: u32) -> Self {
        Self {
            percent: percent.clamp(1, 100) as u8,
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Roll one application of this scroll
    pub fn roll(&self, rng: &mut impl Rng) -> bool {
        rng.gen::<f64>() < self.percent as f64 / 100.0
    }
}

impl fmt::Display for Scroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% scroll", self.percent)
    }
}

/// What a single scroll application did to the equip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollOutcome {
    /// Scroll worked: one slot consumed, one enhancement gained
    Success,
    /// Scroll failed without destroying the equip
    Fail,
    /// Scroll failed and destroyed the equip
    Boom,
}

impl fmt::Display for ScrollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollOutcome::Success => write!(f, "success"),
            ScrollOutcome::Fail => write!(f, "fail"),
            ScrollOutcome::Boom => write!(f, "boom"),
        }
    }
}
