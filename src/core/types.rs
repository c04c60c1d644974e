//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Skill identifier as it appears in job data files (e.g. "power_strike")
pub type SkillId = String;

/// Job line identifier as it appears in the jobs index (e.g. "warrior")
pub type JobId = String;

/// Character level (externally supplied, clamped by the caller to 1..=250)
pub type Level = u32;

/// Job advancement tier (1st through 4th job)
///
/// Tiers are strictly ordered. Each tier has its own SP pool, and pools
/// unlock in waterfall order: a tier's SP cannot be spent until every
/// earlier tier's pool is fully spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tier {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
}

impl Tier {
    /// All tiers in advancement order
    pub const ALL: [Tier; 4] = [Tier::First, Tier::Second, Tier::Third, Tier::Fourth];

    /// Tier number as written in job data (1..=4)
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Zero-based index for per-tier arrays
    pub fn index(&self) -> usize {
        (*self as u8 - 1) as usize
    }

    /// Parse a tier number from job data
    pub fn from_number(n: u8) -> Option<Tier> {
        match n {
            1 => Some(Tier::First),
            2 => Some(Tier::Second),
            3 => Some(Tier::Third),
            4 => Some(Tier::Fourth),
            _ => None,
        }
    }

    /// Tiers strictly before this one, in order (empty for `First`)
    pub fn earlier(&self) -> impl Iterator<Item = Tier> {
        Tier::ALL.into_iter().take(self.index())
    }

    /// Returns true if this tier comes after the other
    pub fn is_later_than(&self, other: &Tier) -> bool {
        (*self as u8) > (*other as u8)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::First => write!(f, "1st job"),
            Tier::Second => write!(f, "2nd job"),
            Tier::Third => write!(f, "3rd job"),
            Tier::Fourth => write!(f, "4th job"),
        }
    }
}
