//! SP cap calculation
//!
//! Each advancement tier has a pool of skill points determined purely by
//! character level and the job line's [`SpRules`]. A tier earns SP only for
//! levels inside its window: from its own unlock level up to one below the
//! next tier's unlock. The 4th job has no window end and grows forever.
//! The 1st job additionally receives a one-time bonus at its unlock.

use crate::core::types::{Level, Tier};
use crate::skills::definitions::SpRules;

/// SP cap for one tier at the given character level
///
/// Returns 0 when the tier is not yet unlocked.
pub fn cap_for(level: Level, tier: Tier, rules: &SpRules) -> u32 {
    let unlock = rules.unlock_level(tier);
    if level < unlock {
        return 0;
    }

    // Levels counted toward this tier: unlock..=window_end, where the
    // window ends one below the next tier's unlock (unbounded for 4th).
    let counted = match rules.next_unlock_level(tier) {
        Some(next_unlock) => level.min(next_unlock.saturating_sub(1)),
        None => level,
    };
    let levels_in_window = counted.saturating_sub(unlock) + 1;

    let bonus = if tier == Tier::First {
        rules.first_job_bonus
    } else {
        0
    };
    bonus + rules.sp_per_level * levels_in_window
}

/// All four tier caps for a character level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCaps {
    caps: [u32; 4],
}

impl TierCaps {
    /// Compute caps for every tier at `level`
    pub fn compute(level: Level, rules: &SpRules) -> Self {
        let mut caps = [0u32; 4];
        for tier in Tier::ALL {
            caps[tier.index()] = cap_for(level, tier, rules);
        }
        Self { caps }
    }

    /// Cap for a single tier
    pub fn cap(&self, tier: Tier) -> u32 {
        self.caps[tier.index()]
    }

    /// Sum of all tier caps
    pub fn total(&self) -> u32 {
        self.caps.iter().sum()
    }
}
