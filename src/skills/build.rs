//! Build state: the working SP allocation for one character
//!
//! `SkillBuild` is the mutable heart of the simulator. It owns the job
//! line it allocates against, the character level, and the per-skill point
//! map. Every single-point mutation goes through the validator; bulk
//! resets and level changes apply as-is, matching how respecs work in
//! game (dropping the level never claws back points already placed, it
//! just denies further spending until the build is brought back in line).

use crate::core::config::config;
use crate::core::types::{Level, SkillId, Tier};
use crate::skills::definitions::JobLine;
use crate::skills::sp::TierCaps;
use crate::skills::validate::{can_decrement, can_increment, used_in_tier, DenyReason};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A character's skill point allocation against one job line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillBuild {
    line: JobLine,
    level: Level,
    alloc: AHashMap<SkillId, u8>,
}

impl SkillBuild {
    /// Fresh build at the configured default level
    pub fn new(line: JobLine) -> Self {
        Self::with_level(line, config().default_level)
    }

    /// Fresh build at a specific level (clamped to the configured range)
    pub fn with_level(line: JobLine, level: Level) -> Self {
        Self {
            line,
            level: config().clamp_level(level),
            alloc: AHashMap::new(),
        }
    }

    pub fn job(&self) -> &JobLine {
        &self.line
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Change the character level, returning the clamped value
    ///
    /// Lowering the level can strand already-placed points above the new
    /// caps. They are kept; further increments are denied until enough
    /// points are removed.
    pub fn set_level(&mut self, level: Level) -> Level {
        self.level = config().clamp_level(level);
        self.level
    }

    /// Points currently in a skill (0 for unknown or untrained)
    pub fn points(&self, skill_id: &str) -> u8 {
        self.alloc.get(skill_id).copied().unwrap_or(0)
    }

    /// The raw allocation map (sparse: untrained skills are absent)
    pub fn allocation(&self) -> &AHashMap<SkillId, u8> {
        &self.alloc
    }

    /// Tier caps at the current level
    pub fn tier_caps(&self) -> TierCaps {
        TierCaps::compute(self.level, &self.line.sp_rules)
    }

    /// Points spent in one tier
    pub fn used_in(&self, tier: Tier) -> u32 {
        used_in_tier(&self.line, &self.alloc, tier)
    }

    /// Points spent per tier, in advancement order
    pub fn used_by_tier(&self) -> [(Tier, u32); 4] {
        Tier::ALL.map(|t| (t, self.used_in(t)))
    }

    /// Points spent across the whole build
    pub fn total_used(&self) -> u32 {
        Tier::ALL.iter().map(|t| self.used_in(*t)).sum()
    }

    /// SP still spendable in a tier at the current level
    pub fn remaining_in(&self, tier: Tier) -> u32 {
        self.tier_caps().cap(tier).saturating_sub(self.used_in(tier))
    }

    /// Add one point to a skill, returning the new point count
    pub fn try_increment(&mut self, skill_id: &str) -> Result<u8, DenyReason> {
        can_increment(&self.line, &self.alloc, self.level, skill_id)?;
        let entry = self.alloc.entry(skill_id.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    /// Remove one point from a skill, returning the new point count
    pub fn try_decrement(&mut self, skill_id: &str) -> Result<u8, DenyReason> {
        can_decrement(&self.line, &self.alloc, skill_id)?;
        let points = self.points(skill_id) - 1;
        if points == 0 {
            self.alloc.remove(skill_id);
        } else {
            self.alloc.insert(skill_id.to_string(), points);
        }
        Ok(points)
    }

    /// Clear every point in one tier
    ///
    /// Bulk removal skips dependent checks: a full-tier wipe cannot leave
    /// a trained dependent behind within that tier, and cross-tier
    /// dependents are the player's to resolve, as in game.
    pub fn reset_tier(&mut self, tier: Tier) {
        let ids: Vec<SkillId> = self
            .line
            .skills_in_tier(tier)
            .iter()
            .map(|s| s.id.clone())
            .collect();
        for id in ids {
            self.alloc.remove(&id);
        }
    }

    /// Clear the whole allocation
    pub fn reset_all(&mut self) {
        self.alloc.clear();
    }

    /// Replace the allocation wholesale (used by session restore)
    ///
    /// Entries for unknown skills are dropped; points above a skill's max
    /// are clamped. No cap or prerequisite repair is attempted.
    pub fn restore_allocation(&mut self, alloc: AHashMap<SkillId, u8>) {
        self.alloc.clear();
        for (skill_id, points) in alloc {
            match self.line.find_skill(&skill_id) {
                Some(skill) if points > 0 => {
                    self.alloc.insert(skill_id, points.min(skill.max_level));
                }
                Some(_) => {}
                None => {
                    tracing::warn!(skill_id = %skill_id, "dropping unknown skill from saved build");
                }
            }
        }
    }
}
