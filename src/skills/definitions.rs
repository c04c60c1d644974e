//! Skill and job line definitions
//!
//! These are the static data types loaded from job JSON files. A `JobLine`
//! is one advancement path (e.g. Warrior): four advancement tiers, each
//! carrying its unlock level and skill list. Allocation state lives in
//! [`SkillBuild`](crate::skills::SkillBuild), not here.

use crate::core::types::{Level, SkillId, Tier};
use serde::{Deserialize, Serialize};

/// Broad mechanical category of a skill
///
/// The engine treats all four identically; the category exists so
/// renderers and tooling can group listings the way the game client does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Active,
    Passive,
    Buff,
    /// Stays on while active and drains a resource (e.g. Magic Guard)
    Toggle,
}

/// A prerequisite on another skill in the same job line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    /// Skill that must be trained first
    #[serde(alias = "skillId")]
    pub skill_id: SkillId,
    /// Minimum points required in that skill
    #[serde(alias = "minLevel")]
    pub min_level: u8,
}

/// One skill within an advancement tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    /// Display name (English)
    pub name: String,
    /// Display name (Korean), kept for parity with game data dumps
    #[serde(default, alias = "nameKo")]
    pub name_ko: Option<String>,
    #[serde(alias = "skillType")]
    pub skill_type: SkillType,
    /// Maximum points this skill accepts
    #[serde(alias = "maxLevel")]
    pub max_level: u8,
    /// Character level required before the first point (1 = no gate)
    #[serde(default = "default_required_level", alias = "requiredLevel")]
    pub required_level: Level,
    /// Prerequisite skill, if any (MapleLand skills have at most one)
    #[serde(default, alias = "prereq")]
    pub prerequisite: Option<Prerequisite>,
    /// Short effect description for listings
    #[serde(default)]
    pub description: String,
}

fn default_required_level() -> Level {
    1
}

/// One advancement tier of a job line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advancement {
    /// Which of the four job advancements this is
    pub tier: u8,
    /// Display name, e.g. "Fighter"
    pub name: String,
    /// Skills granted at this advancement, in display order
    pub skills: Vec<Skill>,
}

/// SP growth parameters for a job line
///
/// Unlock levels must be strictly increasing. `first_job_bonus` models the
/// extra SP granted at the first advancement on top of per-level gains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpRules {
    /// Level of the 1st job advancement
    #[serde(alias = "firstJobLevel")]
    pub first_job_level: Level,
    /// Level of the 2nd job advancement
    #[serde(alias = "secondJobLevel")]
    pub second_job_level: Level,
    /// Level of the 3rd job advancement
    #[serde(alias = "thirdJobLevel")]
    pub third_job_level: Level,
    /// Level of the 4th job advancement
    #[serde(alias = "fourthJobLevel")]
    pub fourth_job_level: Level,
    /// Extra SP granted once at the 1st advancement
    #[serde(alias = "firstJobBonus")]
    pub first_job_bonus: u32,
    /// SP gained per level-up (3 in MapleLand)
    #[serde(default = "default_sp_per_level", alias = "spPerLevel")]
    pub sp_per_level: u32,
}

fn default_sp_per_level() -> u32 {
    3
}

impl SpRules {
    /// Unlock level of the given tier
    pub fn unlock_level(&self, tier: Tier) -> Level {
        match tier {
            Tier::First => self.first_job_level,
            Tier::Second => self.second_job_level,
            Tier::Third => self.third_job_level,
            Tier::Fourth => self.fourth_job_level,
        }
    }

    /// Unlock level of the tier after `tier`, or None for 4th job
    pub fn next_unlock_level(&self, tier: Tier) -> Option<Level> {
        match tier {
            Tier::First => Some(self.second_job_level),
            Tier::Second => Some(self.third_job_level),
            Tier::Third => Some(self.fourth_job_level),
            Tier::Fourth => None,
        }
    }
}

/// A complete job line: identity, SP rules, and four advancement tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobLine {
    #[serde(alias = "jobId")]
    pub id: crate::core::types::JobId,
    /// Display name (English), e.g. "Warrior"
    pub name: String,
    /// Display name (Korean)
    #[serde(default, alias = "nameKo")]
    pub name_ko: Option<String>,
    #[serde(alias = "spRules")]
    pub sp_rules: SpRules,
    /// The four tiers, in advancement order
    pub advancements: Vec<Advancement>,
}

impl JobLine {
    /// Look up a skill by id anywhere in the line
    pub fn find_skill(&self, skill_id: &str) -> Option<&Skill> {
        self.advancements
            .iter()
            .flat_map(|adv| adv.skills.iter())
            .find(|s| s.id == skill_id)
    }

    /// The tier a skill belongs to, if the skill exists
    pub fn tier_of(&self, skill_id: &str) -> Option<Tier> {
        for adv in &self.advancements {
            if adv.skills.iter().any(|s| s.id == skill_id) {
                return Tier::from_number(adv.tier);
            }
        }
        None
    }

    /// Skills of a given tier, empty if the tier has no advancement entry
    pub fn skills_in_tier(&self, tier: Tier) -> &[Skill] {
        self.advancements
            .iter()
            .find(|adv| adv.tier == tier.number())
            .map(|adv| adv.skills.as_slice())
            .unwrap_or(&[])
    }

    /// All skills in the line, tier order then display order
    pub fn all_skills(&self) -> impl Iterator<Item = &Skill> {
        self.advancements.iter().flat_map(|adv| adv.skills.iter())
    }

    /// Skills that name `skill_id` as their prerequisite
    pub fn dependents_of<'a>(&'a self, skill_id: &'a str) -> impl Iterator<Item = &'a Skill> {
        self.all_skills().filter(move |s| {
            s.prerequisite
                .as_ref()
                .is_some_and(|p| p.skill_id == skill_id)
        })
    }
}
