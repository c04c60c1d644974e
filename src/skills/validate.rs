//! Allocation rule validation
//!
//! Pure checks over a job line, a point allocation, and a character level.
//! Mutation lives in [`SkillBuild`](crate::skills::SkillBuild); these
//! functions only answer whether a single point move is legal and, if not,
//! why. Check order matters and mirrors the game client: the first failed
//! rule is the one reported.

use crate::core::types::{Level, SkillId, Tier};
use crate::skills::definitions::{JobLine, Skill};
use crate::skills::sp::TierCaps;
use ahash::AHashMap;
use thiserror::Error;

/// Why a point move was refused
///
/// The Display text is player-facing and mirrors the in-game wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    #[error("unknown skill: {skill_id}")]
    UnknownSkill { skill_id: SkillId },

    #[error("requires character level {required}")]
    LevelTooLow { required: Level },

    #[error("spend all {tier} SP first")]
    EarlierTierIncomplete { tier: Tier },

    #[error("skill is already mastered")]
    SkillMaxed,

    #[error("no {tier} SP left to spend")]
    TierSpExhausted { tier: Tier },

    #[error("requires {skill_name} at level {min_level}")]
    PrerequisiteUnmet { skill_name: String, min_level: u8 },

    #[error("no points to remove")]
    NothingToRemove,

    #[error("{dependent_name} depends on this skill")]
    WouldBreakDependent { dependent_name: String },
}

/// Points currently allocated across one tier
pub fn used_in_tier(line: &JobLine, alloc: &AHashMap<SkillId, u8>, tier: Tier) -> u32 {
    line.skills_in_tier(tier)
        .iter()
        .map(|s| alloc.get(&s.id).copied().unwrap_or(0) as u32)
        .sum()
}

fn points_of(alloc: &AHashMap<SkillId, u8>, skill_id: &str) -> u8 {
    alloc.get(skill_id).copied().unwrap_or(0)
}

fn lookup<'a>(line: &'a JobLine, skill_id: &str) -> Result<(&'a Skill, Tier), DenyReason> {
    let skill = line.find_skill(skill_id).ok_or_else(|| DenyReason::UnknownSkill {
        skill_id: skill_id.to_string(),
    })?;
    let tier = line.tier_of(skill_id).ok_or_else(|| DenyReason::UnknownSkill {
        skill_id: skill_id.to_string(),
    })?;
    Ok((skill, tier))
}

/// Can one point be added to `skill_id`?
///
/// Checks, in order: character level gate, earlier tiers fully spent,
/// skill not maxed, tier SP remaining, prerequisite met.
pub fn can_increment(
    line: &JobLine,
    alloc: &AHashMap<SkillId, u8>,
    level: Level,
    skill_id: &str,
) -> Result<(), DenyReason> {
    let (skill, tier) = lookup(line, skill_id)?;

    if level < skill.required_level {
        return Err(DenyReason::LevelTooLow {
            required: skill.required_level,
        });
    }

    // Waterfall rule: SP flows downward only after every earlier tier's
    // pool is fully spent. A locked earlier tier has cap 0 and passes.
    let caps = TierCaps::compute(level, &line.sp_rules);
    for earlier in tier.earlier() {
        if used_in_tier(line, alloc, earlier) < caps.cap(earlier) {
            return Err(DenyReason::EarlierTierIncomplete { tier: earlier });
        }
    }

    if points_of(alloc, skill_id) >= skill.max_level {
        return Err(DenyReason::SkillMaxed);
    }

    if used_in_tier(line, alloc, tier) >= caps.cap(tier) {
        return Err(DenyReason::TierSpExhausted { tier });
    }

    if let Some(prereq) = &skill.prerequisite {
        if points_of(alloc, &prereq.skill_id) < prereq.min_level {
            let name = line
                .find_skill(&prereq.skill_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| prereq.skill_id.clone());
            return Err(DenyReason::PrerequisiteUnmet {
                skill_name: name,
                min_level: prereq.min_level,
            });
        }
    }

    Ok(())
}

/// Can one point be removed from `skill_id`?
///
/// Refuses when nothing is allocated, or when dropping a point would take
/// the skill below the minimum some trained dependent requires.
pub fn can_decrement(
    line: &JobLine,
    alloc: &AHashMap<SkillId, u8>,
    skill_id: &str,
) -> Result<(), DenyReason> {
    let (_, _) = lookup(line, skill_id)?;

    let points = points_of(alloc, skill_id);
    if points == 0 {
        return Err(DenyReason::NothingToRemove);
    }

    let after = points - 1;
    for dependent in line.dependents_of(skill_id) {
        if points_of(alloc, &dependent.id) >= 1 {
            if let Some(prereq) = &dependent.prerequisite {
                if after < prereq.min_level {
                    return Err(DenyReason::WouldBreakDependent {
                        dependent_name: dependent.name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> JobLine {
        serde_json::from_str(
            r#"{
                "id": "warrior",
                "name": "Warrior",
                "sp_rules": {
                    "first_job_level": 10,
                    "second_job_level": 30,
                    "third_job_level": 70,
                    "fourth_job_level": 120,
                    "first_job_bonus": 1
                },
                "advancements": [
                    {
                        "tier": 1,
                        "name": "Swordman",
                        "skills": [
                            {"id": "hp_recovery", "name": "Improving HP Recovery", "skill_type": "passive", "max_level": 16},
                            {"id": "max_hp", "name": "Improving Max HP", "skill_type": "passive", "max_level": 10,
                             "prerequisite": {"skill_id": "hp_recovery", "min_level": 5}},
                            {"id": "power_strike", "name": "Power Strike", "skill_type": "active", "max_level": 20},
                            {"id": "slash_blast", "name": "Slash Blast", "skill_type": "active", "max_level": 20,
                             "prerequisite": {"skill_id": "power_strike", "min_level": 1}}
                        ]
                    },
                    {
                        "tier": 2,
                        "name": "Fighter",
                        "skills": [
                            {"id": "rage", "name": "Rage", "skill_type": "buff", "max_level": 20},
                            {"id": "power_guard", "name": "Power Guard", "skill_type": "buff", "max_level": 30,
                             "requiredLevel": 35}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    fn alloc(entries: &[(&str, u8)]) -> AHashMap<SkillId, u8> {
        entries
            .iter()
            .map(|(id, pts)| (id.to_string(), *pts))
            .collect()
    }

    #[test]
    fn test_unknown_skill_rejected() {
        let line = sample_line();
        let a = alloc(&[]);
        assert!(matches!(
            can_increment(&line, &a, 30, "missing"),
            Err(DenyReason::UnknownSkill { .. })
        ));
        assert!(matches!(
            can_decrement(&line, &a, "missing"),
            Err(DenyReason::UnknownSkill { .. })
        ));
    }

    #[test]
    fn test_required_level_gate_checked_first() {
        let line = sample_line();
        // power_guard needs level 35. At 30 the 1st tier is also unfilled,
        // but the level gate must win.
        let a = alloc(&[]);
        assert_eq!(
            can_increment(&line, &a, 30, "power_guard"),
            Err(DenyReason::LevelTooLow { required: 35 })
        );
    }

    #[test]
    fn test_waterfall_blocks_later_tier() {
        let line = sample_line();
        let a = alloc(&[("power_strike", 20)]);
        assert_eq!(
            can_increment(&line, &a, 30, "rage"),
            Err(DenyReason::EarlierTierIncomplete { tier: Tier::First })
        );
    }

    #[test]
    fn test_waterfall_passes_when_earlier_full() {
        let line = sample_line();
        // At level 30 the 1st-job cap is 1 + 3*20 = 61.
        let a = alloc(&[
            ("hp_recovery", 16),
            ("max_hp", 10),
            ("power_strike", 20),
            ("slash_blast", 15),
        ]);
        assert_eq!(can_increment(&line, &a, 30, "rage"), Ok(()));
    }

    #[test]
    fn test_maxed_skill_rejected() {
        let line = sample_line();
        let a = alloc(&[("power_strike", 20)]);
        assert_eq!(
            can_increment(&line, &a, 30, "power_strike"),
            Err(DenyReason::SkillMaxed)
        );
    }

    #[test]
    fn test_tier_sp_exhausted() {
        let line = sample_line();
        // At level 10 the 1st-job cap is 4.
        let a = alloc(&[("power_strike", 4)]);
        assert_eq!(
            can_increment(&line, &a, 10, "hp_recovery"),
            Err(DenyReason::TierSpExhausted { tier: Tier::First })
        );
    }

    #[test]
    fn test_prerequisite_unmet() {
        let line = sample_line();
        let a = alloc(&[("hp_recovery", 4)]);
        assert_eq!(
            can_increment(&line, &a, 30, "max_hp"),
            Err(DenyReason::PrerequisiteUnmet {
                skill_name: "Improving HP Recovery".to_string(),
                min_level: 5
            })
        );
        let a = alloc(&[("hp_recovery", 5)]);
        assert_eq!(can_increment(&line, &a, 30, "max_hp"), Ok(()));
    }

    #[test]
    fn test_locked_tier_has_no_sp() {
        let line = sample_line();
        let a = alloc(&[]);
        // Level 9 is below the 1st advancement; the tier pool is empty.
        assert_eq!(
            can_increment(&line, &a, 9, "power_strike"),
            Err(DenyReason::TierSpExhausted { tier: Tier::First })
        );
    }

    #[test]
    fn test_decrement_empty_skill_rejected() {
        let line = sample_line();
        let a = alloc(&[]);
        assert_eq!(
            can_decrement(&line, &a, "power_strike"),
            Err(DenyReason::NothingToRemove)
        );
    }

    #[test]
    fn test_decrement_blocked_by_trained_dependent() {
        let line = sample_line();
        let a = alloc(&[("hp_recovery", 5), ("max_hp", 3)]);
        assert_eq!(
            can_decrement(&line, &a, "hp_recovery"),
            Err(DenyReason::WouldBreakDependent {
                dependent_name: "Improving Max HP".to_string()
            })
        );
    }

    #[test]
    fn test_decrement_allowed_with_slack_over_minimum() {
        let line = sample_line();
        // 6 -> 5 still satisfies max_hp's requirement of 5.
        let a = alloc(&[("hp_recovery", 6), ("max_hp", 3)]);
        assert_eq!(can_decrement(&line, &a, "hp_recovery"), Ok(()));
    }

    #[test]
    fn test_decrement_allowed_when_dependent_untrained() {
        let line = sample_line();
        let a = alloc(&[("hp_recovery", 5)]);
        assert_eq!(can_decrement(&line, &a, "hp_recovery"), Ok(()));
    }

    #[test]
    fn test_deny_reason_messages() {
        assert_eq!(
            DenyReason::LevelTooLow { required: 35 }.to_string(),
            "requires character level 35"
        );
        assert_eq!(
            DenyReason::EarlierTierIncomplete { tier: Tier::First }.to_string(),
            "spend all 1st job SP first"
        );
        assert_eq!(
            DenyReason::PrerequisiteUnmet {
                skill_name: "Power Strike".to_string(),
                min_level: 1
            }
            .to_string(),
            "requires Power Strike at level 1"
        );
    }
}
