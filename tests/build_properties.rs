//! Property tests for allocation invariants
//!
//! Random command sequences against a small job line. Whatever order the
//! player clicks in, the build must never hold more points than a tier's
//! cap, never exceed a skill's max, and never leave a trained skill with
//! an unmet prerequisite.

use mapleland_sim::core::types::Tier;
use mapleland_sim::skills::{cap_for, master, parse_job_line, JobLine, SkillBuild, SpRules};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn two_tier_line() -> JobLine {
    parse_job_line(
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
                        {"id": "power_guard", "name": "Power Guard", "skill_type": "buff", "max_level": 30}
                    ]
                }
            ]
        }"#,
    )
    .expect("test line is valid")
}

const SKILLS: [&str; 6] = [
    "hp_recovery",
    "max_hp",
    "power_strike",
    "slash_blast",
    "rage",
    "power_guard",
];

#[derive(Debug, Clone)]
enum Op {
    Inc(usize),
    Dec(usize),
    Master(usize),
    ResetTier(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SKILLS.len()).prop_map(Op::Inc),
        (0..SKILLS.len()).prop_map(Op::Dec),
        (0..SKILLS.len()).prop_map(Op::Master),
        (1u8..=2).prop_map(Op::ResetTier),
    ]
}

/// Only the point-adding commands, for waterfall-order checks
fn grow_op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SKILLS.len()).prop_map(Op::Inc),
        (0..SKILLS.len()).prop_map(Op::Master),
    ]
}

fn apply(build: &mut SkillBuild, op: &Op) {
    match op {
        Op::Inc(i) => {
            let _ = build.try_increment(SKILLS[*i]);
        }
        Op::Dec(i) => {
            let _ = build.try_decrement(SKILLS[*i]);
        }
        Op::Master(i) => {
            master(build, SKILLS[*i]);
        }
        Op::ResetTier(n) => {
            if let Some(tier) = Tier::from_number(*n) {
                build.reset_tier(tier);
            }
        }
    }
}

fn check_invariants(build: &SkillBuild) -> Result<(), TestCaseError> {
    let caps = build.tier_caps();
    let mut sum = 0u32;
    for tier in Tier::ALL {
        let used = build.used_in(tier);
        prop_assert!(
            used <= caps.cap(tier),
            "tier {:?} holds {} points over its cap of {}",
            tier,
            used,
            caps.cap(tier)
        );
        sum += used;
    }
    prop_assert_eq!(sum, build.total_used());

    for skill in build.job().all_skills() {
        let points = build.points(&skill.id);
        prop_assert!(points <= skill.max_level);
        if points > 0 {
            if let Some(prereq) = &skill.prerequisite {
                prop_assert!(
                    build.points(&prereq.skill_id) >= prereq.min_level,
                    "{} trained with {} below {}",
                    skill.id,
                    prereq.skill_id,
                    prereq.min_level
                );
            }
        }
    }
    Ok(())
}

proptest! {
    /// No command sequence can push a build past its caps, maxes, or
    /// prerequisite requirements.
    #[test]
    fn random_sequences_keep_invariants(
        ops in vec(op_strategy(), 0..60),
        level in 10u32..=80,
    ) {
        let mut build = SkillBuild::with_level(two_tier_line(), level);
        for op in &ops {
            apply(&mut build, op);
            check_invariants(&build)?;
        }
    }

    /// SP lands strictly in waterfall order while nothing is removed:
    /// any tier holding points means every earlier tier sits exactly at
    /// its cap.
    #[test]
    fn increment_only_sequences_fill_tiers_in_order(
        ops in vec(grow_op_strategy(), 0..80),
        level in 10u32..=80,
    ) {
        let mut build = SkillBuild::with_level(two_tier_line(), level);
        for op in &ops {
            apply(&mut build, op);

            let caps = build.tier_caps();
            for (i, tier) in Tier::ALL.iter().enumerate() {
                if build.used_in(*tier) == 0 {
                    continue;
                }
                for earlier in &Tier::ALL[..i] {
                    prop_assert_eq!(
                        build.used_in(*earlier),
                        caps.cap(*earlier),
                        "{:?} trained while {:?} sits below its cap",
                        tier,
                        earlier
                    );
                }
            }
        }
    }

    /// A successful increment can always be undone, restoring the exact
    /// allocation.
    #[test]
    fn increment_then_decrement_is_identity(
        ops in vec(op_strategy(), 0..40),
        target in 0..SKILLS.len(),
    ) {
        let mut build = SkillBuild::with_level(two_tier_line(), 40);
        for op in &ops {
            apply(&mut build, op);
        }

        let before = build.allocation().clone();
        if build.try_increment(SKILLS[target]).is_ok() {
            prop_assert!(build.try_decrement(SKILLS[target]).is_ok());
            prop_assert_eq!(build.allocation(), &before);
        }
    }

    /// Tier windows tile the level range with no gap and no overlap: the
    /// summed caps always equal the bonus plus per-level SP since the
    /// first advancement.
    #[test]
    fn tier_caps_tile_the_level_range(level in 1u32..=250) {
        let rules = SpRules {
            first_job_level: 10,
            second_job_level: 30,
            third_job_level: 70,
            fourth_job_level: 120,
            first_job_bonus: 1,
            sp_per_level: 3,
        };
        let total: u32 = Tier::ALL.iter().map(|t| cap_for(level, *t, &rules)).sum();
        let expected = if level >= rules.first_job_level {
            rules.first_job_bonus + rules.sp_per_level * (level - rules.first_job_level + 1)
        } else {
            0
        };
        prop_assert_eq!(total, expected);
    }

    /// Caps never shrink as the character levels.
    #[test]
    fn caps_grow_monotonically(low in 1u32..=249) {
        let rules = SpRules {
            first_job_level: 8,
            second_job_level: 30,
            third_job_level: 70,
            fourth_job_level: 120,
            first_job_bonus: 1,
            sp_per_level: 3,
        };
        for tier in Tier::ALL {
            prop_assert!(cap_for(low, tier, &rules) <= cap_for(low + 1, tier, &rules));
        }
    }
}

/// Bulk tier resets deliberately skip dependent protection: wiping a
/// prerequisite's tier leaves trained dependents in later tiers stranded
/// rather than cascading the wipe.
#[test]
fn reset_tier_strands_cross_tier_dependents() {
    // First advancement at 28 keeps the 1st-job cap at 7 for level 30,
    // small enough for a single skill to fill.
    let line = parse_job_line(
        r#"{
            "id": "warrior",
            "name": "Warrior",
            "sp_rules": {
                "first_job_level": 28,
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
                        {"id": "power_strike", "name": "Power Strike", "skill_type": "active", "max_level": 20}
                    ]
                },
                {
                    "tier": 2,
                    "name": "Fighter",
                    "skills": [
                        {"id": "heavy_blow", "name": "Heavy Blow", "skill_type": "active", "max_level": 20,
                         "prerequisite": {"skill_id": "power_strike", "min_level": 5}}
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let mut build = SkillBuild::with_level(line, 30);
    master(&mut build, "power_strike");
    assert_eq!(build.points("power_strike"), 7);
    build.try_increment("heavy_blow").unwrap();

    build.reset_tier(Tier::First);
    assert_eq!(build.points("power_strike"), 0);
    assert_eq!(build.points("heavy_blow"), 1);

    // The stranded dependent still blocks nothing; spending resumes once
    // the earlier tier is refilled.
    assert!(build.try_increment("heavy_blow").is_err());
}
