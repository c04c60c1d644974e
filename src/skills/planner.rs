//! Auto-master planning
//!
//! "Mastering" a skill means pouring points into it one at a time until it
//! hits max level or a rule says stop. Each step goes through the full
//! validator so caps, the waterfall, and prerequisites are re-checked as
//! the allocation grows. The loop needs no iteration guard: every pass
//! either places a point (bounded by the skill's max level) or returns.

use crate::skills::build::SkillBuild;
use crate::skills::validate::DenyReason;

/// Result of a master request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterOutcome {
    /// Points actually placed
    pub added: u32,
    /// Rule that cut the run short, None when the skill ended mastered
    pub stopped_by: Option<DenyReason>,
}

impl MasterOutcome {
    /// True when the skill sits at max level after the run
    pub fn mastered(&self) -> bool {
        self.stopped_by.is_none()
    }
}

/// Raise `skill_id` as far toward max level as the rules allow
pub fn master(build: &mut SkillBuild, skill_id: &str) -> MasterOutcome {
    let mut added = 0;
    loop {
        match build.try_increment(skill_id) {
            Ok(_) => added += 1,
            Err(DenyReason::SkillMaxed) => {
                return MasterOutcome {
                    added,
                    stopped_by: None,
                };
            }
            Err(reason) => {
                return MasterOutcome {
                    added,
                    stopped_by: Some(reason),
                };
            }
        }
    }
}
