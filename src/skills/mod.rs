//! Skill point allocation engine
//!
//! The engine splits into static data and working state. `definitions`
//! holds the job lines loaded from JSON; `sp` derives per-tier SP caps
//! from character level; `validate` judges single point moves and names
//! the rule behind every refusal; `build` is the mutable allocation a
//! player edits; `planner` drives repeated increments for the master
//! command; `loader` reads and sanity-checks the data files.

pub mod build;
pub mod definitions;
pub mod loader;
pub mod planner;
pub mod sp;
pub mod validate;

pub use build::SkillBuild;
pub use definitions::{Advancement, JobLine, Prerequisite, Skill, SkillType, SpRules};
pub use loader::{
    load_all_jobs, load_job_by_id, load_job_index, load_job_line, parse_job_line, JobIndexEntry,
};
pub use planner::{master, MasterOutcome};
pub use sp::{cap_for, TierCaps};
pub use validate::{can_decrement, can_increment, used_in_tier, DenyReason};
