//! Load job lines from JSON data files
//!
//! Job data lives under a directory (default `data/jobs`) with an
//! `index.json` listing the available lines and one file per line. Every
//! loaded line is validated before use: bad SP rules or a broken
//! prerequisite graph would otherwise surface as confusing denials deep
//! inside the validator.

use crate::core::error::{Result, SimError};
use crate::core::types::JobId;
use crate::skills::definitions::JobLine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry in the job index file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobIndexEntry {
    pub id: JobId,
    pub name: String,
    #[serde(default, alias = "nameKo")]
    pub name_ko: Option<String>,
    /// Data file name, relative to the jobs directory
    pub file: String,
}

/// Read the index of available job lines
pub fn load_job_index(dir: &Path) -> Result<Vec<JobIndexEntry>> {
    let content = std::fs::read_to_string(dir.join("index.json"))?;
    let entries: Vec<JobIndexEntry> = serde_json::from_str(&content)?;
    Ok(entries)
}

/// Parse and validate a job line from a JSON string
pub fn parse_job_line(json: &str) -> Result<JobLine> {
    let line: JobLine = serde_json::from_str(json)?;
    validate_job_line(&line)?;
    Ok(line)
}

/// Load and validate a job line from a file on disk
pub fn load_job_line(path: &Path) -> Result<JobLine> {
    let content = std::fs::read_to_string(path)?;
    parse_job_line(&content)
}

/// Load one job line by id, via the index
pub fn load_job_by_id(dir: &Path, job_id: &str) -> Result<JobLine> {
    let index = load_job_index(dir)?;
    let entry = index
        .iter()
        .find(|e| e.id == job_id)
        .ok_or_else(|| SimError::UnknownJob(job_id.to_string()))?;
    load_job_line(&dir.join(&entry.file))
}

/// Load every job line the index names
pub fn load_all_jobs(dir: &Path) -> Result<Vec<JobLine>> {
    let index = load_job_index(dir)?;
    index
        .iter()
        .map(|entry| load_job_line(&dir.join(&entry.file)))
        .collect()
}

fn invalid(line: &JobLine, reason: impl Into<String>) -> SimError {
    SimError::InvalidJobData {
        job: line.id.clone(),
        reason: reason.into(),
    }
}

/// Check a job line for internal consistency
pub fn validate_job_line(line: &JobLine) -> Result<()> {
    if line.id.is_empty() {
        return Err(invalid(line, "job id must not be empty"));
    }

    let rules = &line.sp_rules;
    let unlocks = [
        rules.first_job_level,
        rules.second_job_level,
        rules.third_job_level,
        rules.fourth_job_level,
    ];
    if !unlocks.windows(2).all(|w| w[0] < w[1]) {
        return Err(invalid(
            line,
            format!("advancement levels must be strictly increasing, got {:?}", unlocks),
        ));
    }
    if rules.first_job_level == 0 {
        return Err(invalid(line, "first advancement level must be at least 1"));
    }
    if rules.sp_per_level == 0 {
        return Err(invalid(line, "sp_per_level must be at least 1"));
    }

    let mut seen_tiers = [false; 5];
    for adv in &line.advancements {
        if adv.tier == 0 || adv.tier > 4 {
            return Err(invalid(
                line,
                format!("advancement tier {} out of range 1-4", adv.tier),
            ));
        }
        if seen_tiers[adv.tier as usize] {
            return Err(invalid(line, format!("duplicate advancement tier {}", adv.tier)));
        }
        seen_tiers[adv.tier as usize] = true;
    }

    let mut seen_ids = std::collections::HashSet::new();
    for skill in line.all_skills() {
        if !seen_ids.insert(skill.id.as_str()) {
            return Err(invalid(line, format!("duplicate skill id '{}'", skill.id)));
        }
        if skill.max_level == 0 {
            return Err(invalid(
                line,
                format!("skill '{}' has max level 0", skill.id),
            ));
        }
    }

    for skill in line.all_skills() {
        let Some(prereq) = &skill.prerequisite else {
            continue;
        };
        let target = line.find_skill(&prereq.skill_id).ok_or_else(|| {
            invalid(
                line,
                format!(
                    "skill '{}' requires unknown skill '{}'",
                    skill.id, prereq.skill_id
                ),
            )
        })?;
        if prereq.min_level == 0 {
            return Err(invalid(
                line,
                format!("skill '{}' has a prerequisite at level 0", skill.id),
            ));
        }
        if prereq.min_level > target.max_level {
            return Err(invalid(
                line,
                format!(
                    "skill '{}' requires '{}' at level {}, above its max of {}",
                    skill.id, target.id, prereq.min_level, target.max_level
                ),
            ));
        }
    }

    // Chains are linear (one prerequisite per skill), so a cycle shows up
    // as a walk that returns to its start or outlives the skill count.
    let total = line.all_skills().count();
    for skill in line.all_skills() {
        let mut current = skill.prerequisite.as_ref().map(|p| p.skill_id.as_str());
        let mut steps = 0;
        while let Some(id) = current {
            if id == skill.id || steps > total {
                return Err(invalid(
                    line,
                    format!("prerequisite cycle involving skill '{}'", skill.id),
                ));
            }
            steps += 1;
            current = line
                .find_skill(id)
                .and_then(|s| s.prerequisite.as_ref())
                .map(|p| p.skill_id.as_str());
        }
    }

    Ok(())
}
