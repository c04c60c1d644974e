//! Session persistence
//!
//! Saves the working build to a small JSON file so a planning session can
//! be picked up later. Restore is deliberately forgiving: job data may
//! have changed between sessions, so unknown skills are dropped with a
//! warning and out-of-range values are clamped rather than rejected.

use crate::core::error::Result;
use crate::core::types::{JobId, Level, SkillId};
use crate::skills::{JobLine, SkillBuild};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_version() -> u32 {
    1
}

/// On-disk form of a build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBuild {
    #[serde(default = "default_version")]
    pub version: u32,
    pub job_id: JobId,
    pub level: Level,
    pub alloc: AHashMap<SkillId, u8>,
}

impl SavedBuild {
    /// Snapshot a live build
    pub fn from_build(build: &SkillBuild) -> Self {
        Self {
            version: 1,
            job_id: build.job().id.clone(),
            level: build.level(),
            alloc: build.allocation().clone(),
        }
    }

    /// Rebuild a live build against freshly loaded job data
    ///
    /// The caller resolves `line` from `job_id`; this only re-applies
    /// level and points. Level is clamped, unknown skills are dropped,
    /// and over-max points are cut down to each skill's max.
    pub fn restore_into(self, line: JobLine) -> SkillBuild {
        let mut build = SkillBuild::with_level(line, self.level);
        build.restore_allocation(self.alloc);
        build
    }
}

/// Write a build to `path` as pretty-printed JSON
pub fn save_build(build: &SkillBuild, path: &Path) -> Result<()> {
    let saved = SavedBuild::from_build(build);
    let json = serde_json::to_string_pretty(&saved)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), job = %saved.job_id, "saved session");
    Ok(())
}

/// Read a saved build from `path`
pub fn load_saved(path: &Path) -> Result<SavedBuild> {
    let content = std::fs::read_to_string(path)?;
    let saved: SavedBuild = serde_json::from_str(&content)?;
    Ok(saved)
}
