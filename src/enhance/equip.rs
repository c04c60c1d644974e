//! Equip state across a scrolling session

use crate::enhance::scroll::{Scroll, ScrollOutcome};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the equip behaves on a failed scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipConfig {
    /// Upgrade slots on a clean equip
    pub slots: u8,
    /// Whether a plain failure still burns a slot (old-scroll behavior)
    pub consume_on_fail: bool,
    /// Whether a failure destroys the equip outright
    ///
    /// Takes precedence over `consume_on_fail`: a boom leaves the slot
    /// count untouched and seals the equip instead.
    pub boom_on_fail: bool,
}

impl Default for EquipConfig {
    fn default() -> Self {
        Self {
            slots: 7,
            consume_on_fail: true,
            boom_on_fail: false,
        }
    }
}

/// One row of the attempt log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number
    pub attempt: u32,
    /// Scroll rate used
    pub percent: u8,
    pub outcome: ScrollOutcome,
    /// Slots remaining after this attempt
    pub slots_left: u8,
    /// Cumulative successes after this attempt
    pub successes: u8,
}

/// A scrolling session against one equip
///
/// Applies scrolls one at a time and keeps a chronological log. Once the
/// equip is sealed (destroyed, or out of slots) further applications are
/// silently ignored, matching the in-game behavior of a used-up item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceSession {
    config: EquipConfig,
    slots_left: u8,
    successes: u8,
    destroyed: bool,
    log: Vec<AttemptRecord>,
}

impl EnhanceSession {
    pub fn new(config: EquipConfig) -> Self {
        Self {
            config,
            slots_left: config.slots,
            successes: 0,
            destroyed: false,
            log: Vec::new(),
        }
    }

    pub fn config(&self) -> EquipConfig {
        self.config
    }

    pub fn slots_left(&self) -> u8 {
        self.slots_left
    }

    pub fn successes(&self) -> u8 {
        self.successes
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }

    /// True when no further scroll can land on this equip
    pub fn is_sealed(&self) -> bool {
        self.destroyed || self.slots_left == 0
    }

    /// Chronological attempt log, oldest first
    pub fn log(&self) -> &[AttemptRecord] {
        &self.log
    }

    /// Apply one scroll, returning what happened (None when sealed)
    pub fn apply_scroll(&mut self, scroll: Scroll, rng: &mut impl Rng) -> Option<ScrollOutcome> {
        if self.is_sealed() {
            return None;
        }

        let outcome = if scroll.roll(rng) {
            self.successes += 1;
            self.slots_left -= 1;
            ScrollOutcome::Success
        } else if self.config.boom_on_fail {
            self.destroyed = true;
            ScrollOutcome::Boom
        } else {
            if self.config.consume_on_fail {
                self.slots_left -= 1;
            }
            ScrollOutcome::Fail
        };

        self.log.push(AttemptRecord {
            attempt: self.log.len() as u32 + 1,
            percent: scroll.percent(),
            outcome,
            slots_left: self.slots_left,
            successes: self.successes,
        });
        Some(outcome)
    }

    /// Back to a clean equip: full slots, no successes, empty log
    pub fn reset(&mut self) {
        self.slots_left = self.config.slots;
        self.successes = 0;
        self.destroyed = false;
        self.log.clear();
    }
}
