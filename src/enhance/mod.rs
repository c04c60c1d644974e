//! Scroll enhancement simulator
//!
//! Models the old-style scrolling gamble: an equip has a fixed number of
//! upgrade slots, each scroll either lands or fails, and the fail rules
//! (slot consumed, or equip destroyed) come from the equip configuration.

pub mod equip;
pub mod scroll;

pub use equip::{AttemptRecord, EnhanceSession, EquipConfig};
pub use scroll::{Scroll, ScrollOutcome};
