//! MapleLand Simulator - SP planner, scroll simulator, hunt timer

pub mod core;
pub mod enhance;
pub mod session;
pub mod skills;
pub mod timer;
