// Core engine logic module

pub mod engine;
pub mod locks;
pub mod mirror;
pub mod reaper;
pub mod strategy;

// Re-export commonly used items
pub use engine::ForceDeleteEngine;
pub use locks::{find_locking_processes, LockRecord};
pub use mirror::{MirrorSync, SystemMirror};
pub use reaper::{terminate, ReapReport};
pub use strategy::{run_chain, DeletionOutcome, StrategyKind, StrategyResult};
