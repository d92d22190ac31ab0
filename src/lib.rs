// Forcedel Library - Public API

// Re-export error types
pub mod error;
pub use error::{ForcedelError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;

// Re-export commonly used types
pub use crate::core::engine::ForceDeleteEngine;
pub use crate::core::locks::LockRecord;
pub use crate::core::strategy::{DeletionOutcome, StrategyKind};
pub use crate::platform::reboot::RebootOutcome;

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
