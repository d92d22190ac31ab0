// Platform-specific code module

pub mod attrs;
pub mod elevation;
pub mod handles;
pub mod reboot;

// Re-exports for cleaner imports
pub use attrs::clear_readonly;
pub use elevation::is_elevated;
pub use handles::handles_under;
pub use reboot::{is_privilege_error, queue_for_reboot_deletion, RebootOutcome};
