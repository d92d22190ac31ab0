// Command handlers module
pub mod delete;
pub mod inspect;
pub mod reboot_queue;

// Re-exports for cleaner imports
pub use delete::execute as delete;
pub use inspect::execute as inspect;
pub use reboot_queue::execute as reboot_queue;

use anyhow::Result;
use std::path::PathBuf;

/// Resolve the user-supplied path to an absolute one before it reaches the
/// engine; the engine itself never consults the working directory.
pub(crate) fn absolute_target(raw: &str) -> Result<PathBuf> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
