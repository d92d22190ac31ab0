//! Engine facade: lock inspection, reaping, the strategy chain and the
//! reboot-queue escape hatch behind one type
//!
//! Everything is synchronous and blocking; a strategy runs to completion
//! once started. Callers wanting responsiveness run the engine on their own
//! thread and collect the outcome over a channel.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::info;

use super::locks::{self, LockRecord};
use super::mirror::{MirrorSync, SystemMirror};
use super::reaper::{self, SETTLE_INTERVAL};
use super::strategy::{run_chain, DeletionOutcome};
use crate::error::{ForcedelError, Result};
use crate::platform::{self, RebootOutcome};

/// Resilient directory-elimination engine.
///
/// The mirror-sync provider is injected at construction so the force-wipe
/// strategy can be stubbed out in tests or swapped for another utility.
pub struct ForceDeleteEngine {
    mirror: Box<dyn MirrorSync>,
    settle: Duration,
}

impl ForceDeleteEngine {
    /// Engine with the platform's default mirroring utility.
    pub fn new() -> Self {
        Self::with_mirror(Box::new(SystemMirror))
    }

    pub fn with_mirror(mirror: Box<dyn MirrorSync>) -> Self {
        Self { mirror, settle: SETTLE_INTERVAL }
    }

    /// Override the settle pauses (after reaping, and after the mirror wipe
    /// before the final node removal). Tests use this to avoid waiting out
    /// the real handle-release interval.
    pub fn with_settle_interval(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Dry-run preview: which processes hold handles under `target`.
    ///
    /// No mutation, no termination; safe to call before committing to
    /// [`execute`](Self::execute).
    pub fn inspect(&self, target: &Path) -> Result<Vec<LockRecord>> {
        let target = validate_target(target)?;
        Ok(locks::find_locking_processes(&target))
    }

    /// Run the full sequence: find lockers, reap them, settle, then walk the
    /// strategy chain until one succeeds or all are exhausted.
    ///
    /// Always returns a structured outcome; strategy failures never escape
    /// as errors. Only an invalid (non-absolute) target is an `Err`.
    pub fn execute(&self, target: &Path) -> Result<DeletionOutcome> {
        let target = validate_target(target)?;

        let records = locks::find_locking_processes(&target);
        if !records.is_empty() {
            let report = reaper::terminate(&records);
            info!(
                "reaped lockers of {}: {} terminated, {} failed, {} skipped",
                target.display(),
                report.terminated,
                report.failed,
                report.skipped
            );
            thread::sleep(self.settle);
        }

        Ok(run_chain(&target, self.mirror.as_ref(), self.settle))
    }

    /// Register `target` for deletion at next system startup.
    ///
    /// Independent of the strategy chain and callable directly; the path is
    /// not required to exist. Success confirms registration only, never the
    /// eventual deletion.
    pub fn queue_for_reboot(&self, target: &Path) -> Result<RebootOutcome> {
        let target = validate_target(target)?;
        Ok(platform::queue_for_reboot_deletion(&target))
    }
}

impl Default for ForceDeleteEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The engine never depends on ambient working-directory state: targets must
/// arrive absolute. Existence is deliberately not required here, since an
/// absent target is a success for deletion and irrelevant for registration.
fn validate_target(target: &Path) -> Result<PathBuf> {
    if !target.is_absolute() {
        return Err(ForcedelError::invalid_path(format!(
            "target must be an absolute path: {}",
            target.display()
        )));
    }
    Ok(target.to_path_buf())
}
