//! Ordered deletion strategies and the chain that drives them
//!
//! Strategies run strictly in order and the chain stops at the first
//! success. Failures are captured per strategy and advance the chain; they
//! never escape it. The target's existence is re-checked before and after
//! every attempt, because a prior attempt (or an already-drained reboot
//! queue) may have removed it.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use super::mirror::{self, MirrorSync};
use crate::platform;

/// Identifier of a removal strategy in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    StandardDelete,
    MirrorWipe,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::StandardDelete => write!(f, "standard recursive delete"),
            StrategyKind::MirrorWipe => write!(f, "mirror force-wipe"),
        }
    }
}

/// Outcome of one strategy invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyResult {
    Success,
    Failed(String),
    Skipped,
}

/// Final outcome of a chain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Succeeded {
        strategy: StrategyKind,
    },
    /// Every strategy failed; one reason per attempted strategy.
    Exhausted {
        reasons: Vec<(StrategyKind, String)>,
    },
}

impl DeletionOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, DeletionOutcome::Succeeded { .. })
    }
}

/// Run the strategy chain against `target`.
///
/// A target that is already gone counts as success immediately, with no
/// mutation attempted: the goal is "target absent", however that came about.
/// No-op successes are always attributed to `StandardDelete`, never to a
/// strategy that did not run.
///
/// `settle` is the pause after the mirror wipe, letting the external
/// utility's handles flush before the final directory-node removal.
pub fn run_chain(target: &Path, mirror: &dyn MirrorSync, settle: Duration) -> DeletionOutcome {
    let mut reasons = Vec::new();

    for kind in [StrategyKind::StandardDelete, StrategyKind::MirrorWipe] {
        if !target.exists() {
            return DeletionOutcome::Succeeded { strategy: StrategyKind::StandardDelete };
        }

        info!("attempting {} on {}", kind, target.display());
        let result = match kind {
            StrategyKind::StandardDelete => standard_delete(target),
            StrategyKind::MirrorWipe => mirror_wipe(target, mirror, settle),
        };

        match result {
            StrategyResult::Success => {
                info!("{} removed {}", kind, target.display());
                return DeletionOutcome::Succeeded { strategy: kind };
            }
            StrategyResult::Failed(reason) => {
                warn!("{} failed: {}", kind, reason);
                reasons.push((kind, reason));
            }
            StrategyResult::Skipped => {
                warn!("{} skipped: utility unavailable", kind);
                reasons.push((kind, format!("skipped: {} unavailable", mirror.name())));
            }
        }
    }

    DeletionOutcome::Exhausted { reasons }
}

/// Strategy A: recursive removal with a single attribute-clearing retry per
/// entry on permission errors.
fn standard_delete(target: &Path) -> StrategyResult {
    let attempt = remove_tree(target);

    // Some OS delete calls report spurious errors on the final directory node
    // even when deletion completed; trust the filesystem over the error.
    if !target.exists() {
        return StrategyResult::Success;
    }

    match attempt {
        Ok(()) => StrategyResult::Failed("target still present after removal".to_string()),
        Err(e) => StrategyResult::Failed(e.to_string()),
    }
}

fn remove_tree(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if !metadata.is_dir() {
        // Symlinks are removed as entries, never followed
        return remove_entry(path, |p| fs::remove_file(p));
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            platform::clear_readonly(path)?;
            fs::read_dir(path)?
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    for entry in entries {
        remove_tree(&entry?.path())?;
    }

    remove_entry(path, |p| fs::remove_dir(p))
}

/// Remove one entry, clearing its read-only attribute and retrying exactly
/// once on a permission error.
fn remove_entry<F>(path: &Path, op: F) -> io::Result<()>
where
    F: Fn(&Path) -> io::Result<()>,
{
    match op(path) {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            platform::clear_readonly(path)?;
            op(path)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Strategy B: mirror an empty staging directory onto the target to purge
/// contents that resist direct deletion, then remove the empty node.
///
/// Success is defined as the target no longer existing afterwards, so every
/// error branch re-checks existence: a mirror utility that dies after
/// completing the purge, or a concurrent actor removing the tree, still
/// reached the goal state.
fn mirror_wipe(target: &Path, mirror_sync: &dyn MirrorSync, settle: Duration) -> StrategyResult {
    if !mirror_sync.available() {
        return StrategyResult::Skipped;
    }

    let staging = match mirror::staging_dir() {
        Ok(staging) => staging,
        Err(e) => {
            if !target.exists() {
                return StrategyResult::Success;
            }
            return StrategyResult::Failed(format!("staging directory: {}", e));
        }
    };

    if let Err(e) = mirror_sync.mirror(&staging, target) {
        if !target.exists() {
            return StrategyResult::Success;
        }
        return StrategyResult::Failed(e.to_string());
    }

    thread::sleep(settle);

    let removal = fs::remove_dir(target);
    if !target.exists() {
        return StrategyResult::Success;
    }

    match removal {
        Ok(()) => StrategyResult::Failed("target still present after mirror wipe".to_string()),
        Err(e) => StrategyResult::Failed(e.to_string()),
    }
}
