//! Lock inspection: which processes hold open handles beneath a target path
//!
//! Read-only and side-effect free. Partial visibility is expected: processes
//! that vanish mid-enumeration or hide their handle tables are skipped, and
//! an incomplete report is still a valid report.

use std::path::{Path, PathBuf};

use log::debug;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::platform;

/// Evidence that one process holds an open handle under the target path.
///
/// A fresh snapshot per inspection call, never persisted; holding a record
/// does not keep the process or the handle alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRecord {
    pub pid: u32,
    pub name: String,
    pub matched_path: PathBuf,
}

/// List processes currently holding handles equal to or nested under `target`.
///
/// Never fails: an unreadable process yields no record, not an error.
pub fn find_locking_processes(target: &Path) -> Vec<LockRecord> {
    let hits = platform::handles_under(target);
    if hits.is_empty() {
        return Vec::new();
    }

    let mut system = System::new();
    system.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());

    hits.into_iter()
        .filter_map(|(pid, matched_path)| {
            match system.process(Pid::from_u32(pid)) {
                Some(process) => Some(LockRecord {
                    pid,
                    name: process.name().to_string_lossy().to_string(),
                    matched_path,
                }),
                None => {
                    // Exited between the handle scan and the process refresh
                    debug!("process {} vanished during lock inspection", pid);
                    None
                }
            }
        })
        .collect()
}
