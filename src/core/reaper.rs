//! Best-effort termination of processes holding locks under the target
//!
//! Core OS processes are never signalled. Everything else gets a kill
//! request; per-process failures are counted, never aborting the loop.

use std::time::Duration;

use log::{debug, info, warn};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use super::locks::LockRecord;

/// Pause after issuing terminations: handle release is asynchronous relative
/// to process exit.
pub const SETTLE_INTERVAL: Duration = Duration::from_secs(1);

/// Process names that must never be force-terminated, matched
/// case-insensitively.
const CORE_PROCESS_DENYLIST: &[&str] = &[
    // Windows
    "system",
    "system idle process",
    "registry",
    "memory compression",
    "smss.exe",
    "csrss.exe",
    "wininit.exe",
    "winlogon.exe",
    "services.exe",
    "lsass.exe",
    "svchost.exe",
    // Unix
    "init",
    "systemd",
    "kthreadd",
];

/// Tally of a reap pass over a set of lock records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReapReport {
    pub terminated: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Whether a process name identifies a core OS process.
pub fn is_core_process(name: &str) -> bool {
    let lower = name.to_lowercase();
    CORE_PROCESS_DENYLIST.iter().any(|core| *core == lower)
}

/// Request termination of every non-core process in `records`.
///
/// A failure (process already exited, insufficient privilege) is recorded in
/// the report and the loop continues. Callers should wait [`SETTLE_INTERVAL`]
/// afterwards before attempting deletion.
pub fn terminate(records: &[LockRecord]) -> ReapReport {
    let mut report = ReapReport::default();
    if records.is_empty() {
        return report;
    }

    let mut system = System::new();
    system.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());

    for record in records {
        if is_core_process(&record.name) {
            debug!("skipping core process {} (pid {})", record.name, record.pid);
            report.skipped += 1;
            continue;
        }

        match system.process(Pid::from_u32(record.pid)) {
            Some(process) if process.kill() => {
                info!("terminated {} (pid {})", record.name, record.pid);
                report.terminated += 1;
            }
            _ => {
                // Raced with exit, or the kill request was refused
                warn!("could not terminate {} (pid {})", record.name, record.pid);
                report.failed += 1;
            }
        }
    }

    report
}
