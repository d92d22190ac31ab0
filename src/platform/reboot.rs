// Platform-specific deferred deletion via the OS reboot queue
use std::path::Path;

/// Outcome of a reboot-queue registration.
///
/// `Queued` means the OS accepted the registration, not that the path was
/// deleted; the queue is drained at next system startup, outside our control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebootOutcome {
    Queued { code: u32 },
    QueueFailed { code: u32 },
}

impl RebootOutcome {
    pub fn is_queued(&self) -> bool {
        matches!(self, RebootOutcome::Queued { .. })
    }

    pub fn code(&self) -> u32 {
        match self {
            RebootOutcome::Queued { code } | RebootOutcome::QueueFailed { code } => *code,
        }
    }
}

/// Diagnostic code for an accepted registration
pub const CODE_ACCEPTED: u32 = 0;
/// Win32 ERROR_ACCESS_DENIED
pub const CODE_ACCESS_DENIED: u32 = 5;
/// Win32 ERROR_NOT_SUPPORTED, also used where no reboot queue exists
pub const CODE_UNSUPPORTED: u32 = 50;

/// Whether a diagnostic code indicates missing privileges, so the caller can
/// suggest re-running elevated.
pub fn is_privilege_error(code: u32) -> bool {
    code == CODE_ACCESS_DENIED
}

/// Register `target` for deletion at next system startup.
///
/// The path is not required to exist at registration time. Fire-and-forget:
/// the engine can confirm the registration, never the eventual deletion.
#[cfg(windows)]
pub fn queue_for_reboot_deletion(target: &Path) -> RebootOutcome {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::GetLastError;
    use windows_sys::Win32::Storage::FileSystem::{MoveFileExW, MOVEFILE_DELAY_UNTIL_REBOOT};

    let wide: Vec<u16> = target.as_os_str().encode_wide().chain(Some(0)).collect();

    // A null destination with MOVEFILE_DELAY_UNTIL_REBOOT queues a delete
    let accepted = unsafe {
        MoveFileExW(wide.as_ptr(), std::ptr::null(), MOVEFILE_DELAY_UNTIL_REBOOT)
    };

    if accepted != 0 {
        RebootOutcome::Queued { code: CODE_ACCEPTED }
    } else {
        RebootOutcome::QueueFailed { code: unsafe { GetLastError() } }
    }
}

#[cfg(not(windows))]
pub fn queue_for_reboot_deletion(_target: &Path) -> RebootOutcome {
    RebootOutcome::QueueFailed { code: CODE_UNSUPPORTED }
}
