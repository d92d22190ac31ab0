// Platform-specific discovery of open handles beneath a directory
//
// Returns (pid, matched path) pairs. Processes that vanish mid-scan or whose
// handle table cannot be read are skipped, never reported as errors.

use std::path::{Path, PathBuf};

#[cfg(target_os = "linux")]
pub fn handles_under(target: &Path) -> Vec<(u32, PathBuf)> {
    use std::fs;

    let mut hits = Vec::new();
    let proc_root = match fs::read_dir("/proc") {
        Ok(dir) => dir,
        Err(_) => return hits,
    };

    for entry in proc_root.flatten() {
        let pid: u32 = match entry.file_name().to_string_lossy().parse() {
            Ok(pid) => pid,
            Err(_) => continue, // not a process directory
        };

        // Unreadable fd tables (foreign user, vanished process) are skipped
        let fd_entries = match fs::read_dir(entry.path().join("fd")) {
            Ok(dir) => dir,
            Err(_) => continue,
        };

        for fd in fd_entries.flatten() {
            if let Ok(link) = fs::read_link(fd.path()) {
                if link.starts_with(target) {
                    hits.push((pid, link));
                    break; // one record per process is enough
                }
            }
        }
    }

    hits
}

#[cfg(windows)]
pub fn handles_under(target: &Path) -> Vec<(u32, PathBuf)> {
    use std::os::windows::ffi::OsStrExt;
    use std::{mem, ptr};
    use windows_sys::Win32::Foundation::{ERROR_MORE_DATA, ERROR_SUCCESS};
    use windows_sys::Win32::System::RestartManager::{
        RmEndSession, RmGetList, RmRegisterResources, RmStartSession, CCH_RM_SESSION_KEY,
        RM_PROCESS_INFO,
    };

    // The Restart Manager reports lockers per file, so register the files of
    // the tree (capped; a partial registration still finds the usual lockers).
    const MAX_REGISTERED_PATHS: usize = 256;

    let mut paths = Vec::with_capacity(MAX_REGISTERED_PATHS);
    paths.push(target.to_path_buf());
    collect_files(target, &mut paths, MAX_REGISTERED_PATHS);

    let wide: Vec<Vec<u16>> = paths
        .iter()
        .map(|p| p.as_os_str().encode_wide().chain(Some(0)).collect())
        .collect();
    let wide_ptrs: Vec<*const u16> = wide.iter().map(|w| w.as_ptr()).collect();

    let mut hits = Vec::new();
    let mut session: u32 = 0;
    let mut session_key = [0u16; CCH_RM_SESSION_KEY as usize + 1];

    unsafe {
        if RmStartSession(&mut session, 0, session_key.as_mut_ptr()) != ERROR_SUCCESS {
            return hits;
        }

        let rc = RmRegisterResources(
            session,
            wide_ptrs.len() as u32,
            wide_ptrs.as_ptr(),
            0,
            ptr::null(),
            0,
            ptr::null(),
        );

        if rc == ERROR_SUCCESS {
            let mut needed: u32 = 0;
            let mut count: u32 = 0;
            let mut reasons: u32 = 0;
            let mut rc = RmGetList(session, &mut needed, &mut count, ptr::null_mut(), &mut reasons);

            while rc == ERROR_MORE_DATA && needed > 0 {
                let mut infos: Vec<RM_PROCESS_INFO> =
                    vec![mem::zeroed(); needed as usize];
                count = needed;
                rc = RmGetList(
                    session,
                    &mut needed,
                    &mut count,
                    infos.as_mut_ptr(),
                    &mut reasons,
                );
                if rc == ERROR_SUCCESS {
                    for info in infos.iter().take(count as usize) {
                        hits.push((info.Process.dwProcessId, target.to_path_buf()));
                    }
                }
            }
        }

        RmEndSession(session);
    }

    hits
}

#[cfg(windows)]
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>, cap: usize) {
    use std::fs;

    if out.len() >= cap {
        return;
    }
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            if out.len() >= cap {
                return;
            }
            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => collect_files(&path, out, cap),
                Ok(_) => out.push(path),
                Err(_) => continue,
            }
        }
    }
}

#[cfg(all(unix, not(target_os = "linux")))]
pub fn handles_under(_target: &Path) -> Vec<(u32, PathBuf)> {
    // No portable per-process handle table on this platform
    Vec::new()
}
