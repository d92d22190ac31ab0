//! Mirror-sync provider for the force-wipe strategy
//!
//! The chain only knows the [`MirrorSync`] trait; the concrete utility
//! (robocopy on Windows, rsync elsewhere) is injected so tests can stub it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{ForcedelError, Result};

/// Capability to mirror one directory onto another, making the destination's
/// contents identical to the source's. Mirroring an empty source purges the
/// destination.
pub trait MirrorSync {
    fn name(&self) -> &'static str;

    /// Whether the underlying utility is usable on this system.
    fn available(&self) -> bool;

    /// Make `dest`'s contents identical to `source`'s.
    fn mirror(&self, source: &Path, dest: &Path) -> Result<()>;
}

/// Default provider backed by the platform's directory-mirroring utility.
pub struct SystemMirror;

impl MirrorSync for SystemMirror {
    fn name(&self) -> &'static str {
        if cfg!(windows) {
            "robocopy"
        } else {
            "rsync"
        }
    }

    fn available(&self) -> bool {
        which::which(self.name()).is_ok()
    }

    #[cfg(windows)]
    fn mirror(&self, source: &Path, dest: &Path) -> Result<()> {
        let robocopy = which::which("robocopy")
            .map_err(|_| ForcedelError::external_tool("robocopy not found in PATH"))?;

        debug!("robocopy {} -> {}", source.display(), dest.display());
        let output = Command::new(robocopy)
            .arg(source)
            .arg(dest)
            .args(["/MIR", "/PURGE"])
            .output()?;

        // Robocopy exit codes below 8 indicate success
        match output.status.code() {
            Some(code) if code < 8 => Ok(()),
            code => Err(ForcedelError::external_tool(format!(
                "robocopy exited with {:?}: {}",
                code,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    #[cfg(not(windows))]
    fn mirror(&self, source: &Path, dest: &Path) -> Result<()> {
        let rsync = which::which("rsync")
            .map_err(|_| ForcedelError::external_tool("rsync not found in PATH"))?;

        // Trailing slashes: sync the *contents* of source into dest
        let mut src = source.as_os_str().to_os_string();
        src.push("/");
        let mut dst = dest.as_os_str().to_os_string();
        dst.push("/");

        debug!("rsync -a --delete {:?} {:?}", src, dst);
        let output = Command::new(rsync)
            .arg("-a")
            .arg("--delete")
            .arg(&src)
            .arg(&dst)
            .output()?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ForcedelError::external_tool(format!(
                "rsync exited with {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

/// Create (or reuse) the empty staging directory mirrored onto targets.
///
/// Leftover entries from an interrupted run are swept out, since anything in
/// the staging directory would be copied into the target instead of purging
/// it.
pub fn staging_dir() -> Result<PathBuf> {
    let staging = std::env::temp_dir().join("forcedel_empty_staging");
    fs::create_dir_all(&staging)?;

    for entry in fs::read_dir(&staging)?.flatten() {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    Ok(staging)
}
