// Platform-specific file attribute handling
use std::fs;
use std::io;
use std::path::Path;

/// Clear the read-only attribute on a single filesystem entry.
///
/// Directories additionally get owner rwx restored on Unix so that the
/// deletion pass can descend into them.
pub fn clear_readonly(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    let mut perms = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut mode = perms.mode() | 0o200;
        if metadata.is_dir() {
            mode |= 0o700;
        }
        perms.set_mode(mode);
    }

    #[cfg(not(unix))]
    {
        perms.set_readonly(false);
    }

    fs::set_permissions(path, perms)
}
