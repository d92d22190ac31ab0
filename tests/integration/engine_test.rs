// End-to-end scenarios: reap, strategy chain fallback, exhaustion

use std::fs;
#[cfg(unix)]
use std::path::Path;
#[cfg(unix)]
use std::time::Duration;

#[cfg(unix)]
use forcedel::core::mirror::MirrorSync;
use forcedel::{DeletionOutcome, ForceDeleteEngine, StrategyKind};
use tempfile::TempDir;

/// Mirror stub behaving like a real mirror utility: forces its way past
/// permission bits and leaves the destination with the (empty) source's
/// contents.
#[cfg(unix)]
struct WipingMirror;

#[cfg(unix)]
impl MirrorSync for WipingMirror {
    fn name(&self) -> &'static str {
        "wiping-mirror"
    }

    fn available(&self) -> bool {
        true
    }

    fn mirror(&self, _source: &Path, dest: &Path) -> forcedel::Result<()> {
        restore_access(dest)?;
        for entry in fs::read_dir(dest)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restore_access(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(dir, fs::Permissions::from_mode(0o755))?;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            restore_access(&path)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
struct RefusingMirror;

#[cfg(unix)]
impl MirrorSync for RefusingMirror {
    fn name(&self) -> &'static str {
        "refusing-mirror"
    }

    fn available(&self) -> bool {
        true
    }

    fn mirror(&self, _source: &Path, _dest: &Path) -> forcedel::Result<()> {
        Err(forcedel::ForcedelError::external_tool("exclusive lock on target"))
    }
}

#[cfg(unix)]
fn fast_engine(mirror: Box<dyn MirrorSync>) -> ForceDeleteEngine {
    ForceDeleteEngine::with_mirror(mirror).with_settle_interval(Duration::from_millis(50))
}

#[test]
fn test_execute_deletes_populated_directory() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("doomed");
    fs::create_dir_all(target.join("a/b/c")).unwrap();
    fs::write(target.join("a/file1.txt"), b"1").unwrap();
    fs::write(target.join("a/b/file2.txt"), b"2").unwrap();

    let engine = ForceDeleteEngine::new();
    let outcome = engine.execute(&target).unwrap();

    assert_eq!(
        outcome,
        DeletionOutcome::Succeeded { strategy: StrategyKind::StandardDelete }
    );
    assert!(!target.exists());
}

#[test]
fn test_execute_missing_target_is_idempotent_success() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("already_gone");

    let engine = ForceDeleteEngine::new();
    let outcome = engine.execute(&target).unwrap();
    assert!(outcome.succeeded());

    // And again, to the same result
    let outcome = engine.execute(&target).unwrap();
    assert!(outcome.succeeded());
}

#[test]
fn test_execute_clears_readonly_entry() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("doomed");
    fs::create_dir(&target).unwrap();
    let locked = target.join("readonly.txt");
    fs::write(&locked, b"locked").unwrap();

    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&locked, perms).unwrap();

    let engine = ForceDeleteEngine::new();
    let outcome = engine.execute(&target).unwrap();

    assert_eq!(
        outcome,
        DeletionOutcome::Succeeded { strategy: StrategyKind::StandardDelete }
    );
    assert!(!target.exists());
}

#[cfg(unix)]
fn make_undeletable(target: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let cage = target.join("cage");
    fs::create_dir_all(&cage).unwrap();
    fs::write(cage.join("pinned.txt"), b"pinned").unwrap();
    // No write bit on the directory: its entries cannot be unlinked, and the
    // per-entry attribute retry does not touch the parent
    fs::set_permissions(&cage, fs::Permissions::from_mode(0o555)).unwrap();
    cage
}

#[cfg(unix)]
fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(unix)]
#[test]
fn test_mirror_wipe_succeeds_where_standard_delete_fails() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("stubborn");
    fs::create_dir(&target).unwrap();
    let _cage = make_undeletable(&target);

    if running_as_root() {
        // Permission traps do not bind root; nothing to exercise
        return;
    }

    let engine = fast_engine(Box::new(WipingMirror));
    let outcome = engine.execute(&target).unwrap();

    assert_eq!(
        outcome,
        DeletionOutcome::Succeeded { strategy: StrategyKind::MirrorWipe }
    );
    assert!(!target.exists());
}

#[cfg(unix)]
#[test]
fn test_exhaustion_collects_both_failure_reasons() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("stubborn");
    fs::create_dir(&target).unwrap();
    let cage = make_undeletable(&target);

    if running_as_root() {
        return;
    }

    let engine = fast_engine(Box::new(RefusingMirror));
    let outcome = engine.execute(&target).unwrap();

    // Unlock before asserting so the tempdir can clean up after itself
    fs::set_permissions(&cage, fs::Permissions::from_mode(0o755)).unwrap();

    match outcome {
        DeletionOutcome::Exhausted { reasons } => {
            assert_eq!(reasons.len(), 2);
            assert_eq!(reasons[0].0, StrategyKind::StandardDelete);
            assert_eq!(reasons[1].0, StrategyKind::MirrorWipe);
            assert!(reasons[1].1.contains("exclusive lock"));
        }
        other => panic!("expected exhaustion, got {:?}", other),
    }

    // The documented escape hatch after exhaustion
    let reboot = engine.queue_for_reboot(&target).unwrap();
    let _ = reboot.code();
}

#[cfg(target_os = "linux")]
#[test]
fn test_execute_reaps_locker_then_deletes() {
    use std::process::{Command, Stdio};

    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("locked_dir");
    fs::create_dir(&target).unwrap();
    let file = target.join("busy.log");
    fs::write(&file, b"busy").unwrap();

    // A non-core process holding an open handle under the target
    let mut child = Command::new("tail")
        .arg("-f")
        .arg(&file)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn tail");

    // Give it a moment to open the file
    std::thread::sleep(Duration::from_millis(300));

    let engine = fast_engine(Box::new(WipingMirror));
    let records = engine.inspect(&target).unwrap();
    assert!(records.iter().any(|r| r.pid == child.id()));

    let outcome = engine.execute(&target).unwrap();
    assert_eq!(
        outcome,
        DeletionOutcome::Succeeded { strategy: StrategyKind::StandardDelete }
    );
    assert!(!target.exists());

    // The locker was terminated, not left running
    let status = child.wait().expect("child reaped");
    assert!(!status.success());
}
