// Tests for the reboot-queue registration path

use forcedel::ForceDeleteEngine;
use std::path::Path;

#[test]
fn test_queue_does_not_require_existing_path() {
    let engine = ForceDeleteEngine::new();

    #[cfg(unix)]
    let missing = Path::new("/tmp/forcedel_never_created_dir");
    #[cfg(windows)]
    let missing = Path::new("C:\\Temp\\forcedel_never_created_dir");

    // Registration is attempted regardless of present-tense existence and
    // must come back as a structured outcome, never a panic or an Err
    let outcome = engine.queue_for_reboot(missing).unwrap();
    let _ = outcome.code();
}

#[cfg(not(windows))]
#[test]
fn test_queue_is_unsupported_off_windows() {
    use forcedel::platform::reboot::CODE_UNSUPPORTED;
    use forcedel::RebootOutcome;

    let engine = ForceDeleteEngine::new();
    let first = engine.queue_for_reboot(Path::new("/tmp/forcedel_queue_probe")).unwrap();
    let second = engine.queue_for_reboot(Path::new("/tmp/forcedel_queue_probe")).unwrap();

    assert_eq!(first, RebootOutcome::QueueFailed { code: CODE_UNSUPPORTED });
    assert_eq!(first, second);
    assert!(!first.is_queued());
}

#[test]
fn test_relative_path_is_rejected_before_registration() {
    let engine = ForceDeleteEngine::new();
    assert!(engine.queue_for_reboot(Path::new("not/absolute")).is_err());
}
