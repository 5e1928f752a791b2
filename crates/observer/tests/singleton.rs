//! Process-wide logger identity
//!
//! Kept in its own test binary: the singleton is per process, and these
//! assertions must own first access to it.

use autostore_observer::{Logger, LoggerConfig};
use tempfile::TempDir;

#[test]
fn test_global_logger_is_one_instance() {
    let tmp = TempDir::new().unwrap();

    let first = Logger::init(LoggerConfig {
        dir: tmp.path().join("logs"),
    })
    .unwrap();
    // A second init with a different directory still returns the
    // already-constructed instance.
    let second = Logger::init(LoggerConfig {
        dir: tmp.path().join("elsewhere"),
    })
    .unwrap();
    let third = Logger::global().unwrap();

    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, third));
    assert_eq!(first.path(), second.path());

    first.info("one stream", None).unwrap();
    third.info("same stream", None).unwrap();

    let contents = std::fs::read_to_string(first.path()).unwrap();
    assert_eq!(contents.lines().count(), 2);

    // No second directory, no duplicate files.
    assert!(!tmp.path().join("elsewhere").exists());
    assert_eq!(
        std::fs::read_dir(tmp.path().join("logs")).unwrap().count(),
        1
    );
}
