//! LED write backend — trait + sysfs implementation.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

// ── Error type ──

/// LED control path errors. Both variants carry the path that was targeted.
#[derive(Debug)]
pub enum LedError {
    /// The control path could not be opened for writing.
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The control path opened but the value could not be written.
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LedError {
    pub fn path(&self) -> &Path {
        match self {
            LedError::OpenFailed { path, .. } | LedError::WriteFailed { path, .. } => path,
        }
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::OpenFailed { path, source } => {
                write!(f, "Failed to open LED port: {}: {source}", path.display())
            }
            LedError::WriteFailed { path, source } => {
                write!(f, "Failed to write LED port: {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedError::OpenFailed { source, .. } | LedError::WriteFailed { source, .. } => {
                Some(source)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LedError>;

// ── Trait ──

/// A sink for single LED control writes.
pub trait LedBackend {
    /// Write `value` as a bare string (no trailing newline) to `path`.
    fn set_value(&self, path: &Path, value: &str) -> Result<()>;
}

/// Writes straight to kernel LED class attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsBackend;

impl LedBackend for SysfsBackend {
    fn set_value(&self, path: &Path, value: &str) -> Result<()> {
        // No `create`: a missing attribute means the LED does not exist.
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|source| LedError::OpenFailed {
                path: path.to_path_buf(),
                source,
            })?;
        file.write_all(value.as_bytes())
            .map_err(|source| LedError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })
    }
}

// ── Mock backend for testing ──

/// In-memory backend for unit and integration tests.
///
/// Always compiled, hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Records every write in order. Paths added to `failing` reject opens.
    #[derive(Default)]
    pub struct MockBackend {
        /// Recorded writes: (path, value).
        pub writes: RefCell<Vec<(PathBuf, String)>>,
        /// Paths whose open fails with `PermissionDenied`.
        pub failing: RefCell<HashSet<PathBuf>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent write to `path` fail.
        pub fn fail_path(&self, path: impl Into<PathBuf>) {
            self.failing.borrow_mut().insert(path.into());
        }

        /// Values written to `path`, in order.
        pub fn values_for(&self, path: impl AsRef<Path>) -> Vec<String> {
            let path = path.as_ref();
            self.writes
                .borrow()
                .iter()
                .filter(|(p, _)| p == path)
                .map(|(_, v)| v.clone())
                .collect()
        }

        pub fn write_count(&self) -> usize {
            self.writes.borrow().len()
        }
    }

    impl LedBackend for MockBackend {
        fn set_value(&self, path: &Path, value: &str) -> Result<()> {
            if self.failing.borrow().contains(path) {
                return Err(LedError::OpenFailed {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "mock: open failure injected",
                    ),
                });
            }
            self.writes
                .borrow_mut()
                .push((path.to_path_buf(), value.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockBackend;
    use super::*;

    #[test]
    fn sysfs_writes_bare_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brightness");
        std::fs::write(&path, "0").unwrap();

        SysfsBackend.set_value(&path, "1").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");
    }

    #[test]
    fn sysfs_replaces_longer_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trigger");
        std::fs::write(&path, "mmc0").unwrap();

        SysfsBackend.set_value(&path, "off").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "off");
    }

    #[test]
    fn sysfs_missing_path_is_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");

        let err = SysfsBackend.set_value(&path, "1").unwrap_err();
        assert!(matches!(err, LedError::OpenFailed { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(!path.exists(), "backend must not create control files");
    }

    #[test]
    fn open_failed_display_includes_path_and_cause() {
        let err = LedError::OpenFailed {
            path: PathBuf::from("/sys/class/leds/led1/trigger"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to open LED port"));
        assert!(msg.contains("/sys/class/leds/led1/trigger"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn mock_records_in_order() {
        let backend = MockBackend::new();
        backend.set_value(Path::new("/a"), "1").unwrap();
        backend.set_value(Path::new("/b"), "gpio").unwrap();
        backend.set_value(Path::new("/a"), "0").unwrap();

        assert_eq!(backend.write_count(), 3);
        assert_eq!(backend.values_for("/a"), vec!["1", "0"]);
        assert_eq!(backend.values_for("/b"), vec!["gpio"]);
    }

    #[test]
    fn mock_failing_path_is_not_recorded() {
        let backend = MockBackend::new();
        backend.fail_path("/a");

        let err = backend.set_value(Path::new("/a"), "1").unwrap_err();
        assert!(matches!(err, LedError::OpenFailed { .. }));
        assert_eq!(backend.write_count(), 0);
    }
}
