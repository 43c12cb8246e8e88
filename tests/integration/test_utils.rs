//! Shared test utilities for integration tests
//!
//! Provides a fake Java runtime (a shell script) and a delegate installation in a temp
//! directory so the real binary can be exercised end to end.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Serializes tests that write executables and spawn processes. A script still open for
/// writing in one thread while another thread forks fails with "text file busy".
static PROCESS_MUTEX: Mutex<()> = Mutex::new(());

pub fn process_lock() -> MutexGuard<'static, ()> {
    PROCESS_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// Fake runtime: answers `-version` with $FAKE_PROBE_EXIT, otherwise records its
/// arguments (one per line) into $FAKE_ARGS_FILE and exits with $FAKE_RUN_EXIT.
const FAKE_RUNTIME: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo 'fake version "1.8.0"' >&2
  exit "${FAKE_PROBE_EXIT:-0}"
fi
: > "$FAKE_ARGS_FILE"
for arg in "$@"; do
  printf '%s\n' "$arg" >> "$FAKE_ARGS_FILE"
done
exit "${FAKE_RUN_EXIT:-0}"
"#;

/// A temp directory holding a fake runtime, a delegate jar, and a config file.
pub struct Sandbox {
    pub dir: TempDir,
    pub runtime: PathBuf,
    pub delegate_home: PathBuf,
    pub args_file: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let runtime = dir.path().join("fake-java");
        write_executable(&runtime, FAKE_RUNTIME);

        let delegate_home = dir.path().join("java");
        std::fs::create_dir_all(&delegate_home).unwrap();
        std::fs::write(delegate_home.join("td-import.jar"), b"not really a jar").unwrap();

        let args_file = dir.path().join("delegate-args.txt");
        Self {
            dir,
            runtime,
            delegate_home,
            args_file,
        }
    }

    /// Write a config file pointing at the fake runtime and delegate home.
    /// `account` is inserted verbatim into the `[account]` table.
    pub fn write_config(&self, account: &str) -> PathBuf {
        let path = self.dir.path().join("td.toml");
        let body = format!(
            "[account]\n{}\n\n[import]\nruntime = {:?}\ndelegate_home = {:?}\n",
            account,
            self.runtime.to_string_lossy(),
            self.delegate_home.to_string_lossy(),
        );
        std::fs::write(&path, body).unwrap();
        path
    }

    /// Arguments the fake delegate was launched with, if it was launched.
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        let text = std::fs::read_to_string(&self.args_file).ok()?;
        Some(text.lines().map(str::to_string).collect())
    }

    /// Recorded arguments as raw bytes, for arguments that are not valid UTF-8.
    pub fn recorded_raw_args(&self) -> Option<Vec<Vec<u8>>> {
        let bytes = std::fs::read(&self.args_file).ok()?;
        Some(
            bytes
                .split(|b| *b == b'\n')
                .filter(|line| !line.is_empty())
                .map(<[u8]>::to_vec)
                .collect(),
        )
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, body).unwrap();
    let mut permissions = std::fs::metadata(path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions).unwrap();
}

#[cfg(not(unix))]
fn write_executable(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
}
