//! Shared test helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sample hosts file: top-level mappings, a disabled line, two groups and an
/// inline comment.
pub const FIXTURE: &str = include_str!("fixtures/hosts");

/// `FIXTURE` as `parser::format` renders it (the inline comment is dropped).
pub const FIXTURE_FORMATTED: &str = "\
# System hosts
127.0.0.1 localhost
::1 localhost

1.1.1.1 a.com b.com
# 1.1.1.1 c.com

#[foo]
3.3.3.3 a.com
# 3.3.3.3 b.com
#[foo]

#[bar]
4.4.4.4 x.com
#[bar]
";

/// Create a temp directory for use as HED_HOME.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_hed_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hed_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| Path::new(".").into()))
        .expect("temp dir")
}

/// Write `content` to a hosts file inside `dir` and return its path.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    std::fs::write(&path, content).expect("write hosts");
    path
}

/// Run a closure with HED_HOME set to the given path.
pub fn with_test_env<F, R>(hed_home: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let prev = std::env::var_os("HED_HOME");
    std::env::set_var("HED_HOME", hed_home);
    let r = f();
    match prev {
        Some(v) => std::env::set_var("HED_HOME", v),
        None => std::env::remove_var("HED_HOME"),
    }
    r
}
