//! Incremental directory sync.
//!
//! Mirrors a source tree into a destination tree based on modification
//! times. A `slack` tolerance absorbs timestamp jitter between filesystems:
//! a source file only counts as newer when it beats its counterpart by more
//! than `slack`.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use crate::util::fs::{
    copy_dir_all, copy_file, ensure_dir, modified, remove_dir_all_if_exists, resolve_path,
};

/// Refuse a destination inside its own source, which would mirror itself forever.
fn check_not_nested(src: &Path, dst: &Path) -> Result<()> {
    let src_abs = resolve_path(src)?;
    let dst_abs = resolve_path(dst)?;
    if dst_abs.starts_with(&src_abs) {
        bail!(
            "sync destination {} is inside its source {}",
            dst.display(),
            src.display()
        );
    }
    Ok(())
}

/// Whether `src` is newer than `dst` by more than `slack`.
///
/// A missing `dst` is always outdated.
fn is_outdated(src: &Path, dst: &Path, slack: Duration) -> Result<bool> {
    if !dst.exists() {
        return Ok(true);
    }
    let src_time = modified(src)?;
    let dst_time = modified(dst)?;
    Ok(match src_time.duration_since(dst_time) {
        Ok(ahead) => ahead > slack,
        Err(_) => false,
    })
}

/// Whether `dst` needs refreshing from `src`.
///
/// True when `dst` is missing, or some file under `src` has no counterpart
/// under `dst` or is newer than it beyond `slack`.
pub fn is_stale(src: &Path, dst: &Path, slack: Duration) -> Result<bool> {
    if !dst.exists() {
        return Ok(true);
    }

    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(src)?;
        if is_outdated(entry.path(), &dst.join(rel), slack)? {
            tracing::debug!("stale: {}", rel.display());
            return Ok(true);
        }
    }

    Ok(false)
}

/// Replace `dst` with a fresh copy of `src` when it is stale.
///
/// Returns whether the tree was replaced.
pub fn replace_if_stale(src: &Path, dst: &Path, slack: Duration) -> Result<bool> {
    check_not_nested(src, dst)?;
    if !is_stale(src, dst, slack)? {
        return Ok(false);
    }

    remove_dir_all_if_exists(dst)?;
    copy_dir_all(src, dst)?;
    tracing::debug!("replaced {} from {}", dst.display(), src.display());
    Ok(true)
}

/// Copy each file under `src` that is missing from `dst` or newer than its
/// counterpart beyond `slack`.
///
/// Destination directories are created as needed. Returns whether any file
/// was copied.
pub fn copy_newer(src: &Path, dst: &Path, slack: Duration) -> Result<bool> {
    check_not_nested(src, dst)?;
    let mut copied = false;

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        if is_outdated(entry.path(), &target, slack)? {
            copy_file(entry.path(), &target)?;
            tracing::debug!("synced {}", rel.display());
            copied = true;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::SystemTime;
    use tempfile::TempDir;

    const SLACK: Duration = Duration::from_secs(10);

    fn set_mtime(path: &Path, t: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(t)
            .unwrap();
    }

    fn ago(secs: u64) -> SystemTime {
        SystemTime::now() - Duration::from_secs(secs)
    }

    /// Source tree with `a.h` and `sub/b.h`, all stamped `secs` ago.
    fn source_tree(tmp: &TempDir, secs: u64) -> std::path::PathBuf {
        let src = tmp.path().join("include");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("a.h"), "a").unwrap();
        fs::write(src.join("sub/b.h"), "b").unwrap();
        set_mtime(&src.join("a.h"), ago(secs));
        set_mtime(&src.join("sub/b.h"), ago(secs));
        src
    }

    #[test]
    fn test_copy_newer_into_empty_destination() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 100);
        let dst = tmp.path().join("lib/include");

        assert!(copy_newer(&src, &dst, SLACK).unwrap());
        assert_eq!(fs::read_to_string(dst.join("sub/b.h")).unwrap(), "b");
    }

    #[test]
    fn test_copy_newer_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 100);
        let dst = tmp.path().join("mirror");

        copy_newer(&src, &dst, SLACK).unwrap();
        assert!(!copy_newer(&src, &dst, SLACK).unwrap());
        assert!(!is_stale(&src, &dst, SLACK).unwrap());
    }

    #[test]
    fn test_newer_destination_is_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 1000);
        let dst = tmp.path().join("mirror");
        copy_newer(&src, &dst, SLACK).unwrap();

        fs::write(dst.join("a.h"), "local").unwrap();
        set_mtime(&dst.join("a.h"), ago(10));
        set_mtime(&dst.join("sub/b.h"), ago(10));

        assert!(!is_stale(&src, &dst, SLACK).unwrap());
        assert!(!copy_newer(&src, &dst, SLACK).unwrap());
        assert!(!replace_if_stale(&src, &dst, SLACK).unwrap());
        assert_eq!(fs::read_to_string(dst.join("a.h")).unwrap(), "local");
    }

    #[test]
    fn test_older_destination_beyond_slack_is_copied() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 1000);
        let dst = tmp.path().join("mirror");
        copy_newer(&src, &dst, SLACK).unwrap();

        fs::write(src.join("a.h"), "changed").unwrap();
        set_mtime(&src.join("a.h"), ago(100));

        assert!(is_stale(&src, &dst, SLACK).unwrap());
        assert!(copy_newer(&src, &dst, SLACK).unwrap());
        assert_eq!(fs::read_to_string(dst.join("a.h")).unwrap(), "changed");
    }

    #[test]
    fn test_difference_within_slack_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 1000);
        let dst = tmp.path().join("mirror");
        copy_newer(&src, &dst, SLACK).unwrap();

        fs::write(src.join("a.h"), "jitter").unwrap();
        set_mtime(&src.join("a.h"), ago(995));

        assert!(!is_stale(&src, &dst, SLACK).unwrap());
        assert!(!copy_newer(&src, &dst, SLACK).unwrap());
        assert!(is_stale(&src, &dst, Duration::ZERO).unwrap());
    }

    #[test]
    fn test_missing_counterpart_is_stale() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 100);
        let dst = tmp.path().join("mirror");
        copy_newer(&src, &dst, SLACK).unwrap();

        fs::remove_file(dst.join("sub/b.h")).unwrap();
        assert!(is_stale(&src, &dst, SLACK).unwrap());
    }

    #[test]
    fn test_destination_inside_source_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 100);
        let nested = src.join("mirror");

        let err = copy_newer(&src, &nested, SLACK).unwrap_err();
        assert!(err.to_string().contains("inside its source"));
        assert!(replace_if_stale(&src, &nested, SLACK).is_err());
        assert!(copy_newer(&src, &src, SLACK).is_err());
        assert!(!nested.exists());
    }

    #[test]
    fn test_replace_if_stale_drops_extra_files() {
        let tmp = TempDir::new().unwrap();
        let src = source_tree(&tmp, 1000);
        let dst = tmp.path().join("mirror");
        copy_newer(&src, &dst, SLACK).unwrap();
        fs::write(dst.join("orphan.h"), "x").unwrap();

        fs::write(src.join("a.h"), "v2").unwrap();
        set_mtime(&src.join("a.h"), ago(1));

        assert!(replace_if_stale(&src, &dst, SLACK).unwrap());
        assert!(!dst.join("orphan.h").exists());
        assert_eq!(fs::read_to_string(dst.join("a.h")).unwrap(), "v2");
        assert!(src.join("a.h").exists());
        assert!(!replace_if_stale(&src, &dst, SLACK).unwrap());
    }
}
