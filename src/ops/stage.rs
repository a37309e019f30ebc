//! Artifact staging: copy built libraries out of the build directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::layout::is_artifact;
use crate::core::target::TargetOs;
use crate::util::fs::{copy_file, ensure_dir, modified};

/// Outcome of a staging pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageReport {
    /// Files copied in this pass
    pub copied: Vec<String>,

    /// Matching files whose staged copy was already current
    pub fresh: Vec<String>,
}

/// Copy artifacts directly inside `out_dir` into `dest`.
///
/// Only regular files whose names end with one of the suffixes for
/// `target_os` are considered (every known suffix when `None`).
/// Subdirectories are not entered. A file is copied when the destination
/// has no copy or the source is strictly newer; the copy keeps the
/// source's modification time.
pub fn stage_artifacts(out_dir: &Path, dest: &Path, target_os: Option<TargetOs>) -> Result<StageReport> {
    ensure_dir(dest)?;

    let mut entries: Vec<_> = fs::read_dir(out_dir)
        .with_context(|| format!("failed to read directory: {}", out_dir.display()))?
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("failed to read directory: {}", out_dir.display()))?;
    entries.sort_by_key(|e| e.file_name());

    let mut report = StageReport::default();

    for entry in entries {
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_artifact(&name, target_os) {
            continue;
        }

        let src = entry.path();
        let dst = dest.join(&name);

        if dst.exists() && modified(&src)? <= modified(&dst)? {
            tracing::debug!("up to date: {}", name);
            report.fresh.push(name);
            continue;
        }

        copy_file(&src, &dst)?;
        tracing::debug!("staged {} -> {}", src.display(), dst.display());
        report.copied.push(name);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn set_mtime(path: &Path, t: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(t)
            .unwrap();
    }

    fn build_dir(tmp: &TempDir) -> std::path::PathBuf {
        let out = tmp.path().join("out/Shared-x64-gn");
        fs::create_dir_all(out.join("obj")).unwrap();
        fs::write(out.join("libskia.so"), "so").unwrap();
        fs::write(out.join("libskia.a"), "a").unwrap();
        fs::write(out.join("libskia.dylib"), "dylib").unwrap();
        fs::write(out.join("build.ninja"), "rule cc").unwrap();
        fs::write(out.join("obj/nested.so"), "nested").unwrap();
        out
    }

    #[test]
    fn test_stage_filters_by_suffix() {
        let tmp = TempDir::new().unwrap();
        let out = build_dir(&tmp);
        let lib = tmp.path().join("lib");

        let report = stage_artifacts(&out, &lib, Some(TargetOs::Linux)).unwrap();

        assert_eq!(report.copied, vec!["libskia.a", "libskia.so"]);
        assert!(lib.join("libskia.so").exists());
        assert!(lib.join("libskia.a").exists());
        assert!(!lib.join("libskia.dylib").exists());
        assert!(!lib.join("build.ninja").exists());
        assert!(!lib.join("nested.so").exists());
        assert!(!lib.join("obj").exists());
    }

    #[test]
    fn test_stage_unknown_os_uses_all_suffixes() {
        let tmp = TempDir::new().unwrap();
        let out = build_dir(&tmp);
        let lib = tmp.path().join("lib");

        let report = stage_artifacts(&out, &lib, None).unwrap();

        assert_eq!(report.copied.len(), 3);
        assert!(lib.join("libskia.dylib").exists());
    }

    #[test]
    fn test_stage_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let out = build_dir(&tmp);
        let lib = tmp.path().join("lib");

        stage_artifacts(&out, &lib, Some(TargetOs::Linux)).unwrap();
        let before = fs::read(lib.join("libskia.so")).unwrap();

        let second = stage_artifacts(&out, &lib, Some(TargetOs::Linux)).unwrap();

        assert!(second.copied.is_empty());
        assert_eq!(second.fresh, vec!["libskia.a", "libskia.so"]);
        assert_eq!(fs::read(lib.join("libskia.so")).unwrap(), before);
        assert_eq!(fs::read_dir(&lib).unwrap().count(), 2);
    }

    #[test]
    fn test_stage_recopies_newer_source() {
        let tmp = TempDir::new().unwrap();
        let out = build_dir(&tmp);
        let lib = tmp.path().join("lib");

        let old = SystemTime::now() - Duration::from_secs(600);
        set_mtime(&out.join("libskia.so"), old);
        stage_artifacts(&out, &lib, Some(TargetOs::Linux)).unwrap();

        fs::write(out.join("libskia.so"), "rebuilt").unwrap();
        set_mtime(&out.join("libskia.so"), SystemTime::now());

        let report = stage_artifacts(&out, &lib, Some(TargetOs::Linux)).unwrap();
        assert_eq!(report.copied, vec!["libskia.so"]);
        assert_eq!(fs::read_to_string(lib.join("libskia.so")).unwrap(), "rebuilt");
    }

    #[test]
    fn test_stage_keeps_newer_destination() {
        let tmp = TempDir::new().unwrap();
        let out = build_dir(&tmp);
        let lib = tmp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();

        set_mtime(&out.join("libskia.so"), SystemTime::now() - Duration::from_secs(600));
        fs::write(lib.join("libskia.so"), "patched").unwrap();

        stage_artifacts(&out, &lib, Some(TargetOs::Linux)).unwrap();
        assert_eq!(fs::read_to_string(lib.join("libskia.so")).unwrap(), "patched");
    }

    #[test]
    fn test_stage_no_matches() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("args.gn"), "is_debug=true").unwrap();

        let report = stage_artifacts(&out, &tmp.path().join("lib"), Some(TargetOs::Win)).unwrap();
        assert_eq!(report, StageReport::default());
        assert!(tmp.path().join("lib").is_dir());
    }

    #[test]
    fn test_stage_missing_out_dir() {
        let tmp = TempDir::new().unwrap();
        let err = stage_artifacts(&tmp.path().join("nope"), &tmp.path().join("lib"), None);
        assert!(err.is_err());
    }
}
