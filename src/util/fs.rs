//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};

/// Recursively copy a directory, keeping file modification times.
pub fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("failed to create directory: {}", dst.display()))?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("failed to read directory: {}", src.display()))?
    {
        let entry = entry?;
        let ty = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else {
            copy_file(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Copy a single file and give the copy the source's modification time.
///
/// A read-only `dst` left by an earlier copy is replaced.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::symlink_metadata(dst).is_ok_and(|m| m.permissions().readonly()) {
        fs::remove_file(dst)
            .with_context(|| format!("failed to remove read-only {}", dst.display()))?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;

    let mtime = modified(src)?;
    open_for_times(dst)
        .and_then(|f| f.set_modified(mtime))
        .with_context(|| format!("failed to set modification time on {}", dst.display()))?;
    Ok(())
}

/// Open a file so its timestamps can be changed, even when it is read-only.
#[cfg(unix)]
fn open_for_times(path: &Path) -> std::io::Result<fs::File> {
    fs::File::open(path)
}

#[cfg(windows)]
fn open_for_times(path: &Path) -> std::io::Result<fs::File> {
    use std::os::windows::fs::OpenOptionsExt;

    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;
    fs::File::options()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(path)
}

/// Canonical path of a directory that must exist.
pub fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("directory not found: {}", path.display()))?;
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", path.display());
    }
    Ok(dir)
}

/// Absolute form of a path that may not exist yet.
///
/// The longest existing ancestor is canonicalized and the remaining
/// components are appended unchanged.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    while !existing.as_os_str().is_empty() && !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = if existing.as_os_str().is_empty() {
        std::env::current_dir().context("failed to read current directory")?
    } else {
        existing
            .canonicalize()
            .with_context(|| format!("failed to resolve path: {}", path.display()))?
    };
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Modification time of a path.
pub fn modified(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("failed to read modification time: {}", path.display()))
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}
