//! Output directory naming and the artifact suffix table.

use std::path::PathBuf;

use crate::core::config::BuildConfig;
use crate::core::target::TargetOs;

/// Directory (relative to the source root) holding all generated build trees.
pub const OUT_ROOT: &str = "out";

const WIN_SUFFIXES: &[&str] = &[".lib", ".dll", ".pdb", ".exp", ".ilk"];
const LINUX_SUFFIXES: &[&str] = &[".a", ".so"];
const APPLE_SUFFIXES: &[&str] = &[".a", ".dylib"];
const ALL_SUFFIXES: &[&str] = &[".lib", ".dll", ".pdb", ".exp", ".ilk", ".a", ".so", ".dylib"];

/// Name of the build directory: `<Shared|Static>-<cpu>-<chain>`.
pub fn output_dir_name(config: &BuildConfig) -> String {
    let linkage = if config.is_component_build() {
        "Shared"
    } else {
        "Static"
    };
    format!(
        "{}-{}-{}",
        linkage,
        config.effective_cpu(),
        config.build_chain().as_str()
    )
}

/// Build directory relative to the source root, e.g. `out/Shared-x64-gn`.
pub fn output_dir(config: &BuildConfig) -> PathBuf {
    PathBuf::from(OUT_ROOT).join(output_dir_name(config))
}

/// File suffixes treated as build artifacts for a target OS.
///
/// With no OS, every known suffix matches.
pub fn artifact_suffixes(os: Option<TargetOs>) -> &'static [&'static str] {
    match os {
        Some(TargetOs::Win) => WIN_SUFFIXES,
        Some(TargetOs::Linux) | Some(TargetOs::Ohos) => LINUX_SUFFIXES,
        Some(TargetOs::Apple) => APPLE_SUFFIXES,
        None => ALL_SUFFIXES,
    }
}

/// Whether a file name is an artifact for the given OS.
pub fn is_artifact(file_name: &str, os: Option<TargetOs>) -> bool {
    artifact_suffixes(os)
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}
