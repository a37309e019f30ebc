//! Command implementations

pub mod build;
pub mod completions;
pub mod plan;
pub mod stage;
pub mod sync;

use std::path::Path;

use anyhow::Result;

use crate::cli::ConfigArgs;
use skbuild::core::BuildConfig;
use skbuild::util::ProjectConfig;

/// Load `skbuild.toml` and resolve the build configuration.
///
/// Command-line values win over the config file.
pub fn resolve_config(source_root: &Path, args: &ConfigArgs) -> Result<(ProjectConfig, BuildConfig)> {
    let project = ProjectConfig::load_from_root(source_root)?;
    let opts = args.to_options().or(project.build.to_options()?);
    let config = BuildConfig::resolve(opts)?;
    Ok((project, config))
}
