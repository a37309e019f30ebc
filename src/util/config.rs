//! Project configuration file support.
//!
//! An optional `skbuild.toml` in the source root supplies defaults for build
//! options, tool locations, the staging folder and mirrored directories.
//! Command-line values always take precedence.
//!
//! ```toml
//! [build]
//! target_os = "LINUX"
//! is_debug = "no"
//!
//! [tools]
//! gn = "bin/gn"
//! ninja = "ninja"
//!
//! [tools.env]
//! NINJA_STATUS = "[%f/%t] "
//!
//! [[sync.dirs]]
//! from = "include"
//! to = "lib/include"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::boolish::parse_bool;
use crate::core::config::BuildOptions;
use crate::core::error::ConfigError;

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "skbuild.toml";

/// Default generator location, relative to the source root.
pub const DEFAULT_GN: &str = "bin/gn";

/// Default build runner.
pub const DEFAULT_NINJA: &str = "ninja";

/// Default staging folder, relative to the source root.
pub const DEFAULT_LIB_DIR: &str = "lib";

/// Default timestamp tolerance for directory sync.
pub const DEFAULT_SLACK_SECS: u64 = 10;

/// skbuild project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Build option defaults
    pub build: BuildSection,

    /// External tool locations
    pub tools: ToolsConfig,

    /// Artifact staging
    pub stage: StageConfig,

    /// Mirrored directories
    pub sync: SyncConfig,
}

/// A boolean that may be written as a TOML bool or a boolean-like string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolLike {
    Bool(bool),
    Text(String),
}

impl BoolLike {
    fn resolve(&self) -> Result<bool, ConfigError> {
        match self {
            BoolLike::Bool(b) => Ok(*b),
            BoolLike::Text(s) => parse_bool(s),
        }
    }
}

/// The `[build]` table. Same names as the command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub is_debug: Option<BoolLike>,
    pub is_component_build: Option<BoolLike>,
    pub is_trivial_abi: Option<BoolLike>,
    pub target_cpu: Option<String>,
    pub target_os: Option<String>,
    pub build_chain: Option<String>,
    pub compiler: Option<String>,
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub clang_win: Option<String>,
    pub single_threaded_build: Option<BoolLike>,
}

impl BuildSection {
    /// Validate the table into build options.
    pub fn to_options(&self) -> Result<BuildOptions, ConfigError> {
        let flag = |v: &Option<BoolLike>| v.as_ref().map(BoolLike::resolve).transpose();

        Ok(BuildOptions {
            is_debug: flag(&self.is_debug)?,
            is_component_build: flag(&self.is_component_build)?,
            is_trivial_abi: flag(&self.is_trivial_abi)?,
            target_cpu: self.target_cpu.clone(),
            target_os: self.target_os.as_deref().map(str::parse).transpose()?,
            build_chain: self.build_chain.as_deref().map(str::parse).transpose()?,
            compiler: self.compiler.as_deref().map(str::parse).transpose()?,
            cc: self.cc.clone(),
            cxx: self.cxx.clone(),
            clang_win: self.clang_win.clone(),
            single_threaded_build: flag(&self.single_threaded_build)?,
        })
    }
}

/// The `[tools]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Path to the build-file generator, relative paths resolve against the source root
    pub gn: PathBuf,

    /// Build runner program
    pub ninja: PathBuf,

    /// Extra environment variables for both tools
    pub env: BTreeMap<String, String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            gn: PathBuf::from(DEFAULT_GN),
            ninja: PathBuf::from(DEFAULT_NINJA),
            env: BTreeMap::new(),
        }
    }
}

/// The `[stage]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Destination folder for staged artifacts
    pub dest: Option<PathBuf>,
}

/// How a mirrored directory is refreshed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Copy only files newer than their destination counterpart.
    #[default]
    Newer,
    /// Replace the whole destination tree when anything is stale.
    Replace,
}

/// A directory mirrored after staging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncDir {
    pub from: PathBuf,
    pub to: PathBuf,
    #[serde(default)]
    pub mode: SyncMode,
}

/// The `[sync]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Timestamp tolerance in seconds
    pub slack_secs: u64,

    pub dirs: Vec<SyncDir>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            slack_secs: DEFAULT_SLACK_SECS,
            dirs: Vec::new(),
        }
    }
}

impl SyncConfig {
    pub fn slack(&self) -> Duration {
        Duration::from_secs(self.slack_secs)
    }
}

impl ProjectConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load `skbuild.toml` from the source root, or defaults if it is absent.
    pub fn load_from_root(source_root: &Path) -> Result<Self> {
        let path = source_root.join(CONFIG_FILE);
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
