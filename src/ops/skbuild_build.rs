//! Implementation of `skbuild build`.
//!
//! The pipeline runs strictly in sequence: `gn gen`, then `ninja`, then
//! artifact staging, then any mirrored directory syncs. The first failure
//! stops everything; generated files are left in place for inspection.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::core::config::BuildConfig;
use crate::core::flags::FlagList;
use crate::core::layout::output_dir;
use crate::ops::stage::{stage_artifacts, StageReport};
use crate::ops::sync::{copy_newer, replace_if_stale};
use crate::util::config::{ProjectConfig, SyncDir, SyncMode, ToolsConfig, DEFAULT_LIB_DIR};
use crate::util::process::{Executor, ProcessBuilder};

/// Everything needed to run one build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Source root; both tools run here
    pub source_root: PathBuf,

    pub config: BuildConfig,

    pub tools: ToolsConfig,

    /// Staging folder, relative paths resolve against the source root
    pub lib_dir: PathBuf,

    /// Directories mirrored after staging
    pub sync_dirs: Vec<SyncDir>,

    /// Timestamp tolerance for mirrored directories
    pub slack: Duration,
}

impl BuildRequest {
    /// Create a request using the settings of a project config.
    pub fn new(source_root: impl Into<PathBuf>, config: BuildConfig, project: &ProjectConfig) -> Self {
        BuildRequest {
            source_root: source_root.into(),
            config,
            tools: project.tools.clone(),
            lib_dir: project
                .stage
                .dest
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LIB_DIR)),
            sync_dirs: project.sync.dirs.clone(),
            slack: project.sync.slack(),
        }
    }

    /// Override the staging folder.
    pub fn with_lib_dir(mut self, lib_dir: impl Into<PathBuf>) -> Self {
        self.lib_dir = lib_dir.into();
        self
    }
}

/// The resolved invocations for a build, before anything runs.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub flags: FlagList,

    /// Build directory relative to the source root
    pub out_dir: PathBuf,

    /// `gn gen` invocation
    pub generate: ProcessBuilder,

    /// `ninja` invocation
    pub compile: ProcessBuilder,
}

/// Machine-readable form of a [`BuildPlan`].
#[derive(Debug, Serialize)]
struct PlanJson<'a> {
    config: &'a BuildConfig,
    flags: Vec<String>,
    out_dir: String,
    generate: Vec<String>,
    compile: Vec<String>,
}

impl BuildPlan {
    /// Render the plan as pretty JSON.
    pub fn to_json(&self, config: &BuildConfig) -> Result<String> {
        let argv = |pb: &ProcessBuilder| {
            let mut v = vec![pb.get_program().display().to_string()];
            v.extend(pb.get_args().iter().cloned());
            v
        };
        let json = PlanJson {
            config,
            flags: self.flags.to_strings(),
            out_dir: self.out_dir.display().to_string(),
            generate: argv(&self.generate),
            compile: argv(&self.compile),
        };
        Ok(serde_json::to_string_pretty(&json)?)
    }
}

/// Result of a completed build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub plan: BuildPlan,
    pub staged: StageReport,

    /// Mirrored destinations that received changes
    pub synced: Vec<PathBuf>,
}

/// Resolve a tool path against the source root.
///
/// Bare program names are left for `PATH` lookup.
fn resolve_tool(root: &Path, tool: &Path) -> PathBuf {
    if tool.is_absolute() || tool.components().count() == 1 {
        tool.to_path_buf()
    } else {
        root.join(tool)
    }
}

/// Compute the flag list and both tool invocations.
pub fn plan(req: &BuildRequest) -> BuildPlan {
    let flags = FlagList::assemble(&req.config);
    let out_dir = output_dir(&req.config);

    let mut generate = ProcessBuilder::new(resolve_tool(&req.source_root, &req.tools.gn))
        .arg("gen")
        .arg(&out_dir)
        .arg(flags.to_gn_arg())
        .args(req.config.build_chain().generator_args())
        .cwd(&req.source_root);

    let mut compile = ProcessBuilder::new(resolve_tool(&req.source_root, &req.tools.ninja))
        .arg("-C")
        .arg(&out_dir)
        .cwd(&req.source_root);
    if req.config.single_threaded_build() {
        compile = compile.args(["-j", "1"]);
    }

    for (key, value) in &req.tools.env {
        generate = generate.env(key, value);
        compile = compile.env(key, value);
    }

    BuildPlan {
        flags,
        out_dir,
        generate,
        compile,
    }
}

/// Run the full build pipeline.
pub fn build(req: &BuildRequest, executor: &mut dyn Executor) -> Result<BuildResult> {
    let plan = plan(req);

    tracing::info!("generating {}", plan.out_dir.display());
    tracing::info!("{}", plan.generate.display_command());
    executor.execute_checked(&plan.generate)?;

    tracing::info!("{}", plan.compile.display_command());
    executor.execute_checked(&plan.compile)?;

    let out_dir = req.source_root.join(&plan.out_dir);
    let lib_dir = req.source_root.join(&req.lib_dir);
    let staged = stage_artifacts(&out_dir, &lib_dir, Some(req.config.target_os()))?;
    tracing::info!(
        "staged {} artifact(s) into {} ({} up to date)",
        staged.copied.len(),
        lib_dir.display(),
        staged.fresh.len()
    );

    let mut synced = Vec::new();
    for dir in &req.sync_dirs {
        let from = req.source_root.join(&dir.from);
        let to = req.source_root.join(&dir.to);
        let changed = match dir.mode {
            SyncMode::Newer => copy_newer(&from, &to, req.slack)?,
            SyncMode::Replace => replace_if_stale(&from, &to, req.slack)?,
        };
        if changed {
            tracing::info!("synced {} -> {}", from.display(), to.display());
            synced.push(to);
        }
    }

    Ok(BuildResult {
        plan,
        staged,
        synced,
    })
}
