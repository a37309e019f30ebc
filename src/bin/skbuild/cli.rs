//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use skbuild::core::{parse_bool, BuildChain, BuildOptions, Compiler, TargetOs};

/// skbuild - configure, build and stage Skia with gn and ninja
///
/// Running without a subcommand performs `build`.
#[derive(Parser)]
#[command(name = "skbuild")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build: BuildArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate build files, compile, and stage artifacts
    Build(BuildArgs),

    /// Show the generator flags and tool invocations without running them
    Plan(PlanArgs),

    /// Copy artifacts from a build directory into a staging folder
    Stage(StageArgs),

    /// Mirror a directory tree, copying only what changed
    Sync(SyncArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Build configuration flags.
///
/// Boolean flags take yes/true/t/y/1/on or no/false/f/n/0/off; a bare
/// flag means true.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Debug build [default: true]
    #[arg(long = "is_debug", value_name = "BOOL", value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
    pub is_debug: Option<bool>,

    /// Shared (component) build instead of static [default: true]
    #[arg(long = "is_component_build", value_name = "BOOL", value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
    pub is_component_build: Option<bool>,

    /// Pass is_trivial_abi to the generator [default: true]
    #[arg(long = "is_trivial_abi", value_name = "BOOL", value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
    pub is_trivial_abi: Option<bool>,

    /// Target CPU [default: x64]
    #[arg(long = "target_cpu", value_name = "CPU")]
    pub target_cpu: Option<String>,

    /// Target OS: WIN, LINUX, OHOS or APPLE [default: WIN]
    #[arg(long = "target_os", value_name = "OS")]
    pub target_os: Option<TargetOs>,

    /// Build chain: gn, cmake or vs [default: gn]
    #[arg(long = "build_chain", value_name = "CHAIN")]
    pub build_chain: Option<BuildChain>,

    /// Compiler: msvc or clang [default: clang]
    #[arg(long = "compiler", value_name = "COMPILER")]
    pub compiler: Option<Compiler>,

    /// Explicit C compiler path
    #[arg(long = "cc", value_name = "PATH")]
    pub cc: Option<String>,

    /// Explicit C++ compiler path
    #[arg(long = "cxx", value_name = "PATH")]
    pub cxx: Option<String>,

    /// LLVM toolchain directory, required when targeting WIN
    #[arg(long = "clang_win", value_name = "DIR", env = "SKBUILD_CLANG_WIN")]
    pub clang_win: Option<String>,

    /// Run ninja with a single job [default: false]
    #[arg(long = "single_threaded_build", value_name = "BOOL", value_parser = parse_bool, num_args = 0..=1, default_missing_value = "true")]
    pub single_threaded_build: Option<bool>,
}

impl ConfigArgs {
    /// Options given on the command line.
    pub fn to_options(&self) -> BuildOptions {
        BuildOptions {
            is_debug: self.is_debug,
            is_component_build: self.is_component_build,
            is_trivial_abi: self.is_trivial_abi,
            target_cpu: self.target_cpu.clone(),
            target_os: self.target_os,
            build_chain: self.build_chain,
            compiler: self.compiler,
            cc: self.cc.clone(),
            cxx: self.cxx.clone(),
            clang_win: self.clang_win.clone(),
            single_threaded_build: self.single_threaded_build,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Source root containing bin/gn and skbuild.toml
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Staging folder for built libraries [default: lib]
    #[arg(long, value_name = "DIR")]
    pub lib_dir: Option<PathBuf>,

    /// Print the tool invocations without running them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Source root containing bin/gn and skbuild.toml
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StageArgs {
    /// Build directory to collect artifacts from
    pub out_dir: PathBuf,

    /// Destination folder
    #[arg(long, default_value = "lib")]
    pub dest: PathBuf,

    /// Only stage artifacts for this OS (all known suffixes when omitted)
    #[arg(long = "target_os", value_name = "OS")]
    pub target_os: Option<TargetOs>,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Source directory
    pub src: PathBuf,

    /// Destination directory
    pub dst: PathBuf,

    /// Replace the whole destination tree when anything is stale
    #[arg(long)]
    pub replace: bool,

    /// Timestamp tolerance in seconds
    #[arg(long, value_name = "SECS", default_value_t = skbuild::util::config::DEFAULT_SLACK_SECS)]
    pub slack_secs: u64,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
