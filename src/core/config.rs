//! Build configuration resolution.
//!
//! Options arrive from two layers, the command line and the project's
//! `skbuild.toml`. Each layer produces a [`BuildOptions`] where every field is
//! optional; layers are merged (command line first) and the result is
//! resolved into an immutable [`BuildConfig`] with defaults applied.

use serde::Serialize;

use crate::core::error::ConfigError;
use crate::core::target::{BuildChain, Compiler, TargetOs};

/// Default target CPU.
pub const DEFAULT_TARGET_CPU: &str = "x64";

/// Partially specified build options from a single source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub is_debug: Option<bool>,
    pub is_component_build: Option<bool>,
    pub is_trivial_abi: Option<bool>,
    pub target_cpu: Option<String>,
    pub target_os: Option<TargetOs>,
    pub build_chain: Option<BuildChain>,
    pub compiler: Option<Compiler>,
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub clang_win: Option<String>,
    pub single_threaded_build: Option<bool>,
}

impl BuildOptions {
    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: BuildOptions) -> BuildOptions {
        BuildOptions {
            is_debug: self.is_debug.or(fallback.is_debug),
            is_component_build: self.is_component_build.or(fallback.is_component_build),
            is_trivial_abi: self.is_trivial_abi.or(fallback.is_trivial_abi),
            target_cpu: self.target_cpu.or(fallback.target_cpu),
            target_os: self.target_os.or(fallback.target_os),
            build_chain: self.build_chain.or(fallback.build_chain),
            compiler: self.compiler.or(fallback.compiler),
            cc: self.cc.or(fallback.cc),
            cxx: self.cxx.or(fallback.cxx),
            clang_win: self.clang_win.or(fallback.clang_win),
            single_threaded_build: self.single_threaded_build.or(fallback.single_threaded_build),
        }
    }
}

/// Fully resolved, immutable build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    is_debug: bool,
    is_component_build: bool,
    is_trivial_abi: bool,
    target_cpu: String,
    target_os: TargetOs,
    build_chain: BuildChain,
    compiler: Compiler,
    cc: Option<String>,
    cxx: Option<String>,
    clang_win: Option<String>,
    single_threaded_build: bool,
}

impl BuildConfig {
    /// Resolve options into a configuration, applying defaults.
    ///
    /// Fails with [`ConfigError::MissingToolchainDir`] when targeting WIN
    /// without a toolchain directory.
    pub fn resolve(opts: BuildOptions) -> Result<Self, ConfigError> {
        let target_os = opts.target_os.unwrap_or(TargetOs::Win);
        let clang_win = non_empty(opts.clang_win);

        if target_os == TargetOs::Win && clang_win.is_none() {
            return Err(ConfigError::MissingToolchainDir);
        }

        Ok(BuildConfig {
            is_debug: opts.is_debug.unwrap_or(true),
            is_component_build: opts.is_component_build.unwrap_or(true),
            is_trivial_abi: opts.is_trivial_abi.unwrap_or(true),
            target_cpu: non_empty(opts.target_cpu).unwrap_or_else(|| DEFAULT_TARGET_CPU.to_string()),
            target_os,
            build_chain: opts.build_chain.unwrap_or(BuildChain::Gn),
            compiler: opts.compiler.unwrap_or(Compiler::Clang),
            cc: non_empty(opts.cc),
            cxx: non_empty(opts.cxx),
            clang_win,
            single_threaded_build: opts.single_threaded_build.unwrap_or(false),
        })
    }

    pub fn is_debug(&self) -> bool {
        self.is_debug
    }

    pub fn is_component_build(&self) -> bool {
        self.is_component_build
    }

    pub fn is_trivial_abi(&self) -> bool {
        self.is_trivial_abi
    }

    /// The CPU as requested, before any OS-specific override.
    pub fn target_cpu(&self) -> &str {
        &self.target_cpu
    }

    /// The CPU actually built for. OHOS builds are always arm64.
    pub fn effective_cpu(&self) -> &str {
        match self.target_os {
            TargetOs::Ohos => "arm64",
            _ => &self.target_cpu,
        }
    }

    pub fn target_os(&self) -> TargetOs {
        self.target_os
    }

    pub fn build_chain(&self) -> BuildChain {
        self.build_chain
    }

    pub fn compiler(&self) -> Compiler {
        self.compiler
    }

    pub fn cc(&self) -> Option<&str> {
        self.cc.as_deref()
    }

    pub fn cxx(&self) -> Option<&str> {
        self.cxx.as_deref()
    }

    pub fn clang_win(&self) -> Option<&str> {
        self.clang_win.as_deref()
    }

    pub fn single_threaded_build(&self) -> bool {
        self.single_threaded_build
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
