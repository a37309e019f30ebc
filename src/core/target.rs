//! Target platform, compiler and build chain enumerations.

use std::fmt;

use serde::Serialize;

use crate::core::error::ConfigError;

/// Operating system the library is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetOs {
    Win,
    Linux,
    Ohos,
    Apple,
}

impl TargetOs {
    /// All known target operating systems.
    pub const ALL: [TargetOs; 4] = [TargetOs::Win, TargetOs::Linux, TargetOs::Ohos, TargetOs::Apple];

    /// The literal gn expects for `target_os`.
    pub fn gn_name(self) -> &'static str {
        match self {
            TargetOs::Win => "win",
            TargetOs::Linux => "linux",
            TargetOs::Ohos => "ohos",
            TargetOs::Apple => "mac",
        }
    }

    /// Whether the GPU backend (GL/EGL) is enabled for this OS.
    pub fn enables_gpu(self) -> bool {
        matches!(self, TargetOs::Linux | TargetOs::Ohos)
    }

    /// Whether a default clang toolchain is injected when no compiler path is given.
    pub fn uses_default_toolchain(self) -> bool {
        matches!(self, TargetOs::Linux | TargetOs::Ohos)
    }
}

impl std::str::FromStr for TargetOs {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WIN" => Ok(TargetOs::Win),
            "LINUX" => Ok(TargetOs::Linux),
            "OHOS" => Ok(TargetOs::Ohos),
            "APPLE" => Ok(TargetOs::Apple),
            _ => Err(ConfigError::UnknownTargetOs {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetOs::Win => "WIN",
            TargetOs::Linux => "LINUX",
            TargetOs::Ohos => "OHOS",
            TargetOs::Apple => "APPLE",
        };
        write!(f, "{}", s)
    }
}

/// Compiler family used for the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compiler {
    Msvc,
    Clang,
}

impl std::str::FromStr for Compiler {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "msvc" => Ok(Compiler::Msvc),
            "clang" => Ok(Compiler::Clang),
            _ => Err(ConfigError::UnknownCompiler {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compiler::Msvc => write!(f, "msvc"),
            Compiler::Clang => write!(f, "clang"),
        }
    }
}

/// Build-file flavor produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildChain {
    /// Plain ninja files.
    Gn,
    /// Ninja files plus a CMake project generated from gn's JSON IDE output.
    Cmake,
    /// Ninja files plus a Visual Studio solution.
    Vs,
}

impl BuildChain {
    /// Name used in the output directory.
    pub fn as_str(self) -> &'static str {
        match self {
            BuildChain::Gn => "gn",
            BuildChain::Cmake => "cmake",
            BuildChain::Vs => "vs",
        }
    }

    /// Extra arguments appended to `gn gen` for this chain.
    pub fn generator_args(self) -> &'static [&'static str] {
        match self {
            BuildChain::Gn => &[],
            BuildChain::Cmake => &["--ide=json", "--json-ide-script=../../gn/gn_to_cmake.py"],
            BuildChain::Vs => &["--ide=vs"],
        }
    }
}

impl std::str::FromStr for BuildChain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gn" => Ok(BuildChain::Gn),
            "cmake" => Ok(BuildChain::Cmake),
            "vs" => Ok(BuildChain::Vs),
            _ => Err(ConfigError::UnknownBuildChain {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BuildChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
