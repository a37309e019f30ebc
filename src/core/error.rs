//! Configuration error types.

use thiserror::Error;

/// Error raised while resolving a build configuration.
///
/// Every variant is detected before any external tool is started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid boolean value `{value}`; expected one of yes/true/t/y/1/on or no/false/f/n/0/off")]
    InvalidBool { value: String },

    #[error("unknown target OS `{value}`; expected WIN, LINUX, OHOS or APPLE")]
    UnknownTargetOs { value: String },

    #[error("unknown compiler `{value}`; expected msvc or clang")]
    UnknownCompiler { value: String },

    #[error("unknown build chain `{value}`; expected gn, cmake or vs")]
    UnknownBuildChain { value: String },

    #[error("target OS WIN requires a toolchain directory (pass --clang_win or set SKBUILD_CLANG_WIN)")]
    MissingToolchainDir,
}
