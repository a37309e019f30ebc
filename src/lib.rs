//! skbuild - a build driver for Skia
//!
//! This crate resolves a build configuration, drives `gn` and `ninja` as
//! external processes, and stages the produced libraries into a local folder.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for skbuild unit tests.
///
/// Only compiled for tests. Provides a recording process executor so the
/// pipeline can be exercised without launching real tools.
#[cfg(test)]
pub mod test_support;

pub use crate::core::config::{BuildConfig, BuildOptions};
pub use crate::core::flags::FlagList;
pub use crate::core::target::{BuildChain, Compiler, TargetOs};
pub use crate::util::process::{Executor, ProcessBuilder, SystemExecutor};
