//! High-level operations.
//!
//! This module contains the implementation of skbuild commands.

pub mod skbuild_build;
pub mod stage;
pub mod sync;

pub use skbuild_build::{build, plan, BuildPlan, BuildRequest, BuildResult};
pub use stage::{stage_artifacts, StageReport};
pub use sync::{copy_newer, is_stale, replace_if_stale};
