//! Core data model: build configuration, targets and generator flags.

pub mod boolish;
pub mod config;
pub mod error;
pub mod flags;
pub mod layout;
pub mod target;

pub use boolish::parse_bool;
pub use config::{BuildConfig, BuildOptions};
pub use error::ConfigError;
pub use flags::{Flag, FlagList, GnValue};
pub use layout::{artifact_suffixes, output_dir, output_dir_name};
pub use target::{BuildChain, Compiler, TargetOs};
