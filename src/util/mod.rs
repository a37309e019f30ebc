//! Shared utilities

pub mod config;
pub mod fs;
pub mod process;

pub use config::ProjectConfig;
pub use process::{Executor, ProcessBuilder, ProcessError, SystemExecutor};
