//! `skbuild sync` command

use std::time::Duration;

use anyhow::{bail, Result};

use crate::cli::SyncArgs;
use skbuild::ops::sync::{copy_newer, replace_if_stale};

pub fn execute(args: SyncArgs) -> Result<()> {
    if !args.src.is_dir() {
        bail!("source directory not found: {}", args.src.display());
    }

    let slack = Duration::from_secs(args.slack_secs);
    let changed = if args.replace {
        replace_if_stale(&args.src, &args.dst, slack)?
    } else {
        copy_newer(&args.src, &args.dst, slack)?
    };

    if changed {
        eprintln!("      Synced {}", args.dst.display());
    } else {
        eprintln!("  Up to date {}", args.dst.display());
    }

    Ok(())
}
