//! `skbuild build` command

use std::time::Instant;

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::resolve_config;
use skbuild::ops::skbuild_build::{build, plan, BuildRequest};
use skbuild::util::SystemExecutor;
use skbuild::util::fs::canonical_dir;

pub fn execute(args: BuildArgs) -> Result<()> {
    let source_root = canonical_dir(&args.source_dir)?;
    let (project, config) = resolve_config(&source_root, &args.config)?;

    let mut req = BuildRequest::new(source_root, config, &project);
    if let Some(lib_dir) = args.lib_dir {
        req = req.with_lib_dir(lib_dir);
    }

    if args.dry_run {
        let plan = plan(&req);
        println!("{}", plan.generate.display_command());
        println!("{}", plan.compile.display_command());
        return Ok(());
    }

    let start = Instant::now();
    let result = build(&req, &mut SystemExecutor)?;

    for name in &result.staged.copied {
        eprintln!("      Staged {}", name);
    }
    for dir in &result.synced {
        eprintln!("      Synced {}", dir.display());
    }
    eprintln!(
        "    Finished {} in {:.2}s",
        result.plan.out_dir.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
