//! `skbuild plan` command

use anyhow::Result;

use crate::cli::PlanArgs;
use crate::commands::resolve_config;
use skbuild::ops::skbuild_build::{plan, BuildRequest};
use skbuild::util::fs::canonical_dir;

pub fn execute(args: PlanArgs) -> Result<()> {
    let source_root = canonical_dir(&args.source_dir)?;
    let (project, config) = resolve_config(&source_root, &args.config)?;
    let req = BuildRequest::new(source_root, config, &project);
    let plan = plan(&req);

    if args.json {
        println!("{}", plan.to_json(&req.config)?);
        return Ok(());
    }

    println!("out_dir: {}", plan.out_dir.display());
    println!("flags:");
    for flag in plan.flags.iter() {
        println!("  {}", flag);
    }
    println!("generate: {}", plan.generate.display_command());
    println!("compile:  {}", plan.compile.display_command());

    Ok(())
}
