//! `skbuild stage` command

use anyhow::Result;

use crate::cli::StageArgs;
use skbuild::ops::stage::stage_artifacts;

pub fn execute(args: StageArgs) -> Result<()> {
    let report = stage_artifacts(&args.out_dir, &args.dest, args.target_os)?;

    for name in &report.copied {
        eprintln!("      Staged {}", name);
    }
    eprintln!(
        "    Finished {} copied, {} up to date",
        report.copied.len(),
        report.fresh.len()
    );

    Ok(())
}
