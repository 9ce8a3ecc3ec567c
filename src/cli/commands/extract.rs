use anyhow::{Context, Result};

use super::super::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    report::{print_texts, print_warnings},
};
use super::CommandContext;
use crate::core::pipeline::Pipeline;

/// Extract without translating or writing anything.
///
/// Fails when any file produced an error-severity warning (unparsable or
/// unreadable source).
pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = CommandContext::new(&args.common)?;

    let run = Pipeline::new(&ctx.config, &ctx.root)
        .with_verbose(ctx.verbose)
        .extract()?;

    if args.json {
        let json = serde_json::to_string_pretty(&run.report())
            .context("Failed to serialize extraction report")?;
        println!("{}", json);
    } else {
        print_texts(&run);
    }
    print_warnings(&run.result.warnings, ctx.verbose);

    Ok(ExitStatus::from_warnings(&run.result.warnings))
}
