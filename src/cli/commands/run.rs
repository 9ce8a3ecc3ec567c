use anyhow::Result;

use super::super::{
    args::RunCommand,
    exit_status::ExitStatus,
    report::{print_run_summary, print_warnings},
};
use super::CommandContext;
use crate::core::pipeline::Pipeline;
use crate::core::translate::build_translator;

pub fn run(cmd: RunCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = CommandContext::new(&args.common)?;

    let translation = &ctx.config.translation;
    let translator = build_translator(
        translation.provider,
        translation.glossary.as_deref(),
        &ctx.config.interpolation()?,
        &ctx.root,
    )?;
    if ctx.verbose {
        eprintln!("Translating with provider: {}", translator.name());
    }

    let summary = Pipeline::new(&ctx.config, &ctx.root)
        .with_verbose(ctx.verbose)
        .run(translator, args.dry_run)?;

    print_warnings(&summary.warnings, ctx.verbose);
    print_run_summary(&summary);

    Ok(ExitStatus::Success)
}
