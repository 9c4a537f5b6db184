mod prompt;
mod reader;

use std::io::BufReader;

use oak_core::enums::ConflictStrategy;
use oak_core::merge::ConflictPolicy;
use tracing::{info, warn};

use crate::cli::root_commands::ImportArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

use prompt::PromptResolver;
use reader::read_records;

/// Handle `oak import`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = read_records(&args.file)?;
    let strategy = args
        .policy
        .map_or(ctx.config.import.default_policy, ConflictStrategy::from);
    info!(
        file = %args.file.display(),
        records = records.len(),
        policy = %strategy,
        "importing entries"
    );

    let mut prompt = PromptResolver::new(BufReader::new(std::io::stdin()), std::io::stderr());
    let mut policy = match ConflictPolicy::from_strategy(strategy) {
        Some(policy) => policy,
        None => ConflictPolicy::Ask(&mut prompt),
    };

    // Prompts and a redrawing bar would fight over the terminal.
    let progress = if strategy == ConflictStrategy::Ask {
        Progress::hidden()
    } else {
        Progress::bar(records.len() as u64, "importing")
    };

    let summary = ctx
        .service
        .import_batch_with(records, &mut policy, &ctx.validator, |detail| {
            progress.set_message(&detail.name);
            progress.inc(1);
        })
        .await;

    if summary.errors > 0 {
        progress.finish_err(&format!("{} record(s) failed", summary.errors));
        warn!(errors = summary.errors, "some records were not imported");
    } else {
        progress.finish_ok("done");
    }

    if flags.format == OutputFormat::Table {
        output(&summary.details, flags.format)
    } else {
        output(&summary, flags.format)
    }
}
